//! Authentication extractors and session helpers.
//!
//! The session collaborator owns the user record; this module only reads
//! and writes the `"user"` slot. Handlers take [`crate::models::Viewer`]
//! when the anonymous case is part of the page, or [`RequireUser`] when the
//! action is unreachable for anonymous visitors.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{DiscordUser, Viewer, session_keys};

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<DiscordUser>(session_keys::USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self::from(user))
    }
}

/// Extractor that requires a logged-in user.
///
/// Anonymous requests are redirected back to the store page instead of
/// reaching the handler.
///
/// # Example
///
/// ```rust,ignore
/// async fn checkout(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Checking out as {}", user.tag())
/// }
/// ```
pub struct RequireUser(pub DiscordUser);

/// Rejection for [`RequireUser`]: back to the store page.
pub struct AnonymousRejection;

impl IntoResponse for AnonymousRejection {
    fn into_response(self) -> Response {
        Redirect::to("/store").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AnonymousRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Viewer::from_request_parts(parts, state).await {
            Ok(Viewer::Authenticated(user)) => Ok(Self(user)),
            Ok(Viewer::Anonymous) | Err(_) => Err(AnonymousRejection),
        }
    }
}

/// Helper to store the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &DiscordUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER, user).await
}

/// Helper to remove the logged-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.remove::<DiscordUser>(session_keys::USER).await?;
    Ok(())
}
