//! Discord OAuth route handlers.
//!
//! Handles the OAuth flow for Discord authentication:
//! - Login: Redirects to Discord's OAuth authorization page
//! - Callback: Validates state, exchanges the code, stores the user
//! - Logout: Clears the session user

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::session_keys;
use crate::state::AppState;

/// Query parameters from the Discord OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for a token.
    pub code: Option<String>,
    /// State parameter for CSRF protection.
    pub state: Option<String>,
    /// Error code if authorization failed.
    pub error: Option<String>,
    /// Error description.
    pub error_description: Option<String>,
}

/// Generate a cryptographically secure random string.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Initiate Discord OAuth login.
///
/// Generates a state parameter, stores it in the session, and redirects to
/// Discord's authorization page.
///
/// # Route
///
/// `GET /api/login`
pub async fn login(State(state): State<AppState>, session: Session) -> Response {
    let oauth_state = generate_random_string(32);

    // Store in session for validation on callback
    if let Err(e) = session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await
    {
        tracing::error!("Failed to store OAuth state in session: {}", e);
        return Redirect::to("/store?error=session").into_response();
    }

    // Build the redirect URI
    let redirect_uri = format!("{}/api/callback", state.config().base_url);

    // Generate and redirect to authorization URL
    let auth_url = state
        .discord()
        .authorization_url(&redirect_uri, &oauth_state);

    Redirect::to(&auth_url).into_response()
}

/// Handle the Discord OAuth callback.
///
/// Validates the state parameter, exchanges the authorization code for a
/// token, fetches the user's identity, and stores it in the session.
///
/// # Route
///
/// `GET /api/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    // Check for OAuth errors from Discord
    if let Some(error) = query.error {
        let description = query.error_description.unwrap_or_default();
        tracing::warn!("Discord OAuth error: {} - {}", error, description);
        return Redirect::to("/store?error=discord_denied").into_response();
    }

    // Verify we have an authorization code
    let Some(code) = query.code else {
        tracing::warn!("Discord OAuth callback missing code");
        return Redirect::to("/store?error=missing_code").into_response();
    };

    // Verify state parameter (CSRF protection)
    let Some(returned_state) = query.state else {
        tracing::warn!("Discord OAuth callback missing state");
        return Redirect::to("/store?error=missing_state").into_response();
    };

    let stored_state: Option<String> = session
        .get(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();

    if stored_state.as_ref() != Some(&returned_state) {
        tracing::warn!("Discord OAuth state mismatch");
        return Redirect::to("/store?error=invalid_state").into_response();
    }

    // Clear the stored state (one-time use)
    let _ = session.remove::<String>(session_keys::OAUTH_STATE).await;

    // Build redirect URI (must match the one used in authorization request)
    let redirect_uri = format!("{}/api/callback", state.config().base_url);

    // Exchange code for a token
    let token = match state.discord().exchange_code(&code, &redirect_uri).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to exchange Discord OAuth code: {}", e);
            return Redirect::to("/store?error=token_exchange").into_response();
        }
    };

    // Fetch the user's identity
    let user = match state.discord().fetch_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to fetch Discord user: {}", e);
            return Redirect::to("/store?error=identity").into_response();
        }
    };

    // Store the user in the session
    if let Err(e) = set_current_user(&session, &user).await {
        tracing::error!("Failed to store user in session: {}", e);
        return Redirect::to("/store?error=session").into_response();
    }

    tracing::info!(user_id = %user.id, "Discord user authenticated");

    Redirect::to("/store").into_response()
}

/// Log out the current user.
///
/// Clears the user from the session and redirects back to the store.
///
/// # Route
///
/// `GET /api/logout`
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear user from session: {}", e);
    }

    Redirect::to("/store").into_response()
}
