//! Checkout route handler.
//!
//! Runs the two-step initiator against the selected bundle: create a
//! checkout session, then resolve the hosted redirect. Only a
//! provider-reported redirect error stays on the page (as the alert
//! banner); everything else propagates as [`AppError`].

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::{Selection, Viewer};
use crate::routes::store::StoreTemplate;
use crate::services::payments::PaymentError;
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    /// Index of the selected catalog tile.
    pub item: Option<i64>,
}

/// Start checkout for the selected bundle.
///
/// Unreachable for anonymous visitors ([`RequireUser`] redirects them back
/// to the store) and a no-op redirect when nothing is selected, mirroring
/// the disabled button in the UI.
#[instrument(skip(state, user, form), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let selection = Selection::from_param(form.item);
    let Some(item) = selection.item() else {
        return Ok(Redirect::to("/store").into_response());
    };

    let session = state.checkout().create_session(item.price, &user).await?;

    match state.checkout().redirect_to_checkout(&session).await {
        Ok(url) => Ok(Redirect::to(&url).into_response()),
        Err(PaymentError::Provider { message }) => {
            tracing::warn!(%message, "provider rejected hosted redirect");
            let page = StoreTemplate::page(Viewer::Authenticated(user), selection, Some(message));
            Ok(page.into_response())
        }
        Err(err) => Err(err.into()),
    }
}
