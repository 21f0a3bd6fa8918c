//! Checkout-session API endpoint.
//!
//! The "external payment backend" of the page's checkout flow, served
//! in-repo: accepts the selected amount and the purchasing user, creates a
//! provider session with the secret key, and returns the session id.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shardkeep_core::Price;

use crate::error::AppError;
use crate::models::DiscordUser;
use crate::state::AppState;

/// Request body: the selected bundle's price and the purchasing user.
#[derive(Debug, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Amount in whole US dollars.
    pub amount: Price,
    /// Purchasing user; `null` creates a session without attribution.
    #[serde(default)]
    pub user: Option<DiscordUser>,
}

/// Response body: the provider session id.
#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
}

/// Create a checkout session.
///
/// # Route
///
/// `POST /api/checkout`
#[instrument(skip(state, body), fields(amount = %body.amount))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, AppError> {
    let session = state
        .gateway()
        .create_checkout_session(body.amount, body.user.as_ref())
        .await?;

    Ok(Json(CheckoutSessionResponse { id: session.id }))
}
