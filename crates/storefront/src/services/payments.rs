//! Payment provider clients.
//!
//! Two clients cover the two halves of the checkout flow:
//!
//! - [`CheckoutClient`] is the page side. It posts `{amount, user}` to the
//!   checkout-session endpoint, receives `{id}`, and resolves the hosted
//!   redirect with the provider using the publishable key.
//! - [`PaymentGateway`] is the backend side. It creates the provider
//!   session with the secret key (form-encoded POST, line item priced in
//!   cents) and backs the `POST /api/checkout` endpoint.
//!
//! Both endpoint bases come from configuration so deployments can split the
//! backend out and tests can stand in fakes.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shardkeep_core::Price;

use crate::config::PaymentsConfig;
use crate::models::{DiscordUser, catalog};

/// Errors that can occur in the checkout flow.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The provider reported an error for the hosted redirect.
    ///
    /// This is the one error the page surfaces to the user verbatim.
    #[error("Provider error: {message}")]
    Provider { message: String },
}

/// A checkout session issued by the payment backend.
///
/// Transient: used once to resolve the hosted redirect, never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Provider session identifier.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    amount: Price,
    user: &'a DiscordUser,
}

#[derive(Debug, Deserialize)]
struct RedirectResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

// =============================================================================
// CheckoutClient
// =============================================================================

/// Page-side checkout initiator.
#[derive(Clone)]
pub struct CheckoutClient {
    client: reqwest::Client,
    checkout_url: String,
    api_url: String,
    publishable_key: String,
}

impl CheckoutClient {
    /// Create a new checkout client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaymentsConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            checkout_url: config.checkout_url.clone(),
            api_url: config.api_url.clone(),
            publishable_key: config.publishable_key.clone(),
        })
    }

    /// Request a checkout session for the selected bundle.
    ///
    /// Sends `{"amount": <price>, "user": <identity>}` as JSON and expects
    /// `{"id": "<session id>"}` back.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, or a
    /// response without a session id.
    pub async fn create_session(
        &self,
        amount: Price,
        user: &DiscordUser,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(&self.checkout_url)
            .json(&CreateSessionRequest { amount, user })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;
        if session.id.is_empty() {
            return Err(PaymentError::Parse(
                "checkout session without an id".to_string(),
            ));
        }
        Ok(session)
    }

    /// Resolve the hosted checkout page for a session and hand back its URL.
    ///
    /// The provider resolves either a redirect URL or a provider-reported
    /// error (`{"error": {"message": ...}}`), which becomes
    /// [`PaymentError::Provider`] carrying the message verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Provider`] for a provider-reported error,
    /// other variants for transport and protocol failures.
    pub async fn redirect_to_checkout(
        &self,
        session: &CheckoutSession,
    ) -> Result<String, PaymentError> {
        let url = format!("{}/v1/payment_pages", self.api_url);
        let params = [
            ("session_id", session.id.as_str()),
            ("key", self.publishable_key.as_str()),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match serde_json::from_str::<RedirectResponse>(&text) {
            Ok(body) => {
                if let Some(error) = body.error {
                    return Err(PaymentError::Provider {
                        message: error.message,
                    });
                }
                body.url.ok_or_else(|| {
                    PaymentError::Parse("redirect response without a url".to_string())
                })
            }
            Err(e) if status.is_success() => Err(PaymentError::Parse(e.to_string())),
            Err(_) => Err(PaymentError::Api {
                status: status.as_u16(),
                message: text,
            }),
        }
    }
}

// =============================================================================
// PaymentGateway
// =============================================================================

/// Backend-side session creation against the provider API.
#[derive(Clone)]
pub struct PaymentGateway {
    client: reqwest::Client,
    api_url: String,
    secret_key: SecretString,
    success_url: String,
    cancel_url: String,
}

/// A session as created by the provider API.
#[derive(Debug, Deserialize)]
pub struct ProviderSession {
    /// Provider session identifier.
    pub id: String,
}

impl PaymentGateway {
    /// Create a new gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaymentsConfig, base_url: &str) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            secret_key: config.secret_key.clone(),
            success_url: format!("{base_url}/store?checkout=success"),
            cancel_url: format!("{base_url}/store?checkout=cancelled"),
        })
    }

    /// Create a hosted checkout session priced at `amount`.
    ///
    /// The line item carries the matching bundle name when the amount maps
    /// back to the catalog. Customer attribution is attached only when a
    /// user is present.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a provider error response.
    pub async fn create_checkout_session(
        &self,
        amount: Price,
        user: Option<&DiscordUser>,
    ) -> Result<ProviderSession, PaymentError> {
        let name = catalog::find_by_price(amount).map_or("Shard bundle", |item| item.name);
        let unit_amount = amount.cents().to_string();

        let mut params = vec![
            ("mode", "payment".to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", "usd".to_string()),
            ("line_items[0][price_data][unit_amount]", unit_amount),
            (
                "line_items[0][price_data][product_data][name]",
                name.to_string(),
            ),
        ];
        if let Some(user) = user {
            params.push(("customer_email", user.email.clone()));
            params.push(("metadata[discord_id]", user.id.to_string()));
        }

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .basic_auth(self.secret_key.expose_secret(), None::<&str>)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorEnvelope>(&text)
                .map_or(text, |envelope| envelope.error.message);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }
}
