//! Discord OAuth client.
//!
//! Covers the three calls the login flow needs: building the authorization
//! URL, exchanging the callback code for a token, and fetching the user's
//! identity from `/users/@me`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::config::DiscordConfig;
use crate::models::DiscordUser;

/// OAuth scopes the storefront requests.
const OAUTH_SCOPES: &str = "identify email";

/// Errors that can occur when interacting with the Discord API.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// An OAuth access token returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token type, always `"Bearer"` for this flow.
    pub token_type: String,
}

/// Client for Discord's OAuth and user endpoints.
#[derive(Clone)]
pub struct DiscordClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    authorize_url: String,
    api_url: String,
}

impl DiscordClient {
    /// Create a new Discord client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &DiscordConfig) -> Result<Self, DiscordError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            authorize_url: config.authorize_url.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// Build the authorization URL the login route redirects to.
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.authorize_url,
            self.client_id,
            urlencoding::encode(redirect_uri),
            urlencoding::encode(OAUTH_SCOPES),
            state,
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the response cannot be parsed.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AccessToken, DiscordError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .client
            .post(format!("{}/oauth2/token", self.api_url))
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DiscordError::Parse(e.to_string()))
    }

    /// Fetch the identity of the user the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn fetch_user(&self, token: &AccessToken) -> Result<DiscordUser, DiscordError> {
        let response = self
            .client
            .get(format!("{}/users/@me", self.api_url))
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DiscordError::Parse(e.to_string()))
    }
}
