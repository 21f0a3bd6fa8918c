//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::services::discord::{DiscordClient, DiscordError};
use crate::services::payments::{CheckoutClient, PaymentError, PaymentGateway};

/// Error constructing application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("payment client error: {0}")]
    Payment(#[from] PaymentError),
    #[error("discord client error: {0}")]
    Discord(#[from] DiscordError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the configuration and the service
/// clients, which are constructed exactly once at startup and injected
/// everywhere they are used.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    checkout: CheckoutClient,
    gateway: PaymentGateway,
    discord: DiscordClient,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the service clients fail to build.
    pub fn new(config: StoreConfig) -> Result<Self, StateError> {
        let checkout = CheckoutClient::new(&config.payments)?;
        let gateway = PaymentGateway::new(&config.payments, &config.base_url)?;
        let discord = DiscordClient::new(&config.discord)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                checkout,
                gateway,
                discord,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the page-side checkout client.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutClient {
        &self.inner.checkout
    }

    /// Get a reference to the provider session gateway.
    #[must_use]
    pub fn gateway(&self) -> &PaymentGateway {
        &self.inner.gateway
    }

    /// Get a reference to the Discord API client.
    #[must_use]
    pub fn discord(&self) -> &DiscordClient {
        &self.inner.discord
    }
}
