//! Clients for external collaborators.
//!
//! Each client wraps `reqwest` with typed request/response bodies and its
//! own error enum. Clients are constructed once at startup and injected
//! through [`crate::state::AppState`].

pub mod discord;
pub mod payments;

pub use discord::DiscordClient;
pub use payments::{CheckoutClient, PaymentGateway};
