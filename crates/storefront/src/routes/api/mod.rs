//! API route handlers consumed by the store page.

pub mod auth;
pub mod checkout;
