//! Shared newtype wrappers.

pub mod id;
pub mod price;

pub use id::UserId;
pub use price::Price;
