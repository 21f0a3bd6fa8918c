//! Shardkeep Core - Shared types library.
//!
//! This crate provides common types used across Shardkeep components:
//! - `storefront` - Public-facing store page and checkout flow
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices and Discord user ids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
