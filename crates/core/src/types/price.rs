//! Whole-unit price representation.
//!
//! Store bundles are priced in whole US dollars, so prices are plain
//! integers rather than decimal amounts. The wire format is a bare number
//! (`5`, not `"5.00"`), which is what the checkout backend expects in its
//! `{"amount": ...}` request body.

use serde::{Deserialize, Serialize};

/// A price in whole US dollars.
///
/// Displays as `"$5"`. Serializes transparently as the underlying integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Create a price from a whole-dollar amount.
    #[must_use]
    pub const fn new(dollars: u32) -> Self {
        Self(dollars)
    }

    /// The amount in whole dollars.
    #[must_use]
    pub const fn dollars(&self) -> u32 {
        self.0
    }

    /// The amount in cents, as payment providers expect for line items.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0 as u64 * 100
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u32> for Price {
    fn from(dollars: u32) -> Self {
        Self(dollars)
    }
}

impl From<Price> for u32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Price::new(5).to_string(), "$5");
        assert_eq!(Price::new(100).to_string(), "$100");
    }

    #[test]
    fn test_cents() {
        assert_eq!(Price::new(5).cents(), 500);
        assert_eq!(Price::new(100).cents(), 10_000);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Price::new(40)).unwrap();
        assert_eq!(json, "40");

        let price: Price = serde_json::from_str("40").unwrap();
        assert_eq!(price, Price::new(40));
    }
}
