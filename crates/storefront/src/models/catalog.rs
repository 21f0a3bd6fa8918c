//! The bundle catalog and tile selection state.
//!
//! The catalog is fixed at compile time: five Shard bundles, priced in whole
//! US dollars. Selection is per-request UI state carried in the rendered
//! markup, so a full page load always starts with nothing chosen.

use shardkeep_core::Price;

/// A purchasable Shard bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    /// Display label, e.g. `"500 Shards"`.
    pub name: &'static str,
    /// Price in whole US dollars.
    pub price: Price,
}

impl CatalogItem {
    const fn new(name: &'static str, price: u32) -> Self {
        Self {
            name,
            price: Price::new(price),
        }
    }
}

/// The storefront catalog. Not persisted, not personalized.
pub const CATALOG: &[CatalogItem] = &[
    CatalogItem::new("500 Shards", 5),
    CatalogItem::new("1,100 Shards", 10),
    CatalogItem::new("2,400 Shards", 20),
    CatalogItem::new("5,600 Shards", 40),
    CatalogItem::new("15,000 Shards", 100),
];

/// Look up the bundle with the given price.
///
/// The checkout backend receives only an amount, so the provider line item
/// recovers the bundle name through this lookup.
#[must_use]
pub fn find_by_price(price: Price) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.price == price)
}

/// Which catalog tile is currently chosen, if any.
///
/// At most one tile is selected at a time; selecting a tile replaces any
/// previous choice. Requests carry the selection as an integer parameter
/// where `-1` (or anything out of range) means "nothing chosen".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    /// No tile chosen.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Parse a selection from a raw request parameter.
    ///
    /// Absent, negative, and out-of-range values all normalize to
    /// "nothing chosen".
    #[must_use]
    pub fn from_param(raw: Option<i64>) -> Self {
        let mut selection = Self::none();
        if let Some(index) = raw.and_then(|value| usize::try_from(value).ok()) {
            selection.select(index);
        }
        selection
    }

    /// Choose the tile at `index`, replacing any previous choice.
    ///
    /// Out-of-range indices leave the selection empty.
    pub fn select(&mut self, index: usize) {
        self.0 = if index < CATALOG.len() {
            Some(index)
        } else {
            None
        };
    }

    /// The chosen tile index, if any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.0
    }

    /// Whether the tile at `index` is the chosen one.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.0 == Some(index)
    }

    /// The chosen catalog entry, if any.
    #[must_use]
    pub fn item(&self) -> Option<&'static CatalogItem> {
        self.0.and_then(|index| CATALOG.get(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        assert_eq!(CATALOG.len(), 5);

        let expected = [
            ("500 Shards", 5),
            ("1,100 Shards", 10),
            ("2,400 Shards", 20),
            ("5,600 Shards", 40),
            ("15,000 Shards", 100),
        ];
        for (item, (name, price)) in CATALOG.iter().zip(expected) {
            assert_eq!(item.name, name);
            assert_eq!(item.price, Price::new(price));
        }
    }

    #[test]
    fn test_find_by_price() {
        assert_eq!(find_by_price(Price::new(5)).unwrap().name, "500 Shards");
        assert_eq!(find_by_price(Price::new(100)).unwrap().name, "15,000 Shards");
        assert!(find_by_price(Price::new(7)).is_none());
    }

    #[test]
    fn test_select_replaces_previous_choice() {
        let mut selection = Selection::none();
        selection.select(1);
        assert!(selection.is_selected(1));

        selection.select(3);
        assert!(selection.is_selected(3));
        assert!(!selection.is_selected(1));
        assert_eq!(selection.index(), Some(3));
    }

    #[test]
    fn test_out_of_range_normalizes_to_none() {
        assert_eq!(Selection::from_param(None), Selection::none());
        assert_eq!(Selection::from_param(Some(-1)), Selection::none());
        assert_eq!(Selection::from_param(Some(5)), Selection::none());
        assert_eq!(Selection::from_param(Some(i64::MAX)), Selection::none());
    }

    #[test]
    fn test_from_param_in_range() {
        let selection = Selection::from_param(Some(2));
        assert_eq!(selection.index(), Some(2));
        assert_eq!(selection.item().unwrap().name, "2,400 Shards");
    }

    #[test]
    fn test_empty_selection_has_no_item() {
        assert!(Selection::none().item().is_none());
    }
}
