//! Price comparison types produced by the response normalizer.
//!
//! Both types are rebuilt from raw text on every parse; nothing here is
//! persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label rendered for records whose store could not be parsed.
pub const UNKNOWN_STORE: &str = "Unknown Store";

/// Title used for sections that carry no heading line.
pub const DEFAULT_GROUP_TITLE: &str = "Pricing Information";

/// One observation of a product's price at one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Retailer name; `None` when the line carried no recognizable store.
    pub store: Option<String>,
    /// Whatever is left of the line once store and price tokens are removed.
    pub description: String,
    /// Non-negative price. `0` when no price was found; see `price_found`.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// `true` when `price` came from a `$` token in the line.
    pub price_found: bool,
    /// Free-text unit descriptor such as `"lb"` or `"12 oz"`. Empty when absent.
    pub unit: String,
    /// Higher is better. Never negative, `0` when no price was found.
    #[serde(with = "rust_decimal::serde::str")]
    pub value_score: Decimal,
    pub is_best_deal: bool,
}

impl PriceRecord {
    /// Returns the store name, or [`UNKNOWN_STORE`] when none was parsed.
    #[must_use]
    pub fn store_label(&self) -> &str {
        self.store.as_deref().unwrap_or(UNKNOWN_STORE)
    }
}

/// A titled set of [`PriceRecord`]s sharing one comparison context,
/// typically one product across several stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceGroup {
    pub title: String,
    pub items: Vec<PriceRecord>,
}

impl PriceGroup {
    /// Returns the records currently flagged as the group's best deal.
    pub fn best_deals(&self) -> impl Iterator<Item = &PriceRecord> {
        self.items.iter().filter(|r| r.is_best_deal)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
