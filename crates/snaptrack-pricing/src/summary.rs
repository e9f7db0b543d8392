//! Single-store price summaries.
//!
//! Used when a price question targeted one store and the answer is prose
//! rather than a list. Extracts the headline price plus sale, unit-price,
//! comparison and brand hints.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

static HEADLINE_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\d+(\.\d{2})?").expect("valid headline price regex"));

static UNIT_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\d+\.\d+\s+per\s+[a-zA-Z0-9 .]+").expect("valid unit price regex")
});

static COMPARISON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"compared to\s+([^.]+)").expect("valid comparison regex"));

static BRAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"brand:\s+([^,.]+)").expect("valid brand regex"));

const SALE_MARKERS: [&str; 4] = ["sale", "discount", "special", "offer"];

/// Headline price and supporting details for one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePrice {
    pub store: String,
    /// Price as written in the source text, e.g. `"$3.99"`.
    pub price: String,
    pub on_sale: bool,
    pub unit_price: String,
    pub comparison: String,
    pub brand: String,
    pub full_details: String,
}

impl StorePrice {
    /// Parses the price string, ignoring any `$`. Returns `0` when unreadable.
    #[must_use]
    pub fn numeric_price(&self) -> Decimal {
        Decimal::from_str(self.price.replace('$', "").trim()).unwrap_or(Decimal::ZERO)
    }

    /// Returns the price with a guaranteed leading `$`.
    #[must_use]
    pub fn price_formatted(&self) -> String {
        if self.price.starts_with('$') {
            self.price.clone()
        } else {
            format!("${}", self.price)
        }
    }
}

/// Summarizes a prose answer about `store`. Returns `None` when the text
/// carries no `$` price.
#[must_use]
pub fn summarize_store_price(text: &str, store: &str) -> Option<StorePrice> {
    let price = HEADLINE_PRICE_RE.find(text)?.as_str().to_owned();

    let lower = text.to_lowercase();
    let on_sale = SALE_MARKERS.iter().any(|m| lower.contains(m));

    let unit_price = UNIT_PRICE_RE
        .find(text)
        .map(|m| m.as_str().trim_end().to_owned())
        .unwrap_or_default();
    let comparison = COMPARISON_RE
        .captures(text)
        .map(|c| c[1].trim().to_owned())
        .unwrap_or_default();
    let brand = BRAND_RE
        .captures(text)
        .map(|c| c[1].trim().to_owned())
        .unwrap_or_default();

    Some(StorePrice {
        store: store.to_owned(),
        price,
        on_sale,
        unit_price,
        comparison,
        brand,
        full_details: text.trim().to_owned(),
    })
}
