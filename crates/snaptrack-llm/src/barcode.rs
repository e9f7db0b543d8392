//! Product details read out of a barcode lookup answer.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use snaptrack_core::{GroceryItem, DEFAULT_CATEGORY};

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("valid barcode price regex"));

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Builds an inventory item from the answer to a barcode lookup.
///
/// The name is taken from the first `Name:` line, or the answer's first
/// line when there is none. `Category:` and `Price:`/`Cost:` lines fill in
/// the rest, first match wins. Missing fields fall back to
/// [`UNKNOWN_PRODUCT`], the default category and a zero price.
#[must_use]
pub fn parse_barcode_answer(answer: &str, barcode: &str) -> GroceryItem {
    let mut name = None;
    let mut category = None;
    let mut price = None;

    for line in answer.lines() {
        if name.is_none() {
            name = labelled_value(line, "name:");
        }
        if category.is_none() {
            category = labelled_value(line, "category:");
        }
        if price.is_none() {
            price = labelled_value(line, "price:")
                .or_else(|| labelled_value(line, "cost:"))
                .and_then(|value| PRICE_RE.find(value))
                .and_then(|m| Decimal::from_str(m.as_str()).ok());
        }
    }

    let name = name
        .or_else(|| answer.lines().next().map(strip_markup))
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_PRODUCT);

    let mut item = GroceryItem::new(
        name,
        category.unwrap_or(DEFAULT_CATEGORY),
        price.unwrap_or(Decimal::ZERO),
    );
    item.barcode = Some(barcode.to_owned());
    item
}

/// Text after `label` (ASCII case-insensitive), markup stripped. `None` when
/// the label is absent or nothing follows it.
fn labelled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let start = line.to_ascii_lowercase().find(label)? + label.len();
    Some(strip_markup(&line[start..])).filter(|v| !v.is_empty())
}

fn strip_markup(text: &str) -> &str {
    text.trim_matches(|c: char| c == '*' || c == '#' || c == '-' || c.is_whitespace())
}
