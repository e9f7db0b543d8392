//! Line-level token extraction for loosely formatted price text.
//!
//! Every helper is first-match-wins and returns `None` instead of failing;
//! the input is model output and routinely malformed. See
//! [`crate::normalize`] for how these compose into [`crate::PriceRecord`]s.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static STORE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bat\s+([A-Za-z\s&'’.]+):").expect("valid store phrase regex")
});

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+(?:\.\d+)?)").expect("valid price regex"));

static UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"per ([a-zA-Z0-9\s.]+)").expect("valid unit regex"));

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("valid amount regex"));

/// A `$` price found in a line: the literal token as written and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PriceToken<'a> {
    pub literal: &'a str,
    pub value: Decimal,
}

/// Returns `true` when `line` looks like a section heading.
pub(crate) fn is_title_line(line: &str) -> bool {
    line.contains("**") || line.contains('#') || line.contains("Category:")
}

/// Strips heading and emphasis markers plus the `Category:` label.
pub(crate) fn clean_title(line: &str) -> String {
    line.replace(['#', '*'], "")
        .replace("Category:", "")
        .trim()
        .to_owned()
}

/// Extracts the store name from a line.
///
/// Prefers an `at <name>:` phrase. Otherwise, when the line has a colon,
/// uses the text before the first colon with hyphens removed. Returns
/// `None` when neither yields a non-empty name.
pub(crate) fn parse_store(line: &str) -> Option<String> {
    if let Some(caps) = STORE_PHRASE_RE.captures(line) {
        let name = caps[1].trim();
        if !name.is_empty() {
            return Some(name.to_owned());
        }
    }

    let (head, _) = line.split_once(':')?;
    let name = head.replace('-', "");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

/// Finds the first `$`-prefixed decimal in `line`.
pub(crate) fn parse_price(line: &str) -> Option<PriceToken<'_>> {
    let caps = PRICE_RE.captures(line)?;
    let literal = caps.get(0)?.as_str();
    let value = Decimal::from_str(&caps[1]).ok()?;
    Some(PriceToken { literal, value })
}

/// Extracts the unit descriptor following the first `per ` in `line`.
pub(crate) fn parse_unit(line: &str) -> Option<String> {
    let caps = UNIT_RE.captures(line)?;
    let unit = caps[1].trim();
    (!unit.is_empty()).then(|| unit.to_owned())
}

/// Returns the first decimal number appearing anywhere in `unit`.
pub(crate) fn parse_amount(unit: &str) -> Option<Decimal> {
    let caps = AMOUNT_RE.captures(unit)?;
    Decimal::from_str(&caps[1]).ok()
}

/// Removes list markers, the store phrase, the store name, `": "` and the
/// price token from `line`. Lossy: residual punctuation is left in place.
pub(crate) fn residual_description(
    line: &str,
    store: Option<&str>,
    price: Option<&PriceToken<'_>>,
) -> String {
    let stripped = line.replace("- ", "");
    let mut description = STORE_PHRASE_RE
        .replace_all(stripped.trim(), "")
        .into_owned();

    if let Some(store) = store {
        description = description.replace(store, "");
    }
    description = description.replace(": ", "");
    if let Some(token) = price {
        description = description.replace(token.literal, "");
    }

    description.trim().to_owned()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
