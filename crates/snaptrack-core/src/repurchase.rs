use chrono::{Days, NaiveDate};

use crate::items::PurchaseRecord;

/// Fallback interval for items with no known pattern.
pub const DEFAULT_REPURCHASE_DAYS: u64 = 14;

/// Keyword to typical days between purchases. Matched as a substring of the
/// lowercased item name, first entry wins.
const REPURCHASE_INTERVALS: &[(&str, u64)] = &[
    ("milk", 7),
    ("bread", 5),
    ("eggs", 14),
    ("chicken", 10),
    ("beef", 10),
    ("pork", 10),
    ("fish", 7),
    ("apples", 7),
    ("bananas", 5),
    ("oranges", 7),
    ("potatoes", 14),
    ("onions", 14),
    ("carrots", 10),
    ("lettuce", 5),
    ("tomatoes", 7),
    ("cheese", 14),
    ("yogurt", 7),
    ("butter", 21),
    ("cereal", 21),
    ("pasta", 30),
    ("rice", 45),
    ("flour", 60),
    ("sugar", 60),
    ("coffee", 21),
    ("tea", 30),
    ("juice", 7),
    ("soda", 14),
    ("water", 7),
    ("chips", 14),
    ("cookies", 14),
    ("ice cream", 14),
    ("chocolate", 14),
    ("candy", 21),
    ("dish soap", 45),
    ("soap", 60),
    ("shampoo", 45),
    ("toothpaste", 60),
    ("toilet paper", 21),
    ("paper towels", 21),
    ("detergent", 45),
];

/// Typical number of days before `item` needs buying again.
#[must_use]
pub fn typical_repurchase_interval_days(item: &str) -> u64 {
    let lowered = item.to_lowercase();
    REPURCHASE_INTERVALS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(DEFAULT_REPURCHASE_DAYS, |(_, days)| *days)
}

/// Predicts when `item` should next be bought.
///
/// An entry in `history` matching the item name (case-insensitive) decides
/// the answer: its recorded next purchase date, or `None` when it has none.
/// Items never bought before are due `today` plus their typical interval.
#[must_use]
pub fn predict_next_purchase(
    item: &str,
    history: &[PurchaseRecord],
    today: NaiveDate,
) -> Option<NaiveDate> {
    let wanted = item.to_lowercase();
    if let Some(previous) = history
        .iter()
        .find(|record| record.item.to_lowercase() == wanted)
    {
        return previous.next_purchase;
    }
    today.checked_add_days(Days::new(typical_repurchase_interval_days(item)))
}
