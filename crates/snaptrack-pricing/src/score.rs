//! Value scores and best-deal flags.
//!
//! A value score is higher-is-better: `amount / price` when the unit names a
//! weight with a numeric amount, `1 / price` otherwise. Under
//! [`ValueScoreMode::AsParsed`] the two branches are mixed freely inside one
//! group and pounds are never converted to ounces, so a "per 16 oz" record
//! can outrank a cheaper "per lb" one. [`ValueScoreMode::OunceNormalized`]
//! converts weights to ounces first; it is opt-in.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::parse::parse_amount;
use crate::types::PriceGroup;

const OUNCES_PER_POUND: u32 = 16;

/// How weight-bearing units feed into the value score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueScoreMode {
    /// Use the unit's leading number as-is, whatever the weight unit.
    #[default]
    AsParsed,
    /// Convert `lb`/`pound` amounts to ounces; a bare weight unit counts as one.
    OunceNormalized,
}

impl fmt::Display for ValueScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueScoreMode::AsParsed => write!(f, "as-parsed"),
            ValueScoreMode::OunceNormalized => write!(f, "ounce-normalized"),
        }
    }
}

impl FromStr for ValueScoreMode {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "as-parsed" => Ok(ValueScoreMode::AsParsed),
            "ounce-normalized" => Ok(ValueScoreMode::OunceNormalized),
            other => Err(PricingError::UnknownScoreMode(other.to_owned())),
        }
    }
}

fn is_weight_unit(unit: &str) -> bool {
    unit.contains("oz") || unit.contains("pound") || unit.contains("lb")
}

/// Computes the value score for one price/unit pair.
///
/// A zero price scores `0`: there is nothing to divide by and the record is
/// treated as "no price found". A quotient too large for `Decimal`
/// saturates at `Decimal::MAX`.
#[must_use]
pub fn value_score(price: Decimal, unit: &str, mode: ValueScoreMode) -> Decimal {
    if price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let numerator = if is_weight_unit(unit) {
        match mode {
            ValueScoreMode::AsParsed => parse_amount(unit),
            ValueScoreMode::OunceNormalized => {
                let amount = parse_amount(unit).unwrap_or(Decimal::ONE);
                if unit.contains("oz") {
                    Some(amount)
                } else {
                    amount.checked_mul(Decimal::from(OUNCES_PER_POUND))
                }
            }
        }
    } else {
        None
    };

    numerator
        .unwrap_or(Decimal::ONE)
        .checked_div(price)
        .unwrap_or(Decimal::MAX)
}

/// Recomputes `value_score` for every record in `group`.
pub fn apply_value_scores(group: &mut PriceGroup, mode: ValueScoreMode) {
    for record in &mut group.items {
        record.value_score = value_score(record.price, &record.unit, mode);
    }
}

/// Flags every record whose price equals the group minimum.
///
/// Ties all receive the flag. Equality is exact. Records without a price sit
/// at zero and therefore win when present; an all-zero group flags every
/// record. Empty groups are left untouched.
pub fn mark_best_deals(group: &mut PriceGroup) {
    let Some(min_price) = group.items.iter().map(|r| r.price).min() else {
        return;
    };
    for record in &mut group.items {
        record.is_best_deal = record.price == min_price;
    }
}
