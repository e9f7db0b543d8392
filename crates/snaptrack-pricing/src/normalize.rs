//! Normalization from free-text price answers to [`PriceGroup`]s.
//!
//! Token extraction is delegated to [`crate::parse`]; this module handles
//! section splitting, title selection and record assembly. Nothing here
//! fails: unparsable fields degrade to empty or zero values so that every
//! line stays visible for manual correction.

use rust_decimal::Decimal;

use crate::parse::{
    clean_title, is_title_line, parse_price, parse_store, parse_unit, residual_description,
};
use crate::score::{apply_value_scores, ValueScoreMode};
use crate::types::{PriceGroup, PriceRecord, DEFAULT_GROUP_TITLE};

/// Literal token separating independent sections of one answer.
pub const SECTION_SEPARATOR: &str = "---";

/// Normalizes a free-text answer using [`ValueScoreMode::AsParsed`].
///
/// See [`normalize_response_with`].
#[must_use]
pub fn normalize_response(text: &str) -> Vec<PriceGroup> {
    normalize_response_with(text, ValueScoreMode::AsParsed)
}

/// Splits `text` on [`SECTION_SEPARATOR`] and turns every non-blank section
/// into a [`PriceGroup`] with value scores computed under `mode`.
///
/// Best-deal flags are left unset; they depend on the final sort and are
/// assigned by [`crate::compare::arrange`].
#[must_use]
pub fn normalize_response_with(text: &str, mode: ValueScoreMode) -> Vec<PriceGroup> {
    let groups: Vec<PriceGroup> = text
        .split(SECTION_SEPARATOR)
        .filter(|section| !section.trim().is_empty())
        .map(|section| normalize_section(section, mode))
        .collect();

    tracing::debug!(
        sections = groups.len(),
        records = groups.iter().map(|g| g.items.len()).sum::<usize>(),
        "normalized price response"
    );
    groups
}

fn normalize_section(section: &str, mode: ValueScoreMode) -> PriceGroup {
    let lines: Vec<&str> = section
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let title_idx = lines.iter().position(|line| is_title_line(line));
    let title = title_idx.map_or_else(
        || DEFAULT_GROUP_TITLE.to_owned(),
        |idx| clean_title(lines[idx]),
    );

    let mut group = PriceGroup {
        title,
        items: lines
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != title_idx)
            .map(|(_, line)| normalize_line(line))
            .collect(),
    };
    apply_value_scores(&mut group, mode);
    group
}

/// Builds one [`PriceRecord`] from a single line. Always succeeds.
#[must_use]
pub fn normalize_line(line: &str) -> PriceRecord {
    let store = parse_store(line);
    let price = parse_price(line);
    let unit = parse_unit(line).unwrap_or_default();
    let description = residual_description(line, store.as_deref(), price.as_ref());

    if price.is_none() {
        tracing::trace!(line, "no price token found; keeping line with zero price");
    }

    PriceRecord {
        store,
        description,
        price: price.as_ref().map_or(Decimal::ZERO, |p| p.value),
        price_found: price.is_some(),
        unit,
        value_score: Decimal::ZERO,
        is_best_deal: false,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
