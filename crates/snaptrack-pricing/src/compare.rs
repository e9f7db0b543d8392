//! Ordering of price groups for presentation.
//!
//! All sorts are stable: records with equal keys keep their parse order, so
//! output is reproducible across runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::score::mark_best_deals;
use crate::types::PriceGroup;

/// Caller-selected ordering for the records of a [`PriceGroup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    PriceAscending,
    PriceDescending,
    /// Lexicographic on the rendered store label.
    StoreName,
    /// Descending value score.
    BestValue,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::PriceAscending,
        SortOption::PriceDescending,
        SortOption::StoreName,
        SortOption::BestValue,
    ];
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOption::PriceAscending => "price-asc",
            SortOption::PriceDescending => "price-desc",
            SortOption::StoreName => "store",
            SortOption::BestValue => "value",
        };
        f.write_str(s)
    }
}

impl FromStr for SortOption {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.to_string() == s)
            .ok_or_else(|| PricingError::UnknownSortOption(s.to_owned()))
    }
}

/// Reorders the records of `group` in place.
pub fn sort_group(group: &mut PriceGroup, option: SortOption) {
    match option {
        SortOption::PriceAscending => group.items.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDescending => group.items.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::StoreName => group
            .items
            .sort_by(|a, b| a.store_label().cmp(b.store_label())),
        SortOption::BestValue => group
            .items
            .sort_by(|a, b| b.value_score.cmp(&a.value_score)),
    }
}

/// Sorts every group by `option`, then recomputes best-deal flags.
#[must_use]
pub fn arrange(mut groups: Vec<PriceGroup>, option: SortOption) -> Vec<PriceGroup> {
    for group in &mut groups {
        sort_group(group, option);
        mark_best_deals(group);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_response;

    const FOUR_STORES: &str = "### Butter\n\
        - Safeway: $5.49 per 16 oz\n\
        - Aldi: $3.29\n\
        - Publix: $4.99 per 8 oz\n\
        - Giant: $3.29";

    fn stores(group: &PriceGroup) -> Vec<&str> {
        group.items.iter().map(|r| r.store_label()).collect()
    }

    #[test]
    fn sort_option_parses_display_form() {
        for opt in SortOption::ALL {
            assert_eq!(opt.to_string().parse::<SortOption>().unwrap(), opt);
        }
        assert!(matches!(
            "cheapest".parse::<SortOption>(),
            Err(PricingError::UnknownSortOption(ref s)) if s == "cheapest"
        ));
    }

    #[test]
    fn price_ascending_is_stable_for_ties() {
        let mut group = normalize_response(FOUR_STORES).remove(0);
        sort_group(&mut group, SortOption::PriceAscending);
        assert_eq!(stores(&group), vec!["Aldi", "Giant", "Publix", "Safeway"]);
    }

    #[test]
    fn price_descending_is_stable_for_ties() {
        let mut group = normalize_response(FOUR_STORES).remove(0);
        sort_group(&mut group, SortOption::PriceDescending);
        assert_eq!(stores(&group), vec!["Safeway", "Publix", "Aldi", "Giant"]);
    }

    #[test]
    fn store_name_sorts_lexicographically() {
        let mut group = normalize_response(FOUR_STORES).remove(0);
        sort_group(&mut group, SortOption::StoreName);
        assert_eq!(stores(&group), vec!["Aldi", "Giant", "Publix", "Safeway"]);
    }

    #[test]
    fn store_name_sorts_unknown_store_by_label() {
        let mut group =
            normalize_response("- Zabar's: $2.00\n- $1.50 somewhere\n- Acme: $3.00").remove(0);
        sort_group(&mut group, SortOption::StoreName);
        assert_eq!(stores(&group), vec!["Acme", "Unknown Store", "Zabar's"]);
    }

    #[test]
    fn best_value_sorts_by_descending_score() {
        let mut group = normalize_response(FOUR_STORES).remove(0);
        sort_group(&mut group, SortOption::BestValue);
        // Safeway: 16 / 5.49, Publix: 8 / 4.99, Aldi and Giant: 1 / 3.29.
        assert_eq!(stores(&group), vec!["Safeway", "Publix", "Aldi", "Giant"]);
    }

    #[test]
    fn ascending_then_descending_reverses_distinct_prices() {
        let text = "- A: $1.00\n- B: $4.00\n- C: $2.50\n- D: $3.75";
        let mut group = normalize_response(text).remove(0);
        sort_group(&mut group, SortOption::PriceAscending);
        let ascending: Vec<String> = stores(&group).into_iter().map(str::to_owned).collect();
        sort_group(&mut group, SortOption::PriceDescending);
        let mut descending: Vec<String> =
            stores(&group).into_iter().map(str::to_owned).collect();
        descending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn arrange_flags_best_deal_after_sorting() {
        let groups = arrange(normalize_response(FOUR_STORES), SortOption::StoreName);
        let best: Vec<_> = groups[0].best_deals().map(|r| r.store_label()).collect();
        assert_eq!(best, vec!["Aldi", "Giant"]);
    }

    #[test]
    fn arrange_handles_empty_input() {
        assert!(arrange(Vec::new(), SortOption::BestValue).is_empty());
    }
}
