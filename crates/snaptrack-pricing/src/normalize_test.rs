use std::str::FromStr;

use super::*;
use crate::compare::{arrange, SortOption};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// -----------------------------------------------------------------------
// sections and titles
// -----------------------------------------------------------------------

#[test]
fn untitled_list_uses_default_title() {
    let groups = normalize_response("- at Trader Joe's: $3.99 per lb\n- at Aldi: $2.99 per lb");
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.title, "Pricing Information");
    assert_eq!(group.items.len(), 2);

    assert_eq!(group.items[0].store.as_deref(), Some("Trader Joe's"));
    assert_eq!(group.items[0].price, dec("3.99"));
    assert_eq!(group.items[0].unit, "lb");

    assert_eq!(group.items[1].store.as_deref(), Some("Aldi"));
    assert_eq!(group.items[1].price, dec("2.99"));
    assert_eq!(group.items[1].unit, "lb");
}

#[test]
fn untitled_list_best_deal_is_cheapest() {
    let groups = arrange(
        normalize_response("- at Trader Joe's: $3.99 per lb\n- at Aldi: $2.99 per lb"),
        SortOption::StoreName,
    );
    let aldi = groups[0]
        .items
        .iter()
        .find(|r| r.store_label() == "Aldi")
        .expect("Aldi record");
    assert!(aldi.is_best_deal);
    assert_eq!(groups[0].best_deals().count(), 1);
}

#[test]
fn heading_becomes_title_and_colon_store_is_used() {
    let groups = normalize_response("### Milk\n- Walmart: $3.49");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "Milk");
    assert_eq!(groups[0].items.len(), 1);
    let record = &groups[0].items[0];
    assert_eq!(record.store.as_deref(), Some("Walmart"));
    assert_eq!(record.price, dec("3.49"));
    assert!(record.price_found);
}

#[test]
fn title_is_first_marked_line_not_first_line() {
    let groups = normalize_response("- Aldi: $1.99\n**Bananas**\n- Giant: $2.49");
    assert_eq!(groups[0].title, "Bananas");
    let stores: Vec<_> = groups[0].items.iter().map(|r| r.store_label()).collect();
    assert_eq!(stores, vec!["Aldi", "Giant"]);
}

#[test]
fn only_first_title_line_is_consumed() {
    let groups = normalize_response("## Eggs\n## Large\n- Aldi: $2.19");
    assert_eq!(groups[0].title, "Eggs");
    assert_eq!(groups[0].items.len(), 2);
    assert_eq!(groups[0].items[0].price, Decimal::ZERO);
}

#[test]
fn category_label_is_stripped_from_title() {
    let groups = normalize_response("Category: Dairy\n- Publix: $2.00");
    assert_eq!(groups[0].title, "Dairy");
}

#[test]
fn separator_splits_sections() {
    let text = "### Milk\n- Aldi: $2.99\n---\n### Eggs\n- Aldi: $3.19\n- Giant: $3.59";
    let groups = normalize_response(text);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title, "Milk");
    assert_eq!(groups[1].title, "Eggs");
    assert_eq!(groups[1].items.len(), 2);
}

#[test]
fn blank_sections_are_discarded() {
    let text = "---\n   \n---\n### Milk\n- Aldi: $2.99\n---\n\n";
    let groups = normalize_response(text);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "Milk");
}

#[test]
fn blank_lines_inside_section_are_ignored() {
    let groups = normalize_response("### Milk\n\n   \n- Aldi: $2.99\n\n");
    assert_eq!(groups[0].items.len(), 1);
}

#[test]
fn empty_input_yields_no_groups() {
    assert!(normalize_response("").is_empty());
    assert!(normalize_response("  \n\t\n").is_empty());
}

#[test]
fn title_only_section_yields_empty_group() {
    let groups = normalize_response("### Nothing found");
    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_empty());
}

#[test]
fn input_without_separator_yields_at_most_one_group() {
    for text in [
        "plain text",
        "### A\n- x: $1\n- y: $2",
        "Category: B\nfoo\nbar\nbaz",
        "$1 $2 $3",
    ] {
        assert!(normalize_response(text).len() <= 1, "input: {text:?}");
    }
}

// -----------------------------------------------------------------------
// degraded records
// -----------------------------------------------------------------------

#[test]
fn line_without_price_is_kept_with_zero_price() {
    let groups = normalize_response("### Basil\n- Safeway: call store for price");
    let record = &groups[0].items[0];
    assert_eq!(record.store.as_deref(), Some("Safeway"));
    assert_eq!(record.price, Decimal::ZERO);
    assert!(!record.price_found);
    assert_eq!(record.value_score, Decimal::ZERO);
}

#[test]
fn literal_zero_price_is_distinguishable_from_missing_price() {
    let record = normalize_line("- Food bank: $0 with voucher");
    assert_eq!(record.price, Decimal::ZERO);
    assert!(record.price_found);
}

#[test]
fn line_without_store_renders_unknown_store() {
    let record = normalize_line("Bananas are about $0.59 per lb");
    assert!(record.store.is_none());
    assert_eq!(record.store_label(), "Unknown Store");
    assert_eq!(record.price, dec("0.59"));
    assert_eq!(record.unit, "lb");
}

#[test]
fn garbage_line_never_panics() {
    for line in ["$", "::::", "- - -", "per", "at :", "$$$.", "\u{1F34C}: $"] {
        let record = normalize_line(line);
        assert!(record.value_score >= Decimal::ZERO);
    }
}

// -----------------------------------------------------------------------
// value scores
// -----------------------------------------------------------------------

#[test]
fn value_scores_are_computed_per_record() {
    let groups = normalize_response("- Aldi: $2.00 per 16 oz\n- Giant: $4.00");
    assert_eq!(groups[0].items[0].value_score, dec("8"));
    assert_eq!(groups[0].items[1].value_score, dec("0.25"));
}

#[test]
fn value_scores_are_never_negative() {
    let text = "### Mixed\n- A: $3.99 per 12 oz\n- B: nothing\n- C: $0.00\n- D: $1 per lb\n\
                ---\nfree text only\n- E: $7 per 2 pound bag";
    for group in normalize_response(text) {
        for record in &group.items {
            assert!(record.value_score >= Decimal::ZERO, "{record:?}");
        }
    }
}

#[test]
fn ounce_normalized_mode_changes_weight_scores_only() {
    let text = "- Aldi: $4.00 per lb\n- Giant: $2.00";
    let parsed = normalize_response_with(text, ValueScoreMode::AsParsed);
    let normalized = normalize_response_with(text, ValueScoreMode::OunceNormalized);
    assert_eq!(parsed[0].items[0].value_score, dec("0.25"));
    assert_eq!(normalized[0].items[0].value_score, dec("4"));
    assert_eq!(
        parsed[0].items[1].value_score,
        normalized[0].items[1].value_score
    );
}

// -----------------------------------------------------------------------
// purity
// -----------------------------------------------------------------------

#[test]
fn repeated_runs_are_identical() {
    let text = "### Milk\n- Walmart: $3.49\n- at Aldi: $2.99 per gallon\n---\nCategory: Eggs\n- x";
    assert_eq!(normalize_response(text), normalize_response(text));
}

#[test]
fn records_serialize_prices_as_strings() {
    let groups = normalize_response("- Aldi: $2.99");
    let json = serde_json::to_value(&groups[0].items[0]).unwrap();
    assert_eq!(json["price"], "2.99");
    assert_eq!(json["store"], "Aldi");
    assert_eq!(json["price_found"], true);
}
