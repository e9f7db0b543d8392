use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use snaptrack_core::{ReceiptLine, DEFAULT_CATEGORY};

use crate::error::LlmError;

static TEXT_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+\.\d+)").expect("valid receipt price regex"));

/// Names this short are receipt noise rather than products.
const MIN_TEXT_NAME_CHARS: usize = 3;

/// Returns the slice from the first `[` to the last `]` inclusive, or the
/// whole text when no such bracket pair exists.
///
/// Vision models tend to wrap the requested JSON in prose or code fences.
#[must_use]
pub fn extract_json_array(content: &str) -> &str {
    match (content.find('['), content.rfind(']')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    }
}

/// Decodes the receipt lines from a model answer.
///
/// Each JSON entry is read on its own: entries without a `name` are
/// skipped, and unreadable prices or quantities fall back to `0` and `1`.
/// When the answer holds no JSON array at all, lines of plain text carrying
/// a `$d.dd` price are read instead (see [`parse_receipt_text`]).
///
/// # Errors
///
/// Returns [`LlmError::Deserialize`] when the answer is neither a JSON array
/// nor text with any priced line.
pub fn parse_receipt_items(content: &str) -> Result<Vec<ReceiptLine>, LlmError> {
    let json = extract_json_array(content);
    match serde_json::from_str::<Vec<Value>>(json) {
        Ok(entries) => {
            let lines: Vec<ReceiptLine> = entries.iter().filter_map(receipt_line).collect();
            let skipped = entries.len() - lines.len();
            if skipped > 0 {
                tracing::warn!(skipped, "skipped receipt entries without a name");
            }
            tracing::debug!(count = lines.len(), "decoded receipt lines");
            Ok(lines)
        }
        Err(source) => {
            let lines = parse_receipt_text(content);
            if lines.is_empty() {
                return Err(LlmError::Deserialize {
                    context: "receipt items".to_string(),
                    source,
                });
            }
            tracing::debug!(count = lines.len(), "read receipt lines from plain text");
            Ok(lines)
        }
    }
}

/// Reads receipt lines from plain text, one per line holding a `$d.dd`
/// price. The name is the text before the first `$` and must be at least
/// three characters. Lines carry quantity `1`, the default category, and
/// no date.
#[must_use]
pub fn parse_receipt_text(text: &str) -> Vec<ReceiptLine> {
    text.lines()
        .filter_map(|line| {
            let caps = TEXT_PRICE_RE.captures(line)?;
            let price = Decimal::from_str(&caps[1]).ok()?;
            let name = line.split_once('$').map_or(line, |(name, _)| name).trim();
            if name.chars().count() < MIN_TEXT_NAME_CHARS {
                return None;
            }
            Some(ReceiptLine {
                name: name.to_owned(),
                price,
                quantity: Decimal::ONE,
                category: DEFAULT_CATEGORY.to_owned(),
                price_per_unit: None,
                date: None,
            })
        })
        .collect()
}

fn receipt_line(entry: &Value) -> Option<ReceiptLine> {
    let entry = entry.as_object()?;
    let name = entry.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let text = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let number = |key: &str| entry.get(key).and_then(lenient_decimal);

    Some(ReceiptLine {
        name: name.to_owned(),
        price: number("price").unwrap_or(Decimal::ZERO),
        quantity: number("quantity").unwrap_or(Decimal::ONE),
        category: text("category").unwrap_or(DEFAULT_CATEGORY).to_owned(),
        price_per_unit: number("price_per_unit"),
        date: text("date").map(str::to_owned),
    })
}

/// Accepts JSON numbers and numeric strings, with or without a leading `$`.
fn lenient_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim().trim_start_matches('$').trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_array_strips_surrounding_prose() {
        let content = "Here you go:\n```json\n[{\"name\": \"Milk\"}]\n```\nEnjoy!";
        assert_eq!(extract_json_array(content), "[{\"name\": \"Milk\"}]");
    }

    #[test]
    fn extract_json_array_spans_nested_brackets() {
        let content = "x [[1], [2]] y";
        assert_eq!(extract_json_array(content), "[[1], [2]]");
    }

    #[test]
    fn extract_json_array_without_brackets_returns_input() {
        assert_eq!(extract_json_array("no items"), "no items");
        assert_eq!(extract_json_array("] backwards ["), "] backwards [");
    }

    #[test]
    fn parse_receipt_items_decodes_lines() {
        let content = r#"Sure! [
            {"name": "Bananas", "price": 1.29, "quantity": 1, "category": "Fruits",
             "price_per_unit": 1.29, "date": "02/14/2025"},
            {"name": "Greek Yogurt", "price": 5.49, "category": "Yogurt"}
        ]"#;
        let lines = parse_receipt_items(content).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Bananas");
        assert_eq!(lines[0].date.as_deref(), Some("02/14/2025"));
        assert_eq!(lines[1].category, "Yogurt");
        assert!(lines[1].price_per_unit.is_none());
    }

    #[test]
    fn null_price_keeps_the_rest_of_the_receipt() {
        let lines =
            parse_receipt_items(r#"[{"name":"Milk","price":3.49},{"name":"Eggs","price":null}]"#)
                .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].price, Decimal::new(349, 2));
        assert_eq!(lines[1].name, "Eggs");
        assert_eq!(lines[1].price, Decimal::ZERO);
    }

    #[test]
    fn string_prices_and_quantities_are_read() {
        let lines = parse_receipt_items(
            r#"[{"name":"Eggs","price":"$2.19","quantity":"2"},
                {"name":"Bread","price":"3","quantity":2.5}]"#,
        )
        .unwrap();
        assert_eq!(lines[0].price, Decimal::new(219, 2));
        assert_eq!(lines[0].quantity, Decimal::from(2));
        assert_eq!(lines[1].price, Decimal::from(3));
        assert_eq!(lines[1].quantity, Decimal::new(25, 1));
    }

    #[test]
    fn unreadable_quantity_defaults_to_one() {
        let lines =
            parse_receipt_items(r#"[{"name":"Kale","price":2.5,"quantity":"a bunch"}]"#).unwrap();
        assert_eq!(lines[0].quantity, Decimal::ONE);
        assert_eq!(lines[0].category, "Other");
    }

    #[test]
    fn entries_without_a_name_are_skipped() {
        let lines = parse_receipt_items(
            r#"[{"price":1.99},{"name":"","price":0.5},{"name":"Butter","price":4.29},"stray"]"#,
        )
        .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Butter");
    }

    #[test]
    fn plain_text_receipt_is_read_line_by_line() {
        let lines =
            parse_receipt_items("Milk 1gal $3.49\nLarge Eggs $2.19\nTOTAL $5.68").unwrap();
        let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Milk 1gal", "Large Eggs", "TOTAL"]);
        assert_eq!(lines[1].price, Decimal::new(219, 2));
        assert!(lines
            .iter()
            .all(|l| l.quantity == Decimal::ONE && l.category == "Other" && l.date.is_none()));
    }

    #[test]
    fn plain_text_with_brackets_still_falls_back() {
        let lines = parse_receipt_items("Spinach [organic] $2.99").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Spinach [organic]");
    }

    #[test]
    fn parse_receipt_text_skips_short_names_and_whole_dollars() {
        let lines = parse_receipt_text("TX $0.42\nBagels $5\nApples $1.50/lb\n\nthank you");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Apples");
        assert_eq!(lines[0].price, Decimal::new(150, 2));
    }

    #[test]
    fn parse_receipt_items_rejects_prose() {
        let err = parse_receipt_items("I could not read this receipt.").unwrap_err();
        assert!(matches!(err, LlmError::Deserialize { ref context, .. } if context == "receipt items"));
    }
}
