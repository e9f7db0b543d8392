use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_quantity() -> Decimal {
    Decimal::ONE
}

/// Category given to items the model or receipt did not categorise.
pub const DEFAULT_CATEGORY: &str = "Other";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One grocery line read off a receipt by the vision model.
///
/// Mirrors the JSON shape the receipt prompt asks for. Quantity and category
/// are often omitted by the model and fall back to `1` and [`DEFAULT_CATEGORY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub price_per_unit: Option<Decimal>,
    /// Purchase date exactly as printed on the receipt.
    #[serde(default)]
    pub date: Option<String>,
}

/// An item in the user's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default = "Utc::now")]
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub weblink: Option<String>,
    #[serde(default)]
    pub price_per_unit: Option<Decimal>,
    #[serde(default)]
    pub purchase_date: Option<String>,
}

impl GroceryItem {
    #[must_use]
    pub fn new(name: &str, category: &str, price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            category: category.to_owned(),
            price,
            quantity: Decimal::ONE,
            barcode: None,
            date_added: Utc::now(),
            weblink: None,
            price_per_unit: None,
            purchase_date: None,
        }
    }

    /// Builds an inventory item from a scanned receipt line.
    #[must_use]
    pub fn from_receipt_line(line: ReceiptLine, date_added: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: line.name,
            category: line.category,
            price: line.price,
            quantity: line.quantity,
            barcode: None,
            date_added,
            weblink: None,
            price_per_unit: line.price_per_unit,
            purchase_date: line.date,
        }
    }

    /// Price rendered as US currency with two decimals, e.g. `"$3.90"`.
    #[must_use]
    pub fn price_formatted(&self) -> String {
        format!("${:.2}", self.price.round_dp(2))
    }

    /// Price per unit as reported, or `price / quantity` when the receipt
    /// did not state one. A zero quantity yields the full price.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price_per_unit.unwrap_or_else(|| {
            self.price
                .checked_div(self.quantity)
                .unwrap_or(self.price)
        })
    }
}

/// A past purchase used for repurchase prediction and receipt logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub item: String,
    pub price: Decimal,
    /// Purchase date as written, typically `MM/DD/YYYY`.
    pub date: String,
    pub email: String,
    /// Known next purchase date, when one has already been predicted.
    #[serde(default)]
    pub next_purchase: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn receipt_line_deserializes_full_shape() {
        let json = serde_json::json!({
            "name": "Whole Milk",
            "price": 3.99,
            "quantity": 2,
            "category": "Dairy",
            "price_per_unit": 1.995,
            "date": "02/15/2025"
        });
        let line: ReceiptLine = serde_json::from_value(json).unwrap();
        assert_eq!(line.name, "Whole Milk");
        assert_eq!(line.price, dec("3.99"));
        assert_eq!(line.quantity, dec("2"));
        assert_eq!(line.price_per_unit, Some(dec("1.995")));
        assert_eq!(line.date.as_deref(), Some("02/15/2025"));
    }

    #[test]
    fn receipt_line_defaults_missing_fields() {
        let json = serde_json::json!({ "name": "Bananas", "price": 1.29 });
        let line: ReceiptLine = serde_json::from_value(json).unwrap();
        assert_eq!(line.quantity, Decimal::ONE);
        assert_eq!(line.category, "Other");
        assert!(line.price_per_unit.is_none());
        assert!(line.date.is_none());
    }

    #[test]
    fn grocery_item_from_receipt_line_copies_fields() {
        let line = ReceiptLine {
            name: "Eggs".to_owned(),
            price: dec("4.99"),
            quantity: dec("1"),
            category: "Eggs".to_owned(),
            price_per_unit: None,
            date: Some("02/10/2025".to_owned()),
        };
        let now = Utc::now();
        let item = GroceryItem::from_receipt_line(line, now);
        assert_eq!(item.name, "Eggs");
        assert_eq!(item.price, dec("4.99"));
        assert_eq!(item.date_added, now);
        assert_eq!(item.purchase_date.as_deref(), Some("02/10/2025"));
    }

    #[test]
    fn price_formatted_uses_two_decimals() {
        let item = GroceryItem::new("Bread", "Bread", dec("2.5"));
        assert_eq!(item.price_formatted(), "$2.50");
        let item = GroceryItem::new("Bread", "Bread", dec("2.499"));
        assert_eq!(item.price_formatted(), "$2.50");
    }

    #[test]
    fn unit_price_prefers_reported_value() {
        let mut item = GroceryItem::new("Yogurt", "Yogurt", dec("6"));
        item.quantity = dec("4");
        assert_eq!(item.unit_price(), dec("1.5"));
        item.price_per_unit = Some(dec("1.25"));
        assert_eq!(item.unit_price(), dec("1.25"));
    }

    #[test]
    fn unit_price_with_zero_quantity_is_full_price() {
        let mut item = GroceryItem::new("Gum", "Gum", dec("1.19"));
        item.quantity = Decimal::ZERO;
        assert_eq!(item.unit_price(), dec("1.19"));
    }

    #[test]
    fn grocery_item_deserializes_minimal_inventory_entry() {
        let json = serde_json::json!({ "name": "Coffee", "price": "8.99" });
        let item: GroceryItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.name, "Coffee");
        assert_eq!(item.category, "Other");
        assert_eq!(item.quantity, Decimal::ONE);
    }
}
