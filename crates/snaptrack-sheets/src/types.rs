use serde::{Deserialize, Serialize};

/// Minimum columns a catalogue row needs: store through price-per-unit.
const MIN_PRODUCT_COLUMNS: usize = 7;

/// Body of a `GET .../values/{range}` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesResponse {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// One product row of the catalogue sheet. Every cell is kept as the text
/// the sheet displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetProduct {
    pub store: String,
    pub item: String,
    pub category: String,
    pub brand: String,
    pub price: String,
    pub quantity: String,
    pub price_per_unit: String,
    pub link: String,
}

impl SheetProduct {
    /// Price as the integer formed by its digits alone, so `"$3.99"` reads
    /// as `399`. Returns `0` when the cell has no digits or overflows.
    #[must_use]
    pub fn numeric_price(&self) -> u64 {
        let digits: String = self.price.chars().filter(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }

    fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < MIN_PRODUCT_COLUMNS {
            return None;
        }
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        let product = Self {
            store: cell(0),
            item: cell(1),
            category: cell(2),
            brand: cell(3),
            price: cell(4),
            quantity: cell(5),
            price_per_unit: cell(6),
            link: cell(7),
        };
        if product.store.is_empty() || product.item.is_empty() {
            return None;
        }
        Some(product)
    }
}

/// Maps raw sheet rows to products, skipping the header row, short rows, and
/// rows without a store or item.
#[must_use]
pub fn products_from_values(values: &[Vec<String>]) -> Vec<SheetProduct> {
    values
        .iter()
        .skip(1)
        .filter_map(|row| SheetProduct::from_row(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn header_row_is_skipped() {
        let values = vec![
            row(&["Store", "Item", "Category", "Brand", "Price", "Qty", "PPU"]),
            row(&["Aldi", "Milk", "Dairy", "Friendly Farms", "$2.99", "1", "$2.99"]),
        ];
        let products = products_from_values(&values);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].store, "Aldi");
        assert_eq!(products[0].brand, "Friendly Farms");
        assert_eq!(products[0].link, "");
    }

    #[test]
    fn optional_link_column_is_read() {
        let values = vec![
            row(&["h"]),
            row(&["Giant", "Eggs", "Eggs", "Giant", "$3.49", "12", "$0.29", "https://x"]),
        ];
        assert_eq!(products_from_values(&values)[0].link, "https://x");
    }

    #[test]
    fn short_and_incomplete_rows_are_skipped() {
        let values = vec![
            row(&["h"]),
            row(&["Aldi", "Milk", "Dairy"]),
            row(&["", "Milk", "Dairy", "B", "$1", "1", "$1"]),
            row(&["Aldi", "", "Dairy", "B", "$1", "1", "$1"]),
            row(&["Aldi", "Bread", "", "", "", "", ""]),
        ];
        let products = products_from_values(&values);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].item, "Bread");
    }

    #[test]
    fn numeric_price_keeps_digits_only() {
        let mut product = SheetProduct::from_row(&row(&["A", "B", "", "", "$3.99", "", ""])).unwrap();
        assert_eq!(product.numeric_price(), 399);
        product.price = "4".to_string();
        assert_eq!(product.numeric_price(), 4);
        product.price = "n/a".to_string();
        assert_eq!(product.numeric_price(), 0);
    }

    #[test]
    fn values_response_tolerates_missing_values() {
        let body: ValuesResponse =
            serde_json::from_str(r#"{"range": "GrocerySKUs!A1:H1", "majorDimension": "ROWS"}"#)
                .unwrap();
        assert!(body.values.is_empty());
        assert_eq!(body.range.as_deref(), Some("GrocerySKUs!A1:H1"));
    }
}
