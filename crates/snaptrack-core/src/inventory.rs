//! The user's grocery inventory.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::GroceryItem;

/// Grocery items on hand. Serializes as a plain JSON array of items, the
/// same shape `compare inventory` reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<GroceryItem>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `item`, merging it into an existing item whose name matches
    /// case-insensitively. A merge only adds the quantity; the existing
    /// price, category and id are kept.
    pub fn add_item(&mut self, item: GroceryItem) {
        let name = item.name.to_lowercase();
        match self
            .items
            .iter_mut()
            .find(|existing| existing.name.to_lowercase() == name)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
    }

    /// Items in `category` (exact match) whose name contains `query`
    /// (case-insensitive). `None` or an empty query skips that filter.
    #[must_use]
    pub fn filtered(&self, category: Option<&str>, query: Option<&str>) -> Vec<&GroceryItem> {
        let query = query.filter(|q| !q.is_empty()).map(str::to_lowercase);
        self.items
            .iter()
            .filter(|item| category.is_none_or(|c| item.category == c))
            .filter(|item| {
                query
                    .as_deref()
                    .is_none_or(|q| item.name.to_lowercase().contains(q))
            })
            .collect()
    }

    /// Sum of `price * quantity` over every item.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |total, item| {
            total.saturating_add(item.price.saturating_mul(item.quantity))
        })
    }

    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.quantity))
    }

    /// Distinct categories in use, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Extend<GroceryItem> for Inventory {
    fn extend<I: IntoIterator<Item = GroceryItem>>(&mut self, iter: I) {
        for item in iter {
            self.add_item(item);
        }
    }
}

impl FromIterator<GroceryItem> for Inventory {
    fn from_iter<I: IntoIterator<Item = GroceryItem>>(iter: I) -> Self {
        let mut inventory = Self::new();
        inventory.extend(iter);
        inventory
    }
}
