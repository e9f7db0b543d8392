//! Queries over fetched catalogue products.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::SheetsError;
use crate::types::SheetProduct;

/// One item's catalogue entries keyed by store name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreComparison {
    pub item: String,
    pub by_store: BTreeMap<String, SheetProduct>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First product at `store` (case-insensitive) whose item name contains
/// `name` (case-insensitive).
#[must_use]
pub fn lookup_product<'a>(
    products: &'a [SheetProduct],
    name: &str,
    store: &str,
) -> Option<&'a SheetProduct> {
    products
        .iter()
        .find(|p| p.store.to_lowercase() == store.to_lowercase() && contains_ignore_case(&p.item, name))
}

/// First product at `store` whose item or brand text contains `barcode`.
#[must_use]
pub fn lookup_by_barcode<'a>(
    products: &'a [SheetProduct],
    barcode: &str,
    store: &str,
) -> Option<&'a SheetProduct> {
    products.iter().find(|p| {
        p.store.to_lowercase() == store.to_lowercase()
            && (p.item.contains(barcode) || p.brand.contains(barcode))
    })
}

/// Distinct store names, sorted.
#[must_use]
pub fn available_stores(products: &[SheetProduct]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.store.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every store's entry for products whose item name contains `item`.
/// When a store lists several matches the last one wins.
///
/// # Errors
///
/// Returns [`SheetsError::ItemNotFound`] when nothing matches.
pub fn compare_across_stores(
    products: &[SheetProduct],
    item: &str,
) -> Result<StoreComparison, SheetsError> {
    let by_store: BTreeMap<String, SheetProduct> = products
        .iter()
        .filter(|p| contains_ignore_case(&p.item, item))
        .map(|p| (p.store.clone(), p.clone()))
        .collect();

    if by_store.is_empty() {
        return Err(SheetsError::ItemNotFound(item.to_string()));
    }

    Ok(StoreComparison {
        item: item.to_string(),
        by_store,
    })
}

/// Product count per category; blank categories count as `"Unknown"`.
#[must_use]
pub fn category_breakdown(products: &[SheetProduct]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        let category = if product.category.is_empty() {
            "Unknown"
        } else {
            product.category.as_str()
        };
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
    counts
}
