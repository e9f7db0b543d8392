//! Google Sheets access for the product catalogue and the receipt log.

pub mod catalog;
pub mod client;
pub mod error;
pub mod types;

pub use catalog::{
    available_stores, category_breakdown, compare_across_stores, lookup_by_barcode,
    lookup_product, StoreComparison,
};
pub use client::SheetsClient;
pub use error::SheetsError;
pub use types::{products_from_values, SheetProduct, ValuesResponse};
