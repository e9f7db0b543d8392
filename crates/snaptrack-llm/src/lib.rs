//! Chat-completion client for product lookups, price comparisons, and
//! receipt scanning.

pub mod barcode;
pub mod client;
pub mod error;
pub mod prompts;
pub mod receipt;
pub mod types;

pub use barcode::parse_barcode_answer;
pub use client::ChatClient;
pub use error::LlmError;
pub use prompts::Store;
pub use receipt::{extract_json_array, parse_receipt_items, parse_receipt_text};
