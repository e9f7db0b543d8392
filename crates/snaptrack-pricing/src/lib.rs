//! Free-text price extraction and comparison for SnapTrack.
//!
//! Turns loosely formatted chat-completion answers into titled groups of
//! price records, scores them for value, and orders them for display. All
//! functions are pure and never fail on malformed input.

pub mod compare;
pub mod error;
pub mod normalize;
pub mod score;
pub mod summary;
pub mod types;

mod parse;

pub use compare::{arrange, sort_group, SortOption};
pub use error::PricingError;
pub use normalize::{normalize_line, normalize_response, normalize_response_with};
pub use score::{apply_value_scores, mark_best_deals, value_score, ValueScoreMode};
pub use summary::{summarize_store_price, StorePrice};
pub use types::{PriceGroup, PriceRecord, DEFAULT_GROUP_TITLE, UNKNOWN_STORE};
