use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("unknown sort option \"{0}\" (expected price-asc, price-desc, store or value)")]
    UnknownSortOption(String),

    #[error("unknown value score mode \"{0}\" (expected as-parsed or ounce-normalized)")]
    UnknownScoreMode(String),
}
