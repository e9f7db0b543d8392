pub mod app_config;
pub mod config;
pub mod inventory;
pub mod items;
pub mod repurchase;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use inventory::Inventory;
pub use items::{GroceryItem, PurchaseRecord, ReceiptLine, DEFAULT_CATEGORY};
pub use repurchase::{predict_next_purchase, typical_repurchase_interval_days};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
