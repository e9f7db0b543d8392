use snaptrack_pricing::ValueScoreMode;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    /// Model used for barcode lookups and price comparisons.
    pub text_model: String,
    /// Image-capable model used for receipt scanning.
    pub vision_model: String,
    pub sheets_api_key: Option<String>,
    pub sheets_base_url: String,
    pub product_sheet_id: Option<String>,
    /// A1 range holding the product catalogue, e.g. `GrocerySKUs!A:H`.
    pub product_sheet_range: String,
    pub receipt_sheet_id: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_requests: usize,
    /// Number of inventory items priced by one `compare` run.
    pub compare_batch_size: usize,
    pub value_score_mode: ValueScoreMode,
}

impl AppConfig {
    /// Returns the chat-completion API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `OPENROUTER_API_KEY` is unset.
    pub fn require_openrouter_key(&self) -> Result<&str, ConfigError> {
        self.openrouter_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))
    }

    /// Returns the spreadsheet API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `GOOGLE_SHEETS_API_KEY` is unset.
    pub fn require_sheets_key(&self) -> Result<&str, ConfigError> {
        self.sheets_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_SHEETS_API_KEY".to_string()))
    }

    /// Returns the product catalogue spreadsheet ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `SNAPTRACK_PRODUCT_SHEET_ID` is unset.
    pub fn require_product_sheet(&self) -> Result<&str, ConfigError> {
        self.product_sheet_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SNAPTRACK_PRODUCT_SHEET_ID".to_string()))
    }

    /// Returns the receipt log spreadsheet ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `SNAPTRACK_RECEIPT_SHEET_ID` is unset.
    pub fn require_receipt_sheet(&self) -> Result<&str, ConfigError> {
        self.receipt_sheet_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SNAPTRACK_RECEIPT_SHEET_ID".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openrouter_base_url", &self.openrouter_base_url)
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .field(
                "sheets_api_key",
                &self.sheets_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sheets_base_url", &self.sheets_base_url)
            .field("product_sheet_id", &self.product_sheet_id)
            .field("product_sheet_range", &self.product_sheet_range)
            .field("receipt_sheet_id", &self.receipt_sheet_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .field("compare_batch_size", &self.compare_batch_size)
            .field("value_score_mode", &self.value_score_mode)
            .finish()
    }
}
