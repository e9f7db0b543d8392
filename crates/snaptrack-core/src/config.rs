use snaptrack_pricing::ValueScoreMode;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap`. Every variable has a default; API keys and sheet IDs are
/// optional here and enforced by the commands that need them.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            }),
            Ok(n) => Ok(n),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let env = parse_environment(&or_default("SNAPTRACK_ENV", "development"))?;
    let log_level = or_default("SNAPTRACK_LOG_LEVEL", "info");

    let openrouter_api_key = optional("OPENROUTER_API_KEY");
    let openrouter_base_url = or_default("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1");
    let text_model = or_default("SNAPTRACK_TEXT_MODEL", "perplexity/r1-1776");
    let vision_model = or_default(
        "SNAPTRACK_VISION_MODEL",
        "google/gemini-2.0-pro-exp-02-05:free",
    );

    let sheets_api_key = optional("GOOGLE_SHEETS_API_KEY");
    let sheets_base_url = or_default("GOOGLE_SHEETS_BASE_URL", "https://sheets.googleapis.com");
    let product_sheet_id = optional("SNAPTRACK_PRODUCT_SHEET_ID");
    let product_sheet_range = or_default("SNAPTRACK_PRODUCT_SHEET_RANGE", "GrocerySKUs!A:H");
    let receipt_sheet_id = optional("SNAPTRACK_RECEIPT_SHEET_ID");

    let request_timeout_secs = parse_u64("SNAPTRACK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "SNAPTRACK_USER_AGENT",
        "snaptrack/0.1 (grocery-price-tracking)",
    );
    let max_concurrent_requests = parse_positive_usize("SNAPTRACK_MAX_CONCURRENT_REQUESTS", "5")?;
    let compare_batch_size = parse_positive_usize("SNAPTRACK_COMPARE_BATCH_SIZE", "5")?;

    let value_score_mode = or_default("SNAPTRACK_VALUE_SCORE_MODE", "as-parsed")
        .parse::<ValueScoreMode>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "SNAPTRACK_VALUE_SCORE_MODE".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        env,
        log_level,
        openrouter_api_key,
        openrouter_base_url,
        text_model,
        vision_model,
        sheets_api_key,
        sheets_base_url,
        product_sheet_id,
        product_sheet_range,
        receipt_sheet_id,
        request_timeout_secs,
        user_agent,
        max_concurrent_requests,
        compare_batch_size,
        value_score_mode,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SNAPTRACK_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
