//! HTTP client for the Google Sheets v4 values API.
//!
//! Reads the product catalogue with an API key and appends purchased items
//! to the receipt log sheet.

use std::time::Duration;

use reqwest::{Client, Url};
use snaptrack_core::PurchaseRecord;

use crate::error::SheetsError;
use crate::types::{products_from_values, SheetProduct, ValuesResponse};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Range receipt rows are appended to: item, price, date, email.
pub const RECEIPT_RANGE: &str = "ReceiptData!A:D";

/// Client for the Google Sheets values API.
pub struct SheetsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SheetsClient {
    /// Creates a new client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SheetsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SheetsError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches every product row in `range` of the catalogue sheet.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SheetsError::Deserialize`] if the body is not a values response.
    /// - [`SheetsError::NoData`] if no row maps to a product.
    pub async fn fetch_products(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<SheetProduct>, SheetsError> {
        let url = self.values_url(sheet_id, range, &[])?;
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: ValuesResponse =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: format!("values(sheet={sheet_id}, range={range})"),
                source: e,
            })?;

        let products = products_from_values(&parsed.values);
        tracing::debug!(
            sheet_id,
            rows = parsed.values.len(),
            products = products.len(),
            "fetched catalogue sheet"
        );

        if products.is_empty() {
            return Err(SheetsError::NoData);
        }
        Ok(products)
    }

    /// Appends one row per purchase to [`RECEIPT_RANGE`] of the receipt sheet.
    ///
    /// Prices are written with two decimals. An empty slice sends nothing.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::Deserialize`] if the reply is not JSON.
    /// - [`SheetsError::Api`] if the reply carries an `error` object or a
    ///   non-2xx status.
    pub async fn append_receipt_rows(
        &self,
        sheet_id: &str,
        records: &[PurchaseRecord],
    ) -> Result<(), SheetsError> {
        if records.is_empty() {
            tracing::debug!(sheet_id, "no receipt rows to append");
            return Ok(());
        }

        let append_segment = format!("{RECEIPT_RANGE}:append");
        let url = self.values_url(
            sheet_id,
            &append_segment,
            &[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ],
        )?;

        let values: Vec<[String; 4]> = records
            .iter()
            .map(|r| {
                [
                    r.item.clone(),
                    format!("{:.2}", r.price.round_dp(2)),
                    r.date.clone(),
                    r.email.clone(),
                ]
            })
            .collect();
        let payload = serde_json::json!({ "values": values });

        let response = self.client.post(url).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let reply: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: format!("append(sheet={sheet_id})"),
                source: e,
            })?;

        if let Some(message) = api_error_message(&reply) {
            tracing::error!(sheet_id, %status, error = %message, "receipt append rejected");
            return Err(SheetsError::Api(message));
        }
        if !status.is_success() {
            return Err(SheetsError::Api(format!("unexpected HTTP status {status}")));
        }

        tracing::info!(sheet_id, rows = records.len(), "appended receipt rows");
        Ok(())
    }

    /// Builds `{base}/v4/spreadsheets/{sheet_id}/values/{range}?key=..&extra..`.
    fn values_url(
        &self,
        sheet_id: &str,
        range: &str,
        extra: &[(&str, &str)],
    ) -> Result<Url, SheetsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SheetsError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}

fn api_error_message(reply: &serde_json::Value) -> Option<String> {
    let error = reply.get("error")?.as_object()?;
    Some(
        error
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SheetsClient {
        SheetsClient::with_base_url("test-key", 30, "snaptrack-test", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn values_url_places_range_in_path() {
        let client = test_client("https://sheets.googleapis.com");
        let url = client.values_url("abc", "GrocerySKUs!A:H", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/GrocerySKUs!A:H?key=test-key"
        );
    }

    #[test]
    fn values_url_adds_extra_params_before_key() {
        let client = test_client("https://sheets.googleapis.com/");
        let url = client
            .values_url("abc", "ReceiptData!A:D:append", &[("valueInputOption", "USER_ENTERED")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/ReceiptData!A:D:append\
             ?valueInputOption=USER_ENTERED&key=test-key"
        );
    }

    #[test]
    fn values_url_keeps_base_path_prefix() {
        let client = test_client("http://127.0.0.1:9000/mock");
        let url = client.values_url("abc", "A:B", &[]).unwrap();
        assert_eq!(url.path(), "/mock/v4/spreadsheets/abc/values/A:B");
    }

    #[test]
    fn api_error_message_reads_error_object() {
        let reply = serde_json::json!({ "error": { "code": 403, "message": "denied" } });
        assert_eq!(api_error_message(&reply).as_deref(), Some("denied"));
        let reply = serde_json::json!({ "error": {} });
        assert_eq!(api_error_message(&reply).as_deref(), Some("unknown error"));
        let reply = serde_json::json!({ "updates": { "updatedRows": 1 } });
        assert!(api_error_message(&reply).is_none());
    }
}
