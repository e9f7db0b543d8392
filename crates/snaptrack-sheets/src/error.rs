use thiserror::Error;

/// Errors returned by the spreadsheet client and catalogue queries.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be used.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The sheet had no usable product rows.
    #[error("no product rows found in sheet")]
    NoData,

    /// No catalogue product matched the requested item.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The Sheets API replied with an `error` object.
    #[error("Sheets API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
