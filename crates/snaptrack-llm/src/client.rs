//! HTTP client for an OpenAI-compatible chat-completion API.
//!
//! Text prompts go to the text model, receipt photos to the vision model as
//! base64 data URLs. Every call returns the first choice's message content.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, Url};

use crate::error::LlmError;
use crate::prompts::{barcode_prompt, price_comparison_prompt, receipt_prompt};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, MessageContent};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_TEXT_MODEL: &str = "perplexity/r1-1776";
const DEFAULT_VISION_MODEL: &str = "google/gemini-2.0-pro-exp-02-05:free";

/// Client for the chat-completion API.
///
/// Use [`ChatClient::new`] for production or [`ChatClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ChatClient {
    client: Client,
    api_key: String,
    completions_url: Url,
    text_model: String,
    vision_model: String,
}

impl ChatClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LlmError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `join` append to the path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let completions_url = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| LlmError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            completions_url,
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            vision_model: DEFAULT_VISION_MODEL.to_owned(),
        })
    }

    /// Overrides the text and vision model identifiers.
    #[must_use]
    pub fn with_models(mut self, text_model: &str, vision_model: &str) -> Self {
        text_model.clone_into(&mut self.text_model);
        vision_model.clone_into(&mut self.vision_model);
        self
    }

    /// Asks the text model to describe the product behind a barcode.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] on network failure or non-2xx HTTP status.
    /// - [`LlmError::Deserialize`] if the body is not JSON.
    /// - [`LlmError::InvalidResponse`] if the reply has no message content.
    pub async fn lookup_barcode(&self, barcode: &str) -> Result<String, LlmError> {
        let content = MessageContent::Text(barcode_prompt(barcode));
        self.complete(&self.text_model, content).await
    }

    /// Asks the text model for the current price of `item` at `store`.
    ///
    /// The answer is free-form text suitable for
    /// `snaptrack_pricing::normalize_response`.
    ///
    /// # Errors
    ///
    /// Same as [`ChatClient::lookup_barcode`].
    pub async fn compare_price(&self, item: &str, store: &str) -> Result<String, LlmError> {
        let content = MessageContent::Text(price_comparison_prompt(item, store));
        self.complete(&self.text_model, content).await
    }

    /// Sends a JPEG receipt photo to the vision model and returns its answer.
    /// Feed the answer to [`crate::parse_receipt_items`].
    ///
    /// # Errors
    ///
    /// Same as [`ChatClient::lookup_barcode`].
    pub async fn scan_receipt(&self, jpeg: &[u8]) -> Result<String, LlmError> {
        let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg));
        let content = MessageContent::Parts(vec![
            ContentPart::Text {
                text: receipt_prompt(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl { url: data_url },
            },
        ]);
        self.complete(&self.vision_model, content).await
    }

    /// Posts a single user message and returns the first choice's content.
    async fn complete(&self, model: &str, content: MessageContent) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: model.to_owned(),
            messages: vec![ChatMessage::user(content)],
        };

        tracing::debug!(model, "sending chat completion request");
        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: format!("chat completion ({model})"),
                source: e,
            })?;

        match parsed.first_content() {
            Some(content) => {
                tracing::debug!(model, chars = content.len(), "chat completion received");
                Ok(content)
            }
            None => Err(LlmError::InvalidResponse { body }),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
