//! Anthropic Messages API provider.
//!
//! API reference: https://docs.anthropic.com/en/api/messages

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use crate::types::ProviderType;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tradebot_core::{AppError, AppResult};

/// API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens`; used when the request has none.
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// Anthropic (Claude) LLM client.
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a client against the public API.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        Self::with_base_url(ProviderType::Anthropic.default_base_url(), api_key, timeout)
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client for Anthropic: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    fn to_messages_request(&self, request: &LlmRequest) -> MessagesRequest {
        MessagesRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: request.system.clone(),
            messages: vec![Message {
                role: "user",
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
        }
    }

    fn convert_response(&self, response: MessagesResponse) -> LlmResponse {
        let content = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.input_tokens, u.output_tokens))
            .unwrap_or_default();

        LlmResponse {
            content,
            model: response.model,
            usage,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for AnthropicClient {
    fn provider_name(&self) -> &str {
        ProviderType::Anthropic.as_str()
    }

    fn default_model(&self) -> &str {
        ProviderType::Anthropic.default_model()
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to Anthropic");

        let body = self.to_messages_request(request);
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Anthropic: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Anthropic API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Anthropic response: {}", e)))?;

        tracing::info!("Received completion from Anthropic");

        Ok(self.convert_response(parsed))
    }
}
