//! OpenAI-compatible chat-completions provider.
//!
//! OpenAI, Groq and DeepSeek all expose `POST {base}/chat/completions` with a
//! bearer token and the same request/response shape, so one client serves all
//! three. API reference: https://platform.openai.com/docs/api-reference/chat

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use crate::types::ProviderType;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tradebot_core::{AppError, AppResult};

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Client for any OpenAI-compatible chat-completions endpoint.
pub struct ChatCompletionsClient {
    /// Vendor behind the endpoint
    provider: ProviderType,

    /// Base URL, without the trailing `/chat/completions`
    base_url: String,

    /// Bearer token
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    /// Create a client for a vendor using its default endpoint.
    pub fn new(provider: ProviderType, api_key: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        Self::with_base_url(provider, provider.default_base_url(), api_key, timeout)
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(
        provider: ProviderType,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::Llm(format!(
                    "Failed to create HTTP client for {}: {}",
                    provider.as_str(),
                    e
                ))
            })?;

        Ok(Self {
            provider,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Convert LlmRequest to the chat-completions format.
    fn to_chat_request(&self, request: &LlmRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: Some(system.clone()),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: Some(request.prompt.clone()),
        });

        ChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Convert a chat-completions response to LlmResponse.
    fn convert_response(&self, request: &LlmRequest, response: ChatResponse) -> AppResult<LlmResponse> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::Llm(format!(
                    "{} response has no choices[0].message.content",
                    self.provider.as_str()
                ))
            })?;

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: response.model.unwrap_or_else(|| request.model.clone()),
            usage,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for ChatCompletionsClient {
    fn provider_name(&self) -> &str {
        self.provider.as_str()
    }

    fn default_model(&self) -> &str {
        self.provider.default_model()
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to {}", self.provider.as_str());
        tracing::debug!("Model: {}, prompt length: {}", request.model, request.prompt.len());

        let body = self.to_chat_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::Llm(format!(
                    "Failed to send request to {}: {}",
                    self.provider.as_str(),
                    e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "{} API error ({}): {}",
                self.provider.as_str(),
                status,
                error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            AppError::Llm(format!(
                "Failed to parse {} response: {}",
                self.provider.as_str(),
                e
            ))
        })?;

        let result = self.convert_response(request, chat_response)?;

        tracing::info!(
            "Received completion from {} ({} tokens)",
            self.provider.as_str(),
            result.usage.total_tokens
        );

        Ok(result)
    }
}
