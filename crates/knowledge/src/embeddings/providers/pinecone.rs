//! Pinecone Inference embedding provider.
//!
//! Calls the hosted `/embed` endpoint with `multilingual-e5-large` (1024
//! dimensions by default). Queries and passages are embedded with their
//! respective `input_type` so retrieval matches what ingestion stored.

use crate::embeddings::{EmbeddingConfig, EmbeddingProvider, InputType};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use tradebot_core::{AppError, AppResult};

/// Control-plane base URL, also serving the inference API.
pub const PINECONE_API_URL: &str = "https://api.pinecone.io";

/// API version header value for inference and control-plane calls.
pub const PINECONE_API_VERSION: &str = "2025-01";

/// Pinecone Inference embedding provider
#[derive(Debug, Clone)]
pub struct PineconeProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    parameters: EmbedParameters,
    inputs: Vec<EmbedInput<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedParameters {
    input_type: &'static str,
    truncate: &'static str,
}

#[derive(Debug, Serialize)]
struct EmbedInput<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedValues>,
}

#[derive(Debug, Deserialize)]
struct EmbedValues {
    values: Vec<f32>,
}

impl PineconeProvider {
    /// Create a provider against the public inference endpoint.
    pub fn new(config: &EmbeddingConfig, api_key: &str, timeout: Duration) -> AppResult<Self> {
        Self::with_base_url(config, api_key, timeout, PINECONE_API_URL)
    }

    /// Create a provider against a custom base URL.
    pub fn with_base_url(
        config: &EmbeddingConfig,
        api_key: &str,
        timeout: Duration,
        base_url: &str,
    ) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::Knowledge(format!("Failed to create HTTP client for Pinecone: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    fn build_request<'a>(&'a self, texts: &'a [String], input_type: InputType) -> EmbedRequest<'a> {
        EmbedRequest {
            model: &self.model,
            parameters: EmbedParameters {
                input_type: input_type.as_str(),
                truncate: "END",
            },
            inputs: texts.iter().map(|t| EmbedInput { text: t }).collect(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for PineconeProvider {
    fn provider_name(&self) -> &str {
        "pinecone"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[instrument(skip(self, texts), fields(batch_size = texts.len(), provider = "pinecone", model = %self.model))]
    async fn embed_batch(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embed", self.base_url);
        debug!("Sending embedding request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .json(&self.build_request(texts, input_type))
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Pinecone embed request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Knowledge(format!(
                "Pinecone embed error ({}): {}",
                status, body
            )));
        }

        let body: EmbedResponse = response.json().await.map_err(|e| {
            AppError::Knowledge(format!("Failed to parse Pinecone embed response: {}", e))
        })?;

        parse_embeddings(body, texts.len(), self.dimensions)
    }
}

fn parse_embeddings(
    body: EmbedResponse,
    expected: usize,
    dimensions: usize,
) -> AppResult<Vec<Vec<f32>>> {
    if body.data.len() != expected {
        return Err(AppError::Knowledge(format!(
            "Pinecone returned {} embeddings for {} inputs",
            body.data.len(),
            expected
        )));
    }

    body.data
        .into_iter()
        .map(|item| {
            if item.values.len() != dimensions {
                return Err(AppError::Knowledge(format!(
                    "Unexpected embedding dimensions: got {}, expected {}",
                    item.values.len(),
                    dimensions
                )));
            }
            Ok(item.values)
        })
        .collect()
}
