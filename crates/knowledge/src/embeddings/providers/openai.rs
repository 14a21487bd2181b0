//! OpenAI embeddings provider (`/v1/embeddings`).

use crate::embeddings::{EmbeddingConfig, EmbeddingProvider, InputType};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use tradebot_core::{AppError, AppResult};

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// OpenAI embeddings provider
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    pub fn new(config: &EmbeddingConfig, api_key: &str, timeout: Duration) -> AppResult<Self> {
        Self::with_base_url(config, api_key, timeout, DEFAULT_OPENAI_URL)
    }

    pub fn with_base_url(
        config: &EmbeddingConfig,
        api_key: &str,
        timeout: Duration,
        base_url: &str,
    ) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::Knowledge(format!("Failed to create HTTP client for OpenAI: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    fn build_request<'a>(&'a self, texts: &'a [String]) -> EmbeddingRequest<'a> {
        // Only the text-embedding-3 family accepts a dimensions override
        let dimensions = self
            .model
            .starts_with("text-embedding-3")
            .then_some(self.dimensions);

        EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[instrument(skip(self, texts, _input_type), fields(batch_size = texts.len(), provider = "openai", model = %self.model))]
    async fn embed_batch(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.base_url);
        debug!("Sending embedding request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(texts))
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("OpenAI embed request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Knowledge(format!(
                "OpenAI embed error ({}): {}",
                status, body
            )));
        }

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            AppError::Knowledge(format!("Failed to parse OpenAI embed response: {}", e))
        })?;

        order_embeddings(body, texts.len())
    }
}

/// Sort returned vectors back into input order.
fn order_embeddings(mut body: EmbeddingResponse, expected: usize) -> AppResult<Vec<Vec<f32>>> {
    if body.data.len() != expected {
        return Err(AppError::Knowledge(format!(
            "OpenAI returned {} embeddings for {} inputs",
            body.data.len(),
            expected
        )));
    }

    body.data.sort_by_key(|d| d.index);
    Ok(body.data.into_iter().map(|d| d.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_includes_dimensions_for_v3() {
        let provider = OpenAiProvider::new(
            &EmbeddingConfig::for_provider("openai"),
            "sk-test",
            Duration::from_secs(5),
        )
        .unwrap();
        let texts = vec!["Incoterms".to_string()];
        let json = serde_json::to_value(provider.build_request(&texts)).unwrap();

        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["dimensions"], 1536);
        assert_eq!(json["input"][0], "Incoterms");
    }

    #[test]
    fn test_request_omits_dimensions_for_ada() {
        let config = EmbeddingConfig {
            model: "text-embedding-ada-002".to_string(),
            ..EmbeddingConfig::for_provider("openai")
        };
        let provider = OpenAiProvider::new(&config, "sk-test", Duration::from_secs(5)).unwrap();
        let texts = vec!["x".to_string()];
        let json = serde_json::to_value(provider.build_request(&texts)).unwrap();

        assert!(json.get("dimensions").is_none());
    }

    #[test]
    fn test_order_embeddings_by_index() {
        let body: EmbeddingResponse = serde_json::from_value(serde_json::json!({
            "data": [
                {"index": 1, "embedding": [2.0]},
                {"index": 0, "embedding": [1.0]}
            ]
        }))
        .unwrap();

        assert_eq!(order_embeddings(body, 2).unwrap(), vec![vec![1.0], vec![2.0]]);
    }
}
