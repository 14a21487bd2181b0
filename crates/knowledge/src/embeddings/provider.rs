//! Embedding provider trait and factory.

use crate::embeddings::config::EmbeddingConfig;
use crate::embeddings::providers::{
    openai::OpenAiProvider, pinecone::PineconeProvider, placeholder::PlaceholderProvider,
    trigram::TrigramProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tradebot_core::{AppError, AppResult};

/// Whether a text is a search query or a stored passage.
///
/// Asymmetric models (e5) embed the two differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Query,
    Passage,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Passage => "passage",
        }
    }
}

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "pinecone", "openai", "trigram")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String], input_type: InputType)
        -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str, input_type: InputType) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()], input_type).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Knowledge("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
///
/// Hosted providers require an API key; `placeholder` and `trigram` ignore it.
pub fn create_provider(
    config: &EmbeddingConfig,
    api_key: Option<&str>,
    timeout: Duration,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    config.validate()?;

    let require_key = |env: &str| {
        api_key.ok_or_else(|| {
            AppError::Config(format!(
                "Embedding provider '{}' requires {}",
                config.provider, env
            ))
        })
    };

    match config.provider.as_str() {
        "pinecone" => {
            let key = require_key("PINECONE_API_KEY")?;
            Ok(Arc::new(PineconeProvider::new(config, key, timeout)?))
        }

        "openai" => {
            let key = require_key("OPENAI_API_KEY")?;
            Ok(Arc::new(OpenAiProvider::new(config, key, timeout)?))
        }

        "placeholder" => Ok(Arc::new(PlaceholderProvider::new(config.dimensions))),

        "trigram" => Ok(Arc::new(TrigramProvider::new(config.dimensions))),

        _ => Err(AppError::Knowledge(format!(
            "Unknown embedding provider: '{}'. Supported providers: pinecone, openai, placeholder, trigram",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_create_trigram_provider() {
        let config = EmbeddingConfig::for_provider("trigram");

        let provider = create_provider(&config, None, TIMEOUT).unwrap();
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 1024);
    }

    #[test]
    fn test_create_pinecone_requires_key() {
        let config = EmbeddingConfig::for_provider("pinecone");

        let err = create_provider(&config, None, TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("PINECONE_API_KEY"));

        let provider = create_provider(&config, Some("pc-test"), TIMEOUT).unwrap();
        assert_eq!(provider.model_name(), "multilingual-e5-large");
        assert_eq!(provider.dimensions(), 1024);
    }

    #[test]
    fn test_create_openai_provider() {
        let config = EmbeddingConfig::for_provider("openai");
        let provider = create_provider(&config, Some("sk-test"), TIMEOUT).unwrap();
        assert_eq!(provider.dimensions(), 1536);
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = EmbeddingConfig {
            provider: "unknown".to_string(),
            ..EmbeddingConfig::for_provider("trigram")
        };

        let result = create_provider(&config, None, TIMEOUT);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_placeholder_embed_single() {
        let config = EmbeddingConfig::for_provider("placeholder");
        let provider = create_provider(&config, None, TIMEOUT).unwrap();

        let embedding = provider.embed("arancel", InputType::Query).await.unwrap();
        assert_eq!(embedding.len(), 1024);
    }
}
