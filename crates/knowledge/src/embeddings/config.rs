//! Embedding configuration types and validation.

use serde::{Deserialize, Serialize};
use tradebot_core::config::EmbeddingSettings;
use tradebot_core::{AppError, AppResult};

/// Dimensionalities the hosted providers can produce for the trade index.
pub const SUPPORTED_HOSTED_DIMENSIONS: [usize; 2] = [1024, 1536];

/// Resolved embedding configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "pinecone", "openai", "placeholder", "trigram"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Maximum inputs per embedding request
    pub batch_size: usize,
}

impl EmbeddingConfig {
    /// Defaults for a provider.
    pub fn for_provider(provider: &str) -> Self {
        let (model, dimensions, batch_size) = match provider {
            "pinecone" => ("multilingual-e5-large", 1024, 96),
            "openai" => ("text-embedding-3-small", 1536, 100),
            "trigram" => ("trigram-v1", 1024, 100),
            _ => ("placeholder", 1024, 100),
        };

        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            dimensions,
            batch_size,
        }
    }

    /// Resolve from application settings, filling provider defaults.
    pub fn from_settings(settings: &EmbeddingSettings) -> AppResult<Self> {
        let defaults = Self::for_provider(&settings.provider);
        let config = Self {
            model: settings.model.clone().unwrap_or(defaults.model.clone()),
            dimensions: settings.dimensions.unwrap_or(defaults.dimensions),
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Whether vectors come from a hosted service.
    pub fn is_hosted(&self) -> bool {
        matches!(self.provider.as_str(), "pinecone" | "openai")
    }

    /// Validate dimensions and batch size.
    pub fn validate(&self) -> AppResult<()> {
        if self.dimensions == 0 {
            return Err(AppError::Config(
                "embedding dimensions must be positive".to_string(),
            ));
        }

        if self.is_hosted() && !SUPPORTED_HOSTED_DIMENSIONS.contains(&self.dimensions) {
            return Err(AppError::Config(format!(
                "Unsupported embedding dimensions {} for provider '{}'. Supported: 1024, 1536",
                self.dimensions, self.provider
            )));
        }

        if self.batch_size == 0 {
            return Err(AppError::Config(
                "embedding batch size must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Check that this configuration produces vectors the index accepts.
    pub fn check_index_dimension(&self, index_dimension: usize) -> AppResult<()> {
        if self.dimensions != index_dimension {
            return Err(AppError::Knowledge(format!(
                "Dimension mismatch: provider '{}' ({}) produces {}, index expects {}",
                self.provider, self.model, self.dimensions, index_dimension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: &str, model: Option<&str>, dims: Option<usize>) -> EmbeddingSettings {
        EmbeddingSettings {
            provider: provider.to_string(),
            model: model.map(str::to_string),
            dimensions: dims,
        }
    }

    #[test]
    fn test_provider_defaults() {
        let pinecone = EmbeddingConfig::for_provider("pinecone");
        assert_eq!(pinecone.model, "multilingual-e5-large");
        assert_eq!(pinecone.dimensions, 1024);

        let openai = EmbeddingConfig::for_provider("openai");
        assert_eq!(openai.model, "text-embedding-3-small");
        assert_eq!(openai.dimensions, 1536);
    }

    #[test]
    fn test_from_settings_overrides() {
        let config =
            EmbeddingConfig::from_settings(&settings("openai", Some("text-embedding-3-large"), Some(1024)))
                .unwrap();
        assert_eq!(config.model, "text-embedding-3-large");
        assert_eq!(config.dimensions, 1024);
        assert_eq!(config.batch_size, 100);
    }

    #[test]
    fn test_hosted_dimension_rejected() {
        let result = EmbeddingConfig::from_settings(&settings("pinecone", None, Some(384)));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unsupported embedding dimensions"));
    }

    #[test]
    fn test_local_provider_any_dimension() {
        let config = EmbeddingConfig::from_settings(&settings("trigram", None, Some(384))).unwrap();
        assert_eq!(config.dimensions, 384);
    }

    #[test]
    fn test_check_index_dimension() {
        let config = EmbeddingConfig::for_provider("openai");
        assert!(config.check_index_dimension(1536).is_ok());

        let err = config.check_index_dimension(1024).unwrap_err();
        assert!(err.to_string().contains("Dimension mismatch"));
    }
}
