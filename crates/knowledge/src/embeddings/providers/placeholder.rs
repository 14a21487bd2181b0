//! Placeholder embedding provider for degraded deployments.

use crate::embeddings::{EmbeddingProvider, InputType};
use tradebot_core::AppResult;

/// Returns a constant zero vector for every input.
///
/// Lets retrieval run against the index without an embedding service;
/// scores are then meaningless and rarely pass the relevance threshold.
#[derive(Debug)]
pub struct PlaceholderProvider {
    dimensions: usize,
}

impl PlaceholderProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for PlaceholderProvider {
    fn provider_name(&self) -> &str {
        "placeholder"
    }

    fn model_name(&self) -> &str {
        "placeholder"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> AppResult<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; self.dimensions]; texts.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_is_constant() {
        let provider = PlaceholderProvider::new(1024);
        let texts = vec!["arancel".to_string(), "aduana".to_string()];
        let vectors = provider.embed_batch(&texts, InputType::Query).await.unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], vectors[1]);
        assert!(vectors[0].iter().all(|&x| x == 0.0));
    }
}
