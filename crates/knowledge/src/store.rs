//! Connection to the configured knowledge store.

use crate::embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
use crate::retriever::VectorRetriever;
use crate::vector_index::{PineconeIndex, VectorIndex};
use std::sync::Arc;
use tradebot_core::{AppConfig, AppError, AppResult};

/// An embedding provider paired with the index it feeds.
pub struct KnowledgeStore {
    pub embedding: EmbeddingConfig,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub index: Arc<dyn VectorIndex>,
    top_k: u32,
}

impl KnowledgeStore {
    /// Connect to Pinecone and verify the embedding dimensionality.
    ///
    /// Fails when the Pinecone key is missing, the index cannot be reached,
    /// or the provider's vectors do not fit the index.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let api_key = config
            .pinecone_api_key()
            .ok_or_else(|| AppError::Config("PINECONE_API_KEY is not set".to_string()))?;

        let embedding = EmbeddingConfig::from_settings(&config.embedding)?;
        let embedder_key = match embedding.provider.as_str() {
            "pinecone" => Some(api_key),
            other => config.resolve_api_key(other),
        };
        let embedder = create_provider(&embedding, embedder_key, config.request_timeout())?;

        let index = PineconeIndex::connect(
            api_key,
            &config.pinecone.index_name,
            config.pinecone.index_host.as_deref(),
            config.request_timeout(),
        )
        .await?;

        let dimension = match index.known_dimension() {
            Some(dimension) => dimension,
            None => index.describe().await?.dimension,
        };
        embedding.check_index_dimension(dimension)?;

        tracing::info!(
            "Knowledge store ready: index '{}' ({} dims), embeddings {}/{}",
            config.pinecone.index_name,
            dimension,
            embedding.provider,
            embedding.model
        );

        Ok(Self {
            embedding,
            embedder,
            index: Arc::new(index),
            top_k: config.pinecone.top_k,
        })
    }

    /// A retriever over this store.
    pub fn retriever(&self) -> VectorRetriever {
        VectorRetriever::new(Arc::clone(&self.embedder), Arc::clone(&self.index))
            .with_top_k(self.top_k)
    }
}
