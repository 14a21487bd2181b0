//! Embedding providers for retrieval and ingestion.
//!
//! Provides provider-agnostic embedding generation. Hosted providers
//! (Pinecone inference, OpenAI) produce the vectors stored in the index;
//! `placeholder` and `trigram` run without credentials.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider, InputType};

use tradebot_core::AppResult;

/// Embed `texts` in provider-sized batches, preserving order.
pub async fn embed_in_batches(
    provider: &dyn EmbeddingProvider,
    texts: &[String],
    batch_size: usize,
    input_type: InputType,
) -> AppResult<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    tracing::info!(
        "Embedding {} texts using provider '{}' (model: {})",
        texts.len(),
        provider.provider_name(),
        provider.model_name()
    );

    let mut embeddings = Vec::with_capacity(texts.len());
    for batch in texts.chunks(batch_size.max(1)) {
        embeddings.extend(provider.embed_batch(batch, input_type).await?);
    }

    tracing::debug!(
        "Generated {} embeddings of dimension {}",
        embeddings.len(),
        provider.dimensions()
    );

    Ok(embeddings)
}
