//! Ingest command handler.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tradebot_core::config::AppConfig;
use tradebot_knowledge::{HttpFetcher, IngestOptions, Ingestor, KnowledgeStore};

/// Index local documents and reference pages into Pinecone
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Documents directory (overrides the configured one)
    #[arg(long)]
    pub docs: Option<PathBuf>,

    /// Skip the reference web pages
    #[arg(long)]
    pub no_web: bool,

    /// Documents per upsert batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Output statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        let store = KnowledgeStore::open(config)
            .await
            .context("Cannot open the knowledge store")?;

        let fetcher = HttpFetcher::new(config.request_timeout())?;
        let ingestor = Ingestor::new(
            Arc::clone(&store.embedder),
            Arc::clone(&store.index),
            Arc::new(fetcher),
        )
        .with_embed_batch_size(store.embedding.batch_size);

        let options = IngestOptions {
            docs_dir: self
                .docs
                .clone()
                .unwrap_or_else(|| config.ingest.docs_dir.clone()),
            include_web: !self.no_web,
            batch_size: self.batch_size.unwrap_or(config.ingest.batch_size),
            chunk_size: config.ingest.chunk_size,
            chunk_overlap: config.ingest.chunk_overlap,
        };

        let stats = ingestor.run(&options).await?;

        if self.json {
            let output = serde_json::json!({
                "documents": stats.documents,
                "skipped": stats.skipped,
                "chunks": stats.chunks,
                "upserted": stats.upserted,
                "batches": stats.batches,
                "durationMs": stats.duration_ms,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "Indexed {} documents ({} skipped): {} chunks, {} vectors in {} batches, {} ms",
                stats.documents,
                stats.skipped,
                stats.chunks,
                stats.upserted,
                stats.batches,
                stats.duration_ms
            );
        }

        Ok(())
    }
}
