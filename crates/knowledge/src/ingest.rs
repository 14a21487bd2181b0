//! Offline ingestion: documents and web pages into the vector index.
//!
//! Sources are processed in fixed-size document batches. Each batch is
//! parsed, chunked, embedded as passages and upserted before the next one
//! starts, so a failure late in the run keeps the earlier batches.

use crate::chunker::chunk_text;
use crate::embeddings::{embed_in_batches, EmbeddingProvider, InputType};
use crate::parser::{html_to_text, parse_file, ContentType};
use crate::types::{
    ChunkCandidate, DocumentSource, IngestOptions, IngestStats, RecordMetadata, VectorRecord,
};
use crate::vector_index::VectorIndex;
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tradebot_core::{AppError, AppResult};
use walkdir::WalkDir;

/// Reference pages on trade, customs and logistics fetched on every run.
pub const DEFAULT_WEB_SOURCES: [&str; 8] = [
    "https://es.wikipedia.org/wiki/Comercio_internacional",
    "https://es.wikipedia.org/wiki/Organizaci%C3%B3n_Mundial_del_Comercio",
    "https://es.wikipedia.org/wiki/Arancel",
    "https://es.wikipedia.org/wiki/Incoterms",
    "https://es.wikipedia.org/wiki/Web_scraping",
    "https://es.wikipedia.org/wiki/Extracci%C3%B3n_de_datos",
    "https://es.wikipedia.org/wiki/Log%C3%ADstica",
    "https://es.wikipedia.org/wiki/Aduana",
];

/// Fetches a web page as plain text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> AppResult<String>;
}

/// Fetches pages over HTTP and strips the HTML.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tradebot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Knowledge(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Knowledge(format!(
                "Failed to fetch {}: {}",
                url,
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to read {}: {}", url, e)))?;

        Ok(html_to_text(&html))
    }
}

/// Runs ingestion against an embedding provider and a vector index.
pub struct Ingestor {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    fetcher: Arc<dyn PageFetcher>,
    web_sources: Vec<String>,
    embed_batch_size: usize,
}

impl Ingestor {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            embedder,
            index,
            fetcher,
            web_sources: DEFAULT_WEB_SOURCES.iter().map(|s| s.to_string()).collect(),
            embed_batch_size: 96,
        }
    }

    /// Replace the list of web pages.
    pub fn with_web_sources(mut self, sources: Vec<String>) -> Self {
        self.web_sources = sources;
        self
    }

    /// Maximum texts per embedding request.
    pub fn with_embed_batch_size(mut self, size: usize) -> Self {
        self.embed_batch_size = size.max(1);
        self
    }

    /// Ingest every source and return run statistics.
    pub async fn run(&self, options: &IngestOptions) -> AppResult<IngestStats> {
        let start = Instant::now();

        if self.embedder.provider_name() == "placeholder" {
            return Err(AppError::Config(
                "Ingestion requires a real embedding provider (pinecone, openai or trigram)"
                    .to_string(),
            ));
        }
        if options.batch_size == 0 {
            return Err(AppError::Config("batch size must be positive".to_string()));
        }

        let mut sources: Vec<DocumentSource> = discover_files(&options.docs_dir)
            .into_iter()
            .map(DocumentSource::File)
            .collect();
        if options.include_web {
            sources.extend(self.web_sources.iter().cloned().map(DocumentSource::Url));
        }

        if sources.is_empty() {
            return Err(AppError::Knowledge(format!(
                "No documents found to ingest in {:?}",
                options.docs_dir
            )));
        }

        let total_batches = sources.len().div_ceil(options.batch_size);
        tracing::info!(
            "Ingesting {} sources in {} batches of up to {}",
            sources.len(),
            total_batches,
            options.batch_size
        );

        let mut stats = IngestStats::default();

        for (batch_no, batch) in sources.chunks(options.batch_size).enumerate() {
            tracing::info!("Processing batch {}/{}", batch_no + 1, total_batches);

            let mut candidates = Vec::new();
            for source in batch {
                match self.load(source).await {
                    Ok(text) if !text.trim().is_empty() => {
                        stats.documents += 1;
                        candidates.extend(chunk_text(
                            &source.to_string(),
                            &text,
                            options.chunk_size,
                            options.chunk_overlap,
                        ));
                    }
                    Ok(_) => {
                        tracing::warn!("Skipping empty document: {}", source);
                        stats.skipped += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", source, e);
                        stats.skipped += 1;
                    }
                }
            }

            if candidates.is_empty() {
                continue;
            }

            let upserted = self.embed_and_upsert(&candidates).await?;
            stats.chunks += candidates.len() as u32;
            stats.upserted += upserted as u32;
            stats.batches += 1;

            tracing::info!(
                "Batch {}/{} upserted ({} vectors)",
                batch_no + 1,
                total_batches,
                upserted
            );
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ingestion complete: {} documents, {} skipped, {} chunks, {} vectors in {}ms",
            stats.documents,
            stats.skipped,
            stats.chunks,
            stats.upserted,
            stats.duration_ms
        );

        Ok(stats)
    }

    async fn load(&self, source: &DocumentSource) -> AppResult<String> {
        match source {
            DocumentSource::File(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || parse_file(&path))
                    .await
                    .map_err(|e| AppError::Knowledge(format!("Parser task failed: {}", e)))?
            }
            DocumentSource::Url(url) => self.fetcher.fetch_text(url).await,
        }
    }

    async fn embed_and_upsert(&self, candidates: &[ChunkCandidate]) -> AppResult<usize> {
        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let embeddings = embed_in_batches(
            self.embedder.as_ref(),
            &texts,
            self.embed_batch_size,
            InputType::Passage,
        )
        .await?;

        if embeddings.len() != candidates.len() {
            return Err(AppError::Knowledge(format!(
                "Expected {} embeddings, got {}",
                candidates.len(),
                embeddings.len()
            )));
        }

        let ingested_at = Utc::now();
        let records: Vec<VectorRecord> = candidates
            .iter()
            .zip(embeddings)
            .map(|(chunk, values)| VectorRecord {
                id: record_id(&chunk.source_id, chunk.position),
                values,
                metadata: RecordMetadata {
                    text: chunk.text.clone(),
                    source: chunk.source_id.clone(),
                    ingested_at,
                },
            })
            .collect();

        self.index.upsert(&records).await
    }
}

/// Stable record id: hex SHA-256 of `source#position`.
///
/// Re-ingesting the same source overwrites its previous vectors.
pub fn record_id(source: &str, position: u32) -> String {
    format!("{:x}", Sha256::digest(format!("{}#{}", source, position).as_bytes()))
}

/// Supported documents under `dir`, sorted by path.
pub fn discover_files(dir: &Path) -> Vec<std::path::PathBuf> {
    if !dir.exists() {
        tracing::warn!("Documents directory {:?} does not exist", dir);
        return Vec::new();
    }

    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| ContentType::from_path(p).is_supported())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::{placeholder::PlaceholderProvider, trigram::TrigramProvider};
    use crate::types::{IndexStats, ScoredMatch};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingIndex {
        calls: Mutex<Vec<Vec<VectorRecord>>>,
    }

    #[async_trait]
    impl VectorIndex for RecordingIndex {
        async fn query(&self, _: &[f32], _: u32, _: bool) -> AppResult<Vec<ScoredMatch>> {
            Ok(Vec::new())
        }

        async fn upsert(&self, records: &[VectorRecord]) -> AppResult<usize> {
            self.calls.lock().unwrap().push(records.to_vec());
            Ok(records.len())
        }

        async fn describe(&self) -> AppResult<IndexStats> {
            Ok(IndexStats::default())
        }
    }

    struct MapFetcher(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch_text(&self, url: &str) -> AppResult<String> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::Knowledge(format!("404 {}", url)))
        }
    }

    fn write_docs(dir: &Path, count: usize) {
        for i in 0..count {
            std::fs::write(
                dir.join(format!("doc{}.txt", i)),
                format!("Documento {} sobre aranceles y aduanas.", i),
            )
            .unwrap();
        }
        std::fs::write(dir.join("ignorado.csv"), "a,b").unwrap();
    }

    fn options(dir: &Path, include_web: bool) -> IngestOptions {
        IngestOptions {
            docs_dir: dir.to_path_buf(),
            include_web,
            batch_size: 5,
            ..IngestOptions::default()
        }
    }

    fn ingestor(index: Arc<RecordingIndex>, pages: &[(&str, &str)]) -> Ingestor {
        let fetcher = MapFetcher(
            pages
                .iter()
                .map(|(u, t)| (u.to_string(), t.to_string()))
                .collect(),
        );
        Ingestor::new(Arc::new(TrigramProvider::new(16)), index, Arc::new(fetcher))
    }

    #[test]
    fn test_record_id_is_stable() {
        let a = record_id("docs/guia.pdf", 0);
        assert_eq!(a, record_id("docs/guia.pdf", 0));
        assert_ne!(a, record_id("docs/guia.pdf", 1));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_discover_files_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        write_docs(temp.path(), 3);

        let files = discover_files(temp.path());
        assert_eq!(files.len(), 3);
        assert!(files.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_discover_missing_dir() {
        assert!(discover_files(Path::new("/nonexistent/tradebot-docs")).is_empty());
    }

    #[tokio::test]
    async fn test_run_batches_documents() {
        let temp = TempDir::new().unwrap();
        write_docs(temp.path(), 7);
        let index = Arc::new(RecordingIndex::default());

        let stats = ingestor(index.clone(), &[])
            .run(&options(temp.path(), false))
            .await
            .unwrap();

        assert_eq!(stats.documents, 7);
        assert_eq!(stats.batches, 2);
        assert_eq!(stats.upserted, 7);

        let calls = index.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 5);
        assert_eq!(calls[1].len(), 2);
        assert!(calls[0][0].metadata.text.starts_with("Documento 0"));
        assert_eq!(calls[0][0].values.len(), 16);
    }

    #[tokio::test]
    async fn test_failed_pages_are_skipped() {
        let temp = TempDir::new().unwrap();
        let index = Arc::new(RecordingIndex::default());
        let ingestor = ingestor(
            index.clone(),
            &[("https://es.wikipedia.org/wiki/Arancel", "El arancel es un tributo.")],
        );

        let stats = ingestor.run(&options(temp.path(), true)).await.unwrap();

        assert_eq!(stats.documents, 1);
        assert_eq!(stats.skipped, 7);
        let calls = index.calls.lock().unwrap();
        let record = &calls[0][0];
        assert_eq!(record.metadata.source, "https://es.wikipedia.org/wiki/Arancel");
        assert_eq!(record.id, record_id("https://es.wikipedia.org/wiki/Arancel", 0));
    }

    #[tokio::test]
    async fn test_no_sources_is_error() {
        let temp = TempDir::new().unwrap();
        let index = Arc::new(RecordingIndex::default());

        let result = ingestor(index, &[]).run(&options(temp.path(), false)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_placeholder_embedder_rejected() {
        let temp = TempDir::new().unwrap();
        write_docs(temp.path(), 1);
        let ingestor = Ingestor::new(
            Arc::new(PlaceholderProvider::new(8)),
            Arc::new(RecordingIndex::default()),
            Arc::new(MapFetcher(HashMap::new())),
        );

        assert!(ingestor.run(&options(temp.path(), false)).await.is_err());
    }
}
