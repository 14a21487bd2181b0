//! Knowledge system type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A match returned by the vector index for a query vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Record identifier
    pub id: String,

    /// Similarity score reported by the index
    pub score: f32,

    /// `metadata.text` of the record, when metadata was requested
    pub text: Option<String>,

    /// `metadata.source` of the record, when present
    pub source: Option<String>,
}

/// Metadata stored alongside every upserted vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Chunk text returned at query time
    pub text: String,

    /// File path or URL the chunk came from
    pub source: String,

    /// Ingestion timestamp (RFC 3339)
    pub ingested_at: DateTime<Utc>,
}

/// A vector record ready for upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Stable record identifier
    pub id: String,

    /// Embedding values
    pub values: Vec<f32>,

    /// Attached metadata
    pub metadata: RecordMetadata,
}

/// Index statistics from the control plane and data plane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Vector dimensionality the index was created with
    pub dimension: usize,

    /// Number of stored vectors
    pub total_vector_count: u64,
}

/// A retrieved snippet that passed the relevance threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSnippet {
    pub text: String,
    pub score: f32,
    pub source: Option<String>,
}

/// Context gathered from the retrieval store for one question.
///
/// Snippets keep retrieval order; there is no deduplication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub snippets: Vec<ScoredSnippet>,
}

impl RetrievedContext {
    /// An empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a context from snippets.
    pub fn new(snippets: Vec<ScoredSnippet>) -> Self {
        Self { snippets }
    }

    /// Snippet texts concatenated in order, separated by blank lines.
    pub fn joined(&self) -> String {
        self.snippets
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Length of the trimmed concatenation, in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.joined().trim().chars().count()
    }

    /// True when no snippet passed the threshold.
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// A single web-search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Where an ingested document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// A candidate chunk before embedding.
#[derive(Debug, Clone)]
pub struct ChunkCandidate {
    /// Source identifier (path or URL)
    pub source_id: String,

    /// Position of the chunk within its source
    pub position: u32,

    /// Chunk text
    pub text: String,
}

/// Options for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Local documents directory
    pub docs_dir: PathBuf,

    /// Whether to fetch the fixed list of web pages
    pub include_web: bool,

    /// Documents per upsert batch
    pub batch_size: usize,

    /// Chunk size in bytes
    pub chunk_size: usize,

    /// Overlap between consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            include_web: true,
            batch_size: 5,
            chunk_size: 1024,
            chunk_overlap: 128,
        }
    }
}

/// Statistics from an ingestion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents read successfully
    pub documents: u32,

    /// Documents skipped (unreadable, empty or failed to fetch)
    pub skipped: u32,

    /// Chunks produced
    pub chunks: u32,

    /// Vectors upserted
    pub upserted: u32,

    /// Batches sent
    pub batches: u32,

    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(text: &str, score: f32) -> ScoredSnippet {
        ScoredSnippet {
            text: text.to_string(),
            score,
            source: None,
        }
    }

    #[test]
    fn test_retrieved_context_joined() {
        let ctx = RetrievedContext::new(vec![snippet("uno", 0.9), snippet("dos", 0.8)]);
        assert_eq!(ctx.joined(), "uno\n\ndos");
        assert_eq!(ctx.char_len(), 8);
    }

    #[test]
    fn test_char_len_counts_scalars_and_trims() {
        let ctx = RetrievedContext::new(vec![snippet("  aduana ñ  ", 0.9)]);
        assert_eq!(ctx.char_len(), "aduana ñ".chars().count());
    }

    #[test]
    fn test_empty_context() {
        let ctx = RetrievedContext::empty();
        assert!(ctx.is_empty());
        assert_eq!(ctx.char_len(), 0);
        assert_eq!(ctx.joined(), "");
    }

    #[test]
    fn test_document_source_display() {
        let url = DocumentSource::Url("https://es.wikipedia.org/wiki/Arancel".to_string());
        assert_eq!(url.to_string(), "https://es.wikipedia.org/wiki/Arancel");
        let file = DocumentSource::File(PathBuf::from("docs/guia.pdf"));
        assert_eq!(file.to_string(), "docs/guia.pdf");
    }
}
