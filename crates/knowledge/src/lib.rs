//! Knowledge services for Tradebot.
//!
//! Everything the composer consults before generation lives here:
//! embedding providers, the Pinecone vector index, the thresholded
//! retriever and web search. The offline ingestion pipeline that fills the
//! index (parsing, chunking, batched upserts) shares the same clients.

pub mod chunker;
pub mod embeddings;
pub mod ingest;
pub mod parser;
pub mod retriever;
pub mod search;
pub mod store;
pub mod types;
pub mod vector_index;

// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider, InputType};
pub use ingest::{HttpFetcher, Ingestor, PageFetcher, DEFAULT_WEB_SOURCES};
pub use retriever::{Retriever, VectorRetriever, RELEVANCE_THRESHOLD};
pub use search::{DuckDuckGoSearch, WebSearch, OFFICIAL_DOMAINS};
pub use store::KnowledgeStore;
pub use types::{
    IndexStats, IngestOptions, IngestStats, RetrievedContext, ScoredMatch, ScoredSnippet,
    VectorRecord, WebResult,
};
pub use vector_index::{PineconeIndex, VectorIndex};
