//! Retrieval of specialized context for a question.

use crate::embeddings::{EmbeddingProvider, InputType};
use crate::types::{RetrievedContext, ScoredMatch, ScoredSnippet};
use crate::vector_index::VectorIndex;
use async_trait::async_trait;
use std::sync::Arc;
use tradebot_core::AppResult;

/// Minimum similarity score for a match to be used as context.
///
/// Scores equal to the threshold are rejected.
pub const RELEVANCE_THRESHOLD: f32 = 0.7;

/// Matches requested per question.
pub const DEFAULT_TOP_K: u32 = 3;

/// Source of retrieved context for the composer.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Name reported in service status and logs.
    fn name(&self) -> &str {
        "pinecone"
    }

    /// Retrieve context for a question.
    async fn retrieve(&self, question: &str) -> AppResult<RetrievedContext>;
}

/// Embeds the question and queries a vector index.
pub struct VectorRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    top_k: u32,
    threshold: f32,
}

impl VectorRetriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embedder,
            index,
            top_k: DEFAULT_TOP_K,
            threshold: RELEVANCE_THRESHOLD,
        }
    }

    /// Override the number of matches requested.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, question: &str) -> AppResult<RetrievedContext> {
        let vector = self.embedder.embed(question, InputType::Query).await?;
        let matches = self.index.query(&vector, self.top_k, true).await?;

        let context = filter_matches(matches, self.threshold);
        tracing::debug!(
            "Retrieved {} snippets above {} ({} chars)",
            context.snippets.len(),
            self.threshold,
            context.char_len()
        );

        Ok(context)
    }
}

/// Keep matches scoring strictly above `threshold`, in retrieval order.
pub fn filter_matches(matches: Vec<ScoredMatch>, threshold: f32) -> RetrievedContext {
    let snippets = matches
        .into_iter()
        .filter(|m| m.score > threshold)
        .filter_map(|m| {
            let text = m.text?;
            Some(ScoredSnippet {
                text,
                score: m.score,
                source: m.source,
            })
        })
        .collect();

    RetrievedContext::new(snippets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::trigram::TrigramProvider;
    use crate::types::{IndexStats, VectorRecord};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scored(id: &str, score: f32, text: Option<&str>) -> ScoredMatch {
        ScoredMatch {
            id: id.to_string(),
            score,
            text: text.map(str::to_string),
            source: None,
        }
    }

    struct FixedIndex {
        matches: Vec<ScoredMatch>,
        last_top_k: AtomicU32,
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        async fn query(
            &self,
            _vector: &[f32],
            top_k: u32,
            _include_metadata: bool,
        ) -> AppResult<Vec<ScoredMatch>> {
            self.last_top_k.store(top_k, Ordering::SeqCst);
            Ok(self.matches.clone())
        }

        async fn upsert(&self, records: &[VectorRecord]) -> AppResult<usize> {
            Ok(records.len())
        }

        async fn describe(&self) -> AppResult<IndexStats> {
            Ok(IndexStats::default())
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let context = filter_matches(
            vec![
                scored("a", 0.9, Some("alto")),
                scored("b", 0.7, Some("límite")),
                scored("c", 0.71, Some("justo")),
                scored("d", 0.2, Some("bajo")),
            ],
            RELEVANCE_THRESHOLD,
        );

        let texts: Vec<&str> = context.snippets.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["alto", "justo"]);
        assert_eq!(context.joined(), "alto\n\njusto");
    }

    #[test]
    fn test_matches_without_text_are_dropped() {
        let context = filter_matches(vec![scored("a", 0.95, None)], RELEVANCE_THRESHOLD);
        assert!(context.is_empty());
    }

    #[tokio::test]
    async fn test_vector_retriever_queries_top_k() {
        let index = Arc::new(FixedIndex {
            matches: vec![
                scored("a", 0.88, Some("Un arancel es un impuesto a las importaciones.")),
                scored("b", 0.5, Some("Irrelevante")),
            ],
            last_top_k: AtomicU32::new(0),
        });
        let retriever = VectorRetriever::new(Arc::new(TrigramProvider::new(32)), index.clone());

        let context = retriever.retrieve("¿Qué es un arancel?").await.unwrap();
        assert_eq!(context.snippets.len(), 1);
        assert_eq!(index.last_top_k.load(Ordering::SeqCst), DEFAULT_TOP_K);
        assert_eq!(retriever.name(), "pinecone");
    }

    #[tokio::test]
    async fn test_with_top_k() {
        let index = Arc::new(FixedIndex {
            matches: Vec::new(),
            last_top_k: AtomicU32::new(0),
        });
        let retriever =
            VectorRetriever::new(Arc::new(TrigramProvider::new(32)), index.clone()).with_top_k(5);

        let context = retriever.retrieve("aduana").await.unwrap();
        assert!(context.is_empty());
        assert_eq!(index.last_top_k.load(Ordering::SeqCst), 5);
    }
}
