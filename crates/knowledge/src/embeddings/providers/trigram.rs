//! Trigram embedding provider using character trigram-based content-aware embeddings.

use crate::embeddings::provider::{EmbeddingProvider, InputType};
use std::collections::{HashMap, HashSet};
use tradebot_core::AppResult;

/// Spanish and English function words ignored when hashing.
const STOP_WORDS: [&str; 40] = [
    "the", "and", "for", "with", "from", "this", "that", "are", "was", "were", "have",
    "has", "its", "their", "they", "them", "los", "las", "del", "una", "uno", "por", "para",
    "con", "que", "qué", "como", "cómo", "más", "sus", "entre", "sobre", "este", "esta", "son",
    "ser", "sin", "hay", "pero", "cual",
];

/// Trigram-based embedding provider for local, offline operation.
///
/// Generates deterministic embeddings based on text content using
/// character trigrams and word frequencies. While not semantically
/// accurate like neural embedding models, it produces consistent,
/// content-dependent vectors suitable for tests and offline ingestion
/// dry runs. Queries and passages are embedded identically.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    /// Create a new trigram provider with specified dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(&self, token: &str, multiplier: u64) -> usize {
        let hash = token
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(multiplier).wrapping_add(b as u64));
        (hash % self.dimensions as u64) as usize
    }

    /// Generate a trigram-based embedding for text.
    ///
    /// Each distinct word adds its frequency to one whole-word bucket and
    /// `sqrt(frequency)` to one bucket per character trigram; the result is
    /// scaled to unit length (empty input stays the zero vector).
    fn generate_trigram_embedding(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut embedding = vec![0.0f32; self.dimensions];
        let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();

        let lower = text.to_lowercase();
        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 2 && !stop_words.contains(w))
        {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            let weight = *freq as f32;
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                embedding[self.bucket(&trigram, 37)] += weight.sqrt();
            }
            embedding[self.bucket(word, 31)] += weight;
        }

        let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|v| *v /= norm);
        }

        Ok(embedding)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> AppResult<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| self.generate_trigram_embedding(text))
            .collect()
    }
}
