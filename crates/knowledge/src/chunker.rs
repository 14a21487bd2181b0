//! Text chunking with configurable size and overlap.

use crate::types::ChunkCandidate;

/// Chunk text into overlapping segments.
///
/// Sizes are in bytes and every cut lands on a UTF-8 boundary. A trailing
/// segment shorter than a tenth of `chunk_size` is dropped unless it is the
/// only one.
pub fn chunk_text(
    source_id: &str,
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Vec<ChunkCandidate> {
    let text = text.trim();
    if text.is_empty() || chunk_size == 0 {
        return vec![];
    }

    let step = if chunk_size > overlap {
        chunk_size - overlap
    } else {
        chunk_size
    };

    let mut chunks = Vec::new();
    let mut position = 0u32;
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // chunk_size smaller than one character
            end = next_boundary(text, start + 1);
        }

        let segment = &text[start..end];
        if !chunks.is_empty() && segment.len() < chunk_size / 10 {
            break;
        }

        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            chunks.push(ChunkCandidate {
                source_id: source_id.to_string(),
                position,
                text: trimmed.to_string(),
            });
            position += 1;
        }

        if end == text.len() {
            break;
        }
        start = next_boundary(text, start + step);
    }

    tracing::debug!(
        "Chunked {} into {} chunks (size: {}, overlap: {})",
        source_id,
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}

fn next_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index.min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_basic() {
        let text = "a".repeat(1000);
        let chunks = chunk_text("test-source", &text, 200, 50);

        assert!(chunks.len() >= 6);
        assert_eq!(chunks[0].position, 0);
        assert_eq!(chunks[1].position, 1);
        assert_eq!(chunks[0].text.len(), 200);
    }

    #[test]
    fn test_chunk_text_no_overlap() {
        let text = "a".repeat(300);
        let chunks = chunk_text("test-source", &text, 100, 0);

        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("test-source", "", 100, 10).is_empty());
        assert!(chunk_text("test-source", "   ", 100, 10).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("doc", "Arancel", 1024, 128);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Arancel");
    }

    #[test]
    fn test_chunk_text_with_overlap() {
        let text = "abcdefghijklmnopqrstuvwxyz".repeat(10);
        let chunks = chunk_text("test-source", &text, 50, 10);

        let first_tail: String = chunks[0].text.chars().skip(40).collect();
        let second_head: String = chunks[1].text.chars().take(10).collect();
        assert_eq!(first_tail, second_head);
    }

    #[test]
    fn test_chunk_text_utf8_boundaries() {
        let text = "ñandú aduanero ".repeat(40);
        let chunks = chunk_text("doc", &text, 33, 7);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.len() <= 33);
        }
    }
}
