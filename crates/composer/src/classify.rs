//! Question complexity heuristic.

use serde::Serialize;

/// Keywords that mark a question as complex (English and Spanish).
///
/// Matched as lowercase substrings of the lowercased question.
pub const COMPLEX_KEYWORDS: [&str; 14] = [
    "explain",
    "analyze",
    "compare",
    "difference",
    "advantages",
    "how does",
    "process",
    "explica",
    "analiza",
    "compara",
    "diferencia",
    "ventajas",
    "cómo funciona",
    "proceso",
];

/// Questions with more whitespace-separated tokens than this are complex.
pub const MAX_SIMPLE_TOKENS: usize = 8;

/// How demanding a question looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Complex,
}

impl Complexity {
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex)
    }
}

/// Classify a question.
///
/// Complex when it contains any of [`COMPLEX_KEYWORDS`] or has more than
/// [`MAX_SIMPLE_TOKENS`] tokens.
pub fn classify(question: &str) -> Complexity {
    let lower = question.to_lowercase();

    let has_keyword = COMPLEX_KEYWORDS.iter().any(|k| lower.contains(k));
    let long = question.split_whitespace().count() > MAX_SIMPLE_TOKENS;

    if has_keyword || long {
        Complexity::Complex
    } else {
        Complexity::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_question_is_simple() {
        assert_eq!(classify("¿Qué es un arancel?"), Complexity::Simple);
        assert_eq!(classify("hola"), Complexity::Simple);
    }

    #[test]
    fn test_keyword_makes_complex() {
        assert_eq!(classify("compare FOB and CIF"), Complexity::Complex);
        assert_eq!(classify("Explica los Incoterms"), Complexity::Complex);
        assert_eq!(classify("¿CÓMO FUNCIONA la aduana?"), Complexity::Complex);
        assert_eq!(classify("ventajas del EXW"), Complexity::Complex);
    }

    #[test]
    fn test_token_count_boundary() {
        // 8 tokens: simple
        assert_eq!(
            classify("uno dos tres cuatro cinco seis siete ocho"),
            Complexity::Simple
        );
        // 9 tokens: complex
        assert_eq!(
            classify("uno dos tres cuatro cinco seis siete ocho nueve"),
            Complexity::Complex
        );
    }

    #[test]
    fn test_keyword_as_substring() {
        // "processing" contains "process"
        assert!(classify("customs processing").is_complex());
    }
}
