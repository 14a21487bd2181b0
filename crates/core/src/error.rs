//! Error types for Tradebot.
//!
//! This module defines the unified error enum used by collaborator clients
//! (LLM, embeddings, vector index, web search) and the request-level
//! `ErrorKind` taxonomy the HTTP layer maps to status codes.

use thiserror::Error;

/// Unified error type for Tradebot.
///
/// All fallible functions return `Result<T, AppError>`.
/// Collaborator failures are values, never panics.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding, vector index and ingestion errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Web search errors
    #[error("Search error: {0}")]
    Search(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// A collaborator call exceeded its time budget
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Request-level error classification.
///
/// `ProviderFailure` is absorbed inside the composer and only ever shows up
/// on failed provider attempts; the other kinds reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Blank or missing user question
    EmptyInput,
    /// A single collaborator failed (triggers fallback)
    ProviderFailure,
    /// Every configured LLM provider failed or none is configured
    NoProviderAvailable,
    /// Unexpected failure while composing
    Internal,
}

impl ErrorKind {
    /// HTTP status code associated with this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyInput => 400,
            Self::ProviderFailure => 502,
            Self::NoProviderAvailable => 503,
            Self::Internal => 500,
        }
    }

    /// Stable machine-oriented identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::ProviderFailure => "provider_failure",
            Self::NoProviderAvailable => "no_provider_available",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_status_codes() {
        assert_eq!(ErrorKind::EmptyInput.status_code(), 400);
        assert_eq!(ErrorKind::NoProviderAvailable.status_code(), 503);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Serialization(_)));
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(AppError::Timeout(25).to_string(), "Timed out after 25s");
    }
}
