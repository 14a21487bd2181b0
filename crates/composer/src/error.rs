//! Composition errors.

use crate::composer::ProviderAttempt;
use thiserror::Error;
use tradebot_core::ErrorKind;

/// Why a question could not be answered.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The question was empty or whitespace only.
    #[error("question is empty")]
    EmptyInput,

    /// Every configured provider failed, or none is configured.
    #[error("no LLM provider produced an answer ({} attempts)", .attempts.len())]
    NoProviderAvailable { attempts: Vec<ProviderAttempt> },

    /// Unexpected failure while composing.
    #[error("{0}")]
    Internal(String),
}

impl ComposeError {
    /// Request-level classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::NoProviderAvailable { .. } => ErrorKind::NoProviderAvailable,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Human-readable details for provider exhaustion.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::NoProviderAvailable { attempts } if attempts.is_empty() => {
                Some("No hay proveedores de IA configurados.".to_string())
            }
            Self::NoProviderAvailable { attempts } => Some(
                attempts
                    .iter()
                    .map(|a| {
                        format!(
                            "{}: {}",
                            a.provider,
                            a.detail.as_deref().unwrap_or("sin respuesta")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ProviderSlot;

    #[test]
    fn test_kinds() {
        assert_eq!(ComposeError::EmptyInput.kind(), ErrorKind::EmptyInput);
        assert_eq!(
            ComposeError::NoProviderAvailable { attempts: vec![] }.kind(),
            ErrorKind::NoProviderAvailable
        );
        assert_eq!(ComposeError::Internal("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_details_lists_failures() {
        let err = ComposeError::NoProviderAvailable {
            attempts: vec![
                ProviderAttempt {
                    provider: "groq".to_string(),
                    slot: ProviderSlot::Secondary,
                    success: false,
                    kind: Some(ErrorKind::ProviderFailure),
                    detail: Some("LLM error: 500".to_string()),
                    elapsed_ms: 10,
                },
                ProviderAttempt {
                    provider: "openai".to_string(),
                    slot: ProviderSlot::Primary,
                    success: false,
                    kind: Some(ErrorKind::ProviderFailure),
                    detail: Some("Timed out after 25s".to_string()),
                    elapsed_ms: 25_000,
                },
            ],
        };

        assert_eq!(
            err.details().unwrap(),
            "groq: LLM error: 500; openai: Timed out after 25s"
        );
    }

    #[test]
    fn test_details_without_providers() {
        let err = ComposeError::NoProviderAvailable { attempts: vec![] };
        assert_eq!(err.details().unwrap(), "No hay proveedores de IA configurados.");
        assert!(ComposeError::EmptyInput.details().is_none());
    }
}
