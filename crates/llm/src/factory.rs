//! LLM provider factory.
//!
//! This module creates LLM clients from a vendor name, an optional endpoint
//! override and the resolved API key.

use crate::client::LlmClient;
use crate::providers::{AnthropicClient, ChatCompletionsClient};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Reasons a client could not be built.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("{0} provider requires API key ({1})")]
    MissingApiKey(&'static str, &'static str),

    #[error("Failed to initialize {0} client: {1}")]
    Init(&'static str, String),
}

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "groq", "deepseek", "anthropic")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key for the provider
/// * `timeout` - Per-request timeout applied to the HTTP client
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - The API key is missing or blank
/// - The HTTP client cannot be built
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn LlmClient>, FactoryError> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| FactoryError::UnknownProvider(provider.to_string()))?;

    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(FactoryError::MissingApiKey(
            provider_type.as_str(),
            provider_type.api_key_env(),
        ))?;

    let base_url = endpoint.unwrap_or(provider_type.default_base_url());

    if provider_type.is_chat_completions() {
        let client = ChatCompletionsClient::with_base_url(provider_type, base_url, api_key, timeout)
            .map_err(|e| FactoryError::Init(provider_type.as_str(), e.to_string()))?;
        Ok(Arc::new(client))
    } else {
        let client = AnthropicClient::with_base_url(base_url, api_key, timeout)
            .map_err(|e| FactoryError::Init(provider_type.as_str(), e.to_string()))?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(25);

    #[test]
    fn test_create_groq_client() {
        let client = create_client("groq", None, Some("gsk-test"), TIMEOUT).unwrap();
        assert_eq!(client.provider_name(), "groq");
        assert_eq!(client.default_model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_create_anthropic_with_custom_endpoint() {
        let client =
            create_client("claude", Some("http://localhost:9000"), Some("sk-ant"), TIMEOUT).unwrap();
        assert_eq!(client.provider_name(), "anthropic");
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client("openai", None, None, TIMEOUT) {
            Err(err) => assert!(err.to_string().contains("OPENAI_API_KEY")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_blank_api_key_rejected() {
        assert!(matches!(
            create_client("groq", None, Some("  "), TIMEOUT),
            Err(FactoryError::MissingApiKey(..))
        ));
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("ollama", None, Some("x"), TIMEOUT) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
