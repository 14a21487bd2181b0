//! LLM integration crate for Tradebot.
//!
//! This crate provides a provider-agnostic abstraction for hosted Large
//! Language Models. Every provider is reached over plain HTTPS and exposes
//! the same `LlmClient` trait, so the composer can try them in any order.
//!
//! # Providers
//! - **OpenAI-compatible chat completions**: OpenAI, Groq, DeepSeek
//! - **Anthropic Messages API**: Claude models
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use tradebot_llm::{create_client, LlmRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("groq", None, Some("gsk-..."), Duration::from_secs(25))?;
//! let request = LlmRequest::new("¿Qué es un arancel?", "llama-3.1-8b-instant");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{create_client, FactoryError};
pub use providers::{AnthropicClient, ChatCompletionsClient};
pub use types::ProviderType;
