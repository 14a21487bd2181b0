//! Hosted LLM provider implementations.

pub mod anthropic;
pub mod chat_completions;

pub use anthropic::AnthropicClient;
pub use chat_completions::ChatCompletionsClient;
