//! LLM provider types.
//!
//! Static knowledge about each supported vendor: canonical name, default
//! endpoint, default model and the environment variable holding its key.

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    OpenAI,
    Groq,
    DeepSeek,
    Anthropic,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAI),
            "groq" => Some(Self::Groq),
            "deepseek" => Some(Self::DeepSeek),
            "anthropic" | "claude" => Some(Self::Anthropic),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Groq => "groq",
            Self::DeepSeek => "deepseek",
            Self::Anthropic => "anthropic",
        }
    }

    /// Base URL of the vendor API.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::DeepSeek => "https://api.deepseek.com/v1",
            Self::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Model used when configuration does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4o-mini",
            Self::Groq => "llama-3.1-8b-instant",
            Self::DeepSeek => "deepseek-chat",
            Self::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    /// Environment variable that carries the API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Whether the vendor speaks the OpenAI chat-completions dialect.
    pub fn is_chat_completions(&self) -> bool {
        !matches!(self, Self::Anthropic)
    }
}
