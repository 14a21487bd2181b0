//! Configuration management for Tradebot.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - An optional YAML file (`tradebot.yaml` or `TRADEBOT_CONFIG`)
//! - Environment variables (credentials only ever come from here)
//! - Command-line flags
//!
//! Missing credentials are not an error: the collaborator that needs them is
//! simply reported as unavailable and the service runs degraded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default Pinecone index holding the trade documents.
pub const DEFAULT_INDEX_NAME: &str = "chatbot-comercio";

/// Default per-call timeout for every outbound collaborator request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Vendors accepted for the primary/secondary LLM slots.
pub const KNOWN_LLM_VENDORS: [&str; 6] = ["openai", "groq", "deepseek", "anthropic", "claude", "none"];

/// Embedding providers accepted by the knowledge crate.
pub const KNOWN_EMBEDDING_PROVIDERS: [&str; 4] = ["pinecone", "openai", "placeholder", "trigram"];

/// Environment variables holding credentials.
const SECRET_ENV_VARS: [&str; 5] = [
    "PINECONE_API_KEY",
    "OPENAI_API_KEY",
    "GROQ_API_KEY",
    "ANTHROPIC_API_KEY",
    "DEEPSEEK_API_KEY",
];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// HTTP listener settings
    pub server: ServerConfig,

    /// Retrieval store settings
    pub pinecone: PineconeConfig,

    /// Embedding provider settings
    pub embedding: EmbeddingSettings,

    /// LLM provider slots
    pub llm: LlmSettings,

    /// Web search settings
    pub web_search: WebSearchConfig,

    /// Offline ingestion settings
    pub ingest: IngestConfig,

    /// Directory of YAML prompt overrides
    pub prompts_dir: Option<PathBuf>,

    /// Per-call timeout for collaborator requests, in seconds
    pub request_timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Log line format ("text" or "json")
    pub log_format: String,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Credentials keyed by environment variable name
    #[serde(skip)]
    pub secrets: HashMap<String, String>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Pinecone retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PineconeConfig {
    /// Index name, used to resolve the data-plane host
    #[serde(rename = "index")]
    pub index_name: String,

    /// Data-plane host; skips the control-plane lookup when set
    #[serde(rename = "indexHost")]
    pub index_host: Option<String>,

    /// Number of matches requested per query
    #[serde(rename = "topK")]
    pub top_k: u32,
}

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider name: "pinecone", "openai", "placeholder", "trigram"
    pub provider: String,

    /// Model override (provider default when absent)
    pub model: Option<String>,

    /// Dimension override (provider default when absent)
    pub dimensions: Option<usize>,
}

/// One LLM slot ("A" = primary, "B" = secondary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSlotConfig {
    /// Vendor name ("openai", "groq", "deepseek", "anthropic", or "none")
    pub vendor: String,

    /// Model override
    pub model: Option<String>,

    /// Endpoint override
    pub endpoint: Option<String>,
}

impl LlmSlotConfig {
    fn new(vendor: &str) -> Self {
        Self {
            vendor: vendor.to_string(),
            model: None,
            endpoint: None,
        }
    }

    /// Whether the slot was explicitly disabled.
    pub fn is_disabled(&self) -> bool {
        self.vendor.eq_ignore_ascii_case("none")
    }
}

/// LLM generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider "A", preferred for complex questions
    pub primary: LlmSlotConfig,

    /// Provider "B", preferred for simple questions
    pub secondary: LlmSlotConfig,

    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,

    pub temperature: f32,
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    pub enabled: bool,

    #[serde(rename = "maxResults")]
    pub max_results: usize,
}

/// Offline ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory holding PDFs and text documents
    #[serde(rename = "docsDir")]
    pub docs_dir: PathBuf,

    /// Documents per upsert batch
    #[serde(rename = "batchSize")]
    pub batch_size: usize,

    /// Chunk size in bytes
    #[serde(rename = "chunkSize")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks
    #[serde(rename = "chunkOverlap")]
    pub chunk_overlap: usize,
}

/// Full configuration file structure. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    pinecone: Option<PineconeSection>,
    embedding: Option<EmbeddingSection>,
    llm: Option<LlmSection>,
    #[serde(rename = "webSearch")]
    web_search: Option<WebSearchSection>,
    ingest: Option<IngestSection>,
    logging: Option<LoggingSection>,
    #[serde(rename = "promptsDir")]
    prompts_dir: Option<PathBuf>,
    #[serde(rename = "requestTimeoutSecs")]
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PineconeSection {
    index: Option<String>,
    #[serde(rename = "indexHost")]
    index_host: Option<String>,
    #[serde(rename = "topK")]
    top_k: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EmbeddingSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LlmSection {
    primary: Option<LlmSlotConfig>,
    secondary: Option<LlmSlotConfig>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct WebSearchSection {
    enabled: Option<bool>,
    #[serde(rename = "maxResults")]
    max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IngestSection {
    #[serde(rename = "docsDir")]
    docs_dir: Option<PathBuf>,
    #[serde(rename = "batchSize")]
    batch_size: Option<usize>,
    #[serde(rename = "chunkSize")]
    chunk_size: Option<usize>,
    #[serde(rename = "chunkOverlap")]
    chunk_overlap: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    format: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            pinecone: PineconeConfig {
                index_name: DEFAULT_INDEX_NAME.to_string(),
                index_host: None,
                top_k: 3,
            },
            embedding: EmbeddingSettings {
                provider: "pinecone".to_string(),
                model: None,
                dimensions: None,
            },
            llm: LlmSettings {
                primary: LlmSlotConfig::new("openai"),
                secondary: LlmSlotConfig::new("groq"),
                max_tokens: 1024,
                temperature: 0.7,
            },
            web_search: WebSearchConfig {
                enabled: true,
                max_results: 3,
            },
            ingest: IngestConfig {
                docs_dir: PathBuf::from("docs"),
                batch_size: 5,
                chunk_size: 1024,
                chunk_overlap: 128,
            },
            prompts_dir: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: None,
            log_format: "text".to_string(),
            verbose: false,
            no_color: false,
            secrets: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the optional YAML file and the environment.
    ///
    /// Environment variables:
    /// - `TRADEBOT_CONFIG`: Path to config file (default `./tradebot.yaml` if present)
    /// - `HOST`, `PORT`: HTTP listener
    /// - `PINECONE_API_KEY`, `PINECONE_INDEX`, `PINECONE_INDEX_HOST`
    /// - `EMBEDDING_PROVIDER`, `EMBEDDING_MODEL`, `EMBEDDING_DIMENSIONS`
    /// - `OPENAI_API_KEY`, `GROQ_API_KEY`, `ANTHROPIC_API_KEY`, `DEEPSEEK_API_KEY`
    /// - `LLM_PRIMARY`, `LLM_PRIMARY_MODEL`, `LLM_SECONDARY`, `LLM_SECONDARY_MODEL`
    /// - `WEB_SEARCH_ENABLED`, `REQUEST_TIMEOUT_SECS`, `TRADEBOT_PROMPTS_DIR`
    /// - `RUST_LOG`, `NO_COLOR`
    pub fn load() -> AppResult<Self> {
        Self::load_from(std::env::var("TRADEBOT_CONFIG").ok().map(PathBuf::from))
    }

    /// Like [`AppConfig::load`], with an explicit config file.
    ///
    /// An explicit file that does not exist is an error; the implicit
    /// `tradebot.yaml` is optional.
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self {
            config_file,
            ..Self::default()
        };

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("tradebot.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Apply environment overrides using the given lookup.
    ///
    /// Split from `load` so the precedence rules can be tested without
    /// touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid PORT value: {}", port)))?;
        }

        if let Some(index) = lookup("PINECONE_INDEX") {
            self.pinecone.index_name = index;
        }
        if let Some(host) = lookup("PINECONE_INDEX_HOST") {
            self.pinecone.index_host = Some(host);
        }

        if let Some(provider) = lookup("EMBEDDING_PROVIDER") {
            self.embedding.provider = provider.to_lowercase();
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            self.embedding.model = Some(model);
        }
        if let Some(dims) = lookup("EMBEDDING_DIMENSIONS") {
            self.embedding.dimensions = Some(dims.parse().map_err(|_| {
                AppError::Config(format!("Invalid EMBEDDING_DIMENSIONS value: {}", dims))
            })?);
        }

        if let Some(vendor) = lookup("LLM_PRIMARY") {
            self.llm.primary.vendor = vendor.to_lowercase();
        }
        if let Some(model) = lookup("LLM_PRIMARY_MODEL") {
            self.llm.primary.model = Some(model);
        }
        if let Some(vendor) = lookup("LLM_SECONDARY") {
            self.llm.secondary.vendor = vendor.to_lowercase();
        }
        if let Some(model) = lookup("LLM_SECONDARY_MODEL") {
            self.llm.secondary.model = Some(model);
        }

        if let Some(enabled) = lookup("WEB_SEARCH_ENABLED") {
            self.web_search.enabled = parse_bool(&enabled);
        }

        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout.parse().map_err(|_| {
                AppError::Config(format!("Invalid REQUEST_TIMEOUT_SECS value: {}", timeout))
            })?;
        }

        if let Some(dir) = lookup("TRADEBOT_PROMPTS_DIR") {
            self.prompts_dir = Some(PathBuf::from(dir));
        }

        if let Some(level) = lookup("RUST_LOG") {
            self.log_level = Some(level);
        }
        if lookup("NO_COLOR").is_some() {
            self.no_color = true;
        }

        for key in SECRET_ENV_VARS {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                self.secrets.insert(key.to_string(), value);
            }
        }

        Ok(())
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(server) = config_file.server {
            if let Some(host) = server.host {
                result.server.host = host;
            }
            if let Some(port) = server.port {
                result.server.port = port;
            }
        }

        if let Some(pinecone) = config_file.pinecone {
            if let Some(index) = pinecone.index {
                result.pinecone.index_name = index;
            }
            if pinecone.index_host.is_some() {
                result.pinecone.index_host = pinecone.index_host;
            }
            if let Some(top_k) = pinecone.top_k {
                result.pinecone.top_k = top_k;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                result.embedding.provider = provider.to_lowercase();
            }
            if embedding.model.is_some() {
                result.embedding.model = embedding.model;
            }
            if embedding.dimensions.is_some() {
                result.embedding.dimensions = embedding.dimensions;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(primary) = llm.primary {
                result.llm.primary = primary;
            }
            if let Some(secondary) = llm.secondary {
                result.llm.secondary = secondary;
            }
            if let Some(max_tokens) = llm.max_tokens {
                result.llm.max_tokens = max_tokens;
            }
            if let Some(temperature) = llm.temperature {
                result.llm.temperature = temperature;
            }
        }

        if let Some(web) = config_file.web_search {
            if let Some(enabled) = web.enabled {
                result.web_search.enabled = enabled;
            }
            if let Some(max_results) = web.max_results {
                result.web_search.max_results = max_results;
            }
        }

        if let Some(ingest) = config_file.ingest {
            if let Some(dir) = ingest.docs_dir {
                result.ingest.docs_dir = dir;
            }
            if let Some(batch_size) = ingest.batch_size {
                result.ingest.batch_size = batch_size;
            }
            if let Some(chunk_size) = ingest.chunk_size {
                result.ingest.chunk_size = chunk_size;
            }
            if let Some(overlap) = ingest.chunk_overlap {
                result.ingest.chunk_overlap = overlap;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(format) = logging.format {
                result.log_format = format;
            }
        }

        if let Some(dir) = config_file.prompts_dir {
            result.prompts_dir = Some(dir);
        }

        if let Some(timeout) = config_file.request_timeout_secs {
            result.request_timeout_secs = timeout;
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the environment and the file.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        log_format: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if let Some(log_format) = log_format {
            self.log_format = log_format;
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Per-call collaborator timeout.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Look up a credential by environment variable name.
    pub fn secret(&self, env_var: &str) -> Option<&str> {
        self.secrets.get(env_var).map(String::as_str)
    }

    /// Pinecone API key, used for both the index and the inference API.
    pub fn pinecone_api_key(&self) -> Option<&str> {
        self.secret("PINECONE_API_KEY")
    }

    /// Resolve the API key for an LLM or embedding vendor.
    pub fn resolve_api_key(&self, vendor: &str) -> Option<&str> {
        let env_var = match vendor.to_lowercase().as_str() {
            "openai" => "OPENAI_API_KEY",
            "groq" => "GROQ_API_KEY",
            "anthropic" | "claude" => "ANTHROPIC_API_KEY",
            "deepseek" => "DEEPSEEK_API_KEY",
            "pinecone" => "PINECONE_API_KEY",
            _ => return None,
        };
        self.secret(env_var)
    }

    /// Validate structural settings.
    ///
    /// Missing credentials are deliberately not checked here.
    pub fn validate(&self) -> AppResult<()> {
        for (slot, cfg) in [("primary", &self.llm.primary), ("secondary", &self.llm.secondary)] {
            if !KNOWN_LLM_VENDORS.contains(&cfg.vendor.to_lowercase().as_str()) {
                return Err(AppError::Config(format!(
                    "Unknown {} LLM vendor: {}. Supported: {}",
                    slot,
                    cfg.vendor,
                    KNOWN_LLM_VENDORS.join(", ")
                )));
            }
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "request timeout must be at least 1 second".to_string(),
            ));
        }

        if self.pinecone.top_k == 0 {
            return Err(AppError::Config("pinecone topK must be positive".to_string()));
        }

        if self.ingest.batch_size == 0 {
            return Err(AppError::Config("ingest batchSize must be positive".to_string()));
        }

        if self.ingest.chunk_overlap >= self.ingest.chunk_size {
            return Err(AppError::Config(format!(
                "ingest chunkOverlap ({}) must be smaller than chunkSize ({})",
                self.ingest.chunk_overlap, self.ingest.chunk_size
            )));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AppError::Config(format!(
                "temperature {} outside 0.0-2.0",
                self.llm.temperature
            )));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pinecone.index_name, "chatbot-comercio");
        assert_eq!(config.llm.primary.vendor, "openai");
        assert_eq!(config.llm.secondary.vendor, "groq");
        assert_eq!(config.request_timeout_secs, 25);
        assert_eq!(config.server.port, 8000);
        assert!(config.web_search.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env_of(&[
                ("PORT", "9090"),
                ("LLM_PRIMARY", "Anthropic"),
                ("LLM_SECONDARY_MODEL", "llama-3.3-70b-versatile"),
                ("WEB_SEARCH_ENABLED", "false"),
                ("GROQ_API_KEY", "gsk-test"),
                ("OPENAI_API_KEY", "   "),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.llm.primary.vendor, "anthropic");
        assert_eq!(
            config.llm.secondary.model.as_deref(),
            Some("llama-3.3-70b-versatile")
        );
        assert!(!config.web_search.enabled);
        assert_eq!(config.resolve_api_key("groq"), Some("gsk-test"));
        // Blank keys count as missing
        assert_eq!(config.resolve_api_key("openai"), None);
    }

    #[test]
    fn test_apply_env_invalid_port() {
        let mut config = AppConfig::default();
        let result = config.apply_env(env_of(&[("PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tradebot.yaml");
        std::fs::write(
            &path,
            r#"
server:
  port: 3000
pinecone:
  index: otro-indice
  topK: 5
llm:
  primary:
    vendor: deepseek
    model: deepseek-chat
  temperature: 0.2
webSearch:
  maxResults: 5
logging:
  level: debug
  color: false
promptsDir: prompts
requestTimeoutSecs: 10
"#,
        )
        .unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pinecone.index_name, "otro-indice");
        assert_eq!(config.pinecone.top_k, 5);
        assert_eq!(config.llm.primary.vendor, "deepseek");
        assert_eq!(config.llm.primary.model.as_deref(), Some("deepseek-chat"));
        // Untouched slot keeps its default
        assert_eq!(config.llm.secondary.vendor, "groq");
        assert_eq!(config.web_search.max_results, 5);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.no_color);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.prompts_dir, Some(PathBuf::from("prompts")));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(None, Some("json".to_string()), true, false);

        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
        assert_eq!(overridden.log_format, "json");
    }

    #[test]
    fn test_validate_unknown_vendor() {
        let mut config = AppConfig::default();
        config.llm.secondary.vendor = "mystery".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_slot() {
        let mut config = AppConfig::default();
        config.llm.secondary.vendor = "none".to_string();
        assert!(config.validate().is_ok());
        assert!(config.llm.secondary.is_disabled());
    }

    #[test]
    fn test_load_from_missing_explicit_file() {
        let result = AppConfig::load_from(Some(PathBuf::from("/nonexistent/tradebot.yaml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
