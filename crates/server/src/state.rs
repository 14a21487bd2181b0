//! Shared application state.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tradebot_composer::{Collaborators, ComposerSettings, ResponseComposer};
use tradebot_core::config::LlmSlotConfig;
use tradebot_core::AppConfig;
use tradebot_knowledge::{DuckDuckGoSearch, KnowledgeStore, Retriever, WebSearch};
use tradebot_llm::{create_client, LlmClient};
use tradebot_prompt::PromptLibrary;

/// Which collaborators came up at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStatus {
    services: BTreeMap<String, bool>,
}

impl ServiceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, available: bool) {
        let entry = self.services.entry(name.into()).or_insert(false);
        *entry |= available;
    }

    pub fn is_available(&self, name: &str) -> bool {
        self.services.get(name).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.services.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Service name to "✅" or "❌".
    pub fn marks(&self) -> BTreeMap<String, &'static str> {
        self.services
            .iter()
            .map(|(name, up)| (name.clone(), if *up { "✅" } else { "❌" }))
            .collect()
    }
}

impl Serialize for ServiceStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.marks().serialize(serializer)
    }
}

/// State shared by every handler.
pub struct AppState {
    pub composer: ResponseComposer,
    pub services: ServiceStatus,
}

impl AppState {
    pub fn new(composer: ResponseComposer, services: ServiceStatus) -> Self {
        Self { composer, services }
    }

    /// Build every collaborator from configuration.
    ///
    /// Never fails: a collaborator that cannot be built is left out and
    /// reported as unavailable.
    pub async fn initialize(config: &AppConfig) -> Self {
        let mut services = ServiceStatus::new();

        let retriever: Option<Arc<dyn Retriever>> = match KnowledgeStore::open(config).await {
            Ok(store) => Some(Arc::new(store.retriever())),
            Err(e) => {
                tracing::warn!("Retrieval disabled: {}", e);
                None
            }
        };
        services.set("pinecone", retriever.is_some());

        let web_search: Option<Arc<dyn WebSearch>> = if config.web_search.enabled {
            match DuckDuckGoSearch::new(config.request_timeout()) {
                Ok(search) => Some(Arc::new(search)),
                Err(e) => {
                    tracing::warn!("Web search disabled: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("Web search disabled by configuration");
            None
        };
        services.set("web_search", web_search.is_some());

        let primary = build_llm(config, "primary", &config.llm.primary, &mut services);
        let secondary = build_llm(config, "secondary", &config.llm.secondary, &mut services);

        let prompts = match PromptLibrary::load(config.prompts_dir.as_deref()) {
            Ok(prompts) => prompts,
            Err(e) => {
                tracing::warn!("Prompt overrides ignored: {}", e);
                PromptLibrary::builtin()
            }
        };

        let collaborators = Collaborators {
            retriever,
            web_search,
            primary,
            secondary,
        };
        let composer =
            ResponseComposer::new(collaborators, ComposerSettings::from_config(config, prompts));

        tracing::info!(
            "Services: {}",
            services
                .iter()
                .map(|(name, up)| format!("{}={}", name, if up { "up" } else { "down" }))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self { composer, services }
    }
}

fn build_llm(
    config: &AppConfig,
    slot: &str,
    slot_config: &LlmSlotConfig,
    services: &mut ServiceStatus,
) -> Option<Arc<dyn LlmClient>> {
    if slot_config.is_disabled() {
        tracing::info!("{} LLM slot disabled", slot);
        return None;
    }

    let vendor = slot_config.vendor.to_lowercase();
    let client = create_client(
        &vendor,
        slot_config.endpoint.as_deref(),
        config.resolve_api_key(&vendor),
        config.request_timeout(),
    );

    match client {
        Ok(client) => {
            services.set(vendor, true);
            Some(client)
        }
        Err(e) => {
            tracing::warn!("{} LLM slot disabled: {}", slot, e);
            services.set(vendor, false);
            None
        }
    }
}
