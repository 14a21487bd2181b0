//! The response composer.
//!
//! One `compose` call handles one question end to end, sequentially:
//! retrieval, then web search when the retrieved context is too short,
//! then prompt assembly, then LLM attempts in plan order. Collaborator
//! failures and timeouts never abort the request; they only shrink the
//! context or move on to the next provider.

use crate::classify::{classify, Complexity};
use crate::error::ComposeError;
use crate::plan::{provider_plan, ProviderSlot};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tracing::Instrument;
use tradebot_core::config::DEFAULT_TIMEOUT_SECS;
use tradebot_core::{AppConfig, AppError, ErrorKind};
use tradebot_knowledge::{RetrievedContext, Retriever, WebResult, WebSearch};
use tradebot_llm::{LlmClient, LlmRequest};
use tradebot_prompt::{
    build_prompt, format_web_context, BuiltPrompt, PromptLibrary, CONTEXTUAL_PROMPT_ID,
    DIRECT_PROMPT_ID,
};

/// Retrieved context shorter than this (trimmed, in characters) triggers
/// web search.
pub const SUFFICIENCY_THRESHOLD: usize = 100;

/// Clients the composer may consult. `None` means not configured.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub retriever: Option<Arc<dyn Retriever>>,
    pub web_search: Option<Arc<dyn WebSearch>>,
    /// Provider "A"
    pub primary: Option<Arc<dyn LlmClient>>,
    /// Provider "B"
    pub secondary: Option<Arc<dyn LlmClient>>,
}

impl Collaborators {
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn with_web_search(mut self, web_search: Arc<dyn WebSearch>) -> Self {
        self.web_search = Some(web_search);
        self
    }

    pub fn with_primary(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.primary = Some(client);
        self
    }

    pub fn with_secondary(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.secondary = Some(client);
        self
    }
}

/// Tunables for composition.
#[derive(Debug, Clone)]
pub struct ComposerSettings {
    /// Budget for each collaborator call
    pub timeout: Duration,
    /// Model override for provider A
    pub primary_model: Option<String>,
    /// Model override for provider B
    pub secondary_model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Web results requested per search
    pub web_results: usize,
    pub prompts: PromptLibrary,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            primary_model: None,
            secondary_model: None,
            max_tokens: 1024,
            temperature: 0.7,
            web_results: 3,
            prompts: PromptLibrary::builtin(),
        }
    }
}

impl ComposerSettings {
    /// Settings from application configuration.
    pub fn from_config(config: &AppConfig, prompts: PromptLibrary) -> Self {
        Self {
            timeout: config.request_timeout(),
            primary_model: config.llm.primary.model.clone(),
            secondary_model: config.llm.secondary.model.clone(),
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
            web_results: config.web_search.max_results,
            prompts,
        }
    }
}

/// Outcome of one provider attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderAttempt {
    /// Provider name (e.g. "openai")
    pub provider: String,
    pub slot: ProviderSlot,
    pub success: bool,
    /// `ProviderFailure` when the attempt failed
    pub kind: Option<ErrorKind>,
    /// Failure reason; `None` on success
    pub detail: Option<String>,
    pub elapsed_ms: u64,
}

/// A successful composition.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedAnswer {
    /// Text returned by the answering provider
    pub text: String,
    /// Name of the answering provider
    pub provider: String,
    pub slot: ProviderSlot,
    /// Prompt definition used
    pub prompt_id: String,
    /// Every attempt made, in order; the last one succeeded
    pub attempts: Vec<ProviderAttempt>,
    /// Retrieved context was included in the prompt
    pub used_retrieval: bool,
    /// Web search was invoked
    pub used_web_search: bool,
    pub complexity: Complexity,
}

/// Decides which collaborators to consult and in what order.
///
/// Holds only read-only handles, so one instance serves concurrent
/// requests.
#[derive(Clone)]
pub struct ResponseComposer {
    collaborators: Collaborators,
    settings: ComposerSettings,
}

impl ResponseComposer {
    pub fn new(collaborators: Collaborators, settings: ComposerSettings) -> Self {
        Self {
            collaborators,
            settings,
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Answer a question.
    ///
    /// Blank input is rejected before any collaborator is called.
    pub async fn compose(&self, question: &str) -> Result<ComposedAnswer, ComposeError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ComposeError::EmptyInput);
        }

        let span = tracing::info_span!("compose", chars = question.chars().count());
        self.compose_trimmed(question).instrument(span).await
    }

    async fn compose_trimmed(&self, question: &str) -> Result<ComposedAnswer, ComposeError> {
        let retrieved = self.retrieve(question).await;
        let retrieved_chars = retrieved.char_len();

        let (web_results, used_web_search) = if retrieved_chars < SUFFICIENCY_THRESHOLD {
            tracing::debug!(
                "Retrieved context {} chars below {}, consulting web search",
                retrieved_chars,
                SUFFICIENCY_THRESHOLD
            );
            self.search_web(question).await
        } else {
            (Vec::new(), false)
        };

        let retrieved_text = retrieved.joined().trim().to_string();
        let used_retrieval = !retrieved_text.is_empty();

        let prompt = self.assemble_prompt(question, retrieved_text, &web_results)?;
        let complexity = classify(question);
        let plan = provider_plan(
            complexity,
            self.collaborators.primary.is_some(),
            self.collaborators.secondary.is_some(),
        );

        tracing::info!(
            "Question classified {:?}; provider plan [{}]",
            complexity,
            plan.iter().map(|s| s.label()).collect::<Vec<_>>().join(", ")
        );

        let mut attempts = Vec::with_capacity(plan.len());
        for slot in plan {
            let Some(client) = self.client(slot) else {
                continue;
            };

            let (attempt, answer) = self.attempt(slot, client.as_ref(), &prompt).await;
            attempts.push(attempt);

            if let Some(text) = answer {
                return Ok(ComposedAnswer {
                    text,
                    provider: client.provider_name().to_string(),
                    slot,
                    prompt_id: prompt.metadata.source_prompt_id.clone(),
                    attempts,
                    used_retrieval,
                    used_web_search,
                    complexity,
                });
            }
        }

        tracing::warn!(
            "No provider produced an answer after {} attempts",
            attempts.len()
        );
        Err(ComposeError::NoProviderAvailable { attempts })
    }

    async fn retrieve(&self, question: &str) -> RetrievedContext {
        let Some(retriever) = &self.collaborators.retriever else {
            return RetrievedContext::empty();
        };

        match timeout(self.settings.timeout, retriever.retrieve(question)).await {
            Ok(Ok(context)) => context,
            Ok(Err(e)) => {
                tracing::warn!("Retrieval from {} failed: {}", retriever.name(), e);
                RetrievedContext::empty()
            }
            Err(_) => {
                tracing::warn!(
                    "Retrieval from {} timed out after {:?}",
                    retriever.name(),
                    self.settings.timeout
                );
                RetrievedContext::empty()
            }
        }
    }

    /// Returns the results and whether search was invoked.
    async fn search_web(&self, question: &str) -> (Vec<WebResult>, bool) {
        let Some(search) = &self.collaborators.web_search else {
            return (Vec::new(), false);
        };

        let call = search.search(question, self.settings.web_results);
        let results = match timeout(self.settings.timeout, call).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                tracing::warn!("Web search via {} failed: {}", search.name(), e);
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    "Web search via {} timed out after {:?}",
                    search.name(),
                    self.settings.timeout
                );
                Vec::new()
            }
        };

        (results, true)
    }

    fn assemble_prompt(
        &self,
        question: &str,
        retrieved_text: String,
        web_results: &[WebResult],
    ) -> Result<BuiltPrompt, ComposeError> {
        let web_text =
            format_web_context(web_results.iter().map(|r| (r.title.as_str(), r.body.as_str())));

        let prompt_id = if retrieved_text.is_empty() && web_text.is_empty() {
            DIRECT_PROMPT_ID
        } else {
            CONTEXTUAL_PROMPT_ID
        };

        let mut variables = HashMap::new();
        variables.insert("question".to_string(), question.to_string());
        variables.insert("retrievedContext".to_string(), retrieved_text);
        variables.insert("webContext".to_string(), web_text);

        let definition = self
            .settings
            .prompts
            .get(prompt_id)
            .map_err(|e| ComposeError::Internal(e.to_string()))?;

        build_prompt(definition, variables).map_err(|e| ComposeError::Internal(e.to_string()))
    }

    fn client(&self, slot: ProviderSlot) -> Option<&Arc<dyn LlmClient>> {
        match slot {
            ProviderSlot::Primary => self.collaborators.primary.as_ref(),
            ProviderSlot::Secondary => self.collaborators.secondary.as_ref(),
        }
    }

    async fn attempt(
        &self,
        slot: ProviderSlot,
        client: &dyn LlmClient,
        prompt: &BuiltPrompt,
    ) -> (ProviderAttempt, Option<String>) {
        let model_override = match slot {
            ProviderSlot::Primary => self.settings.primary_model.as_deref(),
            ProviderSlot::Secondary => self.settings.secondary_model.as_deref(),
        };
        let model = model_override.unwrap_or(client.default_model()).to_string();

        let mut request = LlmRequest::new(prompt.user.clone(), model)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);
        if let Some(system) = &prompt.system {
            request = request.with_system(system.clone());
        }

        let started = Instant::now();
        let outcome = match timeout(self.settings.timeout, client.complete(&request)).await {
            Ok(Ok(response)) if response.has_content() => Ok(response.content),
            Ok(Ok(_)) => Err("empty answer".to_string()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(AppError::Timeout(self.settings.timeout.as_secs()).to_string()),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let provider = client.provider_name().to_string();
        match outcome {
            Ok(text) => {
                tracing::info!(
                    provider = %provider,
                    slot = slot.label(),
                    elapsed_ms,
                    "Provider answered"
                );
                let attempt = ProviderAttempt {
                    provider,
                    slot,
                    success: true,
                    kind: None,
                    detail: None,
                    elapsed_ms,
                };
                (attempt, Some(text))
            }
            Err(detail) => {
                tracing::warn!(
                    provider = %provider,
                    slot = slot.label(),
                    elapsed_ms,
                    "Provider failed: {}",
                    detail
                );
                let attempt = ProviderAttempt {
                    provider,
                    slot,
                    success: false,
                    kind: Some(ErrorKind::ProviderFailure),
                    detail: Some(detail),
                    elapsed_ms,
                };
                (attempt, None)
            }
        }
    }
}
