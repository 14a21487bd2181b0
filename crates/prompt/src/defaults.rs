//! Built-in prompt definitions for the international-trade expert.

use crate::types::{PromptBehavior, PromptDefinition, PromptOutputSpec};

/// Prompt used when retrieved or web context is available.
pub const CONTEXTUAL_PROMPT_ID: &str = "trade.contextual";

/// Prompt used when no context could be gathered.
pub const DIRECT_PROMPT_ID: &str = "trade.direct";

const SYSTEM_PREAMBLE: &str = "Eres un asistente experto en comercio internacional. \
Responde en el mismo idioma en que se formula la pregunta.";

const CONTEXTUAL_TEMPLATE: &str = "Eres un experto en comercio internacional. \
Utiliza el siguiente contexto para responder a la pregunta de forma precisa y profesional. \
Si el contexto no basta, complétalo con tu conocimiento experto.
{{#if retrievedContext}}

Contexto especializado:
{{retrievedContext}}
{{/if}}
{{#if webContext}}

Información de búsqueda web:
{{webContext}}
{{/if}}

Pregunta: {{question}}

Respuesta:";

const DIRECT_TEMPLATE: &str = "Eres un experto en comercio internacional con amplio \
conocimiento en aranceles, Incoterms, aduanas, logística y normativa de la OMC. \
Responde a la siguiente pregunta de forma clara, precisa y profesional.

Pregunta: {{question}}

Respuesta:";

fn builtin(id: &str, title: &str, style: &str, template: &str) -> PromptDefinition {
    PromptDefinition {
        id: id.to_string(),
        title: title.to_string(),
        api_version: "1.0".to_string(),
        created_by: "tradebot".to_string(),
        behavior: PromptBehavior {
            tone: "professional".to_string(),
            style: style.to_string(),
        },
        system: Some(SYSTEM_PREAMBLE.to_string()),
        template: template.to_string(),
        output: PromptOutputSpec {
            format: "markdown".to_string(),
        },
    }
}

/// The contextual prompt: grounds the answer on retrieved and web context.
pub fn contextual_prompt() -> PromptDefinition {
    builtin(
        CONTEXTUAL_PROMPT_ID,
        "Respuesta con contexto",
        "grounded",
        CONTEXTUAL_TEMPLATE,
    )
}

/// The direct-expert prompt: answers from model knowledge alone.
pub fn direct_prompt() -> PromptDefinition {
    builtin(DIRECT_PROMPT_ID, "Respuesta directa", "concise", DIRECT_TEMPLATE)
}

/// All built-in prompt definitions.
pub fn builtin_prompts() -> Vec<PromptDefinition> {
    vec![contextual_prompt(), direct_prompt()]
}
