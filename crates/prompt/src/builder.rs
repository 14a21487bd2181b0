//! Prompt builder for rendering templates and formatting context blocks.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use std::collections::HashMap;
use tradebot_core::{AppError, AppResult};

/// Build a prompt from a definition and input variables.
///
/// Both the template and the optional system preamble are rendered with
/// the same variables. Variables the template does not reference are
/// ignored; referenced but missing variables render as empty strings.
///
/// # Example
/// ```no_run
/// use tradebot_prompt::{build_prompt, PromptLibrary, DIRECT_PROMPT_ID};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let library = PromptLibrary::builtin();
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "¿Qué es un arancel?".to_string());
///
/// let built = build_prompt(library.get(DIRECT_PROMPT_ID)?, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let user = render_template(&definition.template, &variables)?;
    let system = match &definition.system {
        Some(system) => Some(render_template(system, &variables)?),
        None => None,
    };

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

/// Format titled snippets as numbered blocks separated by blank lines.
///
/// Each block reads `[{label} {n}] {title}` followed by the body on the
/// next line, numbered from 1. Entries with an empty body are skipped.
pub fn format_labeled_snippets<'a, I>(label: &str, items: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    items
        .into_iter()
        .filter(|(_, body)| !body.trim().is_empty())
        .enumerate()
        .map(|(i, (title, body))| format!("[{} {}] {}\n{}", label, i + 1, title.trim(), body.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format web-search results as `[Fuente web {n}] {title}` blocks.
pub fn format_web_context<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    format_labeled_snippets("Fuente web", results)
}
