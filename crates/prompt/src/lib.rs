//! Prompt system for Tradebot.
//!
//! This crate provides structured prompt management with:
//! - Built-in Spanish prompt definitions for the trade expert role
//! - YAML overrides loaded from a prompts directory
//! - Handlebars template rendering
//! - Formatting of retrieved and web-search context blocks

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, format_labeled_snippets, format_web_context, render_template};
pub use defaults::{CONTEXTUAL_PROMPT_ID, DIRECT_PROMPT_ID};
pub use loader::{list_prompts, load_prompt, PromptLibrary};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptBehavior, PromptDefinition, PromptOutputSpec};
