//! Response composition for Tradebot.
//!
//! Given a question, the composer decides whether to consult the retrieval
//! store and web search, picks the prompt, and walks an ordered plan of
//! LLM providers until one produces an answer.
//!
//! # Example
//! ```no_run
//! use tradebot_composer::{Collaborators, ComposerSettings, ResponseComposer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let composer = ResponseComposer::new(Collaborators::default(), ComposerSettings::default());
//! let answer = composer.compose("¿Qué es un arancel?").await?;
//! println!("{} answered: {}", answer.provider, answer.text);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod composer;
pub mod error;
pub mod plan;

pub use classify::{classify, Complexity, COMPLEX_KEYWORDS};
pub use composer::{
    Collaborators, ComposedAnswer, ComposerSettings, ProviderAttempt, ResponseComposer,
    SUFFICIENCY_THRESHOLD,
};
pub use error::ComposeError;
pub use plan::{provider_plan, ProviderSlot};
