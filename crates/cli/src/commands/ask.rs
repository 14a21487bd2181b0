//! Ask command handler.
//!
//! Runs one composition with the same collaborators the server would use.

use anyhow::bail;
use clap::Args;
use tradebot_composer::ComposeError;
use tradebot_core::config::AppConfig;
use tradebot_server::AppState;

/// Answer one question and exit
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output the answer with provider and attempts as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::debug!("Ask command options: {:?}", self);

        let state = AppState::initialize(config).await;

        match state.composer.compose(&self.question).await {
            Ok(answer) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&answer)?);
                } else {
                    println!("{}", answer.text);
                }
                Ok(())
            }
            Err(e @ ComposeError::NoProviderAvailable { .. }) => {
                let details = e.details().unwrap_or_default();
                if self.json {
                    let output = serde_json::json!({
                        "error": e.kind().as_str(),
                        "details": details,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                bail!("{}: {}", e, details)
            }
            Err(e) => bail!(e),
        }
    }
}
