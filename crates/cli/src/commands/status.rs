//! Status command handler.

use clap::Args;
use tradebot_core::config::AppConfig;
use tradebot_server::AppState;

/// Show which services are available
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        let state = AppState::initialize(config).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state.services)?);
            return Ok(());
        }

        for (name, mark) in state.services.marks() {
            println!("{} {}", mark, name);
        }
        Ok(())
    }
}
