//! Serve command handler.

use clap::Args;
use tradebot_core::config::AppConfig;

/// Run the HTTP API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Bind address (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, mut config: AppConfig) -> anyhow::Result<()> {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        tradebot_server::serve(&config).await?;
        Ok(())
    }
}
