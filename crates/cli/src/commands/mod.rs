//! Command handlers for the tradebot CLI.

pub mod ask;
pub mod ingest;
pub mod serve;
pub mod status;

pub use ask::AskCommand;
pub use ingest::IngestCommand;
pub use serve::ServeCommand;
pub use status::StatusCommand;
