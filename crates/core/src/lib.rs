//! Tradebot Core Library
//!
//! This crate provides the foundational utilities shared by every Tradebot crate:
//! - Error handling (`AppError`, `AppResult`, `ErrorKind`)
//! - Logging infrastructure
//! - Configuration management (environment, YAML file, CLI overrides)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};
