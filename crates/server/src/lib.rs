//! HTTP front for the Tradebot response composer.
//!
//! Exposes `GET /` (service status) and `POST /api/chat` over axum.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{router, serve};
pub use state::{AppState, ServiceStatus};
