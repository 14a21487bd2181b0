//! Router and handlers.

use crate::error::{panic_response, ApiError};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tradebot_core::{AppConfig, AppResult};

pub const RUNNING_MESSAGE: &str = "¡API del Chatbot de Comercio Internacional en funcionamiento!";

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
    status: &'static str,
    services: BTreeMap<String, &'static str>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

/// Application router.
///
/// CORS is permissive since the web front end is served from another origin.
/// A panicking handler still answers with the 500 JSON body.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/chat", post(chat))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: RUNNING_MESSAGE,
        status: "running",
        services: state.services.marks(),
    })
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = parse_message(&body).ok_or(ApiError::MissingMessage)?;

    let answer = state.composer.compose(&message).await.map_err(|e| {
        tracing::warn!("Chat request failed: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!(
        "Answered by {} after {} attempt(s)",
        answer.provider,
        answer.attempts.len()
    );

    Ok(Json(ChatResponse {
        response: answer.text,
    }))
}

/// The non-blank `message` field, if the body is a JSON object carrying one.
fn parse_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ChatRequest>(body)
        .ok()
        .and_then(|req| req.message)
        .filter(|m| !m.trim().is_empty())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &AppConfig) -> AppResult<()> {
    let state = Arc::new(AppState::initialize(config).await);
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
