//! HTTP error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::any::Any;
use thiserror::Error;
use tradebot_composer::ComposeError;
use tradebot_core::ErrorKind;

pub const MISSING_MESSAGE: &str = "Mensaje de usuario no proporcionado.";
pub const NO_PROVIDER: &str = "Ningún proveedor de IA disponible.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing message")]
    MissingMessage,
    #[error("no provider available: {0}")]
    NoProviderAvailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingMessage => ErrorKind::EmptyInput,
            Self::NoProviderAvailable(_) => ErrorKind::NoProviderAvailable,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<ComposeError> for ApiError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::EmptyInput => Self::MissingMessage,
            ComposeError::NoProviderAvailable { .. } => {
                Self::NoProviderAvailable(err.details().unwrap_or_default())
            }
            ComposeError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self {
            Self::MissingMessage => json!({ "error": MISSING_MESSAGE }),
            Self::NoProviderAvailable(details) => json!({
                "error": NO_PROVIDER,
                "details": details,
            }),
            Self::Internal(msg) => json!({ "error": format!("Error interno: {}", msg) }),
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked, shaped like any other internal error.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unexpected panic".to_string()
    };

    tracing::error!("Request handler panicked: {}", message);
    ApiError::Internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_errors_map_to_statuses() {
        let cases = [
            (ApiError::from(ComposeError::EmptyInput), 400),
            (
                ApiError::from(ComposeError::NoProviderAvailable { attempts: vec![] }),
                503,
            ),
            (ApiError::from(ComposeError::Internal("boom".into())), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }

    #[test]
    fn test_no_provider_keeps_details() {
        let err = ApiError::from(ComposeError::NoProviderAvailable { attempts: vec![] });
        match err {
            ApiError::NoProviderAvailable(details) => {
                assert_eq!(details, "No hay proveedores de IA configurados.")
            }
            other => panic!("unexpected: {}", other),
        }
    }

    #[test]
    fn test_panic_payloads_become_internal() {
        let owned = panic_response(Box::new(String::from("index out of bounds")));
        assert_eq!(owned.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let borrowed = panic_response(Box::new("bad state"));
        assert_eq!(borrowed.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let opaque = panic_response(Box::new(42u8));
        assert_eq!(opaque.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
