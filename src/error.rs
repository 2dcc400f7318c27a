/*
 * Responsibility
 * - gate の失敗を表す型 (construction time / per request)
 * - IntoResponse 実装 (401 + {"message": ...})
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Raised by `AuthGate::new`; the gate must not be installed when this happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("a non-empty secret is required")]
    MissingSecret,
    #[error("identity field must not be empty")]
    EmptyIdentityField,
    #[error("unsupported algorithm list (HMAC only, at least one): {0}")]
    UnsupportedAlgorithm(String),
    #[error("leeway must be at most {max} seconds, got {got}")]
    InvalidLeeway { got: u64, max: u64 },
}

/// Per-request rejection. Each variant carries the message that goes to the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no credential presented")]
    NoCredential(String),
    #[error("malformed credential")]
    MalformedCredential(String),
    #[error("credential expired")]
    ExpiredCredential(String),
    #[error("invalid credential")]
    InvalidCredential(String),
}

impl AuthError {
    /// Every rejection is 401; callers tell the classes apart by message only.
    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    pub fn message(&self) -> &str {
        match self {
            AuthError::NoCredential(message)
            | AuthError::MalformedCredential(message)
            | AuthError::ExpiredCredential(message)
            | AuthError::InvalidCredential(message) => message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RejectionBody {
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = RejectionBody {
            message: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
