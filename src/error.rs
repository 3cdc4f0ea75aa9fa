use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level error taxonomy.
///
/// Each variant maps to a distinct user-visible outcome:
///
/// - [`AppError::Validation`] - malformed input, 400
/// - [`AppError::RateLimited`] - caller must back off, 429
/// - [`AppError::NotFound`] - code does not resolve, 404
/// - [`AppError::WriteFailure`] - shard unreachable or constraint violation, 500
/// - [`AppError::Backend`] - transient cache/broker/store failure that could not be
///   absorbed locally, 503
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    RateLimited { message: String, details: Value },
    NotFound { message: String, details: Value },
    WriteFailure { message: String, details: Value },
    Backend { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn write_failure(message: impl Into<String>, details: Value) -> Self {
        Self::WriteFailure {
            message: message.into(),
            details,
        }
    }
    pub fn backend(message: impl Into<String>, details: Value) -> Self {
        Self::Backend {
            message: message.into(),
            details,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "validation error: {}", message),
            Self::RateLimited { message, .. } => write!(f, "rate limited: {}", message),
            Self::NotFound { message, .. } => write!(f, "not found: {}", message),
            Self::WriteFailure { message, .. } => write!(f, "write failure: {}", message),
            Self::Backend { message, .. } => write!(f, "backend error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::RateLimited { message, details } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::WriteFailure { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "write_failure",
                message,
                details,
            ),
            AppError::Backend { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "backend_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a shard write error to [`AppError::WriteFailure`].
///
/// Uniqueness violations on `code` are included with the constraint name so
/// callers can distinguish a collision from an unreachable shard.
pub fn map_shard_write_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::write_failure(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::write_failure("Shard write failed", json!({}))
}
