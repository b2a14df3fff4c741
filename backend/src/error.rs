//! The error type shared by every HTTP handler.
//!
//! Each variant maps to one status code, and every error body is JSON of the
//! form `{ "error": ..., "details": ... }`. Storage errors are logged here,
//! once, when they are turned into a response.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: missing headers")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<String>,
    },
    #[error("Invalid CSV format")]
    InvalidHeaders {
        missing: Vec<String>,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request_with(message: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Turns a UNIQUE constraint violation into `Conflict(message)`; any
    /// other storage error is kept as is.
    pub fn conflict_on_unique(err: rusqlite::Error, message: impl Into<String>) -> Self {
        if is_unique_violation(&err) {
            ApiError::Conflict(message.into())
        } else {
            ApiError::Storage(err)
        }
    }
}

pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest { .. } | ApiError::InvalidHeaders { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest {
                message,
                details: Some(details),
            } => json!({ "error": message, "details": details }),
            ApiError::InvalidHeaders {
                missing,
                expected,
                actual,
            } => json!({
                "error": self.to_string(),
                "details": format!("Missing headers: {}", missing.join(", ")),
                "expectedHeaders": expected,
                "actualHeaders": actual,
            }),
            ApiError::Storage(e) => {
                error!("Storage failure: {}", e);
                json!({ "error": "Storage failure", "details": e.to_string() })
            }
            ApiError::Internal(msg) => {
                error!("Internal failure: {}", msg);
                json!({ "error": "Internal server error", "details": msg })
            }
            other => json!({ "error": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
