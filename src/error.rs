//! Service error type and its HTTP rendering.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::storage::StorageError;
use crate::utils::url_validator::UrlValidationError;

/// `Retry-After` sent with retryable errors, in seconds.
const RETRY_AFTER_SECONDS: &str = "1";

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Errors produced by the shorten and redirect flows.
///
/// `NotFound` is an expected outcome for unknown or expired codes, kept in
/// this enum so handlers can use `?` uniformly. `CorruptRecord` means the key
/// existed but its value could not be decoded, and is reported separately
/// from a miss.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlValidationError),

    #[error("No free short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Short link '{code}' not found")]
    NotFound { code: String },

    #[error("Stored record for '{code}' is corrupt: {reason}")]
    CorruptRecord { code: String, reason: String },

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) | AppError::InvalidHost(_) => StatusCode::BAD_REQUEST,
            AppError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::CorruptRecord { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(UrlValidationError::UnsupportedScheme(_)) => {
                "Only http(s) URLs are allowed"
            }
            AppError::InvalidUrl(_) => "Invalid or missing url",
            AppError::AllocationExhausted { .. } => "Unable to allocate code",
            AppError::NotFound { .. } => "Not found",
            AppError::CorruptRecord { .. } => "Corrupt record",
            AppError::InvalidHost(_) => "Missing or invalid Host header",
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error",
        }
    }

    /// True if the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::AllocationExhausted { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        let mut response = (status, Json(body)).into_response();
        if self.is_retryable() {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(RETRY_AFTER_SECONDS),
            );
        }
        response
    }
}
