//! Unified error handling
//!
//! Every failure leaving the API is a JSON object with a single `error`
//! string and a status code from the taxonomy below:
//!
//! | Variant | Status |
//! |---------|--------|
//! | `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `Unavailable` | 503 |
//! | `Database` / `Internal` | 500 |

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Error response body: `{"error": "<message>"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Success envelope used by the feedback / faq / contact routes: `{"data": ...}`
///
/// The other collections return bare documents. The split is inherited from
/// the upstream API surface and is kept as-is.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{"message": "..."}` body returned by delete routes.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    /// "`<entity>` deleted successfully"
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    /// Missing document (404)
    NotFound(String),

    #[error("{0}")]
    /// Malformed or constraint-violating input (400)
    Validation(String),

    #[error("{0}")]
    /// Store connection not established (503)
    Unavailable(String),

    #[error("{0}")]
    /// Store operation failed (500)
    Database(String),

    #[error("{0}")]
    /// Anything else (500)
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(msg) | AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // The underlying message is surfaced directly, including on 500s.
        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) | RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart request: {e}"))
    }
}
