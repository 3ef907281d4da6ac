//! JSON error envelope for the HTTP API.
//!
//! Every failure leaves the service as `{"error": true, "message": ...}`
//! with a status code matching the failure class.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::ReduceError;
use crate::transcript::LoadError;

/// Failure classes the API reports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request payload (unparseable CSV, bad rows).
    #[error("{0}")]
    BadRequest(String),
    /// The named analysis run does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Well-formed request naming a record the bundle does not hold.
    #[error("{0}")]
    Unprocessable(String),
    /// Storage or serialization trouble.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": true,
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ReduceError> for ApiError {
    fn from(err: ReduceError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
