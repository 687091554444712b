//! Error types for the HTTP boundary.
//!
//! Every failure becomes a JSON body with an `error` message and, where
//! useful, a `details` string. Validation problems are 400s; anything else
//! is a 500 confined to the request that hit it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use genre_model::ModelError;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, warn};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input values. All fields must be numeric.";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be a JSON object.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// API error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// A required field is absent (400)
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field can't be coerced to an integer (400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Body isn't JSON, or isn't a JSON object (400)
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Unexpected failure while handling the request (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::InvalidInput(_) | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the client
    pub fn body(&self) -> Value {
        match self {
            ApiError::MissingField(_) => json!({ "error": self.to_string() }),
            ApiError::InvalidInput(details) => json!({
                "error": INVALID_INPUT_MESSAGE,
                "details": details,
            }),
            ApiError::MalformedBody(details) => json!({
                "error": MALFORMED_BODY_MESSAGE,
                "details": details,
            }),
            ApiError::Internal(details) => json!({
                "error": INTERNAL_ERROR_MESSAGE,
                "details": details,
            }),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
