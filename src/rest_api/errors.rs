//! # REST API Errors
//!
//! Maps parse, service and store failures to HTTP statuses. Every error
//! body is `{"error": <message>, "code": <stable code>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::service::ServiceError;
use crate::storage::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed paging or sort parameter
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Unknown filter field, unsupported operator or bad operand
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Service Errors
    // ==================
    #[error("{0}")]
    Service(#[from] ServiceError),
}

impl RestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidQueryParam(_)
            | RestError::InvalidFilter(_)
            | RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            RestError::Service(err) => match err {
                ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                ServiceError::IdAlreadySet { .. }
                | ServiceError::IdMissing { .. }
                | ServiceError::IdMismatch { .. }
                | ServiceError::InvalidPatch { .. } => StatusCode::BAD_REQUEST,
                ServiceError::Store(store) => match store {
                    StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    StoreError::DanglingReference { .. } | StoreError::InvalidEntity { .. } => {
                        StatusCode::BAD_REQUEST
                    }
                    StoreError::StillReferenced { .. } => StatusCode::CONFLICT,
                    StoreError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
                },
                ServiceError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RestError::InvalidQueryParam(_) => "GALLERY_INVALID_QUERY_PARAM",
            RestError::InvalidFilter(_) => "GALLERY_INVALID_FILTER",
            RestError::InvalidBody(_) => "GALLERY_INVALID_BODY",
            RestError::Service(err) => err.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if !matches!(self, RestError::Service(_)) {
            log_event_with_fields(
                Event::RequestRejected,
                &[("code", self.code()), ("reason", self.to_string().as_str())],
            );
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
