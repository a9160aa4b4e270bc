//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (malformed dates, times, weekday indices)
    BadRequest(String),
    /// Resource not found
    NotFound(String),
    /// Internal server error
    Internal(String),
    /// Domain error from the scheduling engine
    Scheduling(SchedulingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Scheduling(e) => {
                let message = e.to_string();
                let (status, code) = match &e {
                    SchedulingError::Validation { .. } => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                    }
                    SchedulingError::InvalidWindow { .. } => {
                        (StatusCode::BAD_REQUEST, "INVALID_WINDOW")
                    }
                    SchedulingError::PastDate { .. } => (StatusCode::BAD_REQUEST, "PAST_DATE"),
                    SchedulingError::InvalidSlot { .. } => {
                        (StatusCode::BAD_REQUEST, "INVALID_SLOT")
                    }
                    SchedulingError::SlotTaken { .. } => (StatusCode::CONFLICT, "SLOT_TAKEN"),
                    SchedulingError::IllegalTransition { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "ILLEGAL_TRANSITION")
                    }
                    SchedulingError::AlreadyTerminal(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "ALREADY_TERMINAL")
                    }
                    SchedulingError::Authorization(_) => (StatusCode::FORBIDDEN, "NOT_AUTHORIZED"),
                    SchedulingError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    SchedulingError::Repository(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
                    }
                };
                (status, ApiError::new(code, message))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError::Scheduling(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
