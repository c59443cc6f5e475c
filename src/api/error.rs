//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::assessment_client::AssessmentError;
use crate::session::SessionError;

/// Structured error response body for the form page.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("No assessment result yet")]
    NoResult,
    #[error("Analysis already in progress")]
    AnalysisInProgress,
    /// Transport failure. Carries the user-facing message.
    #[error("Risk service unavailable: {0}")]
    BackendUnavailable(String),
    /// Non-2xx from the risk service. Carries status and body verbatim.
    #[error("Risk service error: {0}")]
    BackendRejected(String),
    #[error("Malformed risk service response: {0}")]
    MalformedResponse(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found or already ended".to_string(),
            ),
            ApiError::NoResult => (
                StatusCode::NOT_FOUND,
                "NO_RESULT",
                "No assessment result is available yet".to_string(),
            ),
            ApiError::AnalysisInProgress => (
                StatusCode::CONFLICT,
                "ANALYSIS_IN_PROGRESS",
                "An analysis is already running for this session".to_string(),
            ),
            ApiError::BackendUnavailable(detail) => (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
                detail.clone(),
            ),
            ApiError::BackendRejected(detail) => (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                detail.clone(),
            ),
            ApiError::MalformedResponse(detail) => (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                detail.clone(),
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::Unreachable(_)
            | AssessmentError::Timeout
            | AssessmentError::Transport(_) => ApiError::BackendUnavailable(err.user_message()),
            AssessmentError::BackendStatus { .. } => ApiError::BackendRejected(err.user_message()),
            AssessmentError::MalformedResponse(_) => {
                ApiError::MalformedResponse(err.user_message())
            }
            AssessmentError::Encode(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AnalysisInProgress => ApiError::AnalysisInProgress,
            SessionError::NoResult => ApiError::NoResult,
            SessionError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            SessionError::Assessment(e) => e.into(),
        }
    }
}
