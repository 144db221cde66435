//! Response types for the Time Accounting Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the composite bodies some endpoints return.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BreakTotals, CommitOutcome, WorkTotals};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

fn commit_details(outcome: CommitOutcome) -> String {
    let outcome = match outcome {
        CommitOutcome::Committed => "committed",
        CommitOutcome::RolledBack => "rolled_back",
        CommitOutcome::Inconsistent => "inconsistent",
    };
    format!("commit outcome: {}", outcome)
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match &error {
            EngineError::InvalidTransition { from, .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    format!("current status: {}", from),
                ),
            ),
            EngineError::NoOpenPunch { .. } => {
                (StatusCode::CONFLICT, ApiError::new("NO_OPEN_PUNCH", message))
            }
            EngineError::InvalidTimestamp { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("INVALID_TIMESTAMP", message),
            ),
            EngineError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORE_UNAVAILABLE", message),
            ),
            EngineError::TransitionRolledBack { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details(
                    "TRANSITION_ROLLED_BACK",
                    message,
                    commit_details(CommitOutcome::RolledBack),
                ),
            ),
            EngineError::TransitionInconsistent { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "TRANSITION_INCONSISTENT",
                    message,
                    commit_details(CommitOutcome::Inconsistent),
                ),
            ),
            EngineError::EmployeeNotFound { employee_id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    message,
                    format!("The employee '{}' is not in the roster", employee_id),
                ),
            ),
            EngineError::InvalidDateRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DATE_RANGE", message),
            ),
            EngineError::ExportError { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("EXPORT_ERROR", message),
            ),
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::CalculationError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Body of `GET /employees/:id/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    /// Work hours on the requested day.
    pub day: WorkTotals,
    /// Work hours in the week containing the day.
    pub week: WorkTotals,
    /// Break hours on the requested day.
    pub breaks: BreakTotals,
}
