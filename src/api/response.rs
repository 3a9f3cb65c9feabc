//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the mapping from
//! domain errors to HTTP status codes: validation failures map to 400,
//! workflow conflicts to 409, missing resources to 404, and configuration
//! or calculation faults to 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

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
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            PayrollError::InvalidPeriod { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PayrollError::DuplicateRun { .. } => (StatusCode::CONFLICT, "DUPLICATE_RUN"),
            PayrollError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            PayrollError::PeriodAlreadyProcessed { .. } => {
                (StatusCode::CONFLICT, "PERIOD_ALREADY_PROCESSED")
            }
            PayrollError::RunLocked { .. } => (StatusCode::CONFLICT, "RUN_LOCKED"),
            PayrollError::RunNotFound { .. } | PayrollError::RunNotFoundForPeriod { .. } => {
                (StatusCode::NOT_FOUND, "RUN_NOT_FOUND")
            }
            PayrollError::PayslipNotFound { .. } => (StatusCode::NOT_FOUND, "PAYSLIP_NOT_FOUND"),
            PayrollError::PayslipNotAvailable { .. } => {
                (StatusCode::CONFLICT, "PAYSLIP_NOT_AVAILABLE")
            }
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            PayrollError::CalculationError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CALCULATION_ERROR")
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
