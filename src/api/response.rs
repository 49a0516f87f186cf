//! Response types for the Payslip Engine API.
//!
//! This module defines the success envelopes, the error body, and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::PayrollRun;
use crate::error::EngineError;
use crate::models::PayslipResult;

/// Envelope for a single computed payslip.
///
/// The identifier and timestamp live here rather than on the payslip itself,
/// which stays a pure function of its inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the payslip.
    pub engine_version: String,
    /// The worker identifier.
    pub worker_id: String,
    /// The period year.
    pub year: i32,
    /// The period month.
    pub month: u32,
    /// The computed payslip.
    pub payslip: PayslipResult,
}

/// Envelope for a payroll run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunResponse {
    /// Unique identifier for this run.
    pub calculation_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the payslips.
    pub engine_version: String,
    /// The run result.
    pub run: PayrollRun,
}

/// Returns the crate version reported in response envelopes.
pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
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

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    message,
                ),
            },
            EngineError::MissingIndicators { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "MISSING_INDICATORS",
                    message,
                    "Load the period's UF, UTM, minimum wage and rates before calculating",
                ),
            },
            EngineError::MissingTaxBrackets { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "MISSING_TAX_BRACKETS",
                    message,
                    "Load the year's income tax table before calculating",
                ),
            },
            EngineError::UnknownFund { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_FUND",
                    message,
                    "The pension fund has no published rate for this period",
                ),
            },
            EngineError::InvalidIndicators { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid indicator configuration",
                    message,
                ),
            },
            EngineError::InvalidInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
        }
    }
}
