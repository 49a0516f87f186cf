//! HTTP request handlers for the Payslip Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_payslip, run_payroll};
use crate::error::EngineError;
use crate::resolver::{IndicatorSource, resolve_indicators};

use super::request::{PayrollRunRequest, PayslipRequest};
use super::response::{
    ApiError, ApiErrorResponse, PayrollRunResponse, PayslipResponse, engine_version,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip", post(payslip_handler))
        .route("/payroll-run", post(payroll_run_handler))
        .route("/indicators/:year/:month", get(indicators_handler))
        .with_state(state)
}

/// Handler for POST /payslip.
///
/// Validates the request, resolves the period's indicators with the worker's
/// own contribution rate as the pension fallback, and returns the payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.validate() {
        return engine_error_response(correlation_id, err);
    }

    let start_time = Instant::now();
    let indicators = match resolve_indicators(
        state.indicators(),
        request.year,
        request.month,
        &request.worker.pension_fund,
        request.worker.contract_type,
        Some(request.worker.pension_fund_contribution_rate),
    ) {
        Ok(indicators) => indicators,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let payslip = compute_payslip(&request.worker, &request.variable, &indicators);

    info!(
        correlation_id = %correlation_id,
        worker_id = %request.worker.worker_id,
        year = request.year,
        month = request.month,
        net_pay = %payslip.net_pay,
        warnings = payslip.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payslip computed successfully"
    );

    json_response(
        StatusCode::OK,
        PayslipResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: engine_version(),
            worker_id: request.worker.worker_id,
            year: request.year,
            month: request.month,
            payslip,
        },
    )
}

/// Handler for POST /payroll-run.
async fn payroll_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.validate() {
        return engine_error_response(correlation_id, err);
    }

    let start_time = Instant::now();
    match run_payroll(
        state.indicators(),
        request.year,
        request.month,
        &request.entries,
    ) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                workers = run.totals.worker_count,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll run completed successfully"
            );
            json_response(
                StatusCode::OK,
                PayrollRunResponse {
                    calculation_id: correlation_id,
                    timestamp: Utc::now(),
                    engine_version: engine_version(),
                    run,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /indicators/{year}/{month}.
async fn indicators_handler(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.indicators().period_indicators(year, month) {
        Ok(indicators) => json_response(StatusCode::OK, indicators),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
