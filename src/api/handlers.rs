//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::warn;
use uuid::Uuid;

use super::request::{ActionRequest, ComputeRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/compute", post(compute_handler))
        .route("/payroll/runs", get(list_runs_handler))
        .route("/payroll/runs/pending-check", get(pending_check_handler))
        .route(
            "/payroll/runs/pending-authorization",
            get(pending_authorization_handler),
        )
        .route(
            "/payroll/runs/pending-processing",
            get(pending_processing_handler),
        )
        .route("/payroll/runs/:id", get(get_run_handler))
        .route("/payroll/runs/:id/details", get(run_details_handler))
        .route("/payroll/runs/:id/check", post(check_handler))
        .route("/payroll/runs/:id/reject", post(reject_handler))
        .route("/payroll/runs/:id/authorize", post(authorize_handler))
        .route("/payroll/runs/:id/process", post(process_handler))
        .route("/payslips/:employee_id", get(payslip_history_handler))
        .route(
            "/payslips/:employee_id/:year/:fortnight",
            get(payslip_handler),
        )
        .with_state(state)
}

/// Converts a JSON extraction rejection into a 400 response.
fn rejection_response(rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Handler for POST /payroll/compute.
///
/// Computes payroll for a period and returns the new run.
async fn compute_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };

    match state
        .engine()
        .compute_payroll(request.fortnight, request.year, &request.actor)
    {
        Ok(run) => (StatusCode::CREATED, Json(run)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /payroll/runs.
async fn list_runs_handler(State(state): State<AppState>) -> Response {
    Json(state.engine().list_runs()).into_response()
}

/// Handler for GET /payroll/runs/pending-check.
async fn pending_check_handler(State(state): State<AppState>) -> Response {
    Json(state.engine().runs_pending_check()).into_response()
}

/// Handler for GET /payroll/runs/pending-authorization.
async fn pending_authorization_handler(State(state): State<AppState>) -> Response {
    Json(state.engine().runs_pending_authorization()).into_response()
}

/// Handler for GET /payroll/runs/pending-processing.
async fn pending_processing_handler(State(state): State<AppState>) -> Response {
    Json(state.engine().runs_pending_processing()).into_response()
}

/// Handler for GET /payroll/runs/:id.
async fn get_run_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.engine().run_by_id(id) {
        Ok(run) => Json(run).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /payroll/runs/:id/details.
async fn run_details_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.engine().details_by_run(id) {
        Ok(details) => Json(details).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /payroll/runs/:id/check.
async fn check_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };
    match state
        .engine()
        .check_payroll(id, request.remarks, &request.actor)
    {
        Ok(run) => Json(run).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /payroll/runs/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };
    match state
        .engine()
        .reject_payroll(id, request.remarks, &request.actor)
    {
        Ok(run) => Json(run).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /payroll/runs/:id/authorize.
async fn authorize_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };
    match state
        .engine()
        .authorize_payroll(id, request.remarks, &request.actor)
    {
        Ok(run) => Json(run).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /payroll/runs/:id/process.
async fn process_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };
    match state.engine().process_payroll(id, &request.actor) {
        Ok(run) => Json(run).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /payslips/:employee_id.
async fn payslip_history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    Json(state.engine().employee_payslips(&employee_id)).into_response()
}

/// Handler for GET /payslips/:employee_id/:year/:fortnight.
async fn payslip_handler(
    State(state): State<AppState>,
    Path((employee_id, year, fortnight)): Path<(String, i32, u32)>,
) -> Response {
    match state.engine().get_payslip(&employee_id, fortnight, year) {
        Ok(payslip) => Json(payslip).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
