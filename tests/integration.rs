//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite covers the full workflow over HTTP:
//! - Computing a payroll run
//! - The check, reject, authorize, and process transitions
//! - Period idempotency and duplicate handling
//! - Payslip visibility rules
//! - Overtime and late deduction flowing into the run
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use payrun_engine::api::{create_router, AppState};
use payrun_engine::config::ConfigLoader;
use payrun_engine::engine::PayrollEngine;
use payrun_engine::models::Employee;
use payrun_engine::store::{
    InMemoryAttendance, InMemoryAuditLog, InMemoryDirectory, InMemoryRequests, InMemoryRunStore,
};

// =============================================================================
// Test Helpers
// =============================================================================

struct TestContext {
    directory: Arc<InMemoryDirectory>,
    attendance: Arc<InMemoryAttendance>,
    requests: Arc<InMemoryRequests>,
    router: Router,
}

fn create_context() -> TestContext {
    let directory = Arc::new(InMemoryDirectory::default());
    let attendance = Arc::new(InMemoryAttendance::default());
    let requests = Arc::new(InMemoryRequests::default());
    let configs = Arc::new(ConfigLoader::load("./config/default").expect("Failed to load config"));
    let engine = PayrollEngine::new(
        directory.clone(),
        attendance.clone(),
        requests.clone(),
        configs,
        Arc::new(InMemoryRunStore::default()),
        Arc::new(InMemoryAuditLog::default()),
    );
    TestContext {
        directory,
        attendance,
        requests,
        router: create_router(AppState::new(Arc::new(engine))),
    }
}

fn add_employee(ctx: &TestContext, id: &str, annual: &str) {
    ctx.directory.add(Employee {
        id: id.to_string(),
        name: format!("Employee {id}"),
        annual_basic_salary: decimal(annual),
        is_active: true,
        tax_resident: None,
    });
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field from a JSON value, tolerating scale differences
/// ("1000" and "1000.00" are the same amount).
fn dec_field(value: &Value, field: &str) -> Decimal {
    decimal(value[field].as_str().unwrap_or_else(|| panic!("missing field {field}")))
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn compute(ctx: &TestContext, fortnight: u32, year: i32) -> Value {
    let (status, body) = post_json(
        ctx.router.clone(),
        "/payroll/compute",
        json!({"fortnight": fortnight, "year": year, "actor": "hr_user"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "compute failed: {body}");
    body
}

// =============================================================================
// Workflow
// =============================================================================

#[tokio::test]
async fn test_full_workflow_compute_check_authorize_payslip() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    let run = compute(&ctx, 1, 2025).await;
    assert_eq!(run["status"], "COMPUTED");
    assert_eq!(run["locked"], false);
    assert_eq!(run["total_employees"], 1);
    let run_id = run["id"].as_str().unwrap();

    let (status, run) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/check"),
        json!({"remarks": "totals verified", "actor": "checker"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "CHECKED");
    assert_eq!(run["checked_by"], "checker");

    let (status, run) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/authorize"),
        json!({"actor": "admin"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "PROCESSED");
    assert_eq!(run["locked"], true);
    assert_eq!(run["authorized_by"], "admin");
    assert_eq!(run["processed_by"], "admin");

    let (status, payslip) = get_json(ctx.router.clone(), "/payslips/emp_001/2025/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_field(&payslip, "net_pay"), decimal("807.31"));
    assert_eq!(dec_field(&payslip, "tax"), decimal("132.69"));
    assert_eq!(dec_field(&payslip, "cost_to_company"), decimal("1084.00"));
}

#[tokio::test]
async fn test_reject_then_recheck_flow() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    let run = compute(&ctx, 1, 2025).await;
    let run_id = run["id"].as_str().unwrap();

    let (status, run) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/reject"),
        json!({"remarks": "attendance data incomplete", "actor": "checker"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "REJECTED");

    let (status, run) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/check"),
        json!({"actor": "checker"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "CHECKED");
}

#[tokio::test]
async fn test_authorize_directly_from_computed() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    let run = compute(&ctx, 1, 2025).await;
    let run_id = run["id"].as_str().unwrap();

    let (status, run) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/authorize"),
        json!({"remarks": "expedited", "actor": "admin"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "PROCESSED");
}

#[tokio::test]
async fn test_processed_run_refuses_further_transitions() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    let run = compute(&ctx, 1, 2025).await;
    let run_id = run["id"].as_str().unwrap();
    post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/authorize"),
        json!({"actor": "admin"}),
    )
    .await;

    let (status, error) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/check"),
        json!({"actor": "checker"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");

    let (status, error) = post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/authorize"),
        json!({"actor": "admin"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");
}

// =============================================================================
// Idempotency
// =============================================================================

#[tokio::test]
async fn test_duplicate_compute_returns_conflict() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    compute(&ctx, 1, 2025).await;
    let (status, error) = post_json(
        ctx.router.clone(),
        "/payroll/compute",
        json!({"fortnight": 1, "year": 2025, "actor": "hr_user"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_RUN");
}

#[tokio::test]
async fn test_invalid_fortnight_returns_bad_request() {
    let ctx = create_context();

    let (status, error) = post_json(
        ctx.router.clone(),
        "/payroll/compute",
        json!({"fortnight": 0, "year": 2025, "actor": "hr_user"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let (status, _) = post_json(
        ctx.router.clone(),
        "/payroll/compute",
        json!({"fortnight": 27, "year": 2025, "actor": "hr_user"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A fortnight far past the calendar range must fail the same way.
    let (status, error) = post_json(
        ctx.router.clone(),
        "/payroll/compute",
        json!({"fortnight": 10_000_000u32, "year": 2025, "actor": "hr_user"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Earnings components
// =============================================================================

#[tokio::test]
async fn test_overtime_and_late_deduction_flow_into_run() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");
    // Fortnight 1 of 2025 spans Jan 1-14. Jan 6 is a Monday, Jan 4 a Saturday.
    ctx.requests
        .add_overtime("emp_001", date("2025-01-06"), decimal("4"), false);
    ctx.requests
        .add_overtime("emp_001", date("2025-01-04"), decimal("2"), false);
    ctx.attendance.record_present("emp_001", date("2025-01-02"), 10);
    ctx.attendance.record_late("emp_001", date("2025-01-02"), 1);

    let run = compute(&ctx, 1, 2025).await;
    let detail = &run["details"][0];

    // Weekday: 12.50 * 4 * 1.5 = 75.00; weekend: 12.50 * 2 * 2.0 = 50.00.
    assert_eq!(dec_field(detail, "overtime_pay"), decimal("125.00"));
    assert_eq!(dec_field(detail, "late_deduction"), decimal("50.00"));
    assert_eq!(dec_field(detail, "gross_salary"), decimal("1125.00"));

    // The same overtime must not pay again next period.
    let run2 = compute(&ctx, 2, 2025).await;
    assert_eq!(dec_field(&run2["details"][0], "overtime_pay"), Decimal::ZERO);
}

#[tokio::test]
async fn test_partial_attendance_pro_rates_basic_pay() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");
    ctx.attendance.record_present("emp_001", date("2025-01-02"), 7);

    let run = compute(&ctx, 1, 2025).await;
    let detail = &run["details"][0];
    assert_eq!(detail["days_worked"], 7);
    assert_eq!(dec_field(detail, "basic_pay"), decimal("700.00"));
}

#[tokio::test]
async fn test_run_totals_match_detail_sums() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");
    add_employee(&ctx, "emp_002", "52000");
    add_employee(&ctx, "emp_003", "104000");

    let run = compute(&ctx, 1, 2025).await;
    let details = run["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);

    let sum = |field: &str| -> Decimal { details.iter().map(|d| dec_field(d, field)).sum() };
    assert_eq!(dec_field(&run, "total_gross"), sum("gross_salary"));
    assert_eq!(dec_field(&run, "total_net_pay"), sum("net_pay"));
    assert_eq!(dec_field(&run, "total_tax"), sum("tax"));
    assert_eq!(dec_field(&run, "total_deductions"), sum("total_deductions"));
}

// =============================================================================
// Payslips and queries
// =============================================================================

#[tokio::test]
async fn test_payslip_hidden_until_processed() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    let run = compute(&ctx, 1, 2025).await;
    let run_id = run["id"].as_str().unwrap();

    let (status, error) = get_json(ctx.router.clone(), "/payslips/emp_001/2025/1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "PAYSLIP_NOT_AVAILABLE");

    post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{run_id}/authorize"),
        json!({"actor": "admin"}),
    )
    .await;

    let (status, _) = get_json(ctx.router.clone(), "/payslips/emp_001/2025/1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = get_json(ctx.router.clone(), "/payslips/emp_999/2025/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "PAYSLIP_NOT_FOUND");

    let (status, error) = get_json(ctx.router.clone(), "/payslips/emp_001/2025/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RUN_NOT_FOUND");
}

#[tokio::test]
async fn test_payslip_history_lists_processed_periods() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    for fortnight in 1..=3 {
        let run = compute(&ctx, fortnight, 2025).await;
        if fortnight < 3 {
            let run_id = run["id"].as_str().unwrap();
            post_json(
                ctx.router.clone(),
                &format!("/payroll/runs/{run_id}/authorize"),
                json!({"actor": "admin"}),
            )
            .await;
        }
    }

    let (status, payslips) = get_json(ctx.router.clone(), "/payslips/emp_001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payslips.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_run_listing_and_pending_queries() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");

    let first = compute(&ctx, 1, 2025).await;
    let second = compute(&ctx, 2, 2025).await;
    let second_id = second["id"].as_str().unwrap();
    post_json(
        ctx.router.clone(),
        &format!("/payroll/runs/{second_id}/check"),
        json!({"actor": "checker"}),
    )
    .await;

    let (status, runs) = get_json(ctx.router.clone(), "/payroll/runs").await;
    assert_eq!(status, StatusCode::OK);
    let runs = runs.as_array().unwrap().clone();
    assert_eq!(runs.len(), 2);
    // Most recent period first.
    assert_eq!(runs[0]["period"]["fortnight"], 2);
    assert_eq!(runs[1]["period"]["fortnight"], 1);

    let (_, pending) = get_json(ctx.router.clone(), "/payroll/runs/pending-check").await;
    let pending = pending.as_array().unwrap().clone();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], first["id"]);

    let (_, pending) = get_json(ctx.router.clone(), "/payroll/runs/pending-authorization").await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (_, pending) = get_json(ctx.router.clone(), "/payroll/runs/pending-processing").await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_run_details_endpoint() {
    let ctx = create_context();
    add_employee(&ctx, "emp_001", "26000");
    add_employee(&ctx, "emp_002", "52000");

    let run = compute(&ctx, 1, 2025).await;
    let run_id = run["id"].as_str().unwrap();

    let (status, details) =
        get_json(ctx.router.clone(), &format!("/payroll/runs/{run_id}/details")).await;
    assert_eq!(status, StatusCode::OK);
    let details = details.as_array().unwrap();
    assert_eq!(details.len(), 2);
    for detail in details {
        assert_eq!(detail["run_id"], run["id"]);
    }
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let ctx = create_context();

    let response = ctx
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/compute")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_run_returns_not_found() {
    let ctx = create_context();

    let (status, error) = get_json(
        ctx.router.clone(),
        "/payroll/runs/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RUN_NOT_FOUND");
}

#[tokio::test]
async fn test_empty_directory_yields_empty_run() {
    let ctx = create_context();

    let run = compute(&ctx, 1, 2025).await;
    assert_eq!(run["total_employees"], 0);
    assert_eq!(run["details"].as_array().unwrap().len(), 0);
}
