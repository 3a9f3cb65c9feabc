//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite verifies that payroll computation meets performance
//! targets:
//! - Progressive tax for one income: < 10μs mean
//! - Single employee pay computation: < 100μs mean
//! - Full run over 100 employees: < 50ms mean
//! - Compute request over HTTP: < 5ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rust_decimal::Decimal;
use std::sync::Arc;

use payrun_engine::api::{create_router, AppState};
use payrun_engine::calculation::{annual_tax, compute_for_employee};
use payrun_engine::config::{ConfigLoader, EffectiveConfiguration, TaxConfiguration};
use payrun_engine::engine::PayrollEngine;
use payrun_engine::models::{Employee, PayPeriod};
use payrun_engine::store::{
    InMemoryAttendance, InMemoryAuditLog, InMemoryDirectory, InMemoryRequests, InMemoryRunStore,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates an employee with the given annual salary.
fn create_employee(id: usize, annual: u32) -> Employee {
    Employee {
        id: format!("emp_bench_{:04}", id),
        name: format!("Benchmark Employee {}", id),
        annual_basic_salary: Decimal::from(annual),
        is_active: true,
        tax_resident: None,
    }
}

/// Creates an engine backed by in-memory stores with `employee_count`
/// employees at varied salary levels.
fn create_engine(employee_count: usize) -> PayrollEngine {
    let directory = Arc::new(InMemoryDirectory::default());
    for i in 0..employee_count {
        // Spread salaries across the slab table.
        directory.add(create_employee(i, 20_000 + (i as u32 % 10) * 15_000));
    }
    PayrollEngine::new(
        directory,
        Arc::new(InMemoryAttendance::default()),
        Arc::new(InMemoryRequests::default()),
        Arc::new(ConfigLoader::load("./config/default").expect("Failed to load config")),
        Arc::new(InMemoryRunStore::default()),
        Arc::new(InMemoryAuditLog::default()),
    )
}

/// Benchmark: progressive tax over the full slab table.
///
/// Target: < 10μs mean
fn bench_annual_tax(c: &mut Criterion) {
    let config = TaxConfiguration::default();
    let incomes: Vec<Decimal> = [10_000u32, 26_000, 50_000, 120_000, 400_000]
        .iter()
        .map(|&i| Decimal::from(i))
        .collect();

    c.bench_function("annual_tax", |b| {
        b.iter(|| {
            for income in &incomes {
                black_box(annual_tax(black_box(*income), &config, true));
            }
        })
    });
}

/// Benchmark: single employee pay computation.
///
/// Target: < 100μs mean
fn bench_single_employee(c: &mut Criterion) {
    let employee = create_employee(1, 26_000);
    let period = PayPeriod::for_fortnight(1, 2025);
    let effective = EffectiveConfiguration {
        payroll: Default::default(),
        tax: TaxConfiguration::default(),
        payroll_defaulted: false,
        tax_defaulted: false,
    };
    let attendance = InMemoryAttendance::default();
    let requests = InMemoryRequests::default();

    c.bench_function("single_employee_computation", |b| {
        b.iter(|| {
            black_box(
                compute_for_employee(
                    black_box(&employee),
                    &period,
                    10,
                    &effective,
                    &attendance,
                    &requests,
                )
                .unwrap(),
            )
        })
    });
}

/// Benchmark: full payroll run at various headcounts.
///
/// Target for 100 employees: < 50ms mean. A fresh engine is built per
/// iteration because a period can only be computed once per run store.
fn bench_run_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_scaling");

    for employee_count in [1usize, 10, 50, 100].iter() {
        group.throughput(Throughput::Elements(*employee_count as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, &count| {
                b.iter(|| {
                    let engine = create_engine(count);
                    black_box(engine.compute_payroll(1, 2025, "bench_user").unwrap())
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: compute request over HTTP.
///
/// Target: < 5ms mean
fn bench_compute_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let body = r#"{"fortnight": 1, "year": 2025, "actor": "bench_user"}"#;

    c.bench_function("compute_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let engine = create_engine(10);
            let router = create_router(AppState::new(Arc::new(engine)));
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/compute")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_annual_tax,
    bench_single_employee,
    bench_run_scaling,
    bench_compute_endpoint,
);
criterion_main!(benches);
