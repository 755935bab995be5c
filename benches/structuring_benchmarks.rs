//! Performance benchmarks for the Payroll Structuring Engine.
//!
//! Covers value normalization, the structuring pass over statements of
//! growing size, and the `/structure` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{Cell, Row, row};
use payroll_engine::parsing::{normalize, structure_payroll};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const EVENTS_PER_EMPLOYEE: usize = 20;
const REFERENCES: [&str; 3] = ["09/2025", "10/2025", "11/2025"];

/// Builds a statement with a header row and `employees` blocks.
fn build_statement(employees: usize) -> Vec<Row> {
    let mut rows = vec![row(["Código", "Descrição", "Referência", "Calculado", "Informado", "Tipo"])];
    for employee in 1..=employees {
        rows.push(row([format!("{} - EMPREGADO {}", employee, employee)]));
        for code in 1..=EVENTS_PER_EMPLOYEE {
            for reference in REFERENCES {
                rows.push(row([
                    code.to_string(),
                    format!("EVENTO {}", code),
                    reference.to_string(),
                    format!("{}.{:03},{:02}", code, employee % 1000, code % 100),
                    format!("{}:{:02}", code * 10, employee % 60),
                    if code % 4 == 0 { "D" } else { "P" }.to_string(),
                ]));
            }
        }
        rows.push(row(["Total do funcionário"]));
    }
    rows
}

fn bench_normalize(c: &mut Criterion) {
    let inputs = [
        Cell::from("4.077,32"),
        Cell::from("4,077.32"),
        Cell::from("220:00"),
        Cell::from("12,5%"),
        Cell::from("R$ 1.234.567,89"),
        Cell::Number(4077.32),
    ];

    c.bench_function("normalize_mixed", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(normalize(black_box(input)));
            }
        })
    });
}

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure_payroll");

    for employees in [10, 100, 1000] {
        let rows = build_statement(employees);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(employees), &rows, |b, rows| {
            b.iter(|| black_box(structure_payroll(black_box(rows))))
        });
    }

    group.finish();
}

fn bench_structure_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(ConfigLoader::with_defaults()));
    let body = serde_json::json!({ "rows": build_statement(100) }).to_string();

    c.bench_function("structure_endpoint_100_employees", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/structure")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_normalize, bench_structure, bench_structure_endpoint);
criterion_main!(benches);
