//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure calculations directly and the shift endpoint end to end:
//! - Single shift pricing
//! - Income tax across the bracket table
//! - Rollover passes over growing template lists
//! - Summaries over a year of shifts
//! - `POST /shifts/calculate` through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    build_summary, calculate_income_tax, calculate_shift_pay, rollover_recurring_expenses,
};
use payroll_engine::config::{ConfigLoader, RateConfig, TaxSchedule};
use payroll_engine::models::{
    ExpenseRecurrence, PaidShift, RecurrenceType, RecurringExpense, ShiftInput,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/au_2026").expect("Failed to load config");
    AppState::new(config)
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

/// Creates `count` recurring templates cycling through the three schedules.
fn create_templates(count: usize) -> Vec<RecurringExpense> {
    let types = [
        RecurrenceType::Weekly,
        RecurrenceType::Monthly,
        RecurrenceType::Yearly,
    ];
    (0..count)
        .map(|i| {
            RecurringExpense::new(
                i as i64,
                format!("category_{}", i % 7),
                Decimal::new(1999, 2),
                ExpenseRecurrence {
                    is_recurring: true,
                    recurrence_type: types[i % types.len()],
                    anchor_date: start_date() + Days::new((i % 28) as u64),
                    recurrence_end_date: None,
                },
            )
            .unwrap()
        })
        .collect()
}

/// Benchmark: one shift priced directly.
fn bench_shift_pay(c: &mut Criterion) {
    let state = create_test_state();
    let holidays = state.config().public_holidays().clone();
    let rates = RateConfig::with_base_rate(Decimal::new(2850, 2));
    let weekday = ShiftInput::parse("2026-03-04", Decimal::new(8, 0)).unwrap();
    let holiday_overtime = ShiftInput::parse("2026-12-25", Decimal::new(115, 1)).unwrap();

    let mut group = c.benchmark_group("shift_pay");
    group.bench_function("weekday", |b| {
        b.iter(|| calculate_shift_pay(black_box(&weekday), &rates, &holidays))
    });
    group.bench_function("public_holiday_overtime", |b| {
        b.iter(|| calculate_shift_pay(black_box(&holiday_overtime), &rates, &holidays))
    });
    group.finish();
}

/// Benchmark: income tax at a few points in the bracket table.
fn bench_income_tax(c: &mut Criterion) {
    let schedule = TaxSchedule::default();
    let mut group = c.benchmark_group("income_tax");

    for income in [10_000i64, 50_000, 150_000, 400_000] {
        let income = Decimal::new(income, 0);
        group.bench_with_input(BenchmarkId::new("income", income), &income, |b, income| {
            b.iter(|| calculate_income_tax(black_box(*income), &schedule))
        });
    }

    group.finish();
}

/// Benchmark: a rollover pass where every template is due.
fn bench_rollover(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let mut group = c.benchmark_group("rollover");

    for count in [10usize, 100, 1000] {
        let templates = create_templates(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("templates", count), &templates, |b, t| {
            b.iter_batched(
                || t.clone(),
                |mut expenses| rollover_recurring_expenses(&mut expenses, today),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark: summaries over a year of daily shifts.
fn bench_summary(c: &mut Criterion) {
    let shifts: Vec<PaidShift> = (0..365u64)
        .map(|i| PaidShift {
            date: start_date() + Days::new(i),
            hours: Decimal::new(75, 1),
            shift_type: "weekday".to_string(),
            total_pay: Decimal::new(21375, 2),
        })
        .collect();
    let today = start_date() + Days::new(364);

    c.bench_function("summary_365_shifts", |b| {
        b.iter(|| build_summary(black_box(&shifts), &[], &[], today))
    });
}

/// Benchmark: `POST /shifts/calculate` through the router.
fn bench_shift_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "base_rate": "28.50",
        "date": "2026-03-08",
        "start_time": "07:00",
        "end_time": "17:30"
    })
    .to_string();

    c.bench_function("shift_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/shifts/calculate")
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

criterion_group!(
    benches,
    bench_shift_pay,
    bench_income_tax,
    bench_rollover,
    bench_summary,
    bench_shift_endpoint,
);
criterion_main!(benches);
