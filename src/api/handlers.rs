//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_summary, calculate_income_tax, calculate_shift_pay, rank_goals,
    rollover_recurring_expenses,
};
use crate::error::EngineError;

use super::request::{
    GoalProgressRequest, RolloverRequest, ShiftPayRequest, SummaryRequest, TaxRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, HolidayListResponse, RolloverResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/calculate", post(shift_pay_handler))
        .route("/tax/calculate", post(tax_handler))
        .route("/expenses/rollover", post(rollover_handler))
        .route("/goals/progress", post(goal_progress_handler))
        .route("/summary", post(summary_handler))
        .route("/public-holidays", get(public_holidays_handler))
        .with_state(state)
}

/// Unwraps a JSON body or turns the rejection into a 400 response.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
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
            Err(ApiErrorResponse::bad_request(error).into_response())
        }
    }
}

fn ok_json<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for POST /shifts/calculate.
///
/// Prices one shift. The request's holiday list, when present, replaces
/// the configured one.
async fn shift_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftPayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift pay request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let config = state.config();
    let rates = request.rates(config.rate_defaults());
    let holiday_override = request.holiday_override();
    let holidays = holiday_override
        .as_ref()
        .unwrap_or_else(|| config.public_holidays());

    let result = request
        .shift_input()
        .and_then(|shift| calculate_shift_pay(&shift, &rates, holidays));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                date = %result.date,
                classification = %result.classification,
                total_pay = %result.total_pay,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Shift pay calculated"
            );
            ok_json(result)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /tax/calculate.
async fn tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let schedule = state.config().tax_schedule();
    match request
        .income()
        .and_then(|income| calculate_income_tax(income, schedule))
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                schedule = %schedule.name,
                total_tax = %result.total_tax,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Tax calculated"
            );
            ok_json(result)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /expenses/rollover.
///
/// Runs one rollover pass and returns the advanced templates with the
/// instances the pass emitted.
async fn rollover_handler(
    State(_state): State<AppState>,
    payload: Result<Json<RolloverRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rollover request");

    let RolloverRequest { today, mut expenses } = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = expenses.iter().try_for_each(|expense| expense.validate()) {
        return engine_error(correlation_id, err);
    }

    let report = rollover_recurring_expenses(&mut expenses, today);
    info!(
        correlation_id = %correlation_id,
        materialized = report.materialized.len(),
        "Rollover completed"
    );
    ok_json(RolloverResponse { expenses, report })
}

/// Handler for POST /goals/progress.
async fn goal_progress_handler(
    State(_state): State<AppState>,
    payload: Result<Json<GoalProgressRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing goal progress request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match rank_goals(&request.goals, request.today) {
        Ok(progress) => {
            info!(
                correlation_id = %correlation_id,
                goals = progress.len(),
                "Goal progress calculated"
            );
            ok_json(progress)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /summary.
async fn summary_handler(
    State(_state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match build_summary(&request.shifts, &request.expenses, &request.goals, request.today) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                shifts = request.shifts.len(),
                expenses = request.expenses.len(),
                goals = request.goals.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Summary built"
            );
            ok_json(report)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /public-holidays.
async fn public_holidays_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    ok_json(HolidayListResponse {
        region: config.region().code.clone(),
        holidays: config.public_holidays().iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{ShiftPayResult, TaxBreakdown};
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/au_2026").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_weekday_shift_returns_200() {
        let body = json!({ "base_rate": "20", "date": "2026-03-04", "hours": "8" });
        let (status, bytes) = post_json("/shifts/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: ShiftPayResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.classification, "weekday");
        assert_eq!(result.total_pay, Decimal::from_str("160.00").unwrap());
    }

    #[tokio::test]
    async fn test_configured_holiday_applies() {
        // Anzac Day 2026 is in the configured list
        let body = json!({ "base_rate": 20, "date": "2026-04-25", "hours": 10 });
        let (status, bytes) = post_json("/shifts/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: ShiftPayResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.classification, "public_holiday_overtime");
        assert_eq!(result.total_pay, Decimal::from_str("550.00").unwrap());
    }

    #[tokio::test]
    async fn test_holiday_override_replaces_configured_list() {
        let body = json!({
            "base_rate": 20,
            "date": "2026-04-25",
            "hours": 5,
            "public_holidays": []
        });
        let (status, bytes) = post_json("/shifts/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: ShiftPayResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.classification, "saturday");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, bytes) = post_json("/shifts/calculate", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let body = json!({ "date": "2026-03-04", "hours": 8 });
        let (status, bytes) = post_json("/shifts/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("base_rate"));
    }

    #[tokio::test]
    async fn test_excess_hours_returns_invalid_input() {
        let body = json!({ "base_rate": 20, "date": "2026-03-04", "hours": 25 });
        let (status, bytes) = post_json("/shifts/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_bad_multiplier_returns_invalid_config() {
        let body = json!({
            "base_rate": 20,
            "sunday_multiplier": "-1",
            "date": "2026-03-04",
            "hours": 8
        });
        let (status, bytes) = post_json("/shifts/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_CONFIG");
    }

    #[tokio::test]
    async fn test_tax_returns_breakdown() {
        let (status, bytes) =
            post_json("/tax/calculate", json!({ "annual_income": 50000 }).to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: TaxBreakdown = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.net_income, Decimal::from_str("42283.00").unwrap());
    }

    #[tokio::test]
    async fn test_non_numeric_income_returns_invalid_input() {
        let (status, bytes) =
            post_json("/tax/calculate", json!({ "annual_income": "lots" }).to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_rollover_advances_templates() {
        let body = json!({
            "today": "2026-02-20",
            "expenses": [{
                "id": 1,
                "category": "rent",
                "amount": "1800",
                "recurrence": {
                    "is_recurring": true,
                    "recurrence_type": "monthly",
                    "anchor_date": "2026-01-15"
                },
                "next_occurrence": "2026-01-15"
            }]
        });
        let (status, bytes) = post_json("/expenses/rollover", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["expenses"][0]["next_occurrence"], "2026-02-15");
        assert_eq!(json["report"]["materialized"][0]["due_date"], "2026-01-15");
    }

    #[tokio::test]
    async fn test_goal_progress_ranked() {
        let body = json!({
            "today": "2026-03-01",
            "goals": [
                { "id": 1, "name": "Car", "target_amount": "8000", "priority": 1 },
                { "id": 2, "name": "Trip", "target_amount": "2000", "priority": 5,
                  "contributions": [{ "amount": "500", "date": "2026-02-01" }] }
            ]
        });
        let (status, bytes) = post_json("/goals/progress", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json[0]["goal_id"], 2);
        assert_eq!(json[0]["milestone"], "quarter");
        assert_eq!(json[1]["milestone"], "not_started");
    }

    #[tokio::test]
    async fn test_public_holidays_lists_configured_dates() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/public-holidays")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let list: HolidayListResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(list.region, "AU-2026");
        assert_eq!(list.holidays.len(), 10);
        assert_eq!(list.holidays[0].name, "New Year's Day");
    }
}
