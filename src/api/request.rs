//! Request types for the payroll engine API.
//!
//! Request bodies accept dates and times as strings so that a bad value
//! surfaces as an `INVALID_INPUT` naming the field rather than a generic
//! JSON error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::parse_income;
use crate::config::{RateConfig, RateDefaults};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Expense, PaidShift, PublicHoliday, PublicHolidaySet, RecurringExpense, SavingsGoal,
    ShiftInput, TimedShift,
};

/// Request body for `POST /shifts/calculate`.
///
/// Multipliers left out fall back to the region's configured defaults. A
/// shift is given either as `hours` or as a `start_time`/`end_time` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPayRequest {
    /// The workplace's ordinary hourly rate.
    pub base_rate: Decimal,
    /// Saturday multiplier override.
    #[serde(default)]
    pub saturday_multiplier: Option<Decimal>,
    /// Sunday multiplier override.
    #[serde(default)]
    pub sunday_multiplier: Option<Decimal>,
    /// Public holiday multiplier override.
    #[serde(default)]
    pub public_holiday_multiplier: Option<Decimal>,
    /// Overtime multiplier override.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// Overtime threshold override.
    #[serde(default)]
    pub overtime_threshold_hours: Option<Decimal>,
    /// The shift date as `YYYY-MM-DD`.
    pub date: String,
    /// Hours worked.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Clock-in time as `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Clock-out time as `HH:MM`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Replaces the configured holiday list for this request.
    #[serde(default)]
    pub public_holidays: Option<Vec<PublicHoliday>>,
}

impl ShiftPayRequest {
    /// Resolves the rates, filling gaps from `defaults`.
    pub fn rates(&self, defaults: &RateDefaults) -> RateConfig {
        let mut rates = defaults.with_base_rate(self.base_rate);
        if let Some(value) = self.saturday_multiplier {
            rates.saturday_multiplier = value;
        }
        if let Some(value) = self.sunday_multiplier {
            rates.sunday_multiplier = value;
        }
        if let Some(value) = self.public_holiday_multiplier {
            rates.public_holiday_multiplier = value;
        }
        if let Some(value) = self.overtime_multiplier {
            rates.overtime_multiplier = value;
        }
        if let Some(value) = self.overtime_threshold_hours {
            rates.overtime_threshold_hours = value;
        }
        rates
    }

    /// Builds the validated shift from either hours or clock times.
    pub fn shift_input(&self) -> EngineResult<ShiftInput> {
        match (self.hours, &self.start_time, &self.end_time) {
            (Some(hours), _, _) => ShiftInput::parse(&self.date, hours),
            (None, Some(start), Some(end)) => TimedShift::parse(&self.date, start, end)?.to_input(),
            _ => Err(EngineError::invalid_input(
                "hours",
                "provide hours or both start_time and end_time",
            )),
        }
    }

    /// Returns the request's holiday override, if one was supplied.
    pub fn holiday_override(&self) -> Option<PublicHolidaySet> {
        self.public_holidays
            .as_ref()
            .map(|holidays| holidays.iter().cloned().collect())
    }
}

/// Request body for `POST /tax/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Annual income as a JSON number or a numeric string.
    pub annual_income: Value,
}

impl TaxRequest {
    /// Reads the income as an exact decimal.
    pub fn income(&self) -> EngineResult<Decimal> {
        match &self.annual_income {
            Value::Number(number) => {
                // Large and tiny floats print in exponent form.
                let text = number.to_string();
                parse_income(&text).or_else(|e| Decimal::from_scientific(&text).map_err(|_| e))
            }
            Value::String(text) => parse_income(text),
            other => Err(EngineError::invalid_input(
                "annual_income",
                format!("expected a number, got {}", other),
            )),
        }
    }
}

/// Request body for `POST /expenses/rollover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloverRequest {
    /// The reference date of the pass.
    pub today: NaiveDate,
    /// The recurring expense templates.
    #[serde(default)]
    pub expenses: Vec<RecurringExpense>,
}

/// Request body for `POST /goals/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressRequest {
    /// The goals to report on.
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    /// Reference date for deadline calculations.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for `POST /summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Priced shifts.
    #[serde(default)]
    pub shifts: Vec<PaidShift>,
    /// Expense records.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Savings goals.
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    /// The reference date.
    pub today: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn shift_request(json: &str) -> ShiftPayRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_rates_fall_back_to_defaults() {
        let request = shift_request(r#"{ "base_rate": 20, "date": "2026-03-02", "hours": 8 }"#);
        let rates = request.rates(&RateDefaults::default());
        assert_eq!(rates.base_rate, dec("20"));
        assert_eq!(rates.saturday_multiplier, dec("1.5"));
        assert_eq!(rates.overtime_threshold_hours, dec("8"));
    }

    #[test]
    fn test_rates_apply_overrides() {
        let request = shift_request(
            r#"{ "base_rate": "25.50", "sunday_multiplier": "1.75",
                 "overtime_threshold_hours": "7.6", "date": "2026-03-01", "hours": 8 }"#,
        );
        let rates = request.rates(&RateDefaults::default());
        assert_eq!(rates.base_rate, dec("25.50"));
        assert_eq!(rates.sunday_multiplier, dec("1.75"));
        assert_eq!(rates.overtime_threshold_hours, dec("7.6"));
        assert_eq!(rates.public_holiday_multiplier, dec("2.5"));
    }

    #[test]
    fn test_shift_from_clock_times() {
        let request = shift_request(
            r#"{ "base_rate": 20, "date": "2026-03-02", "start_time": "09:00", "end_time": "17:30" }"#,
        );
        let shift = request.shift_input().unwrap();
        assert_eq!(shift.hours, dec("8.5"));
    }

    #[test]
    fn test_hours_take_precedence_over_times() {
        let request = shift_request(
            r#"{ "base_rate": 20, "date": "2026-03-02", "hours": 4,
                 "start_time": "09:00", "end_time": "17:00" }"#,
        );
        assert_eq!(request.shift_input().unwrap().hours, dec("4"));
    }

    #[test]
    fn test_shift_without_hours_or_times_rejected() {
        let request = shift_request(r#"{ "base_rate": 20, "date": "2026-03-02", "start_time": "09:00" }"#);
        match request.shift_input() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "hours"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let request = shift_request(r#"{ "base_rate": 20, "date": "02/03/2026", "hours": 8 }"#);
        match request.shift_input() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "date"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_holiday_override() {
        let request = shift_request(
            r#"{ "base_rate": 20, "date": "2026-03-02", "hours": 8,
                 "public_holidays": [{ "date": "2026-03-02", "name": "Labour Day" }] }"#,
        );
        let holidays = request.holiday_override().unwrap();
        assert!(holidays.contains(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()));

        let without = shift_request(r#"{ "base_rate": 20, "date": "2026-03-02", "hours": 8 }"#);
        assert!(without.holiday_override().is_none());
    }

    #[test]
    fn test_income_number_or_string() {
        let number: TaxRequest = serde_json::from_str(r#"{ "annual_income": 50000 }"#).unwrap();
        assert_eq!(number.income().unwrap(), dec("50000"));

        let text: TaxRequest = serde_json::from_str(r#"{ "annual_income": "72500.50" }"#).unwrap();
        assert_eq!(text.income().unwrap(), dec("72500.50"));

        let bad: TaxRequest = serde_json::from_str(r#"{ "annual_income": true }"#).unwrap();
        assert!(matches!(bad.income(), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_income_in_exponent_form() {
        let large: TaxRequest = serde_json::from_str(r#"{ "annual_income": 1e16 }"#).unwrap();
        assert_eq!(large.income().unwrap(), dec("10000000000000000"));

        let tiny: TaxRequest = serde_json::from_str(r#"{ "annual_income": 1e-7 }"#).unwrap();
        assert_eq!(tiny.income().unwrap(), dec("0.0000001"));

        let bad: TaxRequest = serde_json::from_str(r#"{ "annual_income": "1e16" }"#).unwrap();
        assert!(matches!(bad.income(), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_summary_request_defaults_to_empty_lists() {
        let request: SummaryRequest = serde_json::from_str(r#"{ "today": "2026-03-10" }"#).unwrap();
        assert!(request.shifts.is_empty());
        assert!(request.expenses.is_empty());
        assert!(request.goals.is_empty());
    }
}
