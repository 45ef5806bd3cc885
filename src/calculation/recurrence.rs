//! Recurrence date arithmetic.
//!
//! Weekly schedules step by seven days. Monthly and yearly schedules step
//! by calendar months and stay pinned to the anchor's day of month: a
//! short month clamps to its last day, and the next long month returns to
//! the anchor day.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{ExpenseRecurrence, RecurrenceType};

/// Returns the number of days in the given month.
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(Months::new(1))?;
    next_first.pred_opt().map(|last| last.day())
}

/// Adds whole months to `date`, landing on `anchor_day` or the month's last day.
fn add_months_anchored(date: NaiveDate, months: u32, anchor_day: u32) -> Option<NaiveDate> {
    let shifted = date.checked_add_months(Months::new(months))?;
    let last = days_in_month(shifted.year(), shifted.month())?;
    shifted.with_day(anchor_day.min(last))
}

/// Returns the occurrence that follows `current` on the given schedule.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the next date would fall
/// outside the supported calendar range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::next_occurrence_after;
/// use payroll_engine::models::{ExpenseRecurrence, RecurrenceType};
/// use chrono::NaiveDate;
///
/// let schedule = ExpenseRecurrence {
///     is_recurring: true,
///     recurrence_type: RecurrenceType::Monthly,
///     anchor_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     recurrence_end_date: None,
/// };
///
/// let feb = next_occurrence_after(&schedule, schedule.anchor_date).unwrap();
/// assert_eq!(feb, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
///
/// let mar = next_occurrence_after(&schedule, feb).unwrap();
/// assert_eq!(mar, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
/// ```
pub fn next_occurrence_after(
    recurrence: &ExpenseRecurrence,
    current: NaiveDate,
) -> EngineResult<NaiveDate> {
    let anchor_day = recurrence.anchor_date.day();
    let next = match recurrence.recurrence_type {
        RecurrenceType::Weekly => current.checked_add_days(Days::new(7)),
        RecurrenceType::Monthly => add_months_anchored(current, 1, anchor_day),
        RecurrenceType::Yearly => add_months_anchored(current, 12, anchor_day),
    };

    next.ok_or_else(|| EngineError::CalculationError {
        message: format!(
            "{} recurrence after {} is outside the supported date range",
            recurrence.recurrence_type, current
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(recurrence_type: RecurrenceType, anchor: NaiveDate) -> ExpenseRecurrence {
        ExpenseRecurrence {
            is_recurring: true,
            recurrence_type,
            anchor_date: anchor,
            recurrence_end_date: None,
        }
    }

    #[test]
    fn test_weekly_adds_seven_days() {
        let s = schedule(RecurrenceType::Weekly, date(2026, 12, 28));
        assert_eq!(next_occurrence_after(&s, date(2026, 12, 28)).unwrap(), date(2027, 1, 4));
    }

    #[test]
    fn test_monthly_simple() {
        let s = schedule(RecurrenceType::Monthly, date(2026, 1, 15));
        assert_eq!(next_occurrence_after(&s, date(2026, 1, 15)).unwrap(), date(2026, 2, 15));
        assert_eq!(next_occurrence_after(&s, date(2026, 12, 15)).unwrap(), date(2027, 1, 15));
    }

    #[test]
    fn test_monthly_end_of_month_does_not_drift() {
        let s = schedule(RecurrenceType::Monthly, date(2026, 1, 31));
        let mut current = s.anchor_date;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = next_occurrence_after(&s, current).unwrap();
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![date(2026, 2, 28), date(2026, 3, 31), date(2026, 4, 30), date(2026, 5, 31)]
        );
    }

    #[test]
    fn test_monthly_leap_february() {
        let s = schedule(RecurrenceType::Monthly, date(2028, 1, 30));
        assert_eq!(next_occurrence_after(&s, date(2028, 1, 30)).unwrap(), date(2028, 2, 29));
    }

    #[test]
    fn test_yearly_simple() {
        let s = schedule(RecurrenceType::Yearly, date(2026, 3, 1));
        assert_eq!(next_occurrence_after(&s, date(2026, 3, 1)).unwrap(), date(2027, 3, 1));
    }

    #[test]
    fn test_yearly_leap_day_returns_to_29th() {
        let s = schedule(RecurrenceType::Yearly, date(2024, 2, 29));
        let mut current = s.anchor_date;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = next_occurrence_after(&s, current).unwrap();
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![date(2025, 2, 28), date(2026, 2, 28), date(2027, 2, 28), date(2028, 2, 29)]
        );
    }

    #[test]
    fn test_out_of_range_is_calculation_error() {
        let s = schedule(RecurrenceType::Yearly, NaiveDate::MAX);
        let result = next_occurrence_after(&s, NaiveDate::MAX);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 2), Some(28));
        assert_eq!(days_in_month(2028, 2), Some(29));
        assert_eq!(days_in_month(2026, 12), Some(31));
        assert_eq!(days_in_month(2026, 13), None);
    }
}
