//! Shift models and related types.
//!
//! This module defines the shift inputs accepted by the pay calculation
//! ([`ShiftInput`], [`TimedShift`]) and the [`PaidShift`] record produced
//! once a shift has been priced.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Maximum number of hours a single shift may record.
pub const MAX_SHIFT_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Example
///
/// ```
/// use payroll_engine::models::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("2026-01-15").unwrap(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert!(parse_date("15/01/2026").is_err());
/// ```
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        EngineError::invalid_input("date", format!("expected YYYY-MM-DD, got '{}': {}", value, e))
    })
}

/// Parses a clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(field: &str, value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| EngineError::invalid_input(field, format!("expected HH:MM, got '{}'", value)))
}

/// Checks that a shift length lies in the half-open range (0, 24].
pub fn validate_hours(hours: Decimal) -> EngineResult<()> {
    if hours <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "hours",
            format!("must be greater than 0, got {}", hours.normalize()),
        ));
    }
    if hours > MAX_SHIFT_HOURS {
        return Err(EngineError::invalid_input(
            "hours",
            format!("must not exceed 24, got {}", hours.normalize()),
        ));
    }
    Ok(())
}

/// A worked shift reduced to the two facts pay depends on.
///
/// Values built through [`ShiftInput::new`] or [`ShiftInput::parse`] always
/// satisfy `0 < hours <= 24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    /// The calendar date the shift was worked on.
    pub date: NaiveDate,
    /// The number of hours worked.
    pub hours: Decimal,
}

impl ShiftInput {
    /// Creates a validated shift input.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::ShiftInput;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    /// assert!(ShiftInput::new(date, Decimal::new(8, 0)).is_ok());
    /// assert!(ShiftInput::new(date, Decimal::ZERO).is_err());
    /// assert!(ShiftInput::new(date, Decimal::new(25, 0)).is_err());
    /// ```
    pub fn new(date: NaiveDate, hours: Decimal) -> EngineResult<Self> {
        validate_hours(hours)?;
        Ok(Self { date, hours })
    }

    /// Creates a validated shift input from a `YYYY-MM-DD` date string.
    pub fn parse(date: &str, hours: Decimal) -> EngineResult<Self> {
        Self::new(parse_date(date)?, hours)
    }
}

/// A shift recorded as a start and end clock time on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedShift {
    /// The date the shift started on.
    pub date: NaiveDate,
    /// The clock time the shift started.
    pub start_time: NaiveTime,
    /// The clock time the shift ended.
    pub end_time: NaiveTime,
}

impl TimedShift {
    /// Parses a timed shift from its string parts.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> EngineResult<Self> {
        Ok(Self {
            date: parse_date(date)?,
            start_time: parse_time("start_time", start_time)?,
            end_time: parse_time("end_time", end_time)?,
        })
    }

    /// Returns the hours between start and end.
    ///
    /// An end time earlier than the start time wraps past midnight. Equal
    /// times give zero hours.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::TimedShift;
    /// use rust_decimal::Decimal;
    ///
    /// let overnight = TimedShift::parse("2026-01-15", "22:00", "06:00").unwrap();
    /// assert_eq!(overnight.worked_hours(), Decimal::new(8, 0));
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        let mut seconds = (self.end_time - self.start_time).num_seconds();
        if seconds < 0 {
            seconds += SECONDS_PER_DAY;
        }
        Decimal::new(seconds, 0) / Decimal::new(3600, 0)
    }

    /// Converts into a validated [`ShiftInput`].
    pub fn to_input(&self) -> EngineResult<ShiftInput> {
        ShiftInput::new(self.date, self.worked_hours())
    }
}

/// A shift that has already been priced.
///
/// This is the record the summaries aggregate over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidShift {
    /// The date the shift was worked on.
    pub date: NaiveDate,
    /// The number of hours worked.
    pub hours: Decimal,
    /// The classification label, e.g. `saturday_overtime`.
    pub shift_type: String,
    /// The total pay for the shift.
    pub total_pay: Decimal,
}
