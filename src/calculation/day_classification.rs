//! Day classification logic.
//!
//! This module determines which rate category a shift date falls into:
//! public holiday, Saturday, Sunday or an ordinary weekday.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfig;
use crate::models::PublicHolidaySet;

/// Represents the type of day for rate calculation.
///
/// Saturday and Sunday are kept apart because they carry distinct
/// multipliers, and the label reported for a shift says which one applied.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::DayType;
///
/// assert_eq!(DayType::PublicHoliday.label(), "public_holiday");
/// assert!(DayType::Sunday.is_weekend());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday, not a public holiday. Multiplier 1.0.
    Weekday,
    /// Saturday, not a public holiday.
    Saturday,
    /// Sunday, not a public holiday.
    Sunday,
    /// Any date in the public holiday set, whatever the day of week.
    PublicHoliday,
}

impl DayType {
    /// Returns the classification label used in pay results.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
            DayType::PublicHoliday => "public_holiday",
        }
    }

    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayType::Saturday | DayType::Sunday)
    }

    /// Returns the day multiplier this day type takes from `rates`.
    pub fn multiplier(&self, rates: &RateConfig) -> Decimal {
        match self {
            DayType::Weekday => Decimal::ONE,
            DayType::Saturday => rates.saturday_multiplier,
            DayType::Sunday => rates.sunday_multiplier,
            DayType::PublicHoliday => rates.public_holiday_multiplier,
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Determines the day type for a given date.
///
/// A public holiday takes precedence over the day of week, so a holiday
/// falling on a Saturday is [`DayType::PublicHoliday`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{classify_date, DayType};
/// use payroll_engine::models::PublicHolidaySet;
/// use chrono::NaiveDate;
///
/// let anzac = NaiveDate::from_ymd_opt(2026, 4, 25).unwrap(); // a Saturday
/// let holidays = PublicHolidaySet::from_dates([anzac]);
///
/// assert_eq!(classify_date(anzac, &holidays), DayType::PublicHoliday);
/// assert_eq!(classify_date(anzac, &PublicHolidaySet::new()), DayType::Saturday);
/// ```
pub fn classify_date(date: NaiveDate, holidays: &PublicHolidaySet) -> DayType {
    if holidays.contains(date) {
        return DayType::PublicHoliday;
    }
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}
