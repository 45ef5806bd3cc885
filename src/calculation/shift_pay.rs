//! Shift pay calculation.
//!
//! This module prices a single shift from its date and hours, applying the
//! day multiplier for Saturdays, Sundays and public holidays and the
//! overtime multiplier on top of it for hours past the threshold.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PaidShift, PublicHolidaySet, ShiftInput, validate_hours};

use super::day_classification::{DayType, classify_date};
use super::money::round_money;
use super::overtime::split_overtime;

const OVERTIME_SUFFIX: &str = "_overtime";

/// The priced result of a single shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPayResult {
    /// The date the shift was worked on.
    pub date: NaiveDate,
    /// The hours worked.
    pub hours: Decimal,
    /// The day type the date classified as.
    pub day_type: DayType,
    /// The classification label, e.g. `sunday` or `public_holiday_overtime`.
    pub classification: String,
    /// The multiplier the day type applied.
    pub day_multiplier: Decimal,
    /// Hours paid at the day rate.
    pub regular_hours: Decimal,
    /// Hours paid at the day rate times the overtime multiplier.
    pub overtime_hours: Decimal,
    /// Pay for the regular hours, rounded to cents.
    pub regular_pay: Decimal,
    /// Pay for the overtime hours, rounded to cents.
    pub overtime_pay: Decimal,
    /// Total pay, rounded to cents from the unrounded components.
    pub total_pay: Decimal,
    /// The decisions made while pricing the shift.
    pub audit_steps: Vec<AuditStep>,
}

impl ShiftPayResult {
    /// Returns true if the shift ran past the overtime threshold.
    pub fn is_overtime(&self) -> bool {
        self.overtime_hours > Decimal::ZERO
    }

    /// Converts into the record the summaries aggregate over.
    pub fn to_paid_shift(&self) -> PaidShift {
        PaidShift {
            date: self.date,
            hours: self.hours,
            shift_type: self.classification.clone(),
            total_pay: self.total_pay,
        }
    }
}

/// Calculates the pay for one shift.
///
/// # Algorithm
///
/// 1. Classify the date: public holiday first, then Saturday/Sunday,
///    otherwise weekday (multiplier 1.0).
/// 2. Hours up to `overtime_threshold_hours` are paid at
///    `base_rate × day_multiplier`.
/// 3. Hours beyond it are paid at
///    `base_rate × overtime_multiplier × day_multiplier` and the label
///    gains an `_overtime` suffix.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if the hours are not in (0, 24]
/// - [`EngineError::InvalidConfig`] if the rate configuration is invalid
/// - [`EngineError::CalculationError`] on decimal overflow
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_shift_pay;
/// use payroll_engine::config::RateConfig;
/// use payroll_engine::models::{PublicHolidaySet, ShiftInput};
/// use rust_decimal::Decimal;
///
/// let shift = ShiftInput::parse("2026-01-17", Decimal::new(5, 0)).unwrap(); // Saturday
/// let rates = RateConfig::with_base_rate(Decimal::new(20, 0));
///
/// let result = calculate_shift_pay(&shift, &rates, &PublicHolidaySet::new()).unwrap();
/// assert_eq!(result.classification, "saturday");
/// assert_eq!(result.total_pay.to_string(), "150.00");
/// ```
pub fn calculate_shift_pay(
    shift: &ShiftInput,
    rates: &RateConfig,
    holidays: &PublicHolidaySet,
) -> EngineResult<ShiftPayResult> {
    validate_hours(shift.hours)?;
    rates.validate()?;

    let mut audit_steps = Vec::with_capacity(3);

    let day_type = classify_date(shift.date, holidays);
    let day_multiplier = day_type.multiplier(rates);
    audit_steps.push(classification_step(shift.date, day_type, day_multiplier, holidays));

    let split = split_overtime(shift.hours, rates.overtime_threshold_hours, 2);
    let is_overtime = split.has_overtime();
    audit_steps.push(split.audit_step);

    let day_rate = rates
        .base_rate
        .checked_mul(day_multiplier)
        .ok_or_else(|| EngineError::overflow("day rate"))?;
    let overtime_rate = day_rate
        .checked_mul(rates.overtime_multiplier)
        .ok_or_else(|| EngineError::overflow("overtime rate"))?;

    let regular_pay = split
        .regular_hours
        .checked_mul(day_rate)
        .ok_or_else(|| EngineError::overflow("regular pay"))?;
    let overtime_pay = split
        .overtime_hours
        .checked_mul(overtime_rate)
        .ok_or_else(|| EngineError::overflow("overtime pay"))?;
    let total_pay = regular_pay
        .checked_add(overtime_pay)
        .ok_or_else(|| EngineError::overflow("total pay"))?;

    let mut classification = day_type.label().to_string();
    if is_overtime {
        classification.push_str(OVERTIME_SUFFIX);
    }

    let total_pay = round_money(total_pay);
    audit_steps.push(AuditStep {
        step_number: 3,
        rule_id: "shift_pay".to_string(),
        rule_name: "Shift Pay".to_string(),
        input: serde_json::json!({
            "base_rate": rates.base_rate.normalize().to_string(),
            "day_multiplier": day_multiplier.normalize().to_string(),
            "overtime_multiplier": rates.overtime_multiplier.normalize().to_string(),
            "regular_hours": split.regular_hours.normalize().to_string(),
            "overtime_hours": split.overtime_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_pay": regular_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "total_pay": total_pay.to_string(),
            "classification": classification
        }),
        reasoning: pay_reasoning(
            split.regular_hours,
            split.overtime_hours,
            rates,
            day_multiplier,
            total_pay,
        ),
    });

    Ok(ShiftPayResult {
        date: shift.date,
        hours: shift.hours,
        day_type,
        classification,
        day_multiplier,
        regular_hours: split.regular_hours,
        overtime_hours: split.overtime_hours,
        regular_pay: round_money(regular_pay),
        overtime_pay: round_money(overtime_pay),
        total_pay,
        audit_steps,
    })
}

fn classification_step(
    date: NaiveDate,
    day_type: DayType,
    multiplier: Decimal,
    holidays: &PublicHolidaySet,
) -> AuditStep {
    let reasoning = match (day_type, holidays.get(date)) {
        (DayType::PublicHoliday, Some(holiday)) if !holiday.name.is_empty() => {
            format!("{} is a public holiday ({})", date, holiday.name)
        }
        (DayType::PublicHoliday, _) => format!("{} is a public holiday", date),
        (DayType::Saturday, _) => format!("{} is a Saturday", date),
        (DayType::Sunday, _) => format!("{} is a Sunday", date),
        (DayType::Weekday, _) => format!("{} is an ordinary weekday", date),
    };

    AuditStep {
        step_number: 1,
        rule_id: "day_classification".to_string(),
        rule_name: "Day Classification".to_string(),
        input: serde_json::json!({ "date": date.to_string() }),
        output: serde_json::json!({
            "day_type": day_type.label(),
            "multiplier": multiplier.normalize().to_string()
        }),
        reasoning,
    }
}

fn pay_reasoning(
    regular_hours: Decimal,
    overtime_hours: Decimal,
    rates: &RateConfig,
    day_multiplier: Decimal,
    total_pay: Decimal,
) -> String {
    let regular = format!(
        "{} hours × ${} × {}",
        regular_hours.normalize(),
        rates.base_rate.normalize(),
        day_multiplier.normalize()
    );
    if overtime_hours > Decimal::ZERO {
        format!(
            "{} + {} hours × ${} × {} × {} = ${}",
            regular,
            overtime_hours.normalize(),
            rates.base_rate.normalize(),
            rates.overtime_multiplier.normalize(),
            day_multiplier.normalize(),
            total_pay
        )
    } else {
        format!("{} = ${}", regular, total_pay)
    }
}
