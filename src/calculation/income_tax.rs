//! Progressive income tax calculation.
//!
//! This module applies a marginal [`TaxSchedule`] and its flat levy to an
//! annual income and reports the resulting take-home pay per month and per
//! fortnight.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{TaxBracket, TaxSchedule};
use crate::error::{EngineError, EngineResult};

use super::money::{percentage_of, round_money};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const FORTNIGHTS_PER_YEAR: Decimal = Decimal::from_parts(26, 0, 0, false, 0);

/// The tax owed on an annual income, every amount rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// The income the tax was calculated on.
    pub gross_income: Decimal,
    /// Progressive income tax.
    pub income_tax: Decimal,
    /// The flat levy.
    pub levy: Decimal,
    /// Income tax plus levy.
    pub total_tax: Decimal,
    /// Income after total tax.
    pub net_income: Decimal,
    /// Total tax as a percentage of income (0 for zero income).
    pub effective_rate: Decimal,
    /// Net income spread over 12 months.
    pub monthly_net: Decimal,
    /// Net income spread over 26 fortnights.
    pub fortnightly_net: Decimal,
}

/// Parses an income given as text.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::parse_income;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_income(" 50000.50 ").unwrap(), Decimal::new(5_000_050, 2));
/// assert!(parse_income("fifty thousand").is_err());
/// ```
pub fn parse_income(value: &str) -> EngineResult<Decimal> {
    value.trim().parse::<Decimal>().map_err(|_| {
        EngineError::invalid_input(
            "annual_income",
            format!("expected a number, got '{}'", value),
        )
    })
}

/// Finds the bracket an income falls in: the highest one it exceeds.
fn bracket_for(income: Decimal, brackets: &[TaxBracket]) -> Option<&TaxBracket> {
    brackets.iter().rev().find(|b| income > b.over)
}

/// Calculates income tax, levy and net income for an annual income.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if the income is negative
/// - [`EngineError::InvalidConfig`] if the schedule is not a valid
///   progressive table
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::TaxSchedule;
/// use rust_decimal::Decimal;
///
/// let result = calculate_income_tax(Decimal::new(50_000, 0), &TaxSchedule::default()).unwrap();
/// assert_eq!(result.income_tax.to_string(), "6717.00");
/// assert_eq!(result.levy.to_string(), "1000.00");
/// assert_eq!(result.net_income.to_string(), "42283.00");
/// ```
pub fn calculate_income_tax(income: Decimal, schedule: &TaxSchedule) -> EngineResult<TaxBreakdown> {
    if income < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "annual_income",
            format!("must not be negative, got {}", income.normalize()),
        ));
    }
    schedule.validate()?;

    let income_tax = match bracket_for(income, &schedule.brackets) {
        Some(bracket) => (income - bracket.over)
            .checked_mul(bracket.rate)
            .and_then(|marginal| marginal.checked_add(bracket.base))
            .ok_or_else(|| EngineError::overflow("income tax"))?,
        None => Decimal::ZERO,
    };

    let levy = if income > schedule.levy.threshold {
        income
            .checked_mul(schedule.levy.rate)
            .ok_or_else(|| EngineError::overflow("levy"))?
    } else {
        Decimal::ZERO
    };

    let total_tax = income_tax
        .checked_add(levy)
        .ok_or_else(|| EngineError::overflow("total tax"))?;
    let net_income = income - total_tax;

    Ok(TaxBreakdown {
        gross_income: round_money(income),
        income_tax: round_money(income_tax),
        levy: round_money(levy),
        total_tax: round_money(total_tax),
        net_income: round_money(net_income),
        effective_rate: percentage_of(total_tax, income)?,
        monthly_net: round_money(net_income / MONTHS_PER_YEAR),
        fortnightly_net: round_money(net_income / FORTNIGHTS_PER_YEAR),
    })
}
