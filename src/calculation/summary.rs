//! Financial summaries over shifts, expenses and savings goals.
//!
//! Every function here is a pure aggregation over slices; the caller
//! decides which records are in scope.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Expense, PaidShift, SavingsGoal};

use super::goal_progress::calculate_goal_progress;
use super::money::round_money;

/// Most recent months reported in the monthly breakdown.
pub const MAX_SUMMARY_MONTHS: usize = 12;

/// Sums amounts, failing on decimal overflow.
fn checked_total<I>(amounts: I, context: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| EngineError::overflow(context))
}

/// Totals across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialOverview {
    /// Pay across all shifts.
    pub total_earned: Decimal,
    /// Hours across all shifts.
    pub total_hours: Decimal,
    /// Number of shifts.
    pub shift_count: usize,
    /// Sum of expense amounts.
    pub total_expenses: Decimal,
    /// Sum saved across all goals.
    pub goal_allocations: Decimal,
    /// Earned minus expenses minus goal allocations.
    pub net_after_goals: Decimal,
}

/// Earnings for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month as `YYYY-MM`.
    pub month: String,
    /// Pay for the month.
    pub total_earned: Decimal,
    /// Hours for the month.
    pub total_hours: Decimal,
    /// Shifts in the month.
    pub shift_count: usize,
}

/// Spending in one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// Sum of amounts in the category.
    pub total: Decimal,
    /// Number of expenses in the category.
    pub count: usize,
}

/// Shift activity over the week ending on the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekActivity {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (the reference date).
    pub end: NaiveDate,
    /// Shifts in the window.
    pub shift_count: usize,
    /// Hours in the window.
    pub hours: Decimal,
    /// Pay in the window.
    pub earned: Decimal,
}

/// Headline statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsStats {
    /// Pay per hour across all shifts (0 with no hours).
    pub average_rate: Decimal,
    /// Sum saved across all goals.
    pub goals_saved: Decimal,
    /// Goals that have not reached their target.
    pub active_goals: usize,
    /// Sum of expenses flagged as recurring.
    pub recurring_expenses: Decimal,
    /// Activity in the last seven days.
    pub this_week: WeekActivity,
}

/// Every summary for one reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// The reference date.
    pub today: NaiveDate,
    /// Totals.
    pub overview: FinancialOverview,
    /// Per-month earnings, newest first.
    pub monthly: Vec<MonthlySummary>,
    /// Per-category spending, largest first.
    pub categories: Vec<CategoryTotal>,
    /// Headline statistics.
    pub stats: EarningsStats,
}

/// Computes the overall totals.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::financial_overview;
/// use payroll_engine::models::{Expense, PaidShift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shifts = vec![PaidShift {
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     hours: Decimal::new(8, 0),
///     shift_type: "weekday".to_string(),
///     total_pay: Decimal::new(160, 0),
/// }];
/// let expenses = vec![Expense {
///     id: None,
///     category: "food".to_string(),
///     amount: Decimal::new(40, 0),
///     due_date: None,
///     notes: String::new(),
///     is_recurring: false,
/// }];
///
/// let overview = financial_overview(&shifts, &expenses, &[]).unwrap();
/// assert_eq!(overview.net_after_goals.to_string(), "120.00");
/// ```
pub fn financial_overview(
    shifts: &[PaidShift],
    expenses: &[Expense],
    goals: &[SavingsGoal],
) -> EngineResult<FinancialOverview> {
    let total_earned = checked_total(shifts.iter().map(|s| s.total_pay), "total earned")?;
    let total_hours = checked_total(shifts.iter().map(|s| s.hours), "total hours")?;
    let total_expenses = checked_total(expenses.iter().map(|e| e.amount), "total expenses")?;
    let goal_allocations = checked_total(
        goals.iter().flat_map(|g| g.contributions.iter().map(|c| c.amount)),
        "goal allocations",
    )?;

    let net_after_goals = total_earned
        .checked_sub(total_expenses)
        .and_then(|net| net.checked_sub(goal_allocations))
        .ok_or_else(|| EngineError::overflow("net after goals"))?;

    Ok(FinancialOverview {
        total_earned: round_money(total_earned),
        total_hours: total_hours.normalize(),
        shift_count: shifts.len(),
        total_expenses: round_money(total_expenses),
        goal_allocations: round_money(goal_allocations),
        net_after_goals: round_money(net_after_goals),
    })
}

/// Groups shift earnings by calendar month, newest first, keeping at most
/// [`MAX_SUMMARY_MONTHS`] months.
pub fn monthly_breakdown(shifts: &[PaidShift]) -> EngineResult<Vec<MonthlySummary>> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal, usize)> = BTreeMap::new();
    for shift in shifts {
        let entry = months
            .entry((shift.date.year(), shift.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 = entry
            .0
            .checked_add(shift.total_pay)
            .ok_or_else(|| EngineError::overflow("monthly earnings"))?;
        entry.1 = entry
            .1
            .checked_add(shift.hours)
            .ok_or_else(|| EngineError::overflow("monthly hours"))?;
        entry.2 += 1;
    }

    Ok(months
        .into_iter()
        .rev()
        .take(MAX_SUMMARY_MONTHS)
        .map(|((year, month), (earned, hours, count))| MonthlySummary {
            month: format!("{:04}-{:02}", year, month),
            total_earned: round_money(earned),
            total_hours: hours.normalize(),
            shift_count: count,
        })
        .collect())
}

/// Totals expenses per category, largest total first, ties by name.
pub fn expense_categories(expenses: &[Expense]) -> EngineResult<Vec<CategoryTotal>> {
    let mut totals: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = totals
            .entry(expense.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry
            .0
            .checked_add(expense.amount)
            .ok_or_else(|| EngineError::overflow("category total"))?;
        entry.1 += 1;
    }

    let mut categories: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total: round_money(total),
            count,
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    Ok(categories)
}

/// Computes headline statistics as of `today`.
pub fn earnings_stats(
    shifts: &[PaidShift],
    expenses: &[Expense],
    goals: &[SavingsGoal],
    today: NaiveDate,
) -> EngineResult<EarningsStats> {
    let earned = checked_total(shifts.iter().map(|s| s.total_pay), "total earned")?;
    let hours = checked_total(shifts.iter().map(|s| s.hours), "total hours")?;
    let average_rate = if hours.is_zero() {
        round_money(Decimal::ZERO)
    } else {
        round_money(
            earned
                .checked_div(hours)
                .ok_or_else(|| EngineError::overflow("average rate"))?,
        )
    };

    let mut goals_saved = Decimal::ZERO;
    let mut active_goals = 0;
    for goal in goals {
        let progress = calculate_goal_progress(goal, Some(today))?;
        goals_saved = goals_saved
            .checked_add(progress.saved_amount)
            .ok_or_else(|| EngineError::overflow("goals saved"))?;
        if !progress.is_complete() {
            active_goals += 1;
        }
    }

    let recurring_expenses = checked_total(
        expenses.iter().filter(|e| e.is_recurring).map(|e| e.amount),
        "recurring expenses",
    )?;

    let start = today.checked_sub_days(Days::new(6)).unwrap_or(today);
    let in_week: Vec<&PaidShift> = shifts
        .iter()
        .filter(|s| s.date >= start && s.date <= today)
        .collect();
    let this_week = WeekActivity {
        start,
        end: today,
        shift_count: in_week.len(),
        hours: checked_total(in_week.iter().map(|s| s.hours), "weekly hours")?.normalize(),
        earned: round_money(checked_total(in_week.iter().map(|s| s.total_pay), "weekly earnings")?),
    };

    Ok(EarningsStats {
        average_rate,
        goals_saved: round_money(goals_saved),
        active_goals,
        recurring_expenses: round_money(recurring_expenses),
        this_week,
    })
}

/// Builds every summary for `today`.
pub fn build_summary(
    shifts: &[PaidShift],
    expenses: &[Expense],
    goals: &[SavingsGoal],
    today: NaiveDate,
) -> EngineResult<SummaryReport> {
    Ok(SummaryReport {
        today,
        overview: financial_overview(shifts, expenses, goals)?,
        monthly: monthly_breakdown(shifts)?,
        categories: expense_categories(expenses)?,
        stats: earnings_stats(shifts, expenses, goals, today)?,
    })
}
