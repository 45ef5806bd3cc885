//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: day classification
//! and overtime splitting for shift pay, progressive income tax, recurring
//! expense scheduling and rollover, savings goal progress, and financial
//! summaries.

mod day_classification;
mod goal_progress;
mod income_tax;
mod money;
mod overtime;
mod recurrence;
mod rollover;
mod shift_pay;
mod summary;

pub use day_classification::{DayType, classify_date};
pub use goal_progress::{GoalMilestone, GoalProgress, calculate_goal_progress, rank_goals};
pub use income_tax::{TaxBreakdown, calculate_income_tax, parse_income};
pub use money::{percentage_of, round_money};
pub use overtime::{OvertimeSplit, split_overtime};
pub use recurrence::next_occurrence_after;
pub use rollover::{RolloverReport, rollover_recurring_expenses};
pub use shift_pay::{ShiftPayResult, calculate_shift_pay};
pub use summary::{
    CategoryTotal, EarningsStats, FinancialOverview, MAX_SUMMARY_MONTHS, MonthlySummary,
    SummaryReport, WeekActivity, build_summary, earnings_stats, expense_categories,
    financial_overview, monthly_breakdown,
};
