//! Savings goal progress.
//!
//! Progress is reported as a percentage of the target with a coarse
//! milestone status. When the goal has a deadline and a reference date is
//! known, the weekly saving rate needed to meet it is included.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::SavingsGoal;

use super::money::{percentage_of, round_money};

const DAYS_PER_WEEK: i64 = 7;

/// Milestone status derived from progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMilestone {
    /// Nothing saved yet.
    NotStarted,
    /// Some progress, under 25%.
    Started,
    /// At least 25%.
    Quarter,
    /// At least 50%.
    Half,
    /// At least 75%.
    ThreeQuarters,
    /// Target reached.
    Complete,
}

impl GoalMilestone {
    /// Maps saved and target amounts to a milestone.
    ///
    /// Thresholds compare the exact amounts, so a goal one cent short is
    /// never complete and any positive saving counts as started. A zero
    /// target is never started.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if scaling the amounts overflows.
    pub fn from_amounts(saved: Decimal, target: Decimal) -> EngineResult<Self> {
        if target <= Decimal::ZERO || saved <= Decimal::ZERO {
            return Ok(GoalMilestone::NotStarted);
        }
        if saved >= target {
            return Ok(GoalMilestone::Complete);
        }

        let scaled_saved = saved
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| EngineError::overflow("goal milestone"))?;
        for (percent, milestone) in [
            (75, GoalMilestone::ThreeQuarters),
            (50, GoalMilestone::Half),
            (25, GoalMilestone::Quarter),
        ] {
            let cut_off = target
                .checked_mul(Decimal::from(percent))
                .ok_or_else(|| EngineError::overflow("goal milestone"))?;
            if scaled_saved >= cut_off {
                return Ok(milestone);
            }
        }
        Ok(GoalMilestone::Started)
    }
}

/// Progress of one savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// The goal's id.
    pub goal_id: i64,
    /// The goal's name.
    pub name: String,
    /// The goal's priority.
    pub priority: i32,
    /// The target amount.
    pub target_amount: Decimal,
    /// Sum of contributions.
    pub saved_amount: Decimal,
    /// Amount still to save, never negative.
    pub remaining: Decimal,
    /// Amount saved beyond the target.
    pub surplus: Decimal,
    /// Saved as a percentage of target, 0 when the target is 0.
    pub progress: Decimal,
    /// Milestone status.
    pub milestone: GoalMilestone,
    /// The goal's deadline.
    pub deadline: Option<NaiveDate>,
    /// Days from the reference date to the deadline (negative once passed).
    pub days_remaining: Option<i64>,
    /// Saving per week needed to hit the target by the deadline.
    pub required_per_week: Option<Decimal>,
    /// True when the deadline has passed and the goal is incomplete.
    pub overdue: bool,
}

impl GoalProgress {
    /// Returns true once the target has been reached.
    pub fn is_complete(&self) -> bool {
        self.milestone == GoalMilestone::Complete
    }
}

/// Calculates progress for a single goal.
///
/// `today` enables the deadline fields; without it they are `None`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the target is negative or a
/// contribution is not positive.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{GoalMilestone, calculate_goal_progress};
/// use payroll_engine::models::{Contribution, SavingsGoal};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let goal = SavingsGoal {
///     id: 1,
///     name: "Laptop".to_string(),
///     target_amount: Decimal::new(2000, 0),
///     deadline: None,
///     priority: 1,
///     contributions: vec![Contribution {
///         amount: Decimal::new(1000, 0),
///         date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///         notes: String::new(),
///     }],
/// };
///
/// let progress = calculate_goal_progress(&goal, None).unwrap();
/// assert_eq!(progress.progress.to_string(), "50.00");
/// assert_eq!(progress.milestone, GoalMilestone::Half);
/// ```
pub fn calculate_goal_progress(
    goal: &SavingsGoal,
    today: Option<NaiveDate>,
) -> EngineResult<GoalProgress> {
    goal.validate()?;

    let saved = goal
        .contributions
        .iter()
        .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.amount))
        .ok_or_else(|| EngineError::overflow("goal savings"))?;

    // The rounded percentage is for display; the milestone uses exact amounts.
    let progress = percentage_of(saved, goal.target_amount)?;
    let milestone = GoalMilestone::from_amounts(saved, goal.target_amount)?;

    let remaining = (goal.target_amount - saved).max(Decimal::ZERO);
    let surplus = (saved - goal.target_amount).max(Decimal::ZERO);

    let days_remaining = match (goal.deadline, today) {
        (Some(deadline), Some(today)) => Some((deadline - today).num_days()),
        _ => None,
    };

    let required_per_week = days_remaining.map(|days| {
        // Partial weeks count as whole ones and the last week always counts.
        let weeks = ((days + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK).max(1);
        round_money(remaining / Decimal::from(weeks))
    });

    let complete = milestone == GoalMilestone::Complete;
    let overdue = !complete && days_remaining.is_some_and(|days| days < 0);

    Ok(GoalProgress {
        goal_id: goal.id,
        name: goal.name.clone(),
        priority: goal.priority,
        target_amount: round_money(goal.target_amount),
        saved_amount: round_money(saved),
        remaining: round_money(remaining),
        surplus: round_money(surplus),
        progress,
        milestone,
        deadline: goal.deadline,
        days_remaining,
        required_per_week,
        overdue,
    })
}

/// Orders goals by priority (highest first), then deadline (soonest first,
/// goals without one last).
fn goal_order(a: &SavingsGoal, b: &SavingsGoal) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Calculates progress for every goal, ranked by priority then deadline.
///
/// Goals with equal priority and deadline keep their input order.
pub fn rank_goals(goals: &[SavingsGoal], today: Option<NaiveDate>) -> EngineResult<Vec<GoalProgress>> {
    let mut ordered: Vec<&SavingsGoal> = goals.iter().collect();
    ordered.sort_by(|a, b| goal_order(a, b));
    ordered
        .into_iter()
        .map(|goal| calculate_goal_progress(goal, today))
        .collect()
}
