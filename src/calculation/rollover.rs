//! Recurring expense rollover.
//!
//! A rollover pass walks the recurring expense templates and, for each one
//! that is due, emits a single non-recurring instance dated on its
//! `next_occurrence` and then advances `next_occurrence` by one period.
//! The pass holds `&mut` access to the records, so reading, emitting and
//! advancing a record happen as one step that no other pass can interleave.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{MaterializedExpense, RecurringExpense};

use super::recurrence::next_occurrence_after;

/// What a rollover pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverReport {
    /// The reference date the pass ran against.
    pub today: Option<NaiveDate>,
    /// Instances emitted, in record order.
    pub materialized: Vec<MaterializedExpense>,
    /// Ids of templates whose `next_occurrence` moved forward.
    pub advanced: Vec<i64>,
    /// Ids of due templates left untouched because their schedule has ended.
    pub terminal: Vec<i64>,
}

/// Outcome of examining one template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RolloverStep {
    NotRecurring,
    NotDue,
    Ended,
    Emitted(MaterializedExpense),
}

/// Rolls a single template forward if it is due.
fn roll_one(expense: &mut RecurringExpense, today: NaiveDate) -> RolloverStep {
    if !expense.recurrence.is_recurring {
        return RolloverStep::NotRecurring;
    }
    if expense.next_occurrence > today {
        return RolloverStep::NotDue;
    }
    if expense.is_terminal() {
        return RolloverStep::Ended;
    }

    let due_date = expense.next_occurrence;
    let next = match next_occurrence_after(&expense.recurrence, due_date) {
        Ok(next) => next,
        Err(err) => {
            warn!(expense_id = expense.id, error = %err, "Cannot advance recurring expense");
            return RolloverStep::Ended;
        }
    };

    expense.next_occurrence = next;
    RolloverStep::Emitted(MaterializedExpense {
        source_id: expense.id,
        category: expense.category.clone(),
        amount: expense.amount,
        due_date,
        notes: expense.notes.clone(),
    })
}

/// Runs one rollover pass over `expenses` as of `today`.
///
/// For every recurring record whose `next_occurrence` is on or before
/// `today` and not after its end date, one instance dated
/// `next_occurrence` is emitted and `next_occurrence` advances by one
/// week, month or year. Each record emits at most once per pass. Records
/// past their end date are left unadvanced.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::rollover_recurring_expenses;
/// use payroll_engine::models::{ExpenseRecurrence, RecurrenceType, RecurringExpense};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mut expenses = vec![RecurringExpense::new(
///     1,
///     "rent",
///     Decimal::new(1800, 0),
///     ExpenseRecurrence {
///         is_recurring: true,
///         recurrence_type: RecurrenceType::Monthly,
///         anchor_date: anchor,
///         recurrence_end_date: None,
///     },
/// )
/// .unwrap()];
///
/// let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
/// let report = rollover_recurring_expenses(&mut expenses, today);
///
/// assert_eq!(report.materialized.len(), 1);
/// assert_eq!(report.materialized[0].due_date, anchor);
/// assert_eq!(expenses[0].next_occurrence, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
/// ```
pub fn rollover_recurring_expenses(
    expenses: &mut [RecurringExpense],
    today: NaiveDate,
) -> RolloverReport {
    let mut report = RolloverReport {
        today: Some(today),
        ..RolloverReport::default()
    };

    for expense in expenses.iter_mut() {
        match roll_one(expense, today) {
            RolloverStep::NotRecurring | RolloverStep::NotDue => {}
            RolloverStep::Ended => report.terminal.push(expense.id),
            RolloverStep::Emitted(instance) => {
                debug!(
                    expense_id = expense.id,
                    due_date = %instance.due_date,
                    next_occurrence = %expense.next_occurrence,
                    "Materialized recurring expense"
                );
                report.advanced.push(expense.id);
                report.materialized.push(instance);
            }
        }
    }

    info!(
        today = %today,
        records = expenses.len(),
        materialized = report.materialized.len(),
        terminal = report.terminal.len(),
        "Recurring expense rollover complete"
    );

    report
}
