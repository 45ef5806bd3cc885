//! Expense models.
//!
//! This module contains one-off [`Expense`] records, the
//! [`RecurringExpense`] template with its [`ExpenseRecurrence`] schedule,
//! and the [`MaterializedExpense`] instances a rollover pass produces.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How often a recurring expense repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    /// Every seven days.
    Weekly,
    /// Every calendar month, on the anchor's day of month.
    Monthly,
    /// Every calendar year, on the anchor's month and day.
    Yearly,
}

impl std::fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceType::Weekly => write!(f, "weekly"),
            RecurrenceType::Monthly => write!(f, "monthly"),
            RecurrenceType::Yearly => write!(f, "yearly"),
        }
    }
}

/// The repeat schedule of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecurrence {
    /// Whether the expense repeats at all.
    pub is_recurring: bool,
    /// The repeat interval.
    pub recurrence_type: RecurrenceType,
    /// The first due date; month and year steps keep its day of month.
    pub anchor_date: NaiveDate,
    /// The last date an occurrence may fall on, if any.
    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDate>,
}

/// A one-off expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The store id, absent for records not yet persisted.
    #[serde(default)]
    pub id: Option<i64>,
    /// The budget category (e.g., "rent", "groceries").
    pub category: String,
    /// The amount of the expense.
    pub amount: Decimal,
    /// When the expense is due.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Whether this record is a standing charge rather than a one-off.
    #[serde(default)]
    pub is_recurring: bool,
}

/// A recurring expense template.
///
/// `next_occurrence` is the only field a rollover pass mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// The store id of the template.
    pub id: i64,
    /// The budget category.
    pub category: String,
    /// The amount charged per occurrence.
    pub amount: Decimal,
    /// Free-form notes copied onto each materialized instance.
    #[serde(default)]
    pub notes: String,
    /// The repeat schedule.
    pub recurrence: ExpenseRecurrence,
    /// The date the template is next due to materialize.
    pub next_occurrence: NaiveDate,
}

impl RecurringExpense {
    /// Creates a template whose first occurrence is the anchor date.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{ExpenseRecurrence, RecurrenceType, RecurringExpense};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let anchor = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    /// let rent = RecurringExpense::new(
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
    /// .unwrap();
    /// assert_eq!(rent.next_occurrence, anchor);
    /// ```
    pub fn new(
        id: i64,
        category: impl Into<String>,
        amount: Decimal,
        recurrence: ExpenseRecurrence,
    ) -> EngineResult<Self> {
        let expense = Self {
            id,
            category: category.into(),
            amount,
            notes: String::new(),
            next_occurrence: recurrence.anchor_date,
            recurrence,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Checks the amount and category.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "amount",
                format!(
                    "recurring expense {} has negative amount {}",
                    self.id,
                    self.amount.normalize()
                ),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(EngineError::invalid_input(
                "category",
                format!("recurring expense {} has an empty category", self.id),
            ));
        }
        Ok(())
    }

    /// Returns true once `next_occurrence` has passed the end date.
    pub fn is_terminal(&self) -> bool {
        self.recurrence
            .recurrence_end_date
            .is_some_and(|end| self.next_occurrence > end)
    }
}

/// A single non-recurring instance emitted by a rollover pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedExpense {
    /// The id of the template this instance came from.
    pub source_id: i64,
    /// The budget category.
    pub category: String,
    /// The amount of this occurrence.
    pub amount: Decimal,
    /// The occurrence date.
    pub due_date: NaiveDate,
    /// Notes copied from the template.
    pub notes: String,
}

impl From<MaterializedExpense> for Expense {
    fn from(instance: MaterializedExpense) -> Self {
        Expense {
            id: None,
            category: instance.category,
            amount: instance.amount,
            due_date: Some(instance.due_date),
            notes: instance.notes,
            is_recurring: false,
        }
    }
}
