//! Core data models for the payroll engine.
//!
//! This module contains all the domain records the calculations consume
//! and produce.

mod audit;
mod expense;
mod goal;
mod holiday;
mod shift;

pub use audit::AuditStep;
pub use expense::{
    Expense, ExpenseRecurrence, MaterializedExpense, RecurrenceType, RecurringExpense,
};
pub use goal::{Contribution, SavingsGoal};
pub use holiday::{PublicHoliday, PublicHolidaySet};
pub use shift::{
    MAX_SHIFT_HOURS, PaidShift, ShiftInput, TimedShift, parse_date, parse_time, validate_hours,
};
