//! Savings goal models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Money put towards a savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The amount contributed.
    pub amount: Decimal,
    /// The date of the contribution.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// A savings goal with its contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// The store id of the goal.
    pub id: i64,
    /// The goal's display name.
    pub name: String,
    /// The amount to save.
    pub target_amount: Decimal,
    /// When the goal should be reached, if anywhere.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Higher values sort first.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Contributions made so far.
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

fn default_priority() -> i32 {
    1
}

impl SavingsGoal {
    /// Returns the sum of all contributions.
    pub fn saved_amount(&self) -> Decimal {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// Checks the target and every contribution.
    pub fn validate(&self) -> EngineResult<()> {
        if self.target_amount < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "target_amount",
                format!("goal '{}' has a negative target", self.name),
            ));
        }
        if let Some(bad) = self.contributions.iter().find(|c| c.amount <= Decimal::ZERO) {
            return Err(EngineError::invalid_input(
                "contributions",
                format!(
                    "goal '{}' has a non-positive contribution of {} on {}",
                    self.name,
                    bad.amount.normalize(),
                    bad.date
                ),
            ));
        }
        Ok(())
    }

    /// Records a contribution after checking it is positive.
    pub fn contribute(&mut self, contribution: Contribution) -> EngineResult<()> {
        if contribution.amount <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "amount",
                "contribution must be greater than 0",
            ));
        }
        self.contributions.push(contribution);
        Ok(())
    }
}
