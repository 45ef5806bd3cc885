//! Audit records for calculations.
//!
//! Every pay calculation records the decisions it made as a sequence of
//! [`AuditStep`]s so a reader can see why a shift was priced the way it was.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "day_classification".to_string(),
///     rule_name: "Day Classification".to_string(),
///     input: serde_json::json!({"date": "2026-01-17"}),
///     output: serde_json::json!({"day_type": "saturday"}),
///     reasoning: "2026-01-17 is a Saturday".to_string(),
/// };
/// assert_eq!(step.rule_id, "day_classification");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
