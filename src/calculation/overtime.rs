//! Overtime detection functionality.
//!
//! This module splits the hours of a shift into regular hours (up to the
//! workplace's overtime threshold) and overtime hours (anything beyond it).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// The split of a shift's hours into regular and overtime portions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplit {
    /// Hours up to the threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the threshold (can be zero).
    pub overtime_hours: Decimal,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

impl OvertimeSplit {
    /// Returns true if any hours fell past the threshold.
    pub fn has_overtime(&self) -> bool {
        self.overtime_hours > Decimal::ZERO
    }
}

/// Splits worked hours at the overtime threshold.
///
/// Hours exactly at the threshold are all regular.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_overtime;
/// use rust_decimal::Decimal;
///
/// let result = split_overtime(Decimal::new(10, 0), Decimal::new(8, 0), 1);
/// assert_eq!(result.regular_hours, Decimal::new(8, 0));
/// assert_eq!(result.overtime_hours, Decimal::new(2, 0));
///
/// let result = split_overtime(Decimal::new(8, 0), Decimal::new(8, 0), 1);
/// assert_eq!(result.overtime_hours, Decimal::ZERO);
/// ```
pub fn split_overtime(worked_hours: Decimal, threshold: Decimal, step_number: u32) -> OvertimeSplit {
    let regular_hours = worked_hours.min(threshold);
    let overtime_hours = if worked_hours > threshold {
        worked_hours - threshold
    } else {
        Decimal::ZERO
    };

    let reasoning = if overtime_hours > Decimal::ZERO {
        format!(
            "{} hours worked exceeds {} hour threshold by {} hours, triggering overtime",
            worked_hours.normalize(),
            threshold.normalize(),
            overtime_hours.normalize()
        )
    } else if worked_hours == threshold {
        format!(
            "{} hours worked equals {} hour threshold, no overtime triggered",
            worked_hours.normalize(),
            threshold.normalize()
        )
    } else {
        format!(
            "{} hours worked is under {} hour threshold, no overtime triggered",
            worked_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_split".to_string(),
        rule_name: "Overtime Split".to_string(),
        input: serde_json::json!({
            "worked_hours": worked_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning,
    };

    OvertimeSplit {
        regular_hours,
        overtime_hours,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_under_threshold() {
        let result = split_overtime(dec("6.5"), dec("8"), 1);
        assert_eq!(result.regular_hours, dec("6.5"));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
        assert!(!result.has_overtime());
        assert!(result.audit_step.reasoning.contains("under"));
    }

    #[test]
    fn test_at_threshold() {
        let result = split_overtime(dec("8"), dec("8"), 1);
        assert_eq!(result.regular_hours, dec("8"));
        assert!(!result.has_overtime());
        assert!(result.audit_step.reasoning.contains("equals"));
    }

    #[test]
    fn test_fractional_overtime() {
        let result = split_overtime(dec("9.25"), dec("7.6"), 3);
        assert_eq!(result.regular_hours, dec("7.6"));
        assert_eq!(result.overtime_hours, dec("1.65"));
        assert!(result.has_overtime());
    }

    #[test]
    fn test_audit_step_fields() {
        let result = split_overtime(dec("10.0"), dec("8.0"), 4);
        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "overtime_split");
        assert_eq!(result.audit_step.input["worked_hours"], "10");
        assert_eq!(result.audit_step.output["overtime_hours"], "2");
    }
}
