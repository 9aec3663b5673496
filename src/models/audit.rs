//! Audit records for policy decisions.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a policy decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
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

impl AuditStep {
    /// Creates an audit step for the given rule.
    pub fn new(
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serializes_json_payloads() {
        let step = AuditStep::new(
            "attendance_admission",
            "Attendance Admission",
            serde_json::json!({ "existing_count": 1 }),
            serde_json::json!({ "admitted": true }),
            "Overlap flag set on second record",
        );

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["rule_id"], "attendance_admission");
        assert_eq!(json["input"]["existing_count"], 1);
        assert_eq!(json["output"]["admitted"], true);
    }
}
