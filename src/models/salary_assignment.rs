//! Salary structure assignment model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A salary structure assignment document.
///
/// Limit overrides use zero to mean "not set", matching the host's numeric
/// fields which default to zero rather than null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryStructureAssignment {
    /// Host-assigned identity.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee the salary structure is assigned to.
    #[serde(default)]
    pub employee: Option<String>,
    /// Gross pay the base is derived from.
    #[serde(default)]
    pub gross_pay: Option<Decimal>,
    /// Per-assignment minimum base; zero means use the settings default.
    #[serde(default)]
    pub minimum_base_override: Decimal,
    /// Per-assignment maximum base; zero means use the settings default.
    #[serde(default)]
    pub maximum_base_override: Decimal,
    /// The derived base amount.
    #[serde(default)]
    pub base: Option<Decimal>,
}

impl SalaryStructureAssignment {
    /// Creates an assignment carrying only a gross pay figure.
    pub fn with_gross_pay(gross_pay: Decimal) -> Self {
        Self {
            gross_pay: Some(gross_pay),
            ..Self::default()
        }
    }
}
