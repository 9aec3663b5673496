//! Settings types for the salary base calculation.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from the YAML settings file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AttendanceError, AttendanceResult};

/// Divider used when the settings leave `gross_divider` unset (1.3).
pub const DEFAULT_GROSS_DIVIDER: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// The salary base calculation settings singleton.
///
/// Limits use zero to mean "not set".
///
/// # Example
///
/// ```
/// use advanced_attendance::config::SalaryBaseSettings;
/// use rust_decimal::Decimal;
///
/// let settings: SalaryBaseSettings = serde_yaml::from_str("enable_auto_base: true").unwrap();
/// assert_eq!(settings.effective_divider(), Decimal::new(13, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryBaseSettings {
    /// Whether the base is derived automatically from gross pay.
    #[serde(default)]
    pub enable_auto_base: bool,
    /// Factor the gross pay is divided by. Unset falls back to 1.3.
    #[serde(default)]
    pub gross_divider: Option<Decimal>,
    /// Minimum base applied when the assignment has no override.
    #[serde(default)]
    pub default_min_base: Decimal,
    /// Maximum base applied when the assignment has no override.
    #[serde(default)]
    pub default_max_base: Decimal,
}

impl SalaryBaseSettings {
    /// Returns the divider to use, falling back to [`DEFAULT_GROSS_DIVIDER`] when unset.
    ///
    /// An explicit zero is returned as zero so the calculator can reject it.
    pub fn effective_divider(&self) -> Decimal {
        self.gross_divider.unwrap_or(DEFAULT_GROSS_DIVIDER)
    }

    /// Checks that no value is negative.
    pub fn validate(&self) -> AttendanceResult<()> {
        let fields = [
            ("gross_divider", self.gross_divider.unwrap_or(Decimal::ZERO)),
            ("default_min_base", self.default_min_base),
            ("default_max_base", self.default_max_base),
        ];
        for (field, value) in fields {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(AttendanceError::InvalidSettings {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}
