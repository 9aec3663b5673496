//! Base amount calculation for salary structure assignments.
//!
//! Formula: `base = round(gross_pay / gross_divider, 2)`, then clamped to the
//! effective minimum and maximum. Limits on the assignment take priority over
//! the settings defaults; zero means "no limit" at either level.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info, warn};

use crate::config::{SalaryBaseSettings, SettingsProvider};
use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{AuditStep, SalaryStructureAssignment};

/// The result of a base calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseCalculationResult {
    /// The base after limits were applied.
    pub base: Decimal,
    /// The rounded quotient before limits.
    pub calculated_base: Decimal,
    /// The divider that was used.
    pub gross_divider: Decimal,
    /// The effective minimum (zero when none).
    pub min_base: Decimal,
    /// The effective maximum (zero when none).
    pub max_base: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Picks the effective limit: the assignment's value when positive, else the settings default.
///
/// # Examples
///
/// ```
/// use advanced_attendance::calculation::resolve_limit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(resolve_limit(Decimal::from(15000), Decimal::from(18000)), Decimal::from(15000));
/// assert_eq!(resolve_limit(Decimal::ZERO, Decimal::from(18000)), Decimal::from(18000));
/// assert_eq!(resolve_limit(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn resolve_limit(assignment_value: Decimal, settings_value: Decimal) -> Decimal {
    if assignment_value > Decimal::ZERO {
        assignment_value
    } else {
        settings_value
    }
}

/// Clamps `base` to the limits; a zero limit is ignored.
///
/// The minimum is applied before the maximum, so when a misconfigured minimum
/// exceeds the maximum the maximum wins.
pub fn apply_limits(base: Decimal, min_base: Decimal, max_base: Decimal) -> Decimal {
    let mut limited = base;
    if min_base > Decimal::ZERO && limited < min_base {
        limited = min_base;
    }
    if max_base > Decimal::ZERO && limited > max_base {
        limited = max_base;
    }
    limited
}

/// Calculates the base for a gross pay figure.
///
/// This is a pure function of its inputs; the feature flag is not consulted.
///
/// # Arguments
///
/// * `gross_pay` - The gross pay to derive the base from
/// * `settings` - Supplies the divider and default limits
/// * `min_override` - The assignment's minimum (zero when unset)
/// * `max_override` - The assignment's maximum (zero when unset)
///
/// # Returns
///
/// A `BaseCalculationResult`, `ZeroDivisor` if the divider resolves to zero,
/// or `BaseOverflow` if the quotient does not fit a `Decimal`.
///
/// # Examples
///
/// ```
/// use advanced_attendance::calculation::calculate_base;
/// use advanced_attendance::config::SalaryBaseSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = SalaryBaseSettings { enable_auto_base: true, ..Default::default() };
/// let result = calculate_base(Decimal::from(10001), &settings, Decimal::ZERO, Decimal::ZERO).unwrap();
/// assert_eq!(result.base, Decimal::from_str("7693.08").unwrap());
/// ```
pub fn calculate_base(
    gross_pay: Decimal,
    settings: &SalaryBaseSettings,
    min_override: Decimal,
    max_override: Decimal,
) -> AttendanceResult<BaseCalculationResult> {
    let gross_divider = settings.effective_divider();
    if gross_divider.is_zero() {
        return Err(AttendanceError::ZeroDivisor);
    }

    let calculated_base = gross_pay
        .checked_div(gross_divider)
        .ok_or(AttendanceError::BaseOverflow {
            gross_pay,
            gross_divider,
        })?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let min_base = resolve_limit(min_override, settings.default_min_base);
    let max_base = resolve_limit(max_override, settings.default_max_base);
    let base = apply_limits(calculated_base, min_base, max_base);

    let limit_note = if base > calculated_base {
        format!(", raised to minimum {}", min_base)
    } else if base < calculated_base {
        format!(", lowered to maximum {}", max_base)
    } else {
        String::new()
    };

    let audit_step = AuditStep::new(
        "salary_base_calculation",
        "Salary Base Calculation",
        serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "gross_divider": gross_divider.to_string(),
            "minimum_base_override": min_override.to_string(),
            "maximum_base_override": max_override.to_string(),
            "default_min_base": settings.default_min_base.to_string(),
            "default_max_base": settings.default_max_base.to_string()
        }),
        serde_json::json!({
            "calculated_base": calculated_base.to_string(),
            "min_base": min_base.to_string(),
            "max_base": max_base.to_string(),
            "base": base.to_string()
        }),
        format!(
            "{} / {} = {}{}",
            gross_pay, gross_divider, calculated_base, limit_note
        ),
    );

    Ok(BaseCalculationResult {
        base,
        calculated_base,
        gross_divider,
        min_base,
        max_base,
        audit_step,
    })
}

/// Derives and writes the base on a salary structure assignment.
///
/// Leaves the assignment untouched and returns `Ok(None)` when the settings
/// are not configured, the feature is disabled, or gross pay is zero or
/// missing. On `ZeroDivisor` the base is also left untouched.
pub fn apply_base_calculation<S>(
    assignment: &mut SalaryStructureAssignment,
    provider: &S,
) -> AttendanceResult<Option<BaseCalculationResult>>
where
    S: SettingsProvider + ?Sized,
{
    let Some(settings) = provider.salary_base_settings()? else {
        debug!("Salary base settings not configured, base left unchanged");
        return Ok(None);
    };

    if !settings.enable_auto_base {
        debug!("Automatic base calculation disabled");
        return Ok(None);
    }

    let gross_pay = match assignment.gross_pay {
        Some(gross_pay) if !gross_pay.is_zero() => gross_pay,
        _ => {
            debug!(employee = ?assignment.employee, "No gross pay, base left unchanged");
            return Ok(None);
        }
    };

    let result = calculate_base(
        gross_pay,
        &settings,
        assignment.minimum_base_override,
        assignment.maximum_base_override,
    )
    .inspect_err(|err| {
        warn!(employee = ?assignment.employee, error = %err, "Salary base calculation failed");
    })?;

    assignment.base = Some(result.base);
    info!(
        employee = ?assignment.employee,
        gross_pay = %gross_pay,
        base = %result.base,
        "Salary base calculated"
    );

    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NoSettings, StaticSettings};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn enabled() -> SalaryBaseSettings {
        SalaryBaseSettings {
            enable_auto_base: true,
            gross_divider: Some(dec("1.3")),
            ..Default::default()
        }
    }

    /// SB-001: 13000 / 1.3 with no limits
    #[test]
    fn test_no_limits() {
        let result = calculate_base(dec("13000"), &enabled(), Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(result.base, dec("10000.00"));
        assert_eq!(result.calculated_base, dec("10000.00"));
    }

    /// SB-002: settings minimum raises the base
    #[test]
    fn test_default_minimum_applied() {
        let settings = SalaryBaseSettings {
            default_min_base: dec("12000"),
            ..enabled()
        };
        let result = calculate_base(dec("13000"), &settings, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(result.base, dec("12000.00"));
        assert!(result.audit_step.reasoning.contains("raised to minimum"));
    }

    /// SB-003: assignment maximum takes priority over settings maximum
    #[test]
    fn test_assignment_maximum_takes_priority() {
        let settings = SalaryBaseSettings {
            default_max_base: dec("18000"),
            ..enabled()
        };
        let result = calculate_base(dec("26000"), &settings, Decimal::ZERO, dec("15000")).unwrap();
        assert_eq!(result.calculated_base, dec("20000"));
        assert_eq!(result.base, dec("15000.00"));
        assert_eq!(result.max_base, dec("15000"));
    }

    /// SB-004: two decimal rounding
    #[test]
    fn test_rounds_to_two_places() {
        let result = calculate_base(dec("10001"), &enabled(), Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(result.base, dec("7693.08"));
    }

    #[test]
    fn test_zero_divider_rejected() {
        let settings = SalaryBaseSettings {
            gross_divider: Some(Decimal::ZERO),
            ..enabled()
        };
        let result = calculate_base(dec("13000"), &settings, Decimal::ZERO, Decimal::ZERO);
        assert!(matches!(result, Err(AttendanceError::ZeroDivisor)));
    }

    #[test]
    fn test_overflowing_quotient_rejected() {
        let settings = SalaryBaseSettings {
            gross_divider: Some(dec("0.001")),
            ..enabled()
        };
        let gross_pay = dec("100000000000000000000000000");
        let result = calculate_base(gross_pay, &settings, Decimal::ZERO, Decimal::ZERO);
        assert!(matches!(result, Err(AttendanceError::BaseOverflow { .. })));
    }

    #[test]
    fn test_unset_divider_uses_default() {
        let settings = SalaryBaseSettings {
            gross_divider: None,
            ..enabled()
        };
        let result = calculate_base(dec("13000"), &settings, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(result.gross_divider, dec("1.3"));
        assert_eq!(result.base, dec("10000"));
    }

    #[test]
    fn test_inverted_limits_maximum_wins() {
        assert_eq!(apply_limits(dec("100"), dec("500"), dec("300")), dec("300"));
    }

    #[test]
    fn test_zero_limits_ignored() {
        assert_eq!(apply_limits(dec("100"), Decimal::ZERO, Decimal::ZERO), dec("100"));
    }

    #[test]
    fn test_apply_writes_base() {
        let mut assignment = SalaryStructureAssignment::with_gross_pay(dec("13000"));
        let provider = StaticSettings::new(enabled());

        let result = apply_base_calculation(&mut assignment, &provider).unwrap();
        assert!(result.is_some());
        assert_eq!(assignment.base, Some(dec("10000")));
    }

    #[test]
    fn test_apply_noop_when_disabled() {
        let mut assignment = SalaryStructureAssignment::with_gross_pay(dec("13000"));
        assignment.base = Some(dec("1"));
        let provider = StaticSettings::new(SalaryBaseSettings {
            enable_auto_base: false,
            ..enabled()
        });

        assert!(apply_base_calculation(&mut assignment, &provider).unwrap().is_none());
        assert_eq!(assignment.base, Some(dec("1")));
    }

    #[test]
    fn test_apply_noop_without_settings() {
        let mut assignment = SalaryStructureAssignment::with_gross_pay(dec("13000"));
        assert!(apply_base_calculation(&mut assignment, &NoSettings).unwrap().is_none());
        assert_eq!(assignment.base, None);
    }

    #[test]
    fn test_apply_noop_for_zero_or_missing_gross() {
        let provider = StaticSettings::new(enabled());

        let mut zero = SalaryStructureAssignment::with_gross_pay(Decimal::ZERO);
        assert!(apply_base_calculation(&mut zero, &provider).unwrap().is_none());
        assert_eq!(zero.base, None);

        let mut missing = SalaryStructureAssignment::default();
        assert!(apply_base_calculation(&mut missing, &provider).unwrap().is_none());
        assert_eq!(missing.base, None);
    }

    #[test]
    fn test_apply_zero_divider_leaves_base() {
        let mut assignment = SalaryStructureAssignment::with_gross_pay(dec("13000"));
        assignment.base = Some(dec("9000"));
        let provider = StaticSettings::new(SalaryBaseSettings {
            gross_divider: Some(Decimal::ZERO),
            ..enabled()
        });

        let result = apply_base_calculation(&mut assignment, &provider);
        assert!(matches!(result, Err(AttendanceError::ZeroDivisor)));
        assert_eq!(assignment.base, Some(dec("9000")));
    }

    #[test]
    fn test_audit_step_records_inputs() {
        let result = calculate_base(dec("26000"), &enabled(), dec("1000"), dec("15000")).unwrap();
        assert_eq!(result.audit_step.rule_id, "salary_base_calculation");
        assert_eq!(result.audit_step.input["gross_pay"], "26000");
        assert_eq!(result.audit_step.output["base"], "15000");
        assert!(result.audit_step.reasoning.contains("lowered to maximum 15000"));
    }
}
