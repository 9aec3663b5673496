//! Document lifecycle entry points.
//!
//! The host calls these from its `validate` events: one for attendance, one
//! for salary structure assignments. Both run synchronously inside the host's
//! own save and report failure by returning an error, which aborts the save.

use crate::calculation::{BaseCalculationResult, apply_base_calculation};
use crate::config::SettingsProvider;
use crate::error::AttendanceResult;
use crate::models::{AttendanceRecord, SalaryStructureAssignment};
use crate::policy::{AdmissionOutcome, AttendanceLookup, AttendanceValidator, HostChecks};

/// Attendance `validate` hook.
///
/// Applies the duplicate attendance rules to `candidate` and then the host's
/// standard checks, skipping the host's duplicate check when the candidate
/// carries an override flag.
///
/// # Example
///
/// ```
/// use advanced_attendance::hooks::validate_attendance;
/// use advanced_attendance::host::StandardChecks;
/// use advanced_attendance::models::AttendanceRecord;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let checks = StandardChecks::new().with_today(date);
/// let mut first = AttendanceRecord::new("HR-EMP-0001", date);
/// first.id = Some("ATT-0001".to_string());
/// let existing = vec![first];
///
/// let second = AttendanceRecord::new("HR-EMP-0001", date).with_overlap(true);
/// let outcome = validate_attendance(&second, None, &existing, &checks).unwrap();
/// assert!(outcome.admission.bypass_duplicate_check);
/// ```
pub fn validate_attendance<L, H>(
    candidate: &AttendanceRecord,
    persisted: Option<&AttendanceRecord>,
    lookup: &L,
    host: &H,
) -> AttendanceResult<AdmissionOutcome>
where
    L: AttendanceLookup,
    H: HostChecks,
{
    AttendanceValidator::with_host(host).validate(candidate, persisted, lookup)
}

/// Salary structure assignment `validate` hook.
///
/// Writes the derived base onto `assignment`, or leaves it untouched when
/// there is nothing to derive it from.
///
/// # Example
///
/// ```
/// use advanced_attendance::config::{SalaryBaseSettings, StaticSettings};
/// use advanced_attendance::hooks::on_salary_assignment_validate;
/// use advanced_attendance::models::SalaryStructureAssignment;
/// use rust_decimal::Decimal;
///
/// let settings = StaticSettings::new(SalaryBaseSettings {
///     enable_auto_base: true,
///     ..Default::default()
/// });
/// let mut assignment = SalaryStructureAssignment::with_gross_pay(Decimal::from(13000));
///
/// on_salary_assignment_validate(&mut assignment, &settings).unwrap();
/// assert_eq!(assignment.base, Some(Decimal::from(10000)));
/// ```
pub fn on_salary_assignment_validate<S>(
    assignment: &mut SalaryStructureAssignment,
    settings: &S,
) -> AttendanceResult<Option<BaseCalculationResult>>
where
    S: SettingsProvider + ?Sized,
{
    apply_base_calculation(assignment, settings)
}
