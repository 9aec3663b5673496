//! Attendance validation in front of the host's standard checks.
//!
//! [`AttendanceValidator`] runs the admission policy first and then the host's
//! standard attendance checks. When the policy admits a flagged record, the
//! host's own single-record-per-day duplicate check is left out.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::AttendanceRecord;

use super::admission::{
    AdmissionOutcome, DuplicateAttendancePolicy, ValidationPolicy, evaluate_admission,
};
use super::lookup::AttendanceLookup;

/// The host's standard attendance checks.
///
/// Every method has a default matching the stock attendance document, so a
/// host only overrides what it knows better, typically [`today`](HostChecks::today)
/// and [`is_employee_active`](HostChecks::is_employee_active).
pub trait HostChecks {
    /// The current date in the host's timezone.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Returns false if the employee may no longer have attendance marked.
    fn is_employee_active(&self, _employee: &str) -> bool {
        true
    }

    /// Rejects attendance marked for a future date.
    fn validate_attendance_date(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        match record.attendance_date {
            Some(date) if date > self.today() => {
                Err(AttendanceError::FutureAttendanceDate { date })
            }
            _ => Ok(()),
        }
    }

    /// Rejects attendance for an inactive employee.
    fn validate_employee(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        match record.employee.as_deref() {
            Some(employee) if !self.is_employee_active(employee) => {
                Err(AttendanceError::InactiveEmployee {
                    employee: employee.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Rejects working hours outside a single day.
    fn validate_working_hours(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        match record.working_hours {
            Some(hours) if hours < Decimal::ZERO || hours > Decimal::from(24) => {
                Err(AttendanceError::InvalidWorkingHours { hours })
            }
            _ => Ok(()),
        }
    }

    /// The stock one-record-per-day check.
    fn validate_duplicate_record(
        &self,
        record: &AttendanceRecord,
        lookup: &dyn AttendanceLookup,
    ) -> AttendanceResult<()> {
        let Some((employee, date)) = record.key() else {
            return Ok(());
        };
        if lookup.count_active(employee, date, record.id.as_deref()) > 0 {
            return Err(AttendanceError::DuplicateAttendance {
                employee: employee.to_string(),
                date,
            });
        }
        Ok(())
    }
}

impl<H: HostChecks + ?Sized> HostChecks for &H {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn is_employee_active(&self, employee: &str) -> bool {
        (**self).is_employee_active(employee)
    }

    fn validate_attendance_date(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        (**self).validate_attendance_date(record)
    }

    fn validate_employee(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        (**self).validate_employee(record)
    }

    fn validate_working_hours(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        (**self).validate_working_hours(record)
    }

    fn validate_duplicate_record(
        &self,
        record: &AttendanceRecord,
        lookup: &dyn AttendanceLookup,
    ) -> AttendanceResult<()> {
        (**self).validate_duplicate_record(record, lookup)
    }
}

/// Host checks with every default left in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHostChecks;

impl HostChecks for NoHostChecks {}

/// Runs an admission policy and then the host's standard checks.
///
/// # Example
///
/// ```
/// use advanced_attendance::models::AttendanceRecord;
/// use advanced_attendance::policy::AttendanceValidator;
/// use chrono::NaiveDate;
///
/// let validator: AttendanceValidator = AttendanceValidator::default();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
/// let candidate = AttendanceRecord::new("HR-EMP-0001", date);
/// let existing: Vec<AttendanceRecord> = Vec::new();
///
/// assert!(validator.validate(&candidate, None, &existing).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceValidator<P = DuplicateAttendancePolicy, H = NoHostChecks> {
    policy: P,
    host: H,
}

impl<H: HostChecks> AttendanceValidator<DuplicateAttendancePolicy, H> {
    /// Creates a validator applying the duplicate attendance rules before `host`.
    pub fn with_host(host: H) -> Self {
        Self::new(DuplicateAttendancePolicy, host)
    }
}

impl<P: ValidationPolicy, H: HostChecks> AttendanceValidator<P, H> {
    /// Creates a validator from a policy and host checks.
    pub fn new(policy: P, host: H) -> Self {
        Self { policy, host }
    }

    /// Returns the host checks.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Validates `candidate` for saving.
    ///
    /// Runs the admission policy, then the host's date, employee and working
    /// hours checks, then the host duplicate check unless the admission asked
    /// for it to be bypassed.
    pub fn validate<L: AttendanceLookup>(
        &self,
        candidate: &AttendanceRecord,
        persisted: Option<&AttendanceRecord>,
        lookup: &L,
    ) -> AttendanceResult<AdmissionOutcome> {
        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            id = ?candidate.id,
            employee = ?candidate.employee,
            "Validating attendance"
        );

        let outcome = evaluate_admission(&self.policy, candidate, persisted, lookup)?;

        self.host.validate_attendance_date(candidate)?;
        self.host.validate_employee(candidate)?;
        self.host.validate_working_hours(candidate)?;

        if outcome.admission.bypass_duplicate_check {
            debug!(correlation_id = %correlation_id, "Host duplicate check bypassed");
        } else {
            self.host.validate_duplicate_record(candidate, lookup)?;
        }

        info!(
            correlation_id = %correlation_id,
            reason = ?outcome.admission.reason,
            "Attendance validated"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedHost {
        today: NaiveDate,
        inactive: HashSet<String>,
    }

    impl HostChecks for FixedHost {
        fn today(&self) -> NaiveDate {
            self.today
        }

        fn is_employee_active(&self, employee: &str) -> bool {
            !self.inactive.contains(employee)
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn host() -> FixedHost {
        FixedHost {
            today: date(),
            inactive: HashSet::from(["HR-EMP-0099".to_string()]),
        }
    }

    fn saved(id: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Some(id.to_string()),
            ..AttendanceRecord::new("HR-EMP-0001", date())
        }
    }

    #[test]
    fn test_future_date_rejected_by_host() {
        let validator = AttendanceValidator::with_host(host());
        let candidate = AttendanceRecord::new("HR-EMP-0001", date().succ_opt().unwrap());

        let result = validator.validate(&candidate, None, &Vec::<AttendanceRecord>::new());
        assert!(matches!(
            result,
            Err(AttendanceError::FutureAttendanceDate { .. })
        ));
    }

    #[test]
    fn test_inactive_employee_rejected_by_host() {
        let validator = AttendanceValidator::with_host(host());
        let candidate = AttendanceRecord::new("HR-EMP-0099", date());

        let result = validator.validate(&candidate, None, &Vec::<AttendanceRecord>::new());
        assert!(matches!(result, Err(AttendanceError::InactiveEmployee { .. })));
    }

    #[test]
    fn test_working_hours_over_a_day_rejected() {
        let validator = AttendanceValidator::with_host(host());
        let mut candidate = AttendanceRecord::new("HR-EMP-0001", date());
        candidate.working_hours = Some(Decimal::from(25));

        let result = validator.validate(&candidate, None, &Vec::<AttendanceRecord>::new());
        assert!(matches!(
            result,
            Err(AttendanceError::InvalidWorkingHours { .. })
        ));
    }

    #[test]
    fn test_flagged_record_bypasses_host_duplicate_check() {
        let validator = AttendanceValidator::with_host(host());
        let existing = vec![saved("ATT-1")];
        let candidate = AttendanceRecord::new("HR-EMP-0001", date()).with_overlap(true);

        let outcome = validator.validate(&candidate, None, &existing).unwrap();
        assert!(outcome.admission.bypass_duplicate_check);
    }

    #[test]
    fn test_unflagged_workflow_transition_still_meets_host_duplicate_check() {
        // Two unflagged records predate the policy; approving one of them
        // passes the policy but the stock duplicate check still applies.
        let validator = AttendanceValidator::with_host(host());
        let stored = saved("ATT-2");
        let existing = vec![saved("ATT-1"), stored.clone()];
        let mut approved = stored.clone();
        approved.workflow_state = Some("Approved".to_string());

        let result = validator.validate(&approved, Some(&stored), &existing);
        assert!(matches!(
            result,
            Err(AttendanceError::DuplicateAttendance { .. })
        ));
    }

    #[test]
    fn test_policy_runs_before_host_checks() {
        let validator = AttendanceValidator::with_host(host());
        let existing = vec![saved("ATT-1")];
        let mut candidate = AttendanceRecord::new("HR-EMP-0001", date());
        candidate.working_hours = Some(Decimal::from(30));

        let result = validator.validate(&candidate, None, &existing);
        assert!(matches!(
            result,
            Err(AttendanceError::AttendanceAlreadyExists { .. })
        ));
    }

    #[test]
    fn test_custom_policy_is_composed() {
        struct RejectAll;

        impl ValidationPolicy for RejectAll {
            fn admit(
                &self,
                _candidate: &AttendanceRecord,
                _existing_count: usize,
            ) -> AttendanceResult<crate::policy::Admission> {
                Err(AttendanceError::InvalidSelection)
            }
        }

        let validator = AttendanceValidator::new(RejectAll, NoHostChecks);
        let candidate = AttendanceRecord::new("HR-EMP-0001", date());
        assert!(validator.validate(&candidate, None, &Vec::<AttendanceRecord>::new()).is_err());
    }
}
