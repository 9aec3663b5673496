//! Duplicate-attendance admission rules.
//!
//! The first non-cancelled record for an employee and day is always admitted.
//! Every later record for that day must carry exactly one of the overlap or
//! additional attendance flags. Saves that only move a record through its
//! workflow are never blocked.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{AttendanceRecord, AuditStep};

use super::field_diff::{changed_fields, content_changed};
use super::lookup::AttendanceLookup;

/// Why a record was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionReason {
    /// Only state or workflow fields changed on an existing record.
    WorkflowTransition,
    /// Employee or date is missing; other host validation handles it.
    Incomplete,
    /// No other non-cancelled record exists for the employee and day.
    FirstRecord,
    /// Exactly one override flag is set on a later record.
    FlaggedAdditional,
}

/// A positive admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Admission {
    /// Why the record was admitted.
    pub reason: AdmissionReason,
    /// Tells the host to skip its own single-record-per-day duplicate check.
    pub bypass_duplicate_check: bool,
}

impl Admission {
    /// Admits `candidate`, bypassing the host duplicate check when a flag is set.
    pub fn for_record(candidate: &AttendanceRecord, reason: AdmissionReason) -> Self {
        Self {
            reason,
            bypass_duplicate_check: candidate.allows_multiple(),
        }
    }
}

/// Decides admission once the existing-record count is known.
pub trait ValidationPolicy {
    /// Admits or rejects `candidate` given how many other active records share its day.
    fn admit(
        &self,
        candidate: &AttendanceRecord,
        existing_count: usize,
    ) -> AttendanceResult<Admission>;
}

impl<P: ValidationPolicy + ?Sized> ValidationPolicy for &P {
    fn admit(
        &self,
        candidate: &AttendanceRecord,
        existing_count: usize,
    ) -> AttendanceResult<Admission> {
        (**self).admit(candidate, existing_count)
    }
}

/// The overlap / additional attendance rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateAttendancePolicy;

impl ValidationPolicy for DuplicateAttendancePolicy {
    fn admit(
        &self,
        candidate: &AttendanceRecord,
        existing_count: usize,
    ) -> AttendanceResult<Admission> {
        if existing_count == 0 {
            return Ok(Admission::for_record(candidate, AdmissionReason::FirstRecord));
        }

        match (candidate.overlap, candidate.additional_attendance) {
            (true, true) => Err(AttendanceError::InvalidSelection),
            (false, false) => match candidate.key() {
                Some((employee, date)) => Err(AttendanceError::AttendanceAlreadyExists {
                    employee: employee.to_string(),
                    date,
                }),
                None => Ok(Admission::for_record(candidate, AdmissionReason::Incomplete)),
            },
            _ => Ok(Admission::for_record(
                candidate,
                AdmissionReason::FlaggedAdditional,
            )),
        }
    }
}

/// The result of an admission evaluation, including the audit step.
#[derive(Debug, Clone)]
pub struct AdmissionOutcome {
    /// The admission decision.
    pub admission: Admission,
    /// Number of other active records found, when the count was queried.
    pub existing_count: Option<usize>,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Runs the full admission sequence for a candidate record.
///
/// 1. An existing record whose watched fields match `persisted` is a pure
///    workflow transition and is admitted.
/// 2. A record without employee or date is admitted; the host rejects it elsewhere.
/// 3. Otherwise the active records for the same employee and day are counted,
///    excluding the candidate itself, and `policy` decides.
///
/// # Arguments
///
/// * `policy` - The rule set applied once the count is known
/// * `candidate` - The record being saved
/// * `persisted` - The record's last saved state, if it has one
/// * `lookup` - Counts existing records
///
/// # Returns
///
/// An [`AdmissionOutcome`], or `InvalidSelection` / `AttendanceAlreadyExists`.
///
/// # Examples
///
/// ```
/// use advanced_attendance::models::AttendanceRecord;
/// use advanced_attendance::policy::{DuplicateAttendancePolicy, evaluate_admission};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let mut first = AttendanceRecord::new("HR-EMP-0001", date);
/// first.id = Some("ATT-0001".to_string());
/// let existing = vec![first];
///
/// let second = AttendanceRecord::new("HR-EMP-0001", date).with_overlap(true);
/// let outcome = evaluate_admission(&DuplicateAttendancePolicy, &second, None, &existing).unwrap();
/// assert!(outcome.admission.bypass_duplicate_check);
/// assert_eq!(outcome.existing_count, Some(1));
///
/// let third = AttendanceRecord::new("HR-EMP-0001", date);
/// assert!(evaluate_admission(&DuplicateAttendancePolicy, &third, None, &existing).is_err());
/// ```
pub fn evaluate_admission<P, L>(
    policy: &P,
    candidate: &AttendanceRecord,
    persisted: Option<&AttendanceRecord>,
    lookup: &L,
) -> AttendanceResult<AdmissionOutcome>
where
    P: ValidationPolicy + ?Sized,
    L: AttendanceLookup + ?Sized,
{
    let input = serde_json::json!({
        "id": candidate.id,
        "employee": candidate.employee,
        "attendance_date": candidate.attendance_date.map(|d| d.to_string()),
        "overlap": candidate.overlap,
        "additional_attendance": candidate.additional_attendance,
        "workflow_state": candidate.workflow_state,
    });

    if let Some(previous) = persisted.filter(|_| !candidate.is_new()) {
        if !content_changed(candidate, previous) {
            debug!(
                id = ?candidate.id,
                workflow_state = ?candidate.workflow_state,
                "Workflow transition only, admission checks skipped"
            );
            let admission = Admission::for_record(candidate, AdmissionReason::WorkflowTransition);
            return Ok(AdmissionOutcome {
                admission,
                existing_count: None,
                audit_step: audit_step(
                    input,
                    admission,
                    None,
                    "Only state or workflow fields changed; admitted without checks".to_string(),
                ),
            });
        }
        debug!(
            id = ?candidate.id,
            changed = ?changed_fields(candidate, previous),
            "Watched fields changed, re-evaluating admission"
        );
    }

    let Some((employee, date)) = candidate.key() else {
        debug!(id = ?candidate.id, "Employee or attendance date missing, admission deferred");
        let admission = Admission::for_record(candidate, AdmissionReason::Incomplete);
        return Ok(AdmissionOutcome {
            admission,
            existing_count: None,
            audit_step: audit_step(
                input,
                admission,
                None,
                "Employee or attendance date not set; deferred to host validation".to_string(),
            ),
        });
    };

    let exclude = if candidate.is_new() {
        None
    } else {
        candidate.id.as_deref()
    };
    let existing_count = lookup.count_active(employee, date, exclude);

    let admission = match policy.admit(candidate, existing_count) {
        Ok(admission) => admission,
        Err(err) => {
            warn!(
                employee = %employee,
                attendance_date = %date,
                existing_count,
                overlap = candidate.overlap,
                additional_attendance = candidate.additional_attendance,
                error = %err,
                "Attendance rejected"
            );
            return Err(err);
        }
    };

    info!(
        employee = %employee,
        attendance_date = %date,
        existing_count,
        reason = ?admission.reason,
        bypass_duplicate_check = admission.bypass_duplicate_check,
        "Attendance admitted"
    );

    let reasoning = match admission.reason {
        AdmissionReason::FirstRecord => format!(
            "First attendance for {} on {}; override flags not required",
            employee, date
        ),
        _ => format!(
            "{} existing attendance record(s) for {} on {}; exactly one override flag set",
            existing_count, employee, date
        ),
    };

    Ok(AdmissionOutcome {
        admission,
        existing_count: Some(existing_count),
        audit_step: audit_step(input, admission, Some(existing_count), reasoning),
    })
}

fn audit_step(
    input: serde_json::Value,
    admission: Admission,
    existing_count: Option<usize>,
    reasoning: String,
) -> AuditStep {
    AuditStep::new(
        "attendance_admission",
        "Attendance Admission",
        input,
        serde_json::json!({
            "admitted": true,
            "reason": admission.reason,
            "existing_count": existing_count,
            "bypass_duplicate_check": admission.bypass_duplicate_check,
        }),
        reasoning,
    )
}

/// Returns the advisory message shown on the form when other records exist.
///
/// Yields `None` when the record is incomplete, has no same-day siblings, or
/// already carries an override flag.
pub fn existing_attendance_notice<L>(candidate: &AttendanceRecord, lookup: &L) -> Option<String>
where
    L: AttendanceLookup + ?Sized,
{
    let (employee, date) = candidate.key()?;
    if candidate.allows_multiple() {
        return None;
    }
    let count = lookup.count_active(employee, date, candidate.id.as_deref());
    (count > 0).then(|| {
        format!(
            "There are {} existing attendance record(s) for this employee on {}. \
             Enable \"Overlap\" or \"Additional Attendance\" to create another record.",
            count, date
        )
    })
}
