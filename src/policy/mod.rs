//! Attendance admission policy.
//!
//! This module decides whether an attendance record may be saved when other
//! records already exist for the same employee and day. It covers the
//! first-record and second-record rules, the workflow transition exemption,
//! the watched-field diff that detects it, and the validator that runs the
//! policy in front of the host's standard checks.

mod admission;
mod field_diff;
mod lookup;
mod validator;

pub use admission::{
    Admission, AdmissionOutcome, AdmissionReason, DuplicateAttendancePolicy, ValidationPolicy,
    evaluate_admission, existing_attendance_notice,
};
pub use field_diff::{FieldValue, WATCHED_FIELDS, WatchedField, changed_fields, content_changed};
pub use lookup::AttendanceLookup;
pub use validator::{AttendanceValidator, HostChecks, NoHostChecks};
