//! Attendance record model.
//!
//! This module defines the [`AttendanceRecord`] document together with its
//! lifecycle and status enums.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a document sits in the host's submit/cancel lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Saved but not submitted.
    #[default]
    Draft,
    /// Submitted and in effect.
    Submitted,
    /// Cancelled; ignored by every count.
    Cancelled,
}

impl LifecycleState {
    /// Returns true unless the document has been cancelled.
    pub fn is_active(self) -> bool {
        self != LifecycleState::Cancelled
    }
}

/// The attendance status marked on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Employee was present.
    #[default]
    Present,
    /// Employee was absent.
    Absent,
    /// Employee was on approved leave.
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Employee worked half a day.
    #[serde(rename = "Half Day")]
    HalfDay,
    /// Employee worked remotely.
    #[serde(rename = "Work From Home")]
    WorkFromHome,
}

/// An attendance document as supplied by the host.
///
/// Records may be partially populated while they are being edited, so the
/// employee and date are optional.
///
/// # Example
///
/// ```
/// use advanced_attendance::models::AttendanceRecord;
/// use chrono::NaiveDate;
///
/// let record = AttendanceRecord::new("HR-EMP-0001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
///     .with_overlap(true);
/// assert!(record.is_new());
/// assert!(record.allows_multiple());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Host-assigned identity; `None` until the record is first saved.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee the attendance is marked for.
    #[serde(default)]
    pub employee: Option<String>,
    /// The calendar date of the attendance.
    #[serde(default)]
    pub attendance_date: Option<NaiveDate>,
    /// Marks a record that deliberately overlaps another same-day record.
    #[serde(default)]
    pub overlap: bool,
    /// Marks a deliberate extra same-day record.
    #[serde(default)]
    pub additional_attendance: bool,
    /// Submit/cancel lifecycle state.
    #[serde(default)]
    pub lifecycle_state: LifecycleState,
    /// Approval workflow state, if the host runs a workflow on attendance.
    #[serde(default)]
    pub workflow_state: Option<String>,
    /// Attendance status.
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Hours worked, if recorded.
    #[serde(default)]
    pub working_hours: Option<Decimal>,
}

impl AttendanceRecord {
    /// Creates an unsaved draft record for the given employee and date.
    pub fn new(employee: impl Into<String>, attendance_date: NaiveDate) -> Self {
        Self {
            employee: Some(employee.into()),
            attendance_date: Some(attendance_date),
            ..Self::default()
        }
    }

    /// Sets the overlap flag.
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }

    /// Sets the additional attendance flag.
    pub fn with_additional_attendance(mut self, additional_attendance: bool) -> Self {
        self.additional_attendance = additional_attendance;
        self
    }

    /// Returns true if the host has never persisted this record.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Returns true if either override flag is set.
    pub fn allows_multiple(&self) -> bool {
        self.overlap || self.additional_attendance
    }

    /// Returns the employee and date when both are populated.
    pub fn key(&self) -> Option<(&str, NaiveDate)> {
        let employee = self.employee.as_deref().filter(|e| !e.is_empty())?;
        Some((employee, self.attendance_date?))
    }

    /// Indicator label the host shows on the form when a flag is set.
    pub fn indicator(&self) -> Option<&'static str> {
        self.allows_multiple().then_some("Multiple Attendance Allowed")
    }
}
