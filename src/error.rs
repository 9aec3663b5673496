//! Error types for the attendance and salary base hooks.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a document save.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the crate.
///
/// Every variant is a user-facing failure: the host aborts the save and shows
/// the message under the dialog title returned by [`AttendanceError::title`].
///
/// # Example
///
/// ```
/// use advanced_attendance::error::AttendanceError;
///
/// let error = AttendanceError::ZeroDivisor;
/// assert_eq!(
///     error.to_string(),
///     "Gross Divider cannot be zero in Salary Base Calculation Settings"
/// );
/// ```
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Both override flags were set on a record that is not the first for its day.
    #[error(
        "Please select ONLY ONE option: either \"Overlap\" OR \"Additional Attendance\", not both."
    )]
    InvalidSelection,

    /// Neither override flag was set on a record that is not the first for its day.
    #[error(
        "An attendance record already exists for this employee on {date}. \
         To create another attendance record, please select one of the following options: \
         Overlap - for overlapping time periods on the same day; \
         Additional Attendance - for an additional record on the same day"
    )]
    AttendanceAlreadyExists {
        /// The employee the conflicting records belong to.
        employee: String,
        /// The conflicting attendance date.
        date: NaiveDate,
    },

    /// The effective gross divider resolved to zero.
    #[error("Gross Divider cannot be zero in Salary Base Calculation Settings")]
    ZeroDivisor,

    /// Gross pay divided by the divider does not fit a decimal.
    #[error("Base amount for gross pay {gross_pay} and divider {gross_divider} is out of range")]
    BaseOverflow {
        /// The gross pay that was divided.
        gross_pay: Decimal,
        /// The divider that was used.
        gross_divider: Decimal,
    },

    /// The settings file exists but could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    SettingsParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A settings value is outside its allowed range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Host check: attendance was marked for a future date.
    #[error("Attendance can not be marked for future dates: {date}")]
    FutureAttendanceDate {
        /// The attendance date that lies in the future.
        date: NaiveDate,
    },

    /// Host check: the employee is not active.
    #[error("Cannot mark attendance for an inactive employee {employee}")]
    InactiveEmployee {
        /// The inactive employee.
        employee: String,
    },

    /// Host check: working hours are outside a single day.
    #[error("Working hours must be between 0 and 24, got {hours}")]
    InvalidWorkingHours {
        /// The rejected working hours.
        hours: Decimal,
    },

    /// Host check: the built-in single-record-per-day duplicate check failed.
    #[error("Attendance for employee {employee} is already marked for the date {date}")]
    DuplicateAttendance {
        /// The employee with an existing record.
        employee: String,
        /// The date already marked.
        date: NaiveDate,
    },

    /// The store has no record with the given identity.
    #[error("Attendance record not found: {id}")]
    RecordNotFound {
        /// The identity that was looked up.
        id: String,
    },
}

impl AttendanceError {
    /// Returns the dialog title the host shows above the message.
    pub fn title(&self) -> &'static str {
        match self {
            AttendanceError::InvalidSelection => "Invalid Selection",
            AttendanceError::AttendanceAlreadyExists { .. } => "Attendance Already Exists",
            AttendanceError::ZeroDivisor
            | AttendanceError::BaseOverflow { .. }
            | AttendanceError::SettingsParseError { .. }
            | AttendanceError::InvalidSettings { .. } => "Configuration Error",
            AttendanceError::RecordNotFound { .. } => "Not Found",
            AttendanceError::FutureAttendanceDate { .. }
            | AttendanceError::InactiveEmployee { .. }
            | AttendanceError::InvalidWorkingHours { .. }
            | AttendanceError::DuplicateAttendance { .. } => "Validation Error",
        }
    }
}

/// A type alias for Results that return AttendanceError.
pub type AttendanceResult<T> = Result<T, AttendanceError>;
