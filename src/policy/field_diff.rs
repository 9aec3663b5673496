//! Watched-field diff used to detect pure state transitions.
//!
//! A save that only moves a record through its lifecycle or approval workflow
//! leaves every watched field unchanged. Comparisons go through [`FieldValue`]
//! so that an empty string, a missing value and `false` all read as unset.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::AttendanceRecord;

/// A field whose change forces the admission policy to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchedField {
    /// The employee the record belongs to.
    Employee,
    /// The attendance date.
    AttendanceDate,
    /// The overlap flag.
    Overlap,
    /// The additional attendance flag.
    AdditionalAttendance,
}

/// Every field the diff inspects.
pub const WATCHED_FIELDS: [WatchedField; 4] = [
    WatchedField::Employee,
    WatchedField::AttendanceDate,
    WatchedField::Overlap,
    WatchedField::AdditionalAttendance,
];

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Missing, empty or false.
    Unset,
    /// A non-empty string.
    Text(&'a str),
    /// A date.
    Date(NaiveDate),
    /// A flag that is set.
    Set,
}

impl<'a> FieldValue<'a> {
    fn text(value: Option<&'a str>) -> Self {
        match value {
            Some(text) if !text.is_empty() => FieldValue::Text(text),
            _ => FieldValue::Unset,
        }
    }

    fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(FieldValue::Unset, FieldValue::Date)
    }

    fn flag(value: bool) -> Self {
        if value {
            FieldValue::Set
        } else {
            FieldValue::Unset
        }
    }
}

impl WatchedField {
    /// Reads this field from a record as a normalized value.
    pub fn value_of<'a>(&self, record: &'a AttendanceRecord) -> FieldValue<'a> {
        match self {
            WatchedField::Employee => FieldValue::text(record.employee.as_deref()),
            WatchedField::AttendanceDate => FieldValue::date(record.attendance_date),
            WatchedField::Overlap => FieldValue::flag(record.overlap),
            WatchedField::AdditionalAttendance => FieldValue::flag(record.additional_attendance),
        }
    }
}

/// Returns the watched fields that differ between `current` and `previous`.
pub fn changed_fields(current: &AttendanceRecord, previous: &AttendanceRecord) -> Vec<WatchedField> {
    WATCHED_FIELDS
        .iter()
        .copied()
        .filter(|field| field.value_of(current) != field.value_of(previous))
        .collect()
}

/// Returns true if any watched field differs between `current` and `previous`.
///
/// # Examples
///
/// ```
/// use advanced_attendance::models::AttendanceRecord;
/// use advanced_attendance::policy::content_changed;
/// use chrono::NaiveDate;
///
/// let stored = AttendanceRecord::new("HR-EMP-0001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// let mut approved = stored.clone();
/// approved.workflow_state = Some("Approved".to_string());
/// assert!(!content_changed(&approved, &stored));
///
/// let flagged = stored.clone().with_overlap(true);
/// assert!(content_changed(&flagged, &stored));
/// ```
pub fn content_changed(current: &AttendanceRecord, previous: &AttendanceRecord) -> bool {
    WATCHED_FIELDS
        .iter()
        .any(|field| field.value_of(current) != field.value_of(previous))
}
