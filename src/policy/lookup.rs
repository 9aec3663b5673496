//! Existing-record count lookup.

use chrono::NaiveDate;

use crate::models::AttendanceRecord;

/// Counts existing attendance records, as the host's persistence layer does.
///
/// Implementations must count only records that are not cancelled and must
/// skip the record whose identity equals `exclude`.
pub trait AttendanceLookup {
    /// Counts non-cancelled records for `employee` on `date`, excluding `exclude`.
    fn count_active(&self, employee: &str, date: NaiveDate, exclude: Option<&str>) -> usize;
}

impl<F> AttendanceLookup for F
where
    F: Fn(&str, NaiveDate, Option<&str>) -> usize,
{
    fn count_active(&self, employee: &str, date: NaiveDate, exclude: Option<&str>) -> usize {
        self(employee, date, exclude)
    }
}

impl AttendanceLookup for [AttendanceRecord] {
    fn count_active(&self, employee: &str, date: NaiveDate, exclude: Option<&str>) -> usize {
        self.iter()
            .filter(|r| r.lifecycle_state.is_active())
            .filter(|r| r.employee.as_deref() == Some(employee))
            .filter(|r| r.attendance_date == Some(date))
            .filter(|r| exclude.is_none() || r.id.as_deref() != exclude)
            .count()
    }
}

impl AttendanceLookup for Vec<AttendanceRecord> {
    fn count_active(&self, employee: &str, date: NaiveDate, exclude: Option<&str>) -> usize {
        self.as_slice().count_active(employee, date, exclude)
    }
}
