//! Stock attendance checks with a configurable clock and employee roster.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use crate::policy::HostChecks;

/// Standard host checks backed by an explicit date and inactive-employee list.
///
/// # Example
///
/// ```
/// use advanced_attendance::host::StandardChecks;
/// use advanced_attendance::policy::HostChecks;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let checks = StandardChecks::new().with_today(today).with_inactive_employee("HR-EMP-0099");
/// assert_eq!(checks.today(), today);
/// assert!(!checks.is_employee_active("HR-EMP-0099"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StandardChecks {
    today: Option<NaiveDate>,
    inactive_employees: HashSet<String>,
}

impl StandardChecks {
    /// Creates checks using the system clock and treating every employee as active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the current date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Marks an employee as inactive.
    pub fn with_inactive_employee(mut self, employee: impl Into<String>) -> Self {
        self.inactive_employees.insert(employee.into());
        self
    }
}

impl HostChecks for StandardChecks {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn is_employee_active(&self, employee: &str) -> bool {
        !self.inactive_employees.contains(employee)
    }
}
