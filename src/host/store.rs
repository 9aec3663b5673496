//! In-memory attendance persistence.
//!
//! Every save goes through an [`AttendanceValidator`], so the store behaves
//! like a host document table with the admission policy installed.
//!
//! The count-then-save sequence relies on `&mut self` for isolation. Hosts
//! sharing records across concurrent requests must add their own uniqueness
//! constraint if two "first" records for one day are unacceptable.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{AttendanceRecord, LifecycleState};
use crate::policy::{AttendanceLookup, AttendanceValidator, HostChecks, ValidationPolicy};

/// Attendance records keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct AttendanceStore {
    records: BTreeMap<String, AttendanceRecord>,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the persisted state of a record.
    pub fn get(&self, id: &str) -> Option<&AttendanceRecord> {
        self.records.get(id)
    }

    /// Returns the number of stored records, cancelled ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns every non-cancelled record for an employee and day.
    pub fn active_records_for(&self, employee: &str, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.records
            .values()
            .filter(|r| r.lifecycle_state.is_active())
            .filter(|r| r.employee.as_deref() == Some(employee) && r.attendance_date == Some(date))
            .collect()
    }

    /// Validates and saves a record, returning its identity.
    ///
    /// New records are assigned a fresh identity. Existing records are
    /// compared against their persisted state so that pure workflow
    /// transitions are recognised.
    pub fn save<P, H>(
        &mut self,
        mut record: AttendanceRecord,
        validator: &AttendanceValidator<P, H>,
    ) -> AttendanceResult<String>
    where
        P: ValidationPolicy,
        H: HostChecks,
    {
        let persisted = match record.id.as_deref() {
            Some(id) => Some(
                self.records
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AttendanceError::RecordNotFound { id: id.to_string() })?,
            ),
            None => None,
        };

        validator.validate(&record, persisted.as_ref(), &*self)?;

        let id = match record.id.clone() {
            Some(id) => id,
            None => {
                let id = format!("ATT-{}", Uuid::new_v4());
                record.id = Some(id.clone());
                id
            }
        };

        info!(id = %id, employee = ?record.employee, "Attendance saved");
        self.records.insert(id.clone(), record);
        Ok(id)
    }

    /// Moves a record to a new workflow state.
    pub fn set_workflow_state<P, H>(
        &mut self,
        id: &str,
        workflow_state: impl Into<String>,
        validator: &AttendanceValidator<P, H>,
    ) -> AttendanceResult<()>
    where
        P: ValidationPolicy,
        H: HostChecks,
    {
        let mut record = self.load(id)?;
        record.workflow_state = Some(workflow_state.into());
        self.save(record, validator).map(|_| ())
    }

    /// Submits a draft record.
    pub fn submit<P, H>(
        &mut self,
        id: &str,
        validator: &AttendanceValidator<P, H>,
    ) -> AttendanceResult<()>
    where
        P: ValidationPolicy,
        H: HostChecks,
    {
        let mut record = self.load(id)?;
        record.lifecycle_state = LifecycleState::Submitted;
        self.save(record, validator).map(|_| ())
    }

    /// Cancels a record. Cancelled records no longer count towards the day.
    pub fn cancel(&mut self, id: &str) -> AttendanceResult<()> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| AttendanceError::RecordNotFound { id: id.to_string() })?;
        record.lifecycle_state = LifecycleState::Cancelled;
        info!(id = %id, "Attendance cancelled");
        Ok(())
    }

    fn load(&self, id: &str) -> AttendanceResult<AttendanceRecord> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| AttendanceError::RecordNotFound { id: id.to_string() })
    }
}

impl AttendanceLookup for AttendanceStore {
    fn count_active(&self, employee: &str, date: NaiveDate, exclude: Option<&str>) -> usize {
        self.active_records_for(employee, date)
            .into_iter()
            .filter(|r| exclude.is_none() || r.id.as_deref() != exclude)
            .count()
    }
}
