//! Document models handled by the hooks.
//!
//! The host owns persistence for all of these; the crate only reads and writes fields.

mod attendance;
mod audit;
mod salary_assignment;

pub use attendance::{AttendanceRecord, AttendanceStatus, LifecycleState};
pub use audit::AuditStep;
pub use salary_assignment::SalaryStructureAssignment;
