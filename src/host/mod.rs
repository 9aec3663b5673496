//! Reference host collaborators.
//!
//! The hooks only ever talk to the host through [`AttendanceLookup`],
//! [`HostChecks`] and [`SettingsProvider`]. This module provides in-memory
//! implementations of the attendance side, for hosts without their own
//! persistence and for tests.
//!
//! [`AttendanceLookup`]: crate::policy::AttendanceLookup
//! [`HostChecks`]: crate::policy::HostChecks
//! [`SettingsProvider`]: crate::config::SettingsProvider

mod checks;
mod store;

pub use checks::StandardChecks;
pub use store::AttendanceStore;
