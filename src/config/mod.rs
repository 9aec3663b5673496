//! Settings for the salary base calculation.
//!
//! The settings singleton is owned by the host; this module reads it from a YAML
//! file and hands it to the calculator through the [`SettingsProvider`] trait.
//!
//! # Example
//!
//! ```no_run
//! use advanced_attendance::config::{SettingsLoader, SettingsProvider};
//!
//! let loader = SettingsLoader::new("./config/salary_base_settings.yaml");
//! if let Some(settings) = loader.salary_base_settings().unwrap() {
//!     println!("Gross divider: {}", settings.effective_divider());
//! }
//! ```

mod loader;
mod types;

pub use loader::{NoSettings, SettingsLoader, SettingsProvider, StaticSettings};
pub use types::{DEFAULT_GROSS_DIVIDER, SalaryBaseSettings};
