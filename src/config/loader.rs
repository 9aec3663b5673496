//! Settings loading and injection.
//!
//! This module provides the [`SettingsProvider`] capability handed to the salary
//! base calculator, and [`SettingsLoader`], which reads the settings singleton
//! from a YAML file on first use and caches it for the rest of the request.

use std::cell::OnceCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AttendanceError, AttendanceResult};

use super::types::SalaryBaseSettings;

/// Supplies the salary base settings singleton.
///
/// `Ok(None)` means the settings have not been configured yet, which callers
/// treat as "nothing to do" rather than as an error.
pub trait SettingsProvider {
    /// Returns the current settings, if configured.
    fn salary_base_settings(&self) -> AttendanceResult<Option<SalaryBaseSettings>>;
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for &P {
    fn salary_base_settings(&self) -> AttendanceResult<Option<SalaryBaseSettings>> {
        (**self).salary_base_settings()
    }
}

/// Settings held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    settings: Option<SalaryBaseSettings>,
}

impl StaticSettings {
    /// Wraps configured settings.
    pub fn new(settings: SalaryBaseSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn salary_base_settings(&self) -> AttendanceResult<Option<SalaryBaseSettings>> {
        Ok(self.settings.clone())
    }
}

/// A provider for a site where the settings were never configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsProvider for NoSettings {
    fn salary_base_settings(&self) -> AttendanceResult<Option<SalaryBaseSettings>> {
        Ok(None)
    }
}

/// Loads the settings singleton from a YAML file.
///
/// The file is read on the first call to
/// [`salary_base_settings`](SettingsProvider::salary_base_settings) and the
/// result is cached, so a loader should live for one request.
///
/// # Example
///
/// ```no_run
/// use advanced_attendance::config::{SettingsLoader, SettingsProvider};
///
/// let loader = SettingsLoader::new("./config/salary_base_settings.yaml");
/// let settings = loader.salary_base_settings()?;
/// # Ok::<(), advanced_attendance::error::AttendanceError>(())
/// ```
#[derive(Debug)]
pub struct SettingsLoader {
    path: PathBuf,
    cache: OnceCell<Option<SalaryBaseSettings>>,
}

impl SettingsLoader {
    /// Creates a loader for the given settings file without reading it.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: OnceCell::new(),
        }
    }

    /// Reads and validates the settings file.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` if the file does not exist (settings not configured)
    /// - `SettingsParseError` if the file cannot be read or contains invalid YAML
    /// - `InvalidSettings` if a value is negative
    pub fn load<P: AsRef<Path>>(path: P) -> AttendanceResult<Option<SalaryBaseSettings>> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path_str, "Salary base settings not configured");
                return Ok(None);
            }
            Err(e) => {
                return Err(AttendanceError::SettingsParseError {
                    path: path_str,
                    message: e.to_string(),
                });
            }
        };

        let settings = Self::parse(&content, &path_str)?;
        Ok(Some(settings))
    }

    /// Parses settings from YAML text; `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> AttendanceResult<SalaryBaseSettings> {
        let settings: SalaryBaseSettings =
            serde_yaml::from_str(content).map_err(|e| AttendanceError::SettingsParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Returns the path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsProvider for SettingsLoader {
    fn salary_base_settings(&self) -> AttendanceResult<Option<SalaryBaseSettings>> {
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }
        let loaded = Self::load(&self.path)?;
        let _ = self.cache.set(loaded.clone());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn temp_settings_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "advanced-attendance-{}-{}.yaml",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_not_configured() {
        let path = std::env::temp_dir().join("advanced-attendance-does-not-exist.yaml");
        assert_eq!(SettingsLoader::load(&path).unwrap(), None);
    }

    #[test]
    fn test_load_valid_file() {
        let path = temp_settings_file(
            "valid",
            "enable_auto_base: true\ngross_divider: \"1.3\"\ndefault_min_base: 12000\n",
        );

        let settings = SettingsLoader::load(&path).unwrap().unwrap();
        assert!(settings.enable_auto_base);
        assert_eq!(settings.default_min_base, Decimal::from(12000));
        assert_eq!(settings.effective_divider(), Decimal::from_str("1.3").unwrap());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let path = temp_settings_file("invalid", "enable_auto_base: [not a bool");

        match SettingsLoader::load(&path).unwrap_err() {
            AttendanceError::SettingsParseError { path: p, .. } => {
                assert!(p.contains("advanced-attendance-invalid"));
            }
            other => panic!("Expected SettingsParseError, got {:?}", other),
        }

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_negative_divider_rejected() {
        let result = SettingsLoader::parse("gross_divider: \"-1.3\"", "inline");
        assert!(matches!(
            result,
            Err(AttendanceError::InvalidSettings { ref field, .. }) if field == "gross_divider"
        ));
    }

    #[test]
    fn test_loader_caches_first_read() {
        let path = temp_settings_file("cached", "enable_auto_base: true\n");
        let loader = SettingsLoader::new(&path);

        let first = loader.salary_base_settings().unwrap();
        fs::remove_file(&path).unwrap();
        let second = loader.salary_base_settings().unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_static_and_empty_providers() {
        let configured = StaticSettings::new(SalaryBaseSettings::default());
        assert!(configured.salary_base_settings().unwrap().is_some());
        assert!(StaticSettings::default().salary_base_settings().unwrap().is_none());
        assert!(NoSettings.salary_base_settings().unwrap().is_none());
    }
}
