//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading region
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{PublicHoliday, PublicHolidaySet};

use super::types::{RateDefaults, RegionConfig, RegionMetadata, TaxSchedule};

/// Structure of a file under `holidays/`.
#[derive(Debug, Deserialize)]
struct HolidayFile {
    holidays: Vec<PublicHoliday>,
}

/// Loads and provides access to a region configuration.
///
/// # Directory Structure
///
/// ```text
/// config/au_2026/
/// ├── region.yaml     # Region metadata (required)
/// ├── rates.yaml      # Default workplace multipliers (optional)
/// ├── tax.yaml        # Income tax schedule and levy (optional)
/// └── holidays/
///     └── 2026.yaml   # Public holidays (optional directory)
/// ```
///
/// Missing optional files fall back to the built-in defaults.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/au_2026")?;
/// println!("Loaded region: {}", loader.region().name);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RegionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `region.yaml` is missing
    /// - Any present file contains invalid YAML
    /// - The rate defaults or tax schedule violate their invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegionMetadata>(&path.join("region.yaml"))?;

        let rates_path = path.join("rates.yaml");
        let rate_defaults = if rates_path.exists() {
            Self::load_yaml::<RateDefaults>(&rates_path)?
        } else {
            debug!(path = %rates_path.display(), "No rates file, using default multipliers");
            RateDefaults::default()
        };
        // A zero base rate is valid, so this checks the multipliers only.
        rate_defaults.with_base_rate(Decimal::ZERO).validate()?;

        let tax_path = path.join("tax.yaml");
        let tax_schedule = if tax_path.exists() {
            Self::load_yaml::<TaxSchedule>(&tax_path)?
        } else {
            debug!(path = %tax_path.display(), "No tax file, using default schedule");
            TaxSchedule::default()
        };
        tax_schedule.validate()?;

        let public_holidays = Self::load_holidays(&path.join("holidays"))?;

        let config = RegionConfig::new(metadata, rate_defaults, tax_schedule, public_holidays);

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: RegionConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday file from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<PublicHolidaySet> {
        let holidays_dir_str = holidays_dir.display().to_string();

        if !holidays_dir.exists() {
            warn!(path = %holidays_dir_str, "No holidays directory, public holiday rates will not apply");
            return Ok(PublicHolidaySet::new());
        }

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut set = PublicHolidaySet::new();
        for path in paths {
            let file = Self::load_yaml::<HolidayFile>(&path)?;
            for holiday in file.holidays {
                set.insert(holiday);
            }
        }

        Ok(set)
    }

    /// Returns the underlying region configuration.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Returns the region metadata.
    pub fn region(&self) -> &RegionMetadata {
        self.config.region()
    }

    /// Returns the default workplace multipliers.
    pub fn rate_defaults(&self) -> &RateDefaults {
        self.config.rate_defaults()
    }

    /// Returns the income tax schedule.
    pub fn tax_schedule(&self) -> &TaxSchedule {
        self.config.tax_schedule()
    }

    /// Returns the configured public holidays.
    pub fn public_holidays(&self) -> &PublicHolidaySet {
        self.config.public_holidays()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/au_2026"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Creates an empty config directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll_engine_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.region().code, "AU-2026");
        assert_eq!(loader.region().name, "Australia (national)");
    }

    #[test]
    fn test_rate_defaults_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let defaults = loader.rate_defaults();

        assert_eq!(defaults.saturday_multiplier, dec("1.5"));
        assert_eq!(defaults.sunday_multiplier, dec("2.0"));
        assert_eq!(defaults.public_holiday_multiplier, dec("2.5"));
        assert_eq!(defaults.overtime_multiplier, dec("1.5"));
        assert_eq!(defaults.overtime_threshold_hours, dec("8.0"));
    }

    #[test]
    fn test_tax_schedule_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let schedule = loader.tax_schedule();

        assert_eq!(schedule.brackets, TaxSchedule::default().brackets);
        assert_eq!(schedule.levy, TaxSchedule::default().levy);
    }

    #[test]
    fn test_public_holidays_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = loader.public_holidays();

        assert_eq!(holidays.len(), 10);
        let anzac = NaiveDate::from_ymd_opt(2026, 4, 25).unwrap();
        assert!(holidays.contains(anzac));
        assert_eq!(holidays.get(anzac).unwrap().name, "Anzac Day");
        assert!(!holidays.contains(NaiveDate::from_ymd_opt(2026, 4, 26).unwrap()));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("region.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_optional_files_fall_back_to_defaults() {
        let dir = scratch_dir("minimal");
        fs::write(
            dir.join("region.yaml"),
            "code: TEST\nname: Test Region\nversion: \"1\"\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(*loader.rate_defaults(), RateDefaults::default());
        assert_eq!(*loader.tax_schedule(), TaxSchedule::default());
        assert!(loader.public_holidays().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad_yaml");
        fs::write(dir.join("region.yaml"), "code: [unclosed\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => assert!(path.contains("region.yaml")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_multiplier_rejected_at_load() {
        let dir = scratch_dir("bad_rates");
        fs::write(
            dir.join("region.yaml"),
            "code: TEST\nname: Test Region\nversion: \"1\"\n",
        )
        .unwrap();
        fs::write(dir.join("rates.yaml"), "saturday_multiplier: 0.5\n").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidConfig { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
