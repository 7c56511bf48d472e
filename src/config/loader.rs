//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading detection
//! settings from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::DetectionSettings;

/// Loads and provides access to the detection settings.
///
/// The `ConfigLoader` reads a single YAML settings file and validates the
/// values before the engine uses them. Construct one with [`load`] for a
/// file on disk, or rely on [`Default`] for the built-in settings.
///
/// # File format
///
/// ```text
/// # config/detection.yaml
/// drift_threshold: "0.05"
/// income_lookback_months: 6
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_anomaly_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/detection.yaml").unwrap();
/// assert_eq!(loader.settings().income_lookback_months, 6);
/// ```
///
/// [`load`]: ConfigLoader::load
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: DetectionSettings,
}

impl ConfigLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g., "./config/detection.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is outside its valid range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings: DetectionSettings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::validate(&settings)?;

        Ok(Self { settings })
    }

    /// Returns the loaded detection settings.
    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    fn validate(settings: &DetectionSettings) -> EngineResult<()> {
        if settings.drift_threshold < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "drift_threshold".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if settings.income_lookback_months == 0 {
            return Err(EngineError::InvalidConfig {
                field: "income_lookback_months".to_string(),
                message: "must be at least one month".to_string(),
            });
        }

        Ok(())
    }
}
