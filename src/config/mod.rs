//! Configuration loading and management for the Payroll Anomaly Detection Engine.
//!
//! This module provides functionality to load detection settings from a YAML
//! file: the discount-drift threshold and the income lookback window.
//!
//! # Example
//!
//! ```no_run
//! use payroll_anomaly_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/detection.yaml").unwrap();
//! println!("Drift threshold: {}", config.settings().drift_threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::DetectionSettings;
