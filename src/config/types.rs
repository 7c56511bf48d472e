//! Configuration types for the detection engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from the YAML configuration file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::detection::{DEFAULT_DRIFT_THRESHOLD, DEFAULT_INCOME_LOOKBACK_MONTHS};

/// Tunable parameters for a detection run.
///
/// The defaults reproduce the engine's reference behavior: a 5% closed
/// drift bound and a six-calendar-month income lookback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetectionSettings {
    /// The closed lower bound for discount relative deviation.
    #[serde(default = "default_drift_threshold")]
    pub drift_threshold: Decimal,
    /// The trailing-window length for income novelty, in calendar months.
    #[serde(default = "default_income_lookback_months")]
    pub income_lookback_months: u32,
}

fn default_drift_threshold() -> Decimal {
    DEFAULT_DRIFT_THRESHOLD
}

fn default_income_lookback_months() -> u32 {
    DEFAULT_INCOME_LOOKBACK_MONTHS
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
            income_lookback_months: DEFAULT_INCOME_LOOKBACK_MONTHS,
        }
    }
}
