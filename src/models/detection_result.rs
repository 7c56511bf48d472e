//! Detection result models for the Payroll Anomaly Detection Engine.
//!
//! This module contains the anomaly value objects produced by the two
//! detection rules, the indeterminate-notice channel, and the
//! [`DetectionReport`] envelope returned by the API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::Period;

/// Income codes present in the reference period but absent from the
/// trailing history window.
///
/// One anomaly is emitted per employee and carries the full set of new
/// codes, not one anomaly per code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusualIncomeAnomaly {
    /// The employee the anomaly belongs to.
    pub employee_id: String,
    /// The income codes with no occurrence in the trailing window.
    pub new_income_codes: BTreeSet<String>,
}

/// A discount whose reference-period value deviates from its historical
/// mean by at least the configured threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountDriftAnomaly {
    /// The employee the anomaly belongs to.
    pub employee_id: String,
    /// The discount rubric code that drifted.
    pub rubric_code: String,
    /// The value observed in the reference period.
    pub current_value: Decimal,
    /// The arithmetic mean of all prior values for this code.
    pub historical_mean: Decimal,
    /// The relative deviation `|current - mean| / mean`.
    pub deviation: Decimal,
}

/// A record the drift detector could not evaluate.
///
/// Kept on its own channel so callers can distinguish "no anomaly" from
/// "could not evaluate" (a zero historical mean makes percentage deviation
/// meaningless).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndeterminateNotice {
    /// The employee the notice belongs to.
    pub employee_id: String,
    /// The discount rubric code that could not be evaluated.
    pub rubric_code: String,
    /// The value observed in the reference period.
    pub current_value: Decimal,
    /// A human-readable description of why evaluation was skipped.
    pub message: String,
}

impl IndeterminateNotice {
    /// Creates the notice for a discount code whose historical mean is zero.
    pub fn zero_mean(employee_id: &str, rubric_code: &str, current_value: Decimal) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            rubric_code: rubric_code.to_string(),
            current_value,
            message: "historical mean is zero; relative deviation is undefined".to_string(),
        }
    }
}

/// The output of one detection run over the full record store.
///
/// Anomalies appear in the pinned grouping order (first appearance of each
/// employee in the input), so identical input always produces identical
/// output ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    /// Unusual-income anomalies, at most one per employee.
    pub unusual_income: Vec<UnusualIncomeAnomaly>,
    /// Discount-drift anomalies, at most one per current discount record.
    pub discount_drift: Vec<DiscountDriftAnomaly>,
    /// Records the drift detector could not evaluate.
    pub indeterminate: Vec<IndeterminateNotice>,
}

impl DetectionOutcome {
    /// Returns true if the run produced no anomalies and no notices.
    pub fn is_empty(&self) -> bool {
        self.unusual_income.is_empty()
            && self.discount_drift.is_empty()
            && self.indeterminate.is_empty()
    }
}

/// Aggregated counts for a detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionTotals {
    /// The number of employees evaluated.
    pub employees_evaluated: usize,
    /// The number of payroll records examined.
    pub records_evaluated: usize,
    /// The number of unusual-income anomalies emitted.
    pub unusual_income_anomalies: usize,
    /// The number of discount-drift anomalies emitted.
    pub discount_drift_anomalies: usize,
    /// The number of indeterminate notices emitted.
    pub indeterminate_notices: usize,
}

/// The complete result of a detection run as returned by the API.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::models::{DetectionOutcome, DetectionReport, DetectionTotals, Period};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let report = DetectionReport {
///     detection_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "1.0.0".to_string(),
///     reference_period: Period { year: 2024, month: 8 },
///     totals: DetectionTotals {
///         employees_evaluated: 0,
///         records_evaluated: 0,
///         unusual_income_anomalies: 0,
///         discount_drift_anomalies: 0,
///         indeterminate_notices: 0,
///     },
///     outcome: DetectionOutcome::default(),
///     duration_us: 0,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Unique identifier for this detection run.
    pub detection_id: Uuid,
    /// When the detection run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The period under evaluation.
    pub reference_period: Period,
    /// Aggregated counts for the run.
    pub totals: DetectionTotals,
    /// The anomalies and notices produced by the run.
    pub outcome: DetectionOutcome,
    /// The total detection duration in microseconds.
    pub duration_us: u64,
}
