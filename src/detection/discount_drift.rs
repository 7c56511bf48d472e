//! Discount-drift detection rule.
//!
//! This module flags discount-type rubric codes whose reference-period value
//! deviates from the mean of that code's prior values by at least the
//! configured threshold.

use rust_decimal::Decimal;

use crate::models::{DiscountDriftAnomaly, IndeterminateNotice, PayrollRecord};

/// The default relative-deviation threshold (5%).
///
/// The bound is closed: a deviation of exactly 5% counts as an anomaly.
pub const DEFAULT_DRIFT_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// The result of running the drift rule over one employee's discounts.
#[derive(Debug, Clone, Default)]
pub struct DiscountDriftDetection {
    /// Zero or one anomaly per current-period discount record.
    pub anomalies: Vec<DiscountDriftAnomaly>,
    /// Records that could not be evaluated (zero historical mean).
    pub notices: Vec<IndeterminateNotice>,
}

/// Flags discounts drifting from their historical mean.
///
/// For each discount record in the current-period view, selects all prior
/// discount records with the same rubric code and compares the current value
/// against their arithmetic mean:
///
/// - no prior values: the record is skipped silently (there is nothing to
///   compare against, not an infinite deviation);
/// - mean of zero: relative deviation is undefined, so the record lands in
///   `notices` instead of `anomalies` and the run continues;
/// - otherwise: an anomaly is emitted iff `|value - mean| / mean` reaches
///   `threshold` (closed bound).
///
/// Anomalies follow the order of the current-period view, so output is
/// deterministic for identical input.
///
/// # Arguments
///
/// * `employee_id` - The employee both views belong to
/// * `current` - The current-period view of that employee's records
/// * `prior` - The full prior-history view (unbounded, per the rule)
/// * `threshold` - The closed lower bound for the relative deviation
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::detection::{detect_discount_drift, DEFAULT_DRIFT_THRESHOLD};
/// use payroll_anomaly_engine::models::{PayrollRecord, RubricType};
/// use rust_decimal::Decimal;
///
/// let make = |value: i64, month: u32| PayrollRecord {
///     employee_id: "E2".to_string(),
///     rubric_code: "PLANO_SAUDE".to_string(),
///     rubric_type: RubricType::Discount,
///     value: Decimal::new(value, 0),
///     year: 2024,
///     month,
/// };
///
/// let current = make(300, 8);
/// let history = [make(280, 5), make(285, 6), make(290, 7)];
/// let prior: Vec<&PayrollRecord> = history.iter().collect();
///
/// let detection = detect_discount_drift("E2", &[&current], &prior, DEFAULT_DRIFT_THRESHOLD);
/// assert_eq!(detection.anomalies.len(), 1);
/// assert_eq!(detection.anomalies[0].historical_mean, Decimal::new(285, 0));
/// ```
pub fn detect_discount_drift(
    employee_id: &str,
    current: &[&PayrollRecord],
    prior: &[&PayrollRecord],
    threshold: Decimal,
) -> DiscountDriftDetection {
    let mut detection = DiscountDriftDetection::default();

    for record in current.iter().filter(|r| r.is_discount()) {
        let prior_values: Vec<Decimal> = prior
            .iter()
            .filter(|p| p.is_discount() && p.rubric_code == record.rubric_code)
            .map(|p| p.value)
            .collect();

        // A code with no prior history has nothing to compare against.
        if prior_values.is_empty() {
            continue;
        }

        let sum: Decimal = prior_values.iter().sum();
        let mean = sum / Decimal::from(prior_values.len());

        if mean == Decimal::ZERO {
            detection.notices.push(IndeterminateNotice::zero_mean(
                employee_id,
                &record.rubric_code,
                record.value,
            ));
            continue;
        }

        let deviation = ((record.value - mean) / mean).abs();
        if deviation >= threshold {
            detection.anomalies.push(DiscountDriftAnomaly {
                employee_id: employee_id.to_string(),
                rubric_code: record.rubric_code.clone(),
                current_value: record.value,
                historical_mean: mean,
                deviation,
            });
        }
    }

    detection
}
