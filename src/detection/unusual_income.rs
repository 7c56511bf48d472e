//! Unusual-income detection rule.
//!
//! This module flags income-type rubric codes present in the reference
//! period but absent from the employee's trailing history window.

use std::collections::BTreeSet;

use crate::models::{PayrollRecord, UnusualIncomeAnomaly};

/// The default trailing-window length for income novelty, in calendar months.
pub const DEFAULT_INCOME_LOOKBACK_MONTHS: u32 = 6;

/// Flags income codes new to the employee's trailing window.
///
/// Computes the set of distinct income codes in the current-period view, the
/// set of distinct income codes in the trailing history view, and emits one
/// anomaly carrying the full difference (current minus history) iff that
/// difference is non-empty. Records of other rubric types are ignored on
/// both sides.
///
/// An employee with no current income records yields no anomaly; an employee
/// with no history at all yields an anomaly listing every current income
/// code.
///
/// # Arguments
///
/// * `employee_id` - The employee both views belong to
/// * `current` - The current-period view of that employee's records
/// * `history` - The trailing-window view of that employee's records
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::detection::detect_unusual_income;
/// use payroll_anomaly_engine::models::{PayrollRecord, RubricType};
/// use rust_decimal::Decimal;
///
/// let bonus = PayrollRecord {
///     employee_id: "E1".to_string(),
///     rubric_code: "BONUS_ANUAL".to_string(),
///     rubric_type: RubricType::Income,
///     value: Decimal::new(150000, 2),
///     year: 2024,
///     month: 8,
/// };
///
/// let anomaly = detect_unusual_income("E1", &[&bonus], &[]).unwrap();
/// assert!(anomaly.new_income_codes.contains("BONUS_ANUAL"));
/// ```
pub fn detect_unusual_income(
    employee_id: &str,
    current: &[&PayrollRecord],
    history: &[&PayrollRecord],
) -> Option<UnusualIncomeAnomaly> {
    let current_codes: BTreeSet<&str> = current
        .iter()
        .filter(|r| r.is_income())
        .map(|r| r.rubric_code.as_str())
        .collect();

    let known_codes: BTreeSet<&str> = history
        .iter()
        .filter(|r| r.is_income())
        .map(|r| r.rubric_code.as_str())
        .collect();

    let new_income_codes: BTreeSet<String> = current_codes
        .difference(&known_codes)
        .map(|c| c.to_string())
        .collect();

    if new_income_codes.is_empty() {
        return None;
    }

    Some(UnusualIncomeAnomaly {
        employee_id: employee_id.to_string(),
        new_income_codes,
    })
}
