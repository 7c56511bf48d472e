//! History window construction for one employee's records.
//!
//! This module provides the [`EmployeeHistory`] view builder that partitions
//! an employee's records into the current period and the two comparison
//! histories the detection rules consume: a bounded trailing window for the
//! income rule and the unbounded prior history for the discount rule.

use crate::models::{PayrollRecord, Period};

/// All payroll records for one employee, viewed against a reference period.
///
/// Built fresh per detection run and never mutated; the three accessors are
/// pure filters over the borrowed record set and may return empty views.
///
/// The asymmetry between the two history views is intentional: income
/// novelty compares against a bounded recency window, discount drift
/// compares against all available history.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::detection::EmployeeHistory;
/// use payroll_anomaly_engine::models::{PayrollRecord, Period, RubricType};
/// use rust_decimal::Decimal;
///
/// let records = vec![PayrollRecord {
///     employee_id: "E1".to_string(),
///     rubric_code: "SALARIO".to_string(),
///     rubric_type: RubricType::Income,
///     value: Decimal::new(420000, 2),
///     year: 2024,
///     month: 2,
/// }];
/// let refs: Vec<&PayrollRecord> = records.iter().collect();
/// let history = EmployeeHistory::new("E1", &refs);
///
/// let reference = Period { year: 2024, month: 8 };
/// assert_eq!(history.trailing_window(reference, 6).len(), 1);
/// assert!(history.current_period(reference).is_empty());
/// ```
#[derive(Debug)]
pub struct EmployeeHistory<'a> {
    employee_id: &'a str,
    records: &'a [&'a PayrollRecord],
}

impl<'a> EmployeeHistory<'a> {
    /// Creates a view over one employee's full record set.
    pub fn new(employee_id: &'a str, records: &'a [&'a PayrollRecord]) -> Self {
        Self {
            employee_id,
            records,
        }
    }

    /// Returns the employee this history belongs to.
    pub fn employee_id(&self) -> &str {
        self.employee_id
    }

    /// Records belonging to the reference period itself.
    pub fn current_period(&self, reference: Period) -> Vec<&'a PayrollRecord> {
        self.records
            .iter()
            .copied()
            .filter(|r| r.period() == reference)
            .collect()
    }

    /// Records in the trailing window `[reference - months, reference)`.
    ///
    /// The window start is a calendar-month subtraction (with year borrow),
    /// not a fixed day-count offset. The start period is included, the
    /// reference period is excluded.
    pub fn trailing_window(&self, reference: Period, months: u32) -> Vec<&'a PayrollRecord> {
        let start = reference.months_back(months);
        self.records
            .iter()
            .copied()
            .filter(|r| {
                let p = r.period();
                p >= start && p < reference
            })
            .collect()
    }

    /// All records strictly before the reference period, unbounded.
    pub fn prior_history(&self, reference: Period) -> Vec<&'a PayrollRecord> {
        self.records
            .iter()
            .copied()
            .filter(|r| r.period() < reference)
            .collect()
    }
}
