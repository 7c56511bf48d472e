//! Order-preserving grouping of payroll records by employee.
//!
//! Grouping order determines output order for the whole run, so it is pinned
//! to the first appearance of each employee in the input rather than left to
//! hash-map iteration.

use std::collections::HashMap;

use crate::models::PayrollRecord;

/// Partitions records by `employee_id`, preserving first-appearance order.
///
/// Every record lands in exactly one group; groups keep the relative order
/// of their records. Running twice over identical input yields identical
/// group and record ordering.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::detection::group_by_employee;
/// use payroll_anomaly_engine::models::{PayrollRecord, RubricType};
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     PayrollRecord {
///         employee_id: "E2".to_string(),
///         rubric_code: "SALARIO".to_string(),
///         rubric_type: RubricType::Base,
///         value: Decimal::new(500000, 2),
///         year: 2024,
///         month: 8,
///     },
///     PayrollRecord {
///         employee_id: "E1".to_string(),
///         rubric_code: "SALARIO".to_string(),
///         rubric_type: RubricType::Base,
///         value: Decimal::new(420000, 2),
///         year: 2024,
///         month: 8,
///     },
/// ];
///
/// let groups = group_by_employee(&records);
/// assert_eq!(groups[0].0, "E2");
/// assert_eq!(groups[1].0, "E1");
/// ```
pub fn group_by_employee(records: &[PayrollRecord]) -> Vec<(String, Vec<&PayrollRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&PayrollRecord>)> = Vec::new();

    for record in records {
        match index.get(record.employee_id.as_str()) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(record.employee_id.as_str(), groups.len());
                groups.push((record.employee_id.clone(), vec![record]));
            }
        }
    }

    groups
}
