//! Payroll record model and related types.
//!
//! This module defines the PayrollRecord struct and RubricType enum
//! representing one observed rubric line for one employee in one period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// Classifies a payroll rubric line.
///
/// Source payroll exports use the terms RENDIMENTO and DESCONTO; the loader
/// maps them to [`RubricType::Income`] and [`RubricType::Discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricType {
    /// Base salary lines; not examined by either detection rule.
    Base,
    /// Income lines (source term RENDIMENTO); examined for novel codes.
    Income,
    /// Discount lines (source term DESCONTO); examined for value drift.
    Discount,
}

/// One observed rubric line for one employee in one payroll period.
///
/// Well-formed input carries at most one record per
/// (employee, code, type, period); duplicates are an upstream data-quality
/// concern and participate in detection like any other record.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::models::{PayrollRecord, Period, RubricType};
/// use rust_decimal::Decimal;
///
/// let record = PayrollRecord {
///     employee_id: "matricula_001".to_string(),
///     rubric_code: "BONUS_ANUAL".to_string(),
///     rubric_type: RubricType::Income,
///     value: Decimal::new(150000, 2),
///     year: 2024,
///     month: 8,
/// };
/// assert_eq!(record.period(), Period { year: 2024, month: 8 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Stable identifier of the employee this line belongs to (matricula).
    pub employee_id: String,
    /// Identifier of the rubric (e.g. "BONUS_ANUAL").
    pub rubric_code: String,
    /// Classification of the rubric line.
    pub rubric_type: RubricType,
    /// The observed amount for this line.
    pub value: Decimal,
    /// The calendar year of the payroll cycle.
    pub year: i32,
    /// The calendar month of the payroll cycle (1-12).
    pub month: u32,
}

impl PayrollRecord {
    /// Returns the payroll period this record belongs to.
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }

    /// Returns true if this is an income line.
    pub fn is_income(&self) -> bool {
        self.rubric_type == RubricType::Income
    }

    /// Returns true if this is a discount line.
    pub fn is_discount(&self) -> bool {
        self.rubric_type == RubricType::Discount
    }
}
