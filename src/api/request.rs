//! Request types for the Payroll Anomaly Detection Engine API.
//!
//! This module defines the JSON request structures for the `/detect`
//! endpoint and the query parameters for `/detect/csv`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayrollRecord, Period, RubricType};

/// Request body for the `/detect` endpoint.
///
/// Contains the reference period under evaluation and the full payroll
/// record store, already normalized by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRequest {
    /// The period under evaluation.
    pub reference_period: PeriodRequest,
    /// The payroll records to evaluate.
    pub records: Vec<RecordRequest>,
}

/// A (year, month) pair in a detection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

/// One payroll record in a detection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Stable identifier of the employee (matricula).
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

/// Query parameters for the `/detect/csv` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvDetectionParams {
    /// The reference year.
    pub year: i32,
    /// The reference month (1-12).
    pub month: u32,
}

impl From<PeriodRequest> for Period {
    fn from(req: PeriodRequest) -> Self {
        Period {
            year: req.year,
            month: req.month,
        }
    }
}

impl From<RecordRequest> for PayrollRecord {
    fn from(req: RecordRequest) -> Self {
        PayrollRecord {
            employee_id: req.employee_id,
            rubric_code: req.rubric_code,
            rubric_type: req.rubric_type,
            value: req.value,
            year: req.year,
            month: req.month,
        }
    }
}
