//! Core data models for the Payroll Anomaly Detection Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod detection_result;
mod employee;
mod period;
mod record;

pub use detection_result::{
    DetectionOutcome, DetectionReport, DetectionTotals, DiscountDriftAnomaly, IndeterminateNotice,
    UnusualIncomeAnomaly,
};
pub use employee::EmployeeProfile;
pub use period::Period;
pub use record::{PayrollRecord, RubricType};
