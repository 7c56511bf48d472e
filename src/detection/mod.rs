//! Detection logic for the Payroll Anomaly Detection Engine.
//!
//! This module contains the grouping utilities, the history window builder,
//! the two detection rules (unusual income codes, discount-value drift), and
//! the run orchestration that ties them together per employee.

mod discount_drift;
mod grouping;
mod history;
mod runner;
mod unusual_income;

pub use discount_drift::{DEFAULT_DRIFT_THRESHOLD, DiscountDriftDetection, detect_discount_drift};
pub use grouping::group_by_employee;
pub use history::EmployeeHistory;
pub use runner::run_detection;
pub use unusual_income::{DEFAULT_INCOME_LOOKBACK_MONTHS, detect_unusual_income};
