//! Payroll data ingestion for the Payroll Anomaly Detection Engine.
//!
//! The loader is the collaborator that turns raw payroll CSV exports into
//! normalized [`PayrollRecord`]s before the detectors run. Every field is
//! coerced here; a record the loader cannot normalize fails loading with a
//! [`MalformedRecord`] error instead of reaching the core.
//!
//! [`PayrollRecord`]: crate::models::PayrollRecord
//! [`MalformedRecord`]: crate::error::EngineError::MalformedRecord

mod csv;

pub use csv::{LoadedPayroll, load_payroll_csv, load_payroll_csv_from_path};
