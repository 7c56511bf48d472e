//! Anomaly Detection Engine for Monthly Payroll Rubrics
//!
//! This crate flags anomalies in monthly payroll line items ("rubricas") by
//! comparing an employee's reference period against that employee's own
//! history: income codes never seen in the trailing six months, and discount
//! values drifting at least 5% from their historical mean.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod detection;
pub mod error;
pub mod loader;
pub mod models;
