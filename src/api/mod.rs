//! HTTP API module for the Payroll Anomaly Detection Engine.
//!
//! This module provides the REST API endpoints for running anomaly
//! detection over a payroll record store.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CsvDetectionParams, DetectionRequest};
pub use response::ApiError;
pub use state::AppState;
