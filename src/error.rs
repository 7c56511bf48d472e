//! Error types for the Payroll Anomaly Detection Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading payroll data and
//! running a detection pass.

use thiserror::Error;

/// The main error type for the Payroll Anomaly Detection Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/detection.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/detection.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration contained a value outside its valid range.
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A payroll CSV row could not be normalized into a record.
    ///
    /// Raised by the loader before any record reaches the detectors, so the
    /// core never sees malformed input.
    #[error("Malformed payroll record at line {line}, field '{field}': {message}")]
    MalformedRecord {
        /// The 1-based line number of the offending row (header excluded).
        line: usize,
        /// The field that failed to parse.
        field: String,
        /// A description of the parse failure.
        message: String,
    },

    /// The payroll CSV stream itself could not be read.
    #[error("Failed to read payroll data: {0}")]
    CsvError(#[from] csv::Error),

    /// An I/O failure opening or reading payroll input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference period was outside the valid calendar range.
    #[error("Invalid reference period {year}-{month:02}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The reference year.
        year: i32,
        /// The reference month that was out of range.
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
