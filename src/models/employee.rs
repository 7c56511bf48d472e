//! Employee profile model.
//!
//! Payroll exports carry employee metadata alongside each rubric line. The
//! detectors never consume it, but the loader retains one profile per
//! employee so the reporting surface can label anomalies with names and
//! roles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee metadata retained for reporting.
///
/// None of these fields play a role in anomaly logic; they are carried
/// through from the source export as-is, with dates normalized by the
/// loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Stable identifier of the employee (matricula).
    pub employee_id: String,
    /// The employee's full name.
    pub name: String,
    /// The employee's CPF document number.
    pub cpf: String,
    /// The employee's registered sex marker.
    pub sex: String,
    /// The employee's role (cargo).
    pub role: String,
    /// The level within the role (cargo_nivel).
    pub role_level: String,
    /// The date the employee was admitted.
    pub admission_date: Option<NaiveDate>,
    /// The date the employee's contract was terminated, if any.
    pub termination_date: Option<NaiveDate>,
    /// The employee's date of birth.
    pub birth_date: Option<NaiveDate>,
}
