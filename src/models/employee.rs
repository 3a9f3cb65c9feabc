//! Employee model.
//!
//! The engine consumes a read-only view of employees from the employee
//! directory; it never mutates employee records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A read-only view of an employee, as provided by the employee directory.
///
/// # Example
///
/// ```
/// use payrun_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Kila".to_string(),
///     annual_basic_salary: Decimal::from(26_000),
///     is_active: true,
///     tax_resident: None,
/// };
/// assert!(employee.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name, carried onto payslips.
    pub name: String,
    /// The employee's annual basic salary.
    pub annual_basic_salary: Decimal,
    /// Whether the employee is active; only active employees enter a run.
    pub is_active: bool,
    /// Tax residency override. `None` falls back to the tax configuration's
    /// default residency.
    #[serde(default)]
    pub tax_resident: Option<bool>,
}

impl Employee {
    /// Resolves the employee's tax residency, falling back to the given
    /// configuration default when no override is present.
    pub fn residency_or(&self, default_resident: bool) -> bool {
        self.tax_resident.unwrap_or(default_resident)
    }
}
