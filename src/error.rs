//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation and
//! the approval workflow.

use uuid::Uuid;

use crate::models::PayrollStatus;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// Three broad categories exist: validation errors (bad input, recoverable
/// by retrying with corrected input), state conflicts (a workflow guard no
/// longer holds), and not-found errors. A missing configuration is *not* an
/// error: the resolver degrades to built-in defaults and logs a warning.
///
/// # Example
///
/// ```
/// use payrun_engine::error::PayrollError;
///
/// let error = PayrollError::InvalidPeriod { fortnight: 27, max: 26 };
/// assert_eq!(error.to_string(), "Fortnight must be between 1 and 26, got 27");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PayrollError {
    /// The requested fortnight number is outside the configured range.
    #[error("Fortnight must be between 1 and {max}, got {fortnight}")]
    InvalidPeriod {
        /// The fortnight number that was requested.
        fortnight: u32,
        /// The configured number of fortnights per year.
        max: u32,
    },

    /// A payroll run already exists for the requested period.
    #[error("Payroll already exists for fortnight {fortnight}, {year}")]
    DuplicateRun {
        /// The fortnight number of the period.
        fortnight: u32,
        /// The year of the period.
        year: i32,
    },

    /// The run is not in a status that permits the requested transition.
    #[error("Cannot {action} a payroll run in {status} status")]
    InvalidTransition {
        /// The transition that was attempted (e.g., "check", "authorize").
        action: &'static str,
        /// The actual current status of the run.
        status: PayrollStatus,
    },

    /// A run for this period has already reached PROCESSED.
    #[error("Payroll for fortnight {fortnight}, {year} is already processed")]
    PeriodAlreadyProcessed {
        /// The fortnight number of the period.
        fortnight: u32,
        /// The year of the period.
        year: i32,
    },

    /// The run is locked (PROCESSED) and can no longer be mutated.
    #[error("Payroll run {id} is locked and cannot be modified")]
    RunLocked {
        /// The identifier of the locked run.
        id: Uuid,
    },

    /// No payroll run exists with the given identifier.
    #[error("Payroll run not found: {id}")]
    RunNotFound {
        /// The run identifier that was not found.
        id: Uuid,
    },

    /// No payroll run exists for the given period.
    #[error("Payroll not found for fortnight {fortnight}, {year}")]
    RunNotFoundForPeriod {
        /// The fortnight number of the period.
        fortnight: u32,
        /// The year of the period.
        year: i32,
    },

    /// No payslip exists for the employee in the given period.
    #[error("Payslip not found for employee '{employee_id}' in fortnight {fortnight}, {year}")]
    PayslipNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The fortnight number of the period.
        fortnight: u32,
        /// The year of the period.
        year: i32,
    },

    /// The owning run has not been processed, so the payslip is not visible.
    #[error("Payslip is only available after payroll is processed (current status: {status})")]
    PayslipNotAvailable {
        /// The current status of the owning run.
        status: PayrollStatus,
    },

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

    /// A pay computation could not be completed for an employee.
    #[error("Calculation error for employee '{employee_id}': {message}")]
    CalculationError {
        /// The employee whose computation failed.
        employee_id: String,
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
