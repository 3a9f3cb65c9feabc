//! Calculation logic for the payroll engine.
//!
//! This module contains the progressive tax calculator and the
//! per-employee pay computation that combines attendance-derived pro-rata
//! basic pay, approved overtime, statutory deductions, and totals.

mod employee_pay;
mod tax;

pub use employee_pay::{EmployeeComputation, compute_for_employee};
pub use tax::{annual_tax, per_period_tax};
