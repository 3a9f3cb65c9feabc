//! Core data models for the payroll engine.
//!
//! This module contains all the domain types used throughout the engine.

mod employee;
mod pay_period;
mod payroll_detail;
mod payroll_run;
mod request;

pub use employee::Employee;
pub use pay_period::{DAYS_IN_FORTNIGHT, PayPeriod};
pub use payroll_detail::PayrollDetail;
pub use payroll_run::{PayrollRun, PayrollStatus};
pub use request::{LeaveRequest, OvertimeRequest};
