//! Fortnightly Payroll Computation Engine
//!
//! This crate computes periodic (fortnightly) employee pay from attendance
//! and approved overtime, applies a configuration-driven progressive tax and
//! superannuation calculation, and drives each payroll run through a
//! multi-stage approval workflow (compute, check, authorize, process) before
//! payslips become visible to employees.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ports;
pub mod store;
