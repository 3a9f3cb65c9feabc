//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for computing payroll runs,
//! driving the approval workflow, and serving payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ActionRequest, ComputeRequest};
pub use response::ApiError;
pub use state::AppState;
