//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the compute and
//! workflow endpoints.

use serde::{Deserialize, Serialize};

/// Request body for the `/payroll/compute` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The fortnight number within the year (1-based).
    pub fortnight: u32,
    /// The calendar year.
    pub year: i32,
    /// The already-authenticated actor performing the computation.
    pub actor: String,
}

/// Request body for the check, reject, authorize, and process endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Free-text remarks recorded with the transition.
    #[serde(default)]
    pub remarks: Option<String>,
    /// The already-authenticated actor performing the transition.
    pub actor: String,
}
