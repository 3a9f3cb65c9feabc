//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::PayrollEngine;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// principally the payroll engine and its collaborators.
#[derive(Clone)]
pub struct AppState {
    /// The payroll orchestrator.
    engine: Arc<PayrollEngine>,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: Arc<PayrollEngine>) -> Self {
        Self { engine }
    }

    /// Returns a reference to the payroll engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }
}
