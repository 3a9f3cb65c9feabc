//! Payroll and tax configuration.
//!
//! This module provides the time-ranged configuration records that drive
//! every computation, a YAML loader for seeding them, and the resolver that
//! selects the single active configuration pair for a date.
//!
//! # Example
//!
//! ```no_run
//! use payrun_engine::config::ConfigLoader;
//!
//! let configs = ConfigLoader::load("./config/default").unwrap();
//! ```

mod loader;
mod resolver;
mod types;

pub use loader::ConfigLoader;
pub use resolver::{EffectiveConfiguration, resolve_effective};
pub use types::{PayrollConfiguration, TaxConfiguration, TaxSlab};
