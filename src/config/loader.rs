//! Configuration loading from YAML files.
//!
//! This module provides the [`ConfigLoader`] type for seeding configuration
//! records from a directory of YAML files.

use std::fs;
use std::path::Path;

use crate::config::{PayrollConfiguration, TaxConfiguration};
use crate::error::{PayrollError, PayrollResult};
use crate::ports::ConfigStore;

/// Loads configuration records from YAML files and serves them as a
/// [`ConfigStore`].
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml   # list of PayrollConfiguration records
/// └── tax.yaml       # list of TaxConfiguration records (with slabs)
/// ```
///
/// # Example
///
/// ```no_run
/// use payrun_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// assert!(!loader.payroll().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    payroll: Vec<PayrollConfiguration>,
    tax: Vec<TaxConfiguration>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if either file is missing and
    /// `ConfigParseError` if a file contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let payroll = Self::load_yaml::<Vec<PayrollConfiguration>>(&path.join("payroll.yaml"))?;
        let tax = Self::load_yaml::<Vec<TaxConfiguration>>(&path.join("tax.yaml"))?;
        Ok(Self { payroll, tax })
    }

    /// Builds a loader from already-constructed records (used by tests and
    /// embedders that do not read files).
    pub fn from_records(
        payroll: Vec<PayrollConfiguration>,
        tax: Vec<TaxConfiguration>,
    ) -> Self {
        Self { payroll, tax }
    }

    /// Loads and parses one YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded payroll configuration records.
    pub fn payroll(&self) -> &[PayrollConfiguration] {
        &self.payroll
    }

    /// Returns the loaded tax configuration records.
    pub fn tax(&self) -> &[TaxConfiguration] {
        &self.tax
    }
}

impl ConfigStore for ConfigLoader {
    fn payroll_configurations(&self) -> Vec<PayrollConfiguration> {
        self.payroll.clone()
    }

    fn tax_configurations(&self) -> Vec<TaxConfiguration> {
        self.tax.clone()
    }
}
