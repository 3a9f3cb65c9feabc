//! Effective configuration resolution.
//!
//! Given a date, the resolver selects the single active
//! [`PayrollConfiguration`] and [`TaxConfiguration`] whose effective ranges
//! contain it. If no record covers the date the resolver degrades to the
//! built-in defaults rather than failing the run; this is a
//! degraded-but-available policy, and the fallback is flagged so the
//! orchestrator can log and audit it.

use chrono::NaiveDate;
use tracing::warn;

use crate::config::{PayrollConfiguration, TaxConfiguration};
use crate::ports::ConfigStore;

/// The configuration pair governing one payroll run.
///
/// Resolved once per run and threaded as an explicit parameter through every
/// computation call, so a run can never observe two different configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfiguration {
    /// The payroll conventions in force.
    pub payroll: PayrollConfiguration,
    /// The statutory tax settings in force.
    pub tax: TaxConfiguration,
    /// True if the payroll configuration fell back to built-in defaults.
    pub payroll_defaulted: bool,
    /// True if the tax configuration fell back to built-in defaults.
    pub tax_defaulted: bool,
}

impl EffectiveConfiguration {
    /// True if either half of the pair came from built-in defaults.
    pub fn degraded(&self) -> bool {
        self.payroll_defaulted || self.tax_defaulted
    }
}

/// Selects the configuration pair in force on the given date.
///
/// Among active records whose range contains the date, the one with the
/// latest `effective_from` wins (the partition invariant should make ties
/// impossible, but overlapping records must not pick an arbitrary winner).
/// A missing record degrades to the built-in default and emits a warning.
pub fn resolve_effective(store: &dyn ConfigStore, date: NaiveDate) -> EffectiveConfiguration {
    let payroll = store
        .payroll_configurations()
        .into_iter()
        .filter(|c| c.covers(date))
        .max_by_key(|c| c.effective_from);
    let payroll_defaulted = payroll.is_none();
    if payroll_defaulted {
        warn!(%date, "no active payroll configuration for date, using built-in defaults");
    }

    let tax = store
        .tax_configurations()
        .into_iter()
        .filter(|c| c.covers(date))
        .max_by_key(|c| c.effective_from);
    let tax_defaulted = tax.is_none();
    if tax_defaulted {
        warn!(%date, "no active tax configuration for date, using built-in defaults");
    }

    EffectiveConfiguration {
        payroll: payroll.unwrap_or_default(),
        tax: tax.unwrap_or_default(),
        payroll_defaulted,
        tax_defaulted,
    }
}
