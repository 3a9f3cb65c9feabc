//! Configuration record types.
//!
//! [`PayrollConfiguration`] and [`TaxConfiguration`] are time-ranged records
//! maintained by administrators. At most one of each is active for any given
//! date; the built-in `Default` implementations are the degraded-mode
//! fallback used when no record covers a date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payroll computation conventions effective for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollConfiguration {
    /// Administrative name for this record (e.g., "2025").
    pub config_name: String,
    /// First date this configuration applies (inclusive).
    pub effective_from: NaiveDate,
    /// Last date this configuration applies (inclusive); `None` means still
    /// active.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,

    /// Overtime multiplier for ordinary weekdays (e.g., 1.5).
    pub overtime_multiplier: Decimal,
    /// Overtime multiplier for Saturdays and Sundays (e.g., 2.0).
    pub weekend_overtime_multiplier: Decimal,
    /// Overtime multiplier for public holidays (e.g., 2.5).
    pub holiday_overtime_multiplier: Decimal,

    /// Flat deduction per late arrival.
    pub late_deduction_amount: Decimal,

    /// Standard working hours per day.
    pub standard_hours_per_day: Decimal,
    /// Working days in a fortnight under the standard Mon-Fri convention.
    pub working_days_per_fortnight: u32,
    /// Number of fortnightly pay periods in a year.
    pub fortnights_per_year: u32,

    /// Whether final per-period figures are rounded.
    pub round_net_pay: bool,
    /// Rounding precision in decimal places.
    pub rounding_precision: u32,

    /// Whether this record is eligible for resolution.
    pub is_active: bool,
}

impl PayrollConfiguration {
    /// True if this record is active and its effective range contains the
    /// date. An absent `effective_to` means the range is open-ended.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.effective_from <= date
            && self.effective_to.is_none_or(|to| date <= to)
    }
}

impl Default for PayrollConfiguration {
    fn default() -> Self {
        Self {
            config_name: "BUILT_IN_DEFAULT".to_string(),
            effective_from: NaiveDate::MIN,
            effective_to: None,
            overtime_multiplier: Decimal::new(15, 1),
            weekend_overtime_multiplier: Decimal::new(20, 1),
            holiday_overtime_multiplier: Decimal::new(25, 1),
            late_deduction_amount: Decimal::from(50),
            standard_hours_per_day: Decimal::from(8),
            working_days_per_fortnight: 10,
            fortnights_per_year: 26,
            round_net_pay: true,
            rounding_precision: 2,
            is_active: true,
        }
    }
}

/// One progressive tax bracket.
///
/// Slabs for a configuration and residency partition income into
/// contiguous, non-overlapping, ascending ranges with no gaps below the top
/// bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Lower bound of the bracket (inclusive).
    pub income_from: Decimal,
    /// Upper bound of the bracket; `None` means unbounded.
    #[serde(default)]
    pub income_to: Option<Decimal>,
    /// Marginal tax rate for income within this bracket (e.g., 0.22).
    pub rate: Decimal,
    /// Ascending display and evaluation order.
    pub slab_order: u32,
    /// Whether this slab applies to residents.
    pub resident: bool,
}

/// Statutory tax and superannuation settings effective for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfiguration {
    /// Financial year identifier (e.g., "2025").
    pub financial_year: String,
    /// First date this configuration applies (inclusive).
    pub effective_from: NaiveDate,
    /// Last date this configuration applies (inclusive); `None` means still
    /// active.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,

    /// Employee superannuation contribution rate (on basic pay).
    pub super_employee_rate: Decimal,
    /// Employer superannuation contribution rate (on basic pay).
    pub super_employer_rate: Decimal,

    /// Annual income below which residents pay no tax. Informational; the
    /// zero-rate bottom slab is what actually exempts the income.
    pub tax_free_threshold: Decimal,
    /// Residency assumed for employees without an explicit override.
    pub default_resident: bool,
    /// Flat rate applied to all income of non-residents, who bypass the
    /// slab table entirely.
    pub non_resident_flat_rate: Decimal,

    /// ISO currency code for all monetary values.
    pub currency_code: String,
    /// Number of fortnightly pay periods in a year.
    pub fortnights_per_year: u32,
    /// Whether this record is eligible for resolution.
    pub is_active: bool,

    /// The progressive tax brackets owned by this configuration.
    pub slabs: Vec<TaxSlab>,
}

impl TaxConfiguration {
    /// True if this record is active and its effective range contains the
    /// date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.effective_from <= date
            && self.effective_to.is_none_or(|to| date <= to)
    }

    /// Returns the slabs applicable to the given residency, sorted by
    /// `slab_order` ascending.
    pub fn slabs_for(&self, resident: bool) -> Vec<&TaxSlab> {
        let mut slabs: Vec<&TaxSlab> = self
            .slabs
            .iter()
            .filter(|s| s.resident == resident)
            .collect();
        slabs.sort_by_key(|s| s.slab_order);
        slabs
    }
}

impl Default for TaxConfiguration {
    fn default() -> Self {
        Self {
            financial_year: "BUILT_IN_DEFAULT".to_string(),
            effective_from: NaiveDate::MIN,
            effective_to: None,
            super_employee_rate: Decimal::new(6, 2),
            super_employer_rate: Decimal::new(84, 3),
            tax_free_threshold: Decimal::from(12_500),
            default_resident: true,
            non_resident_flat_rate: Decimal::new(22, 2),
            currency_code: "PGK".to_string(),
            fortnights_per_year: 26,
            is_active: true,
            slabs: default_resident_slabs(),
        }
    }
}

/// The built-in resident slab table used when no configuration is active.
fn default_resident_slabs() -> Vec<TaxSlab> {
    let slab = |from: i64, to: Option<i64>, rate: Decimal, order: u32| TaxSlab {
        income_from: Decimal::from(from),
        income_to: to.map(Decimal::from),
        rate,
        slab_order: order,
        resident: true,
    };
    vec![
        slab(0, Some(12_500), Decimal::ZERO, 1),
        slab(12_500, Some(20_000), Decimal::new(22, 2), 2),
        slab(20_000, Some(33_000), Decimal::new(30, 2), 3),
        slab(33_000, Some(70_000), Decimal::new(35, 2), 4),
        slab(70_000, Some(250_000), Decimal::new(40, 2), 5),
        slab(250_000, None, Decimal::new(42, 2), 6),
    ]
}
