//! Progressive tax calculation.
//!
//! Tax is computed on *annualized* income by marginal-bracket integration
//! over the configured slab table, then divided back to a per-period figure
//! by the caller. All arithmetic is `Decimal`; rounding happens exactly
//! once, at the final per-period figure, never mid-calculation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::TaxConfiguration;

/// Computes the annual tax owed on an annualized income.
///
/// For residents, each slab whose lower bound the income exceeds
/// contributes `(min(income, income_to) - income_from) * rate`, with an
/// unbounded top slab treated as reaching the income itself. Slabs are
/// evaluated in `slab_order`; the data-model invariant guarantees they are
/// contiguous and non-overlapping.
///
/// Non-residents bypass the slab table entirely and pay the configured flat
/// rate on all income. Residency selects the calculation mode, not a slab
/// subset.
///
/// # Example
///
/// ```
/// use payrun_engine::calculation::annual_tax;
/// use payrun_engine::config::TaxConfiguration;
/// use rust_decimal::Decimal;
///
/// let config = TaxConfiguration::default();
/// let tax = annual_tax(Decimal::from(26_000), &config, true);
/// // (20,000-12,500)*0.22 + (26,000-20,000)*0.30
/// assert_eq!(tax, Decimal::from(3_450));
/// ```
pub fn annual_tax(annual_income: Decimal, config: &TaxConfiguration, resident: bool) -> Decimal {
    if annual_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    if !resident {
        return annual_income * config.non_resident_flat_rate;
    }

    let mut tax = Decimal::ZERO;
    for slab in config.slabs_for(true) {
        if annual_income <= slab.income_from {
            continue;
        }
        let upper = match slab.income_to {
            Some(to) if annual_income >= to => to,
            _ => annual_income,
        };
        let taxable_in_slab = upper - slab.income_from;
        if taxable_in_slab > Decimal::ZERO {
            tax += taxable_in_slab * slab.rate;
        }
    }
    tax
}

/// Computes the per-period withholding for an annualized income.
///
/// Divides the annual figure by `fortnights_per_year` and, when a precision
/// is given, applies the configured rounding once, here. `None` leaves the
/// figure unrounded for configurations that disable net-pay rounding.
pub fn per_period_tax(
    annual_income: Decimal,
    config: &TaxConfiguration,
    resident: bool,
    precision: Option<u32>,
) -> Decimal {
    let annual = annual_tax(annual_income, config, resident);
    let per_period = annual / Decimal::from(config.fortnights_per_year.max(1));
    match precision {
        Some(dp) => per_period.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => per_period,
    }
}
