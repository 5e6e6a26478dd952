//! Birth balance: how much of the first period is left at birth.
//!
//! Computed from the Moon's position within its nakshatra. The nakshatra
//! selects the starting lord; the untraversed fraction of the nakshatra is
//! the fraction of that lord's period still to run.

use crate::error::VedicError;
use crate::nakshatra::NakshatraPosition;

use super::cycle::DashaCycle;
use super::types::DashaLord;

/// Starting lord and remaining years at birth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthBalance {
    /// Index of the starting lord in the cycle's lord order.
    pub start_index: usize,
    pub lord: DashaLord,
    /// Full period of the starting lord, in years.
    pub full_years: f64,
    /// `full_years * (1 - elapsed_fraction)`.
    pub balance_years: f64,
    pub elapsed_fraction: f64,
}

/// Compute the birth balance for a Moon nakshatra position.
pub fn birth_balance(
    cycle: &DashaCycle,
    moon: &NakshatraPosition,
) -> Result<BirthBalance, VedicError> {
    moon.validate()?;
    let start_index = cycle.starting_index(moon.number)?;
    let full_years = cycle.lord_years[start_index];
    Ok(BirthBalance {
        start_index,
        lord: cycle.lord_order[start_index],
        full_years,
        balance_years: full_years * (1.0 - moon.elapsed_fraction),
        elapsed_fraction: moon.elapsed_fraction,
    })
}
