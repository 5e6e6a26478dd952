//! Mahadasha sequence and the full period tree.

use tracing::debug;

use crate::error::VedicError;
use crate::nakshatra::{NakshatraPosition, nakshatra_from_longitude};
use crate::util::validate_longitude;

use super::balance::birth_balance;
use super::cycle::DashaCycle;
use super::subperiod::build_node;
use super::types::{DashaTimeline, MAX_DASHA_DEPTH};

fn validate_depth(max_depth: u8) -> Result<u8, VedicError> {
    if (1..=MAX_DASHA_DEPTH).contains(&max_depth) {
        Ok(max_depth)
    } else {
        Err(VedicError::InvalidInput("dasha depth must be in 1..=5"))
    }
}

/// Build the period tree for a Moon nakshatra position.
///
/// Mahadashas run from the balance of the starting lord through one full
/// round of the cycle. The starting lord closes the round with the part that
/// had elapsed before birth, so the mahadashas sum to the cycle length; at
/// an elapsed fraction of 0 that closing period is empty and omitted.
pub fn schedule(
    moon: &NakshatraPosition,
    cycle: &DashaCycle,
    max_depth: u8,
) -> Result<DashaTimeline, VedicError> {
    let max_depth = validate_depth(max_depth)?;
    cycle.validate()?;
    let balance = birth_balance(cycle, moon)?;
    debug!(
        cycle = cycle.name,
        nakshatra = moon.number,
        elapsed = moon.elapsed_fraction,
        max_depth,
        "scheduling dasha"
    );

    let n = cycle.lord_order.len();
    let mut mahadashas = Vec::with_capacity(n + 1);
    let mut cursor = 0.0;

    mahadashas.push(build_node(
        cycle,
        balance.start_index,
        cursor,
        balance.balance_years,
        1,
        max_depth,
    ));
    cursor += balance.balance_years;

    for k in 1..n {
        let idx = (balance.start_index + k) % n;
        let years = cycle.lord_years[idx];
        mahadashas.push(build_node(cycle, idx, cursor, years, 1, max_depth));
        cursor += years;
    }

    if balance.elapsed_fraction > 0.0 {
        let remainder = cycle.total_years - cursor;
        if remainder > 0.0 {
            mahadashas.push(build_node(
                cycle,
                balance.start_index,
                cursor,
                remainder,
                1,
                max_depth,
            ));
        }
    }

    Ok(DashaTimeline {
        cycle_name: cycle.name,
        nakshatra: moon.number,
        elapsed_fraction: moon.elapsed_fraction,
        total_years: cycle.total_years,
        max_depth,
        balance_years: balance.balance_years,
        mahadashas,
    })
}

/// Build the period tree straight from the Moon's sidereal longitude.
pub fn schedule_from_moon(
    moon_longitude: f64,
    cycle: &DashaCycle,
    max_depth: u8,
) -> Result<DashaTimeline, VedicError> {
    validate_longitude(moon_longitude)?;
    schedule(&nakshatra_from_longitude(moon_longitude), cycle, max_depth)
}
