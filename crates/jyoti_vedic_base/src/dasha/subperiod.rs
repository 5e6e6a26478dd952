//! Proportional sub-period generation.
//!
//! A period of duration D ruled by lord L is split across every lord of the
//! cycle, starting from L: child duration = D * child_years / total_years.

use super::cycle::DashaCycle;
use super::types::{DashaLevel, DashaNode};

/// Snap the last duration so the durations sum to `parent_duration`.
pub fn snap_last_child(durations: &mut [f64], parent_duration: f64) {
    if let Some((last, rest)) = durations.split_last_mut() {
        *last = parent_duration - rest.iter().sum::<f64>();
    }
}

/// Build one node and, while `depth < max_depth`, its sub-periods.
pub fn build_node(
    cycle: &DashaCycle,
    lord_index: usize,
    start_offset: f64,
    duration_years: f64,
    depth: u8,
    max_depth: u8,
) -> DashaNode {
    let children = if depth < max_depth {
        proportional_children(cycle, lord_index, start_offset, duration_years, depth + 1, max_depth)
    } else {
        Vec::new()
    };
    DashaNode {
        lord: cycle.lord_order[lord_index],
        level: DashaLevel::from_depth(depth).unwrap_or(DashaLevel::Pranadasha),
        depth,
        start_offset,
        duration_years,
        children,
    }
}

/// Children of a period ruled by `parent_index`, cycling from the parent's lord.
pub fn proportional_children(
    cycle: &DashaCycle,
    parent_index: usize,
    parent_start: f64,
    parent_duration: f64,
    child_depth: u8,
    max_depth: u8,
) -> Vec<DashaNode> {
    let n = cycle.lord_order.len();
    let mut durations: Vec<f64> = (0..n)
        .map(|k| parent_duration * cycle.lord_years[(parent_index + k) % n] / cycle.total_years)
        .collect();
    snap_last_child(&mut durations, parent_duration);

    let mut cursor = parent_start;
    durations
        .into_iter()
        .enumerate()
        .map(|(k, duration)| {
            let node = build_node(
                cycle,
                (parent_index + k) % n,
                cursor,
                duration,
                child_depth,
                max_depth,
            );
            cursor += duration;
            node
        })
        .collect()
}
