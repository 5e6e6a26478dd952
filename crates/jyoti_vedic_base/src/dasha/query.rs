//! Active-period lookup on a built timeline.

use super::types::{DAYS_PER_YEAR, DashaNode, DashaTimeline};

/// Index of the period containing `years`, if any.
pub fn find_active_period(periods: &[DashaNode], years: f64) -> Option<usize> {
    periods.iter().position(|p| p.contains(years))
}

/// The chain of periods active `years_since_birth` after birth, mahadasha first.
///
/// Empty before birth and from the end of the cycle on.
pub fn active_periods(timeline: &DashaTimeline, years_since_birth: f64) -> Vec<&DashaNode> {
    let mut chain = Vec::with_capacity(timeline.max_depth as usize);
    let mut level: &[DashaNode] = &timeline.mahadashas;
    while let Some(idx) = find_active_period(level, years_since_birth) {
        let node = &level[idx];
        chain.push(node);
        level = &node.children;
    }
    chain
}

/// Same as [`active_periods`] for a Julian Date.
pub fn active_periods_at_jd(
    timeline: &DashaTimeline,
    birth_jd: f64,
    query_jd: f64,
) -> Vec<&DashaNode> {
    active_periods(timeline, (query_jd - birth_jd) / DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::cycle::vimshottari;
    use crate::dasha::schedule::schedule;
    use crate::dasha::types::{DashaLevel, DashaLord};
    use crate::graha::Graha;
    use crate::nakshatra::NakshatraPosition;

    fn ashwini_timeline(depth: u8) -> DashaTimeline {
        let moon = NakshatraPosition::from_parts(1, 0.0).unwrap();
        schedule(&moon, &vimshottari(), depth).unwrap()
    }

    #[test]
    fn chain_has_one_node_per_level() {
        let t = ashwini_timeline(3);
        let chain = active_periods(&t, 8.0);
        assert_eq!(chain.len(), 3);
        // Ketu runs 0..7, Shukra 7..27.
        assert_eq!(chain[0].lord, DashaLord::Graha(Graha::Shukra));
        assert_eq!(chain[0].level, DashaLevel::Mahadasha);
        // Shukra-Shukra runs 7..10.333.
        assert_eq!(chain[1].lord, DashaLord::Graha(Graha::Shukra));
        for w in chain.windows(2) {
            assert!(w[0].contains(8.0) && w[1].contains(8.0));
        }
    }

    #[test]
    fn outside_cycle_is_empty() {
        let t = ashwini_timeline(2);
        assert!(active_periods(&t, -0.5).is_empty());
        assert!(active_periods(&t, 120.0).is_empty());
        assert!(active_periods(&t, 500.0).is_empty());
    }

    #[test]
    fn jd_query_matches_years() {
        let t = ashwini_timeline(2);
        let birth_jd = 2451545.0;
        let by_jd = active_periods_at_jd(&t, birth_jd, birth_jd + 1000.0);
        let by_years = active_periods(&t, 1000.0 / DAYS_PER_YEAR);
        assert_eq!(by_jd, by_years);
    }
}
