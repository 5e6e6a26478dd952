//! Core types for dasha (planetary period) calculations.
//!
//! A schedule is a tree: the [`DashaTimeline`] owns the mahadasha nodes,
//! and each [`DashaNode`] owns its sub-periods. Offsets and durations are in
//! years from birth.

use serde::Serialize;

use crate::graha::Graha;

use super::yogini_data::{yogini_graha, yogini_name};

/// Year length used to convert year offsets into Julian Dates.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Deepest supported level (Pranadasha).
pub const MAX_DASHA_DEPTH: u8 = 5;

/// Depth used when the caller does not choose one.
pub const DEFAULT_DASHA_DEPTH: u8 = 3;

/// 5 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
    Sookshmadasha,
    Pranadasha,
}

impl DashaLevel {
    /// Level for a 1-based tree depth (1 = Mahadasha).
    pub const fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Self::Mahadasha),
            2 => Some(Self::Antardasha),
            3 => Some(Self::Pratyantardasha),
            4 => Some(Self::Sookshmadasha),
            5 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    pub const fn depth(self) -> u8 {
        self as u8 + 1
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }
}

/// What rules a dasha period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DashaLord {
    Graha(Graha),
    /// Yogini index, 0..8 (Mangala .. Sankata).
    Yogini(u8),
}

impl DashaLord {
    pub fn name(self) -> &'static str {
        match self {
            Self::Graha(g) => g.name(),
            Self::Yogini(y) => yogini_name(y),
        }
    }

    /// Ruling graha: the graha itself, or the yogini's planet.
    pub fn graha(self) -> Graha {
        match self {
            Self::Graha(g) => g,
            Self::Yogini(y) => yogini_graha(y),
        }
    }
}

impl std::fmt::Display for DashaLord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graha(g) => f.write_str(g.name()),
            Self::Yogini(_) => write!(f, "{} ({})", self.name(), self.graha().name()),
        }
    }
}

/// One period and its sub-periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaNode {
    pub lord: DashaLord,
    pub level: DashaLevel,
    /// 1-based depth (1 = Mahadasha).
    pub depth: u8,
    /// Years from birth to the start of this period.
    pub start_offset: f64,
    pub duration_years: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    /// Years from birth to the end of this period (exclusive).
    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.duration_years
    }

    /// True if `years` since birth falls in `[start, end)`.
    pub fn contains(&self, years: f64) -> bool {
        self.start_offset <= years && years < self.end_offset()
    }

    /// Start and end as Julian Dates, with 365.25-day years.
    pub fn jd_range(&self, birth_jd: f64) -> (f64, f64) {
        (
            birth_jd + self.start_offset * DAYS_PER_YEAR,
            birth_jd + self.end_offset() * DAYS_PER_YEAR,
        )
    }

    /// Sum of the children's durations (0 for a leaf).
    pub fn children_total(&self) -> f64 {
        self.children.iter().map(|c| c.duration_years).sum()
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DashaNode::node_count).sum::<usize>()
    }
}

/// A complete schedule for one cycle, rooted at birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaTimeline {
    pub cycle_name: &'static str,
    /// 1-based birth nakshatra of the Moon.
    pub nakshatra: u8,
    pub elapsed_fraction: f64,
    pub total_years: f64,
    pub max_depth: u8,
    /// Years left in the first mahadasha at birth.
    pub balance_years: f64,
    pub mahadashas: Vec<DashaNode>,
}

impl DashaTimeline {
    /// Sum of the mahadasha durations.
    pub fn total_duration(&self) -> f64 {
        self.mahadashas.iter().map(|n| n.duration_years).sum()
    }

    pub fn node_count(&self) -> usize {
        self.mahadashas.iter().map(DashaNode::node_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_depths() {
        assert_eq!(DashaLevel::from_depth(1), Some(DashaLevel::Mahadasha));
        assert_eq!(DashaLevel::from_depth(5), Some(DashaLevel::Pranadasha));
        assert_eq!(DashaLevel::from_depth(0), None);
        assert_eq!(DashaLevel::from_depth(6), None);
        assert_eq!(DashaLevel::Sookshmadasha.depth(), 4);
    }

    #[test]
    fn yogini_lord_display() {
        assert_eq!(DashaLord::Yogini(0).to_string(), "Mangala (Chandra)");
        assert_eq!(DashaLord::Graha(Graha::Ketu).to_string(), "Ketu");
        assert_eq!(DashaLord::Yogini(7).graha(), Graha::Rahu);
    }

    #[test]
    fn jd_range_uses_julian_years() {
        let node = DashaNode {
            lord: DashaLord::Graha(Graha::Ketu),
            level: DashaLevel::Mahadasha,
            depth: 1,
            start_offset: 2.0,
            duration_years: 7.0,
            children: Vec::new(),
        };
        let (start, end) = node.jd_range(2451545.0);
        assert!((start - (2451545.0 + 730.5)).abs() < 1e-9);
        assert!((end - (2451545.0 + 9.0 * 365.25)).abs() < 1e-9);
        assert!(node.contains(2.0));
        assert!(!node.contains(9.0));
    }
}
