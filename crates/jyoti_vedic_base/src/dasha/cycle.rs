//! Fixed-length dasha cycle configurations.
//!
//! A cycle is a lord order, each lord's full period in years, and a mapping
//! from the 27 nakshatras to the starting lord. Presets cover Vimshottari,
//! Yogini and Ashtottari; callers may build their own and validate it.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;

use super::types::DashaLord;
use super::yogini_data::{YOGINI_YEARS, yogini_nakshatra_map};

/// Built-in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaCycleKind {
    #[default]
    Vimshottari,
    Yogini,
    Ashtottari,
}

/// All built-in cycles.
pub const ALL_CYCLE_KINDS: [DashaCycleKind; 3] = [
    DashaCycleKind::Vimshottari,
    DashaCycleKind::Yogini,
    DashaCycleKind::Ashtottari,
];

impl DashaCycleKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vimshottari => "Vimshottari",
            Self::Yogini => "Yogini",
            Self::Ashtottari => "Ashtottari",
        }
    }

    /// Numeric system code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Vimshottari => 0,
            Self::Ashtottari => 1,
            Self::Yogini => 10,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, VedicError> {
        ALL_CYCLE_KINDS
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or_else(|| VedicError::UnsupportedCycle(format!("code {code}")))
    }

    /// Look up by name (case-insensitive) or by numeric code.
    pub fn from_name(name: &str) -> Result<Self, VedicError> {
        let trimmed = name.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code);
        }
        ALL_CYCLE_KINDS
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| VedicError::UnsupportedCycle(trimmed.to_string()))
    }

    /// The preset configuration for this cycle.
    pub fn cycle(self) -> DashaCycle {
        match self {
            Self::Vimshottari => vimshottari(),
            Self::Yogini => yogini(),
            Self::Ashtottari => ashtottari(),
        }
    }
}

impl std::str::FromStr for DashaCycleKind {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Configuration of one fixed-length dasha cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaCycle {
    pub name: &'static str,
    /// Lords in period order.
    pub lord_order: Vec<DashaLord>,
    /// Full period in years for each lord of `lord_order`.
    pub lord_years: Vec<f64>,
    /// Sum of `lord_years`.
    pub total_years: f64,
    /// Nakshatra (0-26) to `lord_order` index.
    pub nakshatra_map: [u8; 27],
}

impl DashaCycle {
    /// Build a cycle; `total_years` is the sum of `lord_years`.
    pub fn new(
        name: &'static str,
        lord_order: Vec<DashaLord>,
        lord_years: Vec<f64>,
        nakshatra_map: [u8; 27],
    ) -> Result<Self, VedicError> {
        let total_years = lord_years.iter().sum();
        let cycle = Self {
            name,
            lord_order,
            lord_years,
            total_years,
            nakshatra_map,
        };
        cycle.validate()?;
        Ok(cycle)
    }

    /// Check that the cycle is internally consistent.
    pub fn validate(&self) -> Result<(), VedicError> {
        let bad = |why: &str| Err(VedicError::UnsupportedCycle(format!("{}: {why}", self.name)));
        let n = self.lord_order.len();
        if n == 0 {
            return bad("no lords");
        }
        if self.lord_years.len() != n {
            return bad("lord and year counts differ");
        }
        if self
            .lord_years
            .iter()
            .any(|y| !y.is_finite() || *y <= 0.0)
        {
            return bad("lord years must be positive");
        }
        let sum: f64 = self.lord_years.iter().sum();
        if !self.total_years.is_finite() || (sum - self.total_years).abs() > 1e-9 * sum.max(1.0) {
            return bad("total years do not match lord years");
        }
        if self.nakshatra_map.iter().any(|&i| i as usize >= n) {
            return bad("nakshatra map points past the lord order");
        }
        for (i, lord) in self.lord_order.iter().enumerate() {
            if self.lord_order[..i].contains(lord) {
                return bad("lord listed twice");
            }
        }
        Ok(())
    }

    /// Index into `lord_order` of the lord ruling a 1-based nakshatra.
    pub fn starting_index(&self, nakshatra: u8) -> Result<usize, VedicError> {
        match nakshatra {
            1..=27 => Ok(self.nakshatra_map[(nakshatra - 1) as usize] as usize),
            _ => Err(VedicError::InvalidInput("nakshatra must be in 1..=27")),
        }
    }

    /// Index of `lord` in `lord_order`.
    pub fn position(&self, lord: DashaLord) -> Option<usize> {
        self.lord_order.iter().position(|&l| l == lord)
    }
}

// ---------------------------------------------------------------------------
// Vimshottari (120 years, 9 grahas)
// ---------------------------------------------------------------------------

const VIMSHOTTARI_GRAHAS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Ashwini starts at Ketu; the nine lords repeat three times.
const fn vimshottari_nakshatra_map() -> [u8; 27] {
    let mut map = [0u8; 27];
    let mut i = 0;
    while i < 27 {
        map[i] = (i % 9) as u8;
        i += 1;
    }
    map
}

pub fn vimshottari() -> DashaCycle {
    DashaCycle {
        name: "Vimshottari",
        lord_order: VIMSHOTTARI_GRAHAS.map(DashaLord::Graha).to_vec(),
        lord_years: VIMSHOTTARI_YEARS.to_vec(),
        total_years: 120.0,
        nakshatra_map: vimshottari_nakshatra_map(),
    }
}

// ---------------------------------------------------------------------------
// Yogini (36 years, 8 yoginis)
// ---------------------------------------------------------------------------

pub fn yogini() -> DashaCycle {
    DashaCycle {
        name: "Yogini",
        lord_order: (0u8..8).map(DashaLord::Yogini).collect(),
        lord_years: YOGINI_YEARS.to_vec(),
        total_years: 36.0,
        nakshatra_map: yogini_nakshatra_map(),
    }
}

// ---------------------------------------------------------------------------
// Ashtottari (108 years, 8 grahas, no Ketu)
// ---------------------------------------------------------------------------

const ASHTOTTARI_GRAHAS: [Graha; 8] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Shani,
    Graha::Guru,
    Graha::Rahu,
    Graha::Shukra,
];

const ASHTOTTARI_YEARS: [f64; 8] = [6.0, 15.0, 8.0, 17.0, 10.0, 19.0, 12.0, 21.0];

/// Groups of 3 and 4 nakshatras, Surya starting at Ardra.
const ASHTOTTARI_NAK_MAP: [u8; 27] = [
    6, 6, 7, 7, 7, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 5, 5, 5, 5, 6,
];

pub fn ashtottari() -> DashaCycle {
    DashaCycle {
        name: "Ashtottari",
        lord_order: ASHTOTTARI_GRAHAS.map(DashaLord::Graha).to_vec(),
        lord_years: ASHTOTTARI_YEARS.to_vec(),
        total_years: 108.0,
        nakshatra_map: ASHTOTTARI_NAK_MAP,
    }
}
