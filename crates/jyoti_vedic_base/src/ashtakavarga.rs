//! Ashtakavarga (benefic points) calculations.
//!
//! Bhinna Ashtakavarga (BAV) rows for the 7 grahas and the Lagna, the
//! Sarvashtakavarga (SAV) column sums, and the two Sodhana reductions.
//!
//! For each row, 8 reference points (7 grahas + Lagna) each grant one bindu
//! to the signs at fixed offsets from themselves.
//!
//! Row totals are the same for every chart:
//! - Sun 48, Moon 49, Mars 39, Mercury 54, Jupiter 56, Venus 52, Saturn 39
//! - Lagna 49 (not part of the SAV)
//! - SAV total 337

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::VedicError;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::position::PlanetPosition;
use crate::util::{house_distance, validate_sign};

/// Bitmask with bit i set for each 1-based offset i.
const fn bits(offsets: &[u8]) -> u16 {
    let mut mask = 0u16;
    let mut i = 0;
    while i < offsets.len() {
        mask |= 1u16 << offsets[i];
        i += 1;
    }
    mask
}

/// RULES[row][reference] = favorable offsets from the reference point's sign.
///
/// row:       0=Sun .. 6=Saturn, 7=Lagna
/// reference: 0=Sun .. 6=Saturn, 7=Lagna
const RULES: [[u16; 8]; 8] = [
    // Sun
    [
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 6, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 5, 6, 9, 10, 11, 12]),
        bits(&[5, 6, 9, 11]),
        bits(&[6, 7, 12]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 4, 6, 10, 11, 12]),
    ],
    // Moon
    [
        bits(&[3, 6, 7, 8, 10, 11]),
        bits(&[1, 3, 6, 7, 10, 11]),
        bits(&[2, 3, 5, 6, 9, 10, 11]),
        bits(&[1, 3, 4, 5, 7, 8, 10, 11]),
        bits(&[1, 4, 7, 8, 10, 11, 12]),
        bits(&[3, 4, 5, 7, 9, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[3, 6, 10, 11]),
    ],
    // Mars
    [
        bits(&[3, 5, 6, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[6, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 6, 10, 11]),
    ],
    // Mercury
    [
        bits(&[5, 6, 9, 11, 12]),
        bits(&[2, 4, 6, 8, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 5, 6, 9, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 2, 4, 6, 8, 10, 11]),
    ],
    // Jupiter
    [
        bits(&[1, 2, 3, 4, 7, 8, 9, 10, 11]),
        bits(&[2, 5, 7, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[1, 2, 4, 5, 6, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 7, 8, 10, 11]),
        bits(&[2, 5, 6, 9, 10, 11]),
        bits(&[3, 5, 6, 12]),
        bits(&[1, 2, 4, 5, 6, 7, 9, 10, 11]),
    ],
    // Venus
    [
        bits(&[8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11, 12]),
        bits(&[3, 4, 6, 9, 11, 12]),
        bits(&[3, 5, 6, 9, 11]),
        bits(&[5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 10, 11]),
        bits(&[3, 4, 5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
    ],
    // Saturn
    [
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[3, 5, 6, 10, 11, 12]),
        bits(&[6, 8, 9, 10, 11, 12]),
        bits(&[5, 6, 11, 12]),
        bits(&[6, 11, 12]),
        bits(&[3, 5, 6, 11]),
        bits(&[1, 3, 4, 6, 10, 11]),
    ],
    // Lagna
    [
        bits(&[3, 4, 6, 10, 11, 12]),
        bits(&[3, 6, 10, 11, 12]),
        bits(&[1, 3, 6, 10, 11]),
        bits(&[1, 2, 4, 6, 8, 10, 11]),
        bits(&[1, 2, 4, 5, 6, 7, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9]),
        bits(&[1, 3, 4, 6, 10, 11]),
        bits(&[3, 6, 10, 11]),
    ],
];

/// Expected row totals, Sun .. Saturn then Lagna.
pub const BAV_TOTALS: [u8; 8] = [48, 49, 39, 54, 56, 52, 39, 49];

/// Expected SAV total (constant for all charts).
pub const SAV_TOTAL: u16 = 337;

/// Index of the Lagna row and reference point.
const LAGNA: usize = 7;

/// A row of the matrix: one of the seven grahas or the Lagna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Contributor {
    Graha(Graha),
    Lagna,
}

/// Matrix rows in order.
pub const CONTRIBUTORS: [Contributor; 8] = [
    Contributor::Graha(Graha::Surya),
    Contributor::Graha(Graha::Chandra),
    Contributor::Graha(Graha::Mangal),
    Contributor::Graha(Graha::Buddh),
    Contributor::Graha(Graha::Guru),
    Contributor::Graha(Graha::Shukra),
    Contributor::Graha(Graha::Shani),
    Contributor::Lagna,
];

impl Contributor {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Graha(g) => g.english_name(),
            Self::Lagna => "Ascendant",
        }
    }
}

/// Bindus per row and sign, with the SAV over the seven graha rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AshtakavargaMatrix {
    /// `bindus[row][sign - 1]`, rows ordered as [`CONTRIBUTORS`], each 0..=8.
    pub bindus: [[u8; 12]; 8],
    /// Column sums over rows 0..7 (Lagna excluded).
    pub sav: [u8; 12],
    /// SAV after Trikona Sodhana.
    pub after_trikona: [u8; 12],
    /// SAV after Trikona then Ekadhipatya Sodhana.
    pub after_ekadhipatya: [u8; 12],
}

impl AshtakavargaMatrix {
    /// Bindus of one row in one 1-based sign.
    pub fn bindu(&self, contributor: Contributor, sign: u8) -> Option<u8> {
        let row = CONTRIBUTORS.iter().position(|&c| c == contributor)?;
        let col = sign.checked_sub(1).filter(|&c| c < 12)?;
        Some(self.bindus[row][col as usize])
    }

    /// Bindu total of one row; `None` for a body outside the eight rows.
    pub fn row_total(&self, contributor: Contributor) -> Option<u8> {
        let row = CONTRIBUTORS.iter().position(|&c| c == contributor)?;
        Some(self.bindus[row].iter().sum())
    }

    pub fn sav_total(&self) -> u16 {
        self.sav.iter().map(|&p| p as u16).sum()
    }
}

/// One BAV row given the 8 reference signs (1-based, Sun .. Saturn, Lagna).
fn bav_row(row: usize, reference_signs: &[u8; 8]) -> [u8; 12] {
    let rules = &RULES[row];
    let mut points = [0u8; 12];
    for sign in 1..=12u8 {
        for (reference, &from) in reference_signs.iter().enumerate() {
            let offset = house_distance(from, sign);
            if (rules[reference] >> offset) & 1 == 1 {
                points[(sign - 1) as usize] += 1;
            }
        }
    }
    points
}

/// Score from 1-based signs of the seven grahas (Sun .. Saturn) and the Lagna.
pub fn score_signs(
    graha_signs: &[u8; 7],
    ascendant_sign: u8,
) -> Result<AshtakavargaMatrix, VedicError> {
    let mut reference_signs = [0u8; 8];
    for (slot, &s) in reference_signs.iter_mut().zip(graha_signs.iter()) {
        *slot = validate_sign(s)?;
    }
    reference_signs[LAGNA] = validate_sign(ascendant_sign)?;

    let mut bindus = [[0u8; 12]; 8];
    for (row, out) in bindus.iter_mut().enumerate() {
        *out = bav_row(row, &reference_signs);
        trace!(row = CONTRIBUTORS[row].name(), points = ?out, "bav row");
    }

    let mut sav = [0u8; 12];
    for row in bindus.iter().take(LAGNA) {
        for (total, &p) in sav.iter_mut().zip(row.iter()) {
            *total += p;
        }
    }
    let after_trikona = trikona_sodhana(&sav);
    let after_ekadhipatya = ekadhipatya_sodhana(&after_trikona);

    Ok(AshtakavargaMatrix {
        bindus,
        sav,
        after_trikona,
        after_ekadhipatya,
    })
}

/// Score a chart: the seven grahas are read from `positions`.
pub fn score(
    positions: &[PlanetPosition],
    ascendant_sign: u8,
) -> Result<AshtakavargaMatrix, VedicError> {
    debug!(ascendant_sign, "scoring ashtakavarga");
    let mut graha_signs = [0u8; 7];
    for (slot, graha) in graha_signs.iter_mut().zip(SAPTA_GRAHAS) {
        let p = positions
            .iter()
            .find(|p| p.body == graha)
            .ok_or(VedicError::InvalidInput("ashtakavarga needs all seven grahas"))?;
        *slot = p.sign();
    }
    score_signs(&graha_signs, ascendant_sign)
}

// ---------------------------------------------------------------------------
// Sodhana (reductions)
// ---------------------------------------------------------------------------

/// Trine groups as 0-based sign indices: fire, earth, air, water.
const TRIKONA_GROUPS: [[usize; 3]; 4] = [[0, 4, 8], [1, 5, 9], [2, 6, 10], [3, 7, 11]];

/// Subtract the minimum of each trine group from its members.
pub fn trikona_sodhana(totals: &[u8; 12]) -> [u8; 12] {
    let mut result = *totals;
    for group in &TRIKONA_GROUPS {
        let min_val = group.iter().map(|&i| result[i]).min().unwrap_or(0);
        for &i in group {
            result[i] -= min_val;
        }
    }
    result
}

/// Mercury (Mithuna, Kanya) and Jupiter (Dhanu, Meena).
///
/// The other dual-sign lords have their pairs in different trines and are
/// already reduced; the luminaries rule one sign each.
const EKADHIPATYA_PAIRS: [[usize; 2]; 2] = [[2, 5], [8, 11]];

/// Subtract the minimum of each same-lord pair, applied after trikona.
pub fn ekadhipatya_sodhana(after_trikona: &[u8; 12]) -> [u8; 12] {
    let mut result = *after_trikona;
    for [a, b] in EKADHIPATYA_PAIRS {
        let min_val = result[a].min(result[b]);
        result[a] -= min_val;
        result[b] -= min_val;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_table_row_totals() {
        for (row, &expected) in BAV_TOTALS.iter().enumerate() {
            let total: u32 = RULES[row].iter().map(|&m| m.count_ones()).sum();
            assert_eq!(total as u8, expected, "row {row}");
        }
    }

    #[test]
    fn rules_table_sav_total() {
        let total: u32 = RULES
            .iter()
            .take(LAGNA)
            .flat_map(|r| r.iter())
            .map(|&m| m.count_ones())
            .sum();
        assert_eq!(total as u16, SAV_TOTAL);
    }

    #[test]
    fn totals_hold_for_all_in_mesha() {
        let m = score_signs(&[1; 7], 1).unwrap();
        for (c, total) in CONTRIBUTORS.into_iter().zip(BAV_TOTALS) {
            assert_eq!(m.row_total(c), Some(total));
        }
        assert_eq!(m.sav_total(), SAV_TOTAL);
    }

    #[test]
    fn totals_hold_for_spread_chart() {
        let m = score_signs(&[4, 8, 1, 12, 6, 10, 3], 2).unwrap();
        for (c, total) in CONTRIBUTORS.into_iter().zip(BAV_TOTALS) {
            assert_eq!(m.row_total(c), Some(total));
        }
        assert_eq!(m.sav_total(), 337);
        assert!(m.bindus.iter().flatten().all(|&b| b <= 8));
    }

    #[test]
    fn row_total_of_nodes_is_none() {
        let m = score_signs(&[1; 7], 1).unwrap();
        assert_eq!(m.row_total(Contributor::Graha(Graha::Rahu)), None);
        assert_eq!(m.row_total(Contributor::Graha(Graha::Ketu)), None);
        assert_eq!(m.row_total(Contributor::Lagna), Some(BAV_TOTALS[7]));
    }

    #[test]
    fn rejects_bad_sign() {
        assert!(score_signs(&[1, 2, 3, 4, 5, 6, 13], 1).is_err());
        assert!(score_signs(&[1; 7], 0).is_err());
    }

    #[test]
    fn bindu_lookup() {
        let m = score_signs(&[1; 7], 1).unwrap();
        // Lagna row: Sun, Moon and Lagna all in Mesha give a point to Mithuna (3rd).
        assert!(m.bindu(Contributor::Lagna, 3).unwrap() >= 3);
        assert_eq!(m.bindu(Contributor::Lagna, 13), None);
        assert_eq!(m.bindu(Contributor::Graha(Graha::Rahu), 1), None);
    }

    #[test]
    fn trikona_sodhana_basic() {
        let totals = [28, 25, 30, 20, 32, 22, 35, 18, 25, 27, 40, 15];
        let r = trikona_sodhana(&totals);
        assert_eq!([r[0], r[4], r[8]], [3, 7, 0]);
        assert_eq!([r[1], r[5], r[9]], [3, 0, 5]);
        assert_eq!([r[2], r[6], r[10]], [0, 5, 10]);
        assert_eq!([r[3], r[7], r[11]], [5, 3, 0]);
    }

    #[test]
    fn ekadhipatya_sodhana_basic() {
        let t = [3, 3, 4, 5, 7, 6, 5, 3, 2, 5, 10, 9];
        let r = ekadhipatya_sodhana(&t);
        assert_eq!([r[2], r[5]], [0, 2]);
        assert_eq!([r[8], r[11]], [0, 7]);
        assert_eq!(r[0], 3);
    }
}
