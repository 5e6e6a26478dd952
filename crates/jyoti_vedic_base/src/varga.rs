//! Varga (divisional chart) transformation.
//!
//! Each 30-degree rashi is split into N parts and every part is mapped to a
//! target rashi. The mapping for a divisor is an immutable rule held in a
//! static table:
//!
//! - a progression: per-sign starting rashi plus a step between parts,
//! - an explicit 12 x N table of target rashis,
//! - unequal degree spans (Parashari trimshamsha).
//!
//! The sixteen Shodashavarga divisors follow BPHS: Sun/Moon hora, kendra
//! chaturthamsha, the element and quality starts of D9, D16, D20, D27 and
//! D45, the 5/5/8/7/5 trimshamsha spans, and a shashtiamsha counted from the
//! sign itself. D5, D6 and D8 use their usual Parashari tables. The other
//! extended divisors count by parivritti: the parts run through the zodiac
//! without a break, so sign r starts at `(r * divisor) mod 12`.
//!
//! The convention is always chosen by the caller through [`VargaVariation`];
//! the default is [`VargaVariation::TraditionalParashari`] for every divisor.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::position::PlanetPosition;
use crate::util::{normalize_360, validate_longitude};

// ---------------------------------------------------------------------------
// Start tables (0-based rashi indices)
// ---------------------------------------------------------------------------

/// Every sign starts from itself.
const fn natal_start() -> [u8; 12] {
    let mut s = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        s[i] = i as u8;
        i += 1;
    }
    s
}

/// Sign r starts at `(r * divisor) mod 12`, continuing where sign r-1 ended.
const fn parivritti_start(divisor: u16) -> [u8; 12] {
    let mut s = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        s[i] = ((i * divisor as usize) % 12) as u8;
        i += 1;
    }
    s
}

/// Odd signs start from themselves, even signs from `even_offset` signs ahead.
///
/// Index 0, 2, 4.. are the odd signs in 1-based counting.
const fn increment_start(even_offset: u8) -> [u8; 12] {
    let mut s = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        s[i] = if i % 2 == 0 {
            i as u8
        } else {
            ((i as u8) + even_offset) % 12
        };
        i += 1;
    }
    s
}

/// Start by element: fire, earth, air, water.
const fn element_start(fire: u8, earth: u8, air: u8, water: u8) -> [u8; 12] {
    let by_element = [fire, earth, air, water];
    let mut s = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        s[i] = by_element[i % 4];
        i += 1;
    }
    s
}

/// Start by quality: movable, fixed, dual.
const fn quality_start(movable: u8, fixed: u8, dual: u8) -> [u8; 12] {
    let by_quality = [movable, fixed, dual];
    let mut s = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        s[i] = by_quality[i % 3];
        i += 1;
    }
    s
}

/// Odd signs start at `odd`, even signs at `even`.
const fn parity_start(odd: u8, even: u8) -> [u8; 12] {
    let mut s = [0u8; 12];
    let mut i = 0;
    while i < 12 {
        s[i] = if i % 2 == 0 { odd } else { even };
        i += 1;
    }
    s
}

/// Odd signs count forward from themselves; even signs count backward
/// from their 7th.
const fn saptamsha_even_reverse() -> [u8; 84] {
    let mut cells = [0u8; 84];
    let mut r = 0;
    while r < 12 {
        let mut k = 0;
        while k < 7 {
            cells[r * 7 + k] = if r % 2 == 0 {
                ((r + k) % 12) as u8
            } else {
                ((r + 6 + 12 - k) % 12) as u8
            };
            k += 1;
        }
        r += 1;
    }
    cells
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// How the parts of one rashi map to target rashis.
#[derive(Debug, Clone, Copy)]
enum VargaRule {
    /// Part k of sign r lands on `(start[r] + k * step) mod 12`.
    Progression { start: [u8; 12], step: u8 },
    /// Row-major 12 x `width` table of target rashis.
    Table {
        cells: &'static [u8],
        width: u16,
    },
    /// Unequal parts: `(end_degree, target)` per part, for odd and even signs.
    Spans {
        odd: &'static [(f64, u8)],
        even: &'static [(f64, u8)],
    },
}

struct VargaScheme {
    divisor: u16,
    name: &'static str,
    rule: VargaRule,
}

const fn progression(start: [u8; 12], step: u8) -> VargaRule {
    VargaRule::Progression { start, step }
}

const fn parivritti(divisor: u16) -> VargaRule {
    progression(parivritti_start(divisor), 1)
}

static SCHEMES: [VargaScheme; 34] = [
    VargaScheme { divisor: 1, name: "Rashi", rule: progression(natal_start(), 0) },
    VargaScheme { divisor: 2, name: "Hora", rule: VargaRule::Table { cells: &HORA_SUN_MOON, width: 2 } },
    VargaScheme { divisor: 3, name: "Drekkana", rule: progression(natal_start(), 4) },
    VargaScheme { divisor: 4, name: "Chaturthamsha", rule: progression(natal_start(), 3) },
    VargaScheme { divisor: 5, name: "Panchamsha", rule: VargaRule::Table { cells: &PANCHAMSHA, width: 5 } },
    VargaScheme { divisor: 6, name: "Shashthamsha", rule: progression(parity_start(0, 6), 1) },
    VargaScheme { divisor: 7, name: "Saptamsha", rule: progression(increment_start(6), 1) },
    VargaScheme { divisor: 8, name: "Ashtamsha", rule: progression(quality_start(0, 8, 4), 1) },
    VargaScheme { divisor: 9, name: "Navamsha", rule: progression(element_start(0, 9, 6, 3), 1) },
    VargaScheme { divisor: 10, name: "Dashamsha", rule: progression(increment_start(8), 1) },
    VargaScheme { divisor: 11, name: "Rudramsha", rule: parivritti(11) },
    VargaScheme { divisor: 12, name: "Dwadashamsha", rule: progression(natal_start(), 1) },
    VargaScheme { divisor: 15, name: "Panchadashamsha", rule: parivritti(15) },
    VargaScheme { divisor: 16, name: "Shodashamsha", rule: progression(quality_start(0, 4, 8), 1) },
    VargaScheme { divisor: 18, name: "Ashtadashamsha", rule: parivritti(18) },
    VargaScheme { divisor: 20, name: "Vimshamsha", rule: progression(quality_start(0, 8, 4), 1) },
    VargaScheme { divisor: 21, name: "Ekavimshamsha", rule: parivritti(21) },
    VargaScheme { divisor: 22, name: "Dwavimshamsha", rule: parivritti(22) },
    VargaScheme { divisor: 24, name: "Chaturvimshamsha", rule: progression(parity_start(4, 3), 1) },
    VargaScheme { divisor: 25, name: "Panchavimshamsha", rule: parivritti(25) },
    VargaScheme { divisor: 27, name: "Bhamsha", rule: progression(element_start(0, 3, 6, 9), 1) },
    VargaScheme { divisor: 28, name: "Ashtavimshamsha", rule: parivritti(28) },
    VargaScheme { divisor: 30, name: "Trimshamsha", rule: VargaRule::Spans { odd: &TRIMSHAMSHA_ODD, even: &TRIMSHAMSHA_EVEN } },
    VargaScheme { divisor: 36, name: "Shattrimshamsha", rule: parivritti(36) },
    VargaScheme { divisor: 40, name: "Khavedamsha", rule: progression(parity_start(0, 6), 1) },
    VargaScheme { divisor: 45, name: "Akshavedamsha", rule: progression(quality_start(0, 4, 8), 1) },
    VargaScheme { divisor: 48, name: "Ashtachatvarimsha", rule: parivritti(48) },
    VargaScheme { divisor: 50, name: "Panchashatamsha", rule: parivritti(50) },
    VargaScheme { divisor: 54, name: "Chatushpanchashamsha", rule: parivritti(54) },
    VargaScheme { divisor: 60, name: "Shashtiamsha", rule: progression(natal_start(), 1) },
    VargaScheme { divisor: 72, name: "Dvasaptatiamsha", rule: parivritti(72) },
    VargaScheme { divisor: 81, name: "Navanavamsha", rule: parivritti(81) },
    VargaScheme { divisor: 108, name: "Ashtottaramsha", rule: parivritti(108) },
    VargaScheme { divisor: 144, name: "Dwadashashtottaramsha", rule: parivritti(144) },
];

/// Odd signs: Sun's hora (Simha) then Moon's (Karka). Even signs reversed.
static HORA_SUN_MOON: [u8; 24] = [
    4, 3, 3, 4, 4, 3, 3, 4, 4, 3, 3, 4, //
    4, 3, 3, 4, 4, 3, 3, 4, 4, 3, 3, 4,
];

/// Trimshamsha lords in equal parts: odd signs Mars, Saturn, Jupiter,
/// Mercury, Venus; even signs the reverse, through their other signs.
static PANCHAMSHA: [u8; 60] = [
    0, 10, 8, 2, 6, // Mesha
    1, 5, 11, 9, 7, // Vrishabha
    0, 10, 8, 2, 6, // Mithuna
    1, 5, 11, 9, 7, // Karka
    0, 10, 8, 2, 6, // Simha
    1, 5, 11, 9, 7, // Kanya
    0, 10, 8, 2, 6, // Tula
    1, 5, 11, 9, 7, // Vrischika
    0, 10, 8, 2, 6, // Dhanu
    1, 5, 11, 9, 7, // Makara
    0, 10, 8, 2, 6, // Kumbha
    1, 5, 11, 9, 7, // Meena
];

static SAPTAMSHA_EVEN_REVERSE: [u8; 84] = saptamsha_even_reverse();

/// Mars 5, Saturn 5, Jupiter 8, Mercury 7, Venus 5 degrees.
static TRIMSHAMSHA_ODD: [(f64, u8); 5] = [
    (5.0, 0),   // Mesha
    (10.0, 10), // Kumbha
    (18.0, 8),  // Dhanu
    (25.0, 2),  // Mithuna
    (30.0, 6),  // Tula
];

/// Venus 5, Mercury 7, Jupiter 8, Saturn 5, Mars 5 degrees.
static TRIMSHAMSHA_EVEN: [(f64, u8); 5] = [
    (5.0, 1),   // Vrishabha
    (12.0, 5),  // Kanya
    (20.0, 11), // Meena
    (25.0, 9),  // Makara
    (30.0, 7),  // Vrischika
];

/// The 34 supported divisors, ascending.
pub const SUPPORTED_DIVISORS: [u16; 34] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 15, 16, 18, 20, 21, 22, 24, 25, 27, 28, 30, 36, 40,
    45, 48, 50, 54, 60, 72, 81, 108, 144,
];

/// Standard 16 Shodashavarga charts from BPHS.
pub const SHODASHAVARGA: [u16; 16] = [1, 2, 3, 4, 7, 9, 10, 12, 16, 20, 24, 27, 30, 40, 45, 60];

fn scheme(divisor: u16) -> Result<&'static VargaScheme, VedicError> {
    SCHEMES
        .iter()
        .find(|s| s.divisor == divisor)
        .ok_or(VedicError::UnsupportedDivisor(divisor))
}

/// True if `divisor` has a mapping table.
pub fn is_supported(divisor: u16) -> bool {
    scheme(divisor).is_ok()
}

/// Sanskrit name of the divisional chart, e.g. `Navamsha` for D9.
pub fn varga_name(divisor: u16) -> Result<&'static str, VedicError> {
    scheme(divisor).map(|s| s.name)
}

// ---------------------------------------------------------------------------
// Variation
// ---------------------------------------------------------------------------

/// Convention used for a divisor with competing mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VargaVariation {
    /// The static table of each divisor.
    #[default]
    TraditionalParashari,
    /// D2 only: parivritti hora, sign r runs from `2r` through `2r + 1`.
    HoraParivritti,
    /// D7 only: even signs count backward from their 7th.
    SaptamshaEvenReverse,
    /// D8 only: every sign counts from itself.
    AshtamshaFromSign,
    /// D30 only: thirty equal parts by parivritti.
    TrimshamshaParivritti,
}

/// All variations, default first.
pub const ALL_VARIATIONS: [VargaVariation; 5] = [
    VargaVariation::TraditionalParashari,
    VargaVariation::HoraParivritti,
    VargaVariation::SaptamshaEvenReverse,
    VargaVariation::AshtamshaFromSign,
    VargaVariation::TrimshamshaParivritti,
];

impl VargaVariation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::TraditionalParashari => "TraditionalParashari",
            Self::HoraParivritti => "HoraParivritti",
            Self::SaptamshaEvenReverse => "SaptamshaEvenReverse",
            Self::AshtamshaFromSign => "AshtamshaFromSign",
            Self::TrimshamshaParivritti => "TrimshamshaParivritti",
        }
    }

    /// The one divisor a non-default variation covers; `None` for the default.
    pub const fn divisor(self) -> Option<u16> {
        match self {
            Self::TraditionalParashari => None,
            Self::HoraParivritti => Some(2),
            Self::SaptamshaEvenReverse => Some(7),
            Self::AshtamshaFromSign => Some(8),
            Self::TrimshamshaParivritti => Some(30),
        }
    }

    /// Check if this variation is applicable to the given divisor.
    pub fn is_applicable_to(self, divisor: u16) -> bool {
        match self.divisor() {
            None => is_supported(divisor),
            Some(d) => d == divisor,
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_VARIATIONS
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    fn rule(self) -> Option<VargaRule> {
        match self {
            Self::TraditionalParashari => None,
            Self::HoraParivritti => Some(parivritti(2)),
            Self::SaptamshaEvenReverse => Some(VargaRule::Table {
                cells: &SAPTAMSHA_EVEN_REVERSE,
                width: 7,
            }),
            Self::AshtamshaFromSign => Some(progression(natal_start(), 1)),
            Self::TrimshamshaParivritti => Some(parivritti(30)),
        }
    }
}

impl std::fmt::Display for VargaVariation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn resolve_rule(divisor: u16, variation: VargaVariation) -> Result<VargaRule, VedicError> {
    let base = scheme(divisor)?;
    if !variation.is_applicable_to(divisor) {
        return Err(VedicError::VariationNotApplicable {
            variation: variation.name(),
            divisor,
        });
    }
    Ok(variation.rule().unwrap_or(base.rule))
}

// ---------------------------------------------------------------------------
// Core transformation
// ---------------------------------------------------------------------------

/// Target rashi (0-based) and the position inside the part, scaled to [0, 30).
fn map_part(rule: VargaRule, divisor: u16, rashi_idx: u8, pos_in_rashi: f64) -> (u8, f64) {
    let r = rashi_idx as usize;
    let deg_per_div = 30.0 / divisor as f64;
    let div_idx = ((pos_in_rashi / deg_per_div).floor() as u16).min(divisor - 1);
    let equal_part = |target: u8| {
        let pos_in_div = pos_in_rashi - div_idx as f64 * deg_per_div;
        (target, pos_in_div / deg_per_div * 30.0)
    };
    match rule {
        VargaRule::Progression { start, step } => {
            equal_part(((start[r] as u16 + div_idx * step as u16) % 12) as u8)
        }
        VargaRule::Table { cells, width } => equal_part(cells[r * width as usize + div_idx as usize]),
        VargaRule::Spans { odd, even } => {
            let spans = if r % 2 == 0 { odd } else { even };
            let mut begin = 0.0;
            let mut last = (0, 0.0);
            for &(end, target) in spans {
                if pos_in_rashi < end {
                    return (target, (pos_in_rashi - begin) / (end - begin) * 30.0);
                }
                last = (target, 30.0 - f64::EPSILON);
                begin = end;
            }
            last
        }
    }
}

fn transform(lon: f64, divisor: u16, variation: VargaVariation) -> Result<(u8, f64), VedicError> {
    validate_longitude(lon)?;
    let rule = resolve_rule(divisor, variation)?;
    let lon = normalize_360(lon);
    let rashi_idx = ((lon / 30.0).floor() as u8).min(11);
    let pos_in_rashi = lon - rashi_idx as f64 * 30.0;
    let (target, scaled) = map_part(rule, divisor, rashi_idx, pos_in_rashi);
    trace!(lon, divisor, %variation, target, "varga part mapped");
    Ok((target, scaled))
}

/// Divisional sign (1..=12) of a longitude under the default convention.
pub fn varga(longitude: f64, divisor: u16) -> Result<u8, VedicError> {
    varga_sign(longitude, divisor, VargaVariation::TraditionalParashari)
}

/// Divisional sign (1..=12) of a longitude under an explicit convention.
pub fn varga_sign(
    longitude: f64,
    divisor: u16,
    variation: VargaVariation,
) -> Result<u8, VedicError> {
    transform(longitude, divisor, variation).map(|(target, _)| target + 1)
}

/// Transform a longitude into the divisional chart.
///
/// The position inside the part is scaled up to the full 30 degrees of the
/// target rashi. Returns a longitude in [0, 360).
pub fn varga_longitude(
    longitude: f64,
    divisor: u16,
    variation: VargaVariation,
) -> Result<f64, VedicError> {
    let (target, scaled) = transform(longitude, divisor, variation)?;
    Ok(normalize_360(target as f64 * 30.0 + scaled))
}

// ---------------------------------------------------------------------------
// Whole chart
// ---------------------------------------------------------------------------

/// Divisional sign of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VargaPlacement {
    pub body: Graha,
    /// 1-based divisional sign.
    pub sign: u8,
    /// Longitude inside the divisional chart.
    pub longitude: f64,
}

/// A full divisional chart: every body plus the Ascendant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VargaChart {
    pub divisor: u16,
    pub name: &'static str,
    pub variation: VargaVariation,
    /// 1-based divisional sign of the Ascendant.
    pub ascendant: u8,
    pub placements: Vec<VargaPlacement>,
}

impl VargaChart {
    /// Divisional sign of `body`, if it was in the input set.
    pub fn sign_of(&self, body: Graha) -> Option<u8> {
        self.placements
            .iter()
            .find(|p| p.body == body)
            .map(|p| p.sign)
    }
}

/// Build the divisional chart for a set of positions and an Ascendant.
pub fn varga_chart(
    positions: &[PlanetPosition],
    ascendant_longitude: f64,
    divisor: u16,
    variation: VargaVariation,
) -> Result<VargaChart, VedicError> {
    debug!(divisor, %variation, bodies = positions.len(), "building varga chart");
    let name = varga_name(divisor)?;
    let ascendant = varga_sign(ascendant_longitude, divisor, variation)?;
    let placements = positions
        .iter()
        .map(|p| {
            let (target, scaled) = transform(p.longitude, divisor, variation)?;
            Ok(VargaPlacement {
                body: p.body,
                sign: target + 1,
                longitude: normalize_360(target as f64 * 30.0 + scaled),
            })
        })
        .collect::<Result<Vec<_>, VedicError>>()?;
    Ok(VargaChart {
        divisor,
        name,
        variation,
        ascendant,
        placements,
    })
}
