//! Arudha Pada (bhava reflection) calculations.
//!
//! 12 Arudha Padas: A1 (Arudha Lagna) through A12 (Upapada).
//! Each reflects a house through its lord, counted in whole signs:
//!
//! 1. x = houses from the house sign to the lord's sign (inclusive)
//! 2. raw = x-th sign from the lord
//! 3. If raw is the 1st from the house sign, take the 10th from the house sign;
//!    if raw is the 7th, take the 4th from the house sign.

use serde::Serialize;
use tracing::debug;

use crate::error::VedicError;
use crate::graha::{Graha, rashi_lord};
use crate::position::PlanetPosition;
use crate::rashi::Rashi;
use crate::util::{house_distance, nth_sign_from, validate_sign};

/// House from the input sign that triggers the first exception.
const SAME_SIGN_HOUSE: u8 = 1;
/// Replacement for the same-sign case: 10th from the input sign.
const SAME_SIGN_SHIFT: u8 = 10;
/// House from the input sign that triggers the seventh exception.
const SEVENTH_HOUSE: u8 = 7;
/// Replacement for the seventh case: 4th from the input sign.
const SEVENTH_SHIFT: u8 = 4;

/// Which classical override produced the final sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArudhaException {
    None,
    ShiftFrom1st,
    ShiftFrom7th,
}

/// Full trace of one arudha resolution. All signs are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArudhaResult {
    pub input_house_sign: u8,
    pub lord_sign: u8,
    pub raw_derived_sign: u8,
    /// Position of `raw_derived_sign` counted from the input sign, 1..=12.
    pub house_from_input_sign: u8,
    pub final_sign: u8,
    pub exception_applied: ArudhaException,
}

/// Resolve the arudha of a house sign given the sign its lord occupies.
///
/// Both signs must be in 1..=12.
pub fn resolve(input_house_sign: u8, lord_sign: u8) -> Result<ArudhaResult, VedicError> {
    validate_sign(input_house_sign)?;
    validate_sign(lord_sign)?;

    let x = house_distance(input_house_sign, lord_sign);
    let raw_derived_sign = nth_sign_from(lord_sign, x);
    let house_from_input_sign = house_distance(input_house_sign, raw_derived_sign);

    let (final_sign, exception_applied) = match house_from_input_sign {
        SAME_SIGN_HOUSE => (
            nth_sign_from(input_house_sign, SAME_SIGN_SHIFT),
            ArudhaException::ShiftFrom1st,
        ),
        SEVENTH_HOUSE => (
            nth_sign_from(input_house_sign, SEVENTH_SHIFT),
            ArudhaException::ShiftFrom7th,
        ),
        _ => (raw_derived_sign, ArudhaException::None),
    };

    debug!(
        input_house_sign,
        lord_sign, raw_derived_sign, house_from_input_sign, final_sign, "arudha resolved"
    );

    Ok(ArudhaResult {
        input_house_sign,
        lord_sign,
        raw_derived_sign,
        house_from_input_sign,
        final_sign,
        exception_applied,
    })
}

/// The 12 Arudha Padas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArudhaPada {
    ArudhaLagna, // A1/AL
    DhanaPada,   // A2
    VikramaPada, // A3
    MatriPada,   // A4
    MantraPada,  // A5
    RogaPada,    // A6
    DaraPada,    // A7
    MrityuPada,  // A8
    PitriPada,   // A9
    RajyaPada,   // A10
    LabhaPada,   // A11
    Upapada,     // A12/UL
}

/// All 12 arudha padas in order (A1 through A12).
pub const ALL_ARUDHA_PADAS: [ArudhaPada; 12] = [
    ArudhaPada::ArudhaLagna,
    ArudhaPada::DhanaPada,
    ArudhaPada::VikramaPada,
    ArudhaPada::MatriPada,
    ArudhaPada::MantraPada,
    ArudhaPada::RogaPada,
    ArudhaPada::DaraPada,
    ArudhaPada::MrityuPada,
    ArudhaPada::PitriPada,
    ArudhaPada::RajyaPada,
    ArudhaPada::LabhaPada,
    ArudhaPada::Upapada,
];

impl ArudhaPada {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ArudhaLagna => "Arudha Lagna",
            Self::DhanaPada => "Dhana Pada",
            Self::VikramaPada => "Vikrama Pada",
            Self::MatriPada => "Matri Pada",
            Self::MantraPada => "Mantra Pada",
            Self::RogaPada => "Roga Pada",
            Self::DaraPada => "Dara Pada",
            Self::MrityuPada => "Mrityu Pada",
            Self::PitriPada => "Pitri Pada",
            Self::RajyaPada => "Rajya Pada",
            Self::LabhaPada => "Labha Pada",
            Self::Upapada => "Upapada",
        }
    }

    /// Short label, A1 .. A12.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ArudhaLagna => "A1",
            Self::DhanaPada => "A2",
            Self::VikramaPada => "A3",
            Self::MatriPada => "A4",
            Self::MantraPada => "A5",
            Self::RogaPada => "A6",
            Self::DaraPada => "A7",
            Self::MrityuPada => "A8",
            Self::PitriPada => "A9",
            Self::RajyaPada => "A10",
            Self::LabhaPada => "A11",
            Self::Upapada => "A12",
        }
    }

    /// Bhava number (1-12).
    pub const fn house(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_house(house: u8) -> Result<Self, VedicError> {
        match house {
            1..=12 => Ok(ALL_ARUDHA_PADAS[(house - 1) as usize]),
            _ => Err(VedicError::InvalidInput("house must be in 1..=12")),
        }
    }
}

/// One pada of a whole-sign chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PadaPlacement {
    pub pada: ArudhaPada,
    pub name: &'static str,
    /// Lord of the house sign.
    pub lord: Graha,
    pub resolution: ArudhaResult,
}

/// Arudha of the `house`-th whole-sign house from the Ascendant.
///
/// The house lord's sign is read from `positions`; a chart without that
/// lord is rejected.
pub fn arudha_pada(
    house: u8,
    positions: &[PlanetPosition],
    ascendant_sign: u8,
) -> Result<PadaPlacement, VedicError> {
    let pada = ArudhaPada::from_house(house)?;
    validate_sign(ascendant_sign)?;
    let house_sign = nth_sign_from(ascendant_sign, house);
    let lord = rashi_lord(Rashi::from_number(house_sign)?);
    let lord_position = positions
        .iter()
        .find(|p| p.body == lord)
        .ok_or(VedicError::InvalidInput("chart lacks a house lord"))?;
    let resolution = resolve(house_sign, lord_position.sign())?;
    Ok(PadaPlacement {
        pada,
        name: pada.name(),
        lord,
        resolution,
    })
}

/// All 12 padas, A1 through A12.
pub fn arudha_padas(
    positions: &[PlanetPosition],
    ascendant_sign: u8,
) -> Result<Vec<PadaPlacement>, VedicError> {
    (1..=12)
        .map(|house| arudha_pada(house, positions, ascendant_sign))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventh_exception() {
        let r = resolve(12, 3).unwrap();
        assert_eq!(r.raw_derived_sign, 6);
        assert_eq!(r.house_from_input_sign, 7);
        assert_eq!(r.exception_applied, ArudhaException::ShiftFrom7th);
        assert_eq!(r.final_sign, 3);
    }

    #[test]
    fn same_sign_exception() {
        let r = resolve(1, 1).unwrap();
        assert_eq!(r.raw_derived_sign, 1);
        assert_eq!(r.house_from_input_sign, 1);
        assert_eq!(r.exception_applied, ArudhaException::ShiftFrom1st);
        assert_eq!(r.final_sign, 10);
    }

    #[test]
    fn no_exception() {
        let r = resolve(3, 7).unwrap();
        assert_eq!(r.raw_derived_sign, 11);
        assert_eq!(r.house_from_input_sign, 9);
        assert_eq!(r.exception_applied, ArudhaException::None);
        assert_eq!(r.final_sign, 11);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(resolve(0, 5).is_err());
        assert!(resolve(5, 13).is_err());
    }

    #[test]
    fn exhaustive_final_sign_in_range() {
        for h in 1..=12u8 {
            for l in 1..=12u8 {
                let r = resolve(h, l).unwrap();
                assert!((1..=12).contains(&r.final_sign));
                let fh = house_distance(h, r.final_sign);
                assert_ne!(fh, 1, "h={h} l={l}");
                assert_ne!(fh, 7, "h={h} l={l}");
            }
        }
    }

    #[test]
    fn pada_labels() {
        assert_eq!(ArudhaPada::from_house(12), Ok(ArudhaPada::Upapada));
        assert_eq!(ArudhaPada::Upapada.label(), "A12");
        assert_eq!(ArudhaPada::ArudhaLagna.house(), 1);
        assert!(ArudhaPada::from_house(13).is_err());
    }

    #[test]
    fn pada_needs_lord() {
        // Mesha lagna: lord is Mangal, absent here.
        let positions = [PlanetPosition::new(Graha::Surya, 10.0)];
        assert!(arudha_pada(1, &positions, 1).is_err());
    }
}
