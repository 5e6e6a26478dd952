//! Nakshatra (lunar mansion) computation, 27-fold scheme.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each. Each nakshatra has 4 padas (quarters) of
//! 3 deg 20' each.
//!
//! The elapsed fraction through the current nakshatra anchors dasha birth
//! balances.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::normalize_360;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// The 27 nakshatras from Ashwini to Revati (uniform 13 deg 20' each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// 1-based number (Ashwini=1 .. Revati=27).
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Nakshatra from a 1-based number.
    pub fn from_number(n: u8) -> Result<Self, VedicError> {
        match n {
            1..=27 => Ok(ALL_NAKSHATRAS_27[(n - 1) as usize]),
            _ => Err(VedicError::InvalidInput("nakshatra must be in 1..=27")),
        }
    }
}

/// Position of a longitude within the 27-nakshatra scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraPosition {
    /// The nakshatra.
    pub nakshatra: Nakshatra,
    /// 1-based nakshatra number (1 = Ashwini .. 27 = Revati).
    pub number: u8,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    /// Fraction of the nakshatra span already traversed, [0, 1).
    pub elapsed_fraction: f64,
    /// Decimal degrees within the nakshatra [0.0, 13.333...).
    pub degrees_in_nakshatra: f64,
}

impl NakshatraPosition {
    /// Build a position directly from a nakshatra number and elapsed fraction.
    ///
    /// Used when the caller already holds the Moon's nakshatra rather than its
    /// longitude. `elapsed_fraction` must lie in [0, 1).
    pub fn from_parts(number: u8, elapsed_fraction: f64) -> Result<Self, VedicError> {
        let nakshatra = Nakshatra::from_number(number)?;
        if !(0.0..1.0).contains(&elapsed_fraction) {
            return Err(VedicError::InvalidInput(
                "nakshatra elapsed fraction must be in [0, 1)",
            ));
        }
        let degrees_in_nakshatra = elapsed_fraction * NAKSHATRA_SPAN_27;
        let pada = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3) + 1;
        Ok(Self {
            nakshatra,
            number,
            pada,
            elapsed_fraction,
            degrees_in_nakshatra,
        })
    }

    /// Check the invariants a caller-built position must satisfy.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !(1..=27).contains(&self.number) || self.nakshatra.number() != self.number {
            return Err(VedicError::InvalidInput("nakshatra must be in 1..=27"));
        }
        if !(0.0..1.0).contains(&self.elapsed_fraction) {
            return Err(VedicError::InvalidInput(
                "nakshatra elapsed fraction must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Determine nakshatra and pada from sidereal ecliptic longitude.
///
/// Each nakshatra spans 13 deg 20' (13.3333... deg). Each pada spans 3 deg 20'.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraPosition {
    let lon = normalize_360(sidereal_lon_deg);
    let nak_idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let degrees_in_nakshatra = lon - (nak_idx as f64) * NAKSHATRA_SPAN_27;
    let pada = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3) + 1;
    // Guard against 1.0 from rounding at the very end of a span.
    let elapsed_fraction = (degrees_in_nakshatra / NAKSHATRA_SPAN_27).min(1.0 - f64::EPSILON);

    NakshatraPosition {
        nakshatra: ALL_NAKSHATRAS_27[nak_idx as usize],
        number: nak_idx + 1,
        pada,
        elapsed_fraction,
        degrees_in_nakshatra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nakshatra_indices_sequential() {
        for (i, n) in ALL_NAKSHATRAS_27.iter().enumerate() {
            assert_eq!(n.index() as usize, i);
            assert_eq!(n.number() as usize, i + 1);
            assert!(!n.name().is_empty());
        }
    }

    #[test]
    fn nakshatra_span_correct() {
        assert!((NAKSHATRA_SPAN_27 - 13.333_333_333_333_334).abs() < 1e-10);
        assert!((PADA_SPAN - 3.333_333_333_333_333_5).abs() < 1e-10);
    }

    #[test]
    fn nakshatra_at_0() {
        let pos = nakshatra_from_longitude(0.0);
        assert_eq!(pos.nakshatra, Nakshatra::Ashwini);
        assert_eq!(pos.number, 1);
        assert_eq!(pos.pada, 1);
        assert!(pos.elapsed_fraction.abs() < 1e-12);
    }

    #[test]
    fn nakshatra_padas() {
        assert_eq!(nakshatra_from_longitude(0.0).pada, 1);
        assert_eq!(nakshatra_from_longitude(PADA_SPAN + 0.1).pada, 2);
        assert_eq!(nakshatra_from_longitude(2.0 * PADA_SPAN + 0.1).pada, 3);
        assert_eq!(nakshatra_from_longitude(3.0 * PADA_SPAN + 0.1).pada, 4);
    }

    #[test]
    fn nakshatra_midpoint_fraction() {
        let pos = nakshatra_from_longitude(40.0 + NAKSHATRA_SPAN_27 / 2.0);
        assert_eq!(pos.nakshatra, Nakshatra::Rohini);
        assert!((pos.elapsed_fraction - 0.5).abs() < 1e-10);
    }

    #[test]
    fn nakshatra_negative() {
        // -1 -> 359 deg -> Revati
        let pos = nakshatra_from_longitude(-1.0);
        assert_eq!(pos.nakshatra, Nakshatra::Revati);
        assert_eq!(pos.number, 27);
    }

    #[test]
    fn nakshatra_355_is_revati() {
        assert_eq!(nakshatra_from_longitude(355.0).number, 27);
    }

    #[test]
    fn from_parts_validates() {
        let pos = NakshatraPosition::from_parts(4, 0.6).unwrap();
        assert_eq!(pos.nakshatra, Nakshatra::Rohini);
        assert_eq!(pos.pada, 3);
        assert!(NakshatraPosition::from_parts(0, 0.5).is_err());
        assert!(NakshatraPosition::from_parts(28, 0.5).is_err());
        assert!(NakshatraPosition::from_parts(4, 1.0).is_err());
        assert!(NakshatraPosition::from_parts(4, -0.01).is_err());
        assert!(NakshatraPosition::from_parts(4, f64::NAN).is_err());
    }

    #[test]
    fn validate_catches_hand_built_positions() {
        let mut pos = nakshatra_from_longitude(100.0);
        assert!(pos.validate().is_ok());
        pos.elapsed_fraction = 1.2;
        assert!(pos.validate().is_err());
    }
}
