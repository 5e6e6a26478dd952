//! Position normalization: one longitude to sign and nakshatra coordinates.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::graha::Graha;
use crate::nakshatra::{NakshatraPosition, nakshatra_from_longitude};
use crate::rashi::{SignPosition, rashi_from_longitude};
use crate::util::normalize_360;

/// Sidereal longitude of one body, as supplied by the ephemeris layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Graha,
    /// Sidereal ecliptic longitude in degrees. Any finite value; reduced on use.
    pub longitude: f64,
}

impl PlanetPosition {
    pub const fn new(body: Graha, longitude: f64) -> Self {
        Self { body, longitude }
    }

    /// Sign and nakshatra coordinates of this body.
    pub fn normalized(&self) -> NormalizedPosition {
        normalize(self.longitude)
    }

    /// 1-based sign occupied by this body.
    pub fn sign(&self) -> u8 {
        rashi_from_longitude(self.longitude).sign
    }
}

/// A longitude reduced into [0, 360) with its sign and nakshatra breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPosition {
    pub longitude: f64,
    pub sign: SignPosition,
    pub nakshatra: NakshatraPosition,
}

/// Normalize any longitude to sign and nakshatra coordinates.
///
/// `normalize(x)` and `normalize(x + 360k)` agree for every integer k.
pub fn normalize(longitude_deg: f64) -> NormalizedPosition {
    let lon = normalize_360(longitude_deg);
    let sign = rashi_from_longitude(lon);
    let nakshatra = nakshatra_from_longitude(lon);
    trace!(lon, sign = sign.sign, nakshatra = nakshatra.number, "normalized");
    NormalizedPosition {
        longitude: lon,
        sign,
        nakshatra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_355() {
        let p = normalize(355.0);
        assert_eq!(p.sign.sign, 12);
        assert!((p.sign.degree_in_sign - 25.0).abs() < 1e-10);
        assert_eq!(p.nakshatra.number, 27);
    }

    #[test]
    fn normalize_negative_wraps() {
        let a = normalize(-10.0);
        let b = normalize(350.0);
        assert!((a.longitude - 350.0).abs() < 1e-10);
        assert_eq!(a.sign.sign, b.sign.sign);
        assert_eq!(a.nakshatra.number, b.nakshatra.number);
        assert_eq!(a.nakshatra.pada, b.nakshatra.pada);
    }

    #[test]
    fn normalize_zero_is_ashwini_pada_1() {
        let p = normalize(0.0);
        assert_eq!(p.sign.sign, 1);
        assert_eq!(p.nakshatra.number, 1);
        assert_eq!(p.nakshatra.pada, 1);
        assert!(p.nakshatra.elapsed_fraction.abs() < 1e-12);
    }

    #[test]
    fn planet_position_sign() {
        let p = PlanetPosition::new(Graha::Guru, 245.0);
        assert_eq!(p.sign(), 9);
        assert_eq!(p.normalized().sign.sign, 9);
    }
}
