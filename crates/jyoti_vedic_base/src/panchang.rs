//! Panchang day elements from sidereal Sun and Moon longitudes.
//!
//! Tithi and karana come from the elongation (moon - sun), yoga from the sum
//! (sun + moon), nakshatra from the Moon alone. The vaar needs a time and is
//! only filled when a local sunrise JD is supplied.

use serde::Serialize;
use tracing::debug;

use crate::error::VedicError;
use crate::karana::{KaranaPosition, karana_from_elongation};
use crate::nakshatra::{NakshatraPosition, nakshatra_from_longitude};
use crate::tithi::{TithiPosition, tithi_from_elongation};
use crate::util::{normalize_360, validate_longitude};
use crate::vaar::{Vaar, vaar_from_jd};
use crate::yoga::{YogaPosition, yoga_from_sum};

/// The five limbs of the day (four without a sunrise anchor).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanchangDay {
    /// Moon minus Sun, in [0, 360).
    pub elongation: f64,
    pub tithi: TithiPosition,
    /// Moon's nakshatra.
    pub nakshatra: NakshatraPosition,
    pub yoga: YogaPosition,
    pub karana: KaranaPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaar: Option<Vaar>,
}

/// Compute tithi, nakshatra, yoga and karana.
pub fn panchang(sun_longitude: f64, moon_longitude: f64) -> Result<PanchangDay, VedicError> {
    let sun = normalize_360(validate_longitude(sun_longitude)?);
    let moon = normalize_360(validate_longitude(moon_longitude)?);
    let elongation = normalize_360(moon - sun);

    let day = PanchangDay {
        elongation,
        tithi: tithi_from_elongation(elongation),
        nakshatra: nakshatra_from_longitude(moon),
        yoga: yoga_from_sum(sun + moon),
        karana: karana_from_elongation(elongation),
        vaar: None,
    };
    debug!(
        sun,
        moon,
        tithi = day.tithi.number,
        nakshatra = day.nakshatra.number,
        yoga = day.yoga.number,
        karana = day.karana.number,
        "panchang"
    );
    Ok(day)
}

/// [`panchang`] plus the vaar of `sunrise_jd` (local civil time JD).
pub fn panchang_with_sunrise(
    sun_longitude: f64,
    moon_longitude: f64,
    sunrise_jd: f64,
) -> Result<PanchangDay, VedicError> {
    if !sunrise_jd.is_finite() {
        return Err(VedicError::InvalidInput("sunrise jd must be finite"));
    }
    let mut day = panchang(sun_longitude, moon_longitude)?;
    day.vaar = Some(vaar_from_jd(sunrise_jd));
    Ok(day)
}
