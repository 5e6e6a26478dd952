//! Vedic chart computations over sidereal longitudes.
//!
//! This crate provides:
//! - Sign, nakshatra and pada normalization of any longitude
//! - Divisional charts (34 vargas) with selectable conventions
//! - Arudha padas with the two classical exceptions
//! - Bhinnashtakavarga / Sarvashtakavarga scoring and sodhana
//! - Dasha period trees for Vimshottari, Yogini, Ashtottari or custom cycles
//! - Panchang elements (tithi, nakshatra, yoga, karana, vaar)
//!
//! Every function is pure: longitudes come in already sidereal, results go
//! out as plain serializable values. No I/O, no shared state.

pub mod arudha;
pub mod ashtakavarga;
pub mod chart;
pub mod config;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod karana;
pub mod nakshatra;
pub mod panchang;
pub mod position;
pub mod rashi;
pub mod tithi;
pub mod util;
pub mod vaar;
pub mod varga;
pub mod yoga;

pub use arudha::{
    ALL_ARUDHA_PADAS, ArudhaException, ArudhaPada, ArudhaResult, PadaPlacement, arudha_pada,
    arudha_padas, resolve,
};
pub use ashtakavarga::{
    AshtakavargaMatrix, BAV_TOTALS, CONTRIBUTORS, Contributor, SAV_TOTAL, ekadhipatya_sodhana,
    score, score_signs, trikona_sodhana,
};
pub use chart::{BodyPosition, ChartInput, ChartOutput, ChartRequest, compose};
pub use config::{DashaConfig, EngineConfig, VargaConfig, VariationOverride};
pub use dasha::{
    DashaCycle, DashaCycleKind, DashaLevel, DashaLord, DashaNode, DashaTimeline, active_periods,
    schedule, schedule_from_moon,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS, rashi_lord};
pub use karana::{KARANA_SEGMENT_DEG, Karana, KaranaPosition, karana_from_elongation};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraPosition, nakshatra_from_longitude,
};
pub use panchang::{PanchangDay, panchang, panchang_with_sunrise};
pub use position::{NormalizedPosition, PlanetPosition, normalize};
pub use rashi::{ALL_RASHIS, Dms, Rashi, SignPosition, deg_to_dms, dms_to_deg, rashi_from_longitude};
pub use tithi::{Paksha, TITHI_SEGMENT_DEG, Tithi, TithiPosition, tithi_from_elongation};
pub use util::{house_distance, normalize_360, nth_sign_from};
pub use vaar::{Vaar, vaar_from_jd};
pub use varga::{
    SHODASHAVARGA, SUPPORTED_DIVISORS, VargaChart, VargaPlacement, VargaVariation, varga,
    varga_chart, varga_longitude, varga_sign,
};
pub use yoga::{YOGA_SEGMENT_DEG, Yoga, YogaPosition, yoga_from_sum};
