//! One-shot chart composition over a validated ephemeris input set.
//!
//! [`compose`] runs any subset of the engine components for one chart.
//! Sections not requested are absent from the [`ChartOutput`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arudha::{PadaPlacement, arudha_pada, arudha_padas};
use crate::ashtakavarga::{AshtakavargaMatrix, score};
use crate::config::EngineConfig;
use crate::dasha::{DashaCycleKind, DashaTimeline, schedule_from_moon};
use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::panchang::{PanchangDay, panchang, panchang_with_sunrise};
use crate::position::{NormalizedPosition, PlanetPosition, normalize};
use crate::varga::{VargaChart, varga_chart};

/// Sidereal positions of the nine grahas plus the Ascendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    pub positions: Vec<PlanetPosition>,
    pub ascendant_longitude: f64,
}

impl ChartInput {
    pub fn new(
        positions: Vec<PlanetPosition>,
        ascendant_longitude: f64,
    ) -> Result<Self, VedicError> {
        let input = Self {
            positions,
            ascendant_longitude,
        };
        input.validate()?;
        Ok(input)
    }

    /// Every graha exactly once, every longitude finite.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.ascendant_longitude.is_finite() {
            return Err(VedicError::InvalidInput("ascendant longitude must be finite"));
        }
        if self.positions.iter().any(|p| !p.longitude.is_finite()) {
            return Err(VedicError::InvalidInput("longitude must be finite"));
        }
        for graha in ALL_GRAHAS {
            match self.positions.iter().filter(|p| p.body == graha).count() {
                1 => {}
                0 => return Err(VedicError::InvalidInput("chart input lacks a graha")),
                _ => return Err(VedicError::InvalidInput("chart input repeats a graha")),
            }
        }
        Ok(())
    }

    pub fn position(&self, body: Graha) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    fn longitude(&self, body: Graha) -> Result<f64, VedicError> {
        self.position(body)
            .map(|p| p.longitude)
            .ok_or(VedicError::InvalidInput("chart input lacks a graha"))
    }

    /// 1-based whole sign of the Ascendant.
    pub fn ascendant_sign(&self) -> u8 {
        normalize(self.ascendant_longitude).sign.sign
    }
}

/// Which sections [`compose`] computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartRequest {
    /// Normalized sign/nakshatra position of every graha.
    pub include_positions: bool,
    pub include_vargas: bool,
    /// Divisors to build; empty means the configured defaults.
    pub varga_divisors: Vec<u16>,
    pub include_ashtakavarga: bool,
    pub include_dasha: bool,
    /// Cycles to schedule; empty means the configured default cycle.
    pub dasha_cycles: Vec<DashaCycleKind>,
    /// Overrides the configured depth.
    pub dasha_depth: Option<u8>,
    pub include_arudha: bool,
    /// Houses (1..=12) to resolve; empty means all twelve padas.
    pub arudha_houses: Vec<u8>,
    pub include_panchang: bool,
    /// Local civil sunrise JD; adds the vaar to the panchang.
    pub sunrise_jd: Option<f64>,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            include_positions: true,
            include_vargas: false,
            varga_divisors: Vec::new(),
            include_ashtakavarga: false,
            include_dasha: false,
            dasha_cycles: Vec::new(),
            dasha_depth: None,
            include_arudha: false,
            arudha_houses: Vec::new(),
            include_panchang: false,
            sunrise_jd: None,
        }
    }
}

impl ChartRequest {
    /// Every section with configured defaults.
    pub fn all() -> Self {
        Self {
            include_positions: true,
            include_vargas: true,
            include_ashtakavarga: true,
            include_dasha: true,
            include_arudha: true,
            include_panchang: true,
            ..Self::default()
        }
    }
}

/// Normalized position of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPosition {
    pub body: Graha,
    #[serde(flatten)]
    pub position: NormalizedPosition,
}

/// Result of [`compose`]. Only requested sections are populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOutput {
    pub ascendant: NormalizedPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<BodyPosition>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vargas: Vec<VargaChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ashtakavarga: Option<AshtakavargaMatrix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dashas: Vec<DashaTimeline>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arudha_padas: Vec<PadaPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panchang: Option<PanchangDay>,
}

/// Compute the requested sections of one chart.
pub fn compose(
    input: &ChartInput,
    request: &ChartRequest,
    config: &EngineConfig,
) -> Result<ChartOutput, VedicError> {
    input.validate()?;
    config.validate()?;
    let asc_sign = input.ascendant_sign();
    debug!(asc_sign, ?request, "composing chart");

    let positions = request.include_positions.then(|| {
        input
            .positions
            .iter()
            .map(|p| BodyPosition {
                body: p.body,
                position: p.normalized(),
            })
            .collect()
    });

    let mut vargas = Vec::new();
    if request.include_vargas {
        let divisors = if request.varga_divisors.is_empty() {
            &config.varga.default_divisors
        } else {
            &request.varga_divisors
        };
        for &d in divisors {
            vargas.push(varga_chart(
                &input.positions,
                input.ascendant_longitude,
                d,
                config.varga.variation_for(d),
            )?);
        }
    }

    let ashtakavarga = if request.include_ashtakavarga {
        Some(score(&input.positions, asc_sign)?)
    } else {
        None
    };

    let mut dashas = Vec::new();
    if request.include_dasha {
        let depth = request.dasha_depth.unwrap_or(config.dasha.max_depth);
        let moon = input.longitude(Graha::Chandra)?;
        let default_cycle = [config.dasha.default_cycle];
        let kinds = if request.dasha_cycles.is_empty() {
            &default_cycle[..]
        } else {
            &request.dasha_cycles[..]
        };
        for kind in kinds {
            dashas.push(schedule_from_moon(moon, &kind.cycle(), depth)?);
        }
    }

    let arudha_padas = if !request.include_arudha {
        Vec::new()
    } else if request.arudha_houses.is_empty() {
        arudha_padas(&input.positions, asc_sign)?
    } else {
        request
            .arudha_houses
            .iter()
            .map(|&h| arudha_pada(h, &input.positions, asc_sign))
            .collect::<Result<Vec<_>, _>>()?
    };

    let panchang = if request.include_panchang {
        let sun = input.longitude(Graha::Surya)?;
        let moon = input.longitude(Graha::Chandra)?;
        Some(match request.sunrise_jd {
            Some(jd) => panchang_with_sunrise(sun, moon, jd)?,
            None => panchang(sun, moon)?,
        })
    } else {
        None
    };

    Ok(ChartOutput {
        ascendant: normalize(input.ascendant_longitude),
        positions,
        vargas,
        ashtakavarga,
        dashas,
        arudha_padas,
        panchang,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartInput {
        let lons = [10.0, 130.0, 200.0, 25.0, 245.0, 330.0, 280.0, 75.0, 255.0];
        let positions = ALL_GRAHAS
            .iter()
            .zip(lons)
            .map(|(&g, l)| PlanetPosition::new(g, l))
            .collect();
        ChartInput::new(positions, 95.0).unwrap()
    }

    #[test]
    fn input_validation() {
        let mut p = sample().positions;
        assert!(ChartInput::new(p.clone(), f64::NAN).is_err());
        p.pop();
        assert!(ChartInput::new(p.clone(), 0.0).is_err());
        p.push(PlanetPosition::new(Graha::Surya, 1.0));
        assert!(ChartInput::new(p.clone(), 0.0).is_err());
        p.pop();
        p.push(PlanetPosition::new(Graha::Ketu, f64::INFINITY));
        assert!(ChartInput::new(p, 0.0).is_err());
    }

    #[test]
    fn default_request_only_positions() {
        let out = compose(&sample(), &ChartRequest::default(), &EngineConfig::default()).unwrap();
        assert_eq!(out.positions.as_ref().map(Vec::len), Some(9));
        assert!(out.vargas.is_empty());
        assert!(out.ashtakavarga.is_none());
        assert!(out.dashas.is_empty());
        assert!(out.panchang.is_none());
        assert_eq!(out.ascendant.sign.sign, 4);
    }

    #[test]
    fn all_sections() {
        let out = compose(&sample(), &ChartRequest::all(), &EngineConfig::default()).unwrap();
        assert_eq!(out.vargas.len(), 16);
        assert_eq!(out.ashtakavarga.as_ref().map(|m| m.sav_total()), Some(337));
        assert_eq!(out.dashas.len(), 1);
        assert_eq!(out.dashas[0].cycle_name, "Vimshottari");
        assert_eq!(out.arudha_padas.len(), 12);
        assert_eq!(out.panchang.map(|p| p.tithi.number), Some(11));
    }

    #[test]
    fn explicit_selection() {
        let request = ChartRequest {
            include_positions: false,
            include_vargas: true,
            varga_divisors: vec![9],
            include_dasha: true,
            dasha_cycles: vec![DashaCycleKind::Yogini, DashaCycleKind::Ashtottari],
            dasha_depth: Some(1),
            include_arudha: true,
            arudha_houses: vec![1, 12],
            ..ChartRequest::default()
        };
        let out = compose(&sample(), &request, &EngineConfig::default()).unwrap();
        assert!(out.positions.is_none());
        assert_eq!(out.vargas.len(), 1);
        assert_eq!(out.vargas[0].divisor, 9);
        assert_eq!(out.dashas.len(), 2);
        assert!(out.dashas.iter().all(|t| t.mahadashas.iter().all(|n| n.children.is_empty())));
        assert_eq!(out.arudha_padas.len(), 2);
        assert_eq!(out.arudha_padas[1].pada.label(), "A12");
    }

    #[test]
    fn bad_request_values_fail() {
        let request = ChartRequest {
            include_vargas: true,
            varga_divisors: vec![13],
            ..ChartRequest::default()
        };
        let err = compose(&sample(), &request, &EngineConfig::default()).unwrap_err();
        assert!(err.is_unsupported_scheme());

        let request = ChartRequest {
            include_arudha: true,
            arudha_houses: vec![0],
            ..ChartRequest::default()
        };
        assert!(compose(&sample(), &request, &EngineConfig::default()).is_err());
    }
}
