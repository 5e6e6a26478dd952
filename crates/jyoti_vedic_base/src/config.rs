//! Engine configuration: scheme choices the caller pins up front.
//!
//! Loaded by front ends from TOML or JSON; the library itself never reads
//! files. Every field has a default, so an empty document is a valid config.

use serde::{Deserialize, Serialize};

use crate::dasha::{DEFAULT_DASHA_DEPTH, DashaCycleKind, MAX_DASHA_DEPTH};
use crate::error::VedicError;
use crate::varga::{SHODASHAVARGA, VargaVariation, is_supported};

/// Dasha defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashaConfig {
    /// Tree depth, 1 (Mahadasha only) ..= 5 (down to Pranadasha).
    pub max_depth: u8,
    /// Cycle used when a request names none.
    pub default_cycle: DashaCycleKind,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DASHA_DEPTH,
            default_cycle: DashaCycleKind::Vimshottari,
        }
    }
}

/// Pins a non-default convention for one divisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariationOverride {
    pub divisor: u16,
    pub variation: VargaVariation,
}

/// Divisional chart defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VargaConfig {
    /// Per-divisor conventions; divisors not listed use the default table.
    pub variations: Vec<VariationOverride>,
    /// Divisors computed when a request names none.
    pub default_divisors: Vec<u16>,
}

impl Default for VargaConfig {
    fn default() -> Self {
        Self {
            variations: Vec::new(),
            default_divisors: SHODASHAVARGA.to_vec(),
        }
    }
}

impl VargaConfig {
    /// Convention to use for `divisor`.
    pub fn variation_for(&self, divisor: u16) -> VargaVariation {
        self.variations
            .iter()
            .find(|o| o.divisor == divisor)
            .map(|o| o.variation)
            .unwrap_or_default()
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub dasha: DashaConfig,
    pub varga: VargaConfig,
}

impl EngineConfig {
    /// Check every field against what the engine supports.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !(1..=MAX_DASHA_DEPTH).contains(&self.dasha.max_depth) {
            return Err(VedicError::InvalidInput("dasha.max_depth must be in 1..=5"));
        }
        for (i, o) in self.varga.variations.iter().enumerate() {
            if !is_supported(o.divisor) {
                return Err(VedicError::UnsupportedDivisor(o.divisor));
            }
            if !o.variation.is_applicable_to(o.divisor) {
                return Err(VedicError::VariationNotApplicable {
                    variation: o.variation.name(),
                    divisor: o.divisor,
                });
            }
            if self.varga.variations[..i]
                .iter()
                .any(|prev| prev.divisor == o.divisor)
            {
                return Err(VedicError::InvalidInput(
                    "varga.variations lists a divisor twice",
                ));
            }
        }
        if self.varga.default_divisors.is_empty() {
            return Err(VedicError::InvalidInput(
                "varga.default_divisors must not be empty",
            ));
        }
        if let Some(&d) = self
            .varga
            .default_divisors
            .iter()
            .find(|&&d| !is_supported(d))
        {
            return Err(VedicError::UnsupportedDivisor(d));
        }
        Ok(())
    }
}
