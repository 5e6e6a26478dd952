//! Error types for Vedic calculations.

use thiserror::Error;

/// Errors from Vedic base calculations.
///
/// Every public operation either returns a valid result or one of these.
/// Out-of-domain values are reported, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Out-of-domain numeric input (sign outside 1..12, fraction outside [0, 1), ...).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Divisional chart divisor that has no mapping table.
    #[error("unsupported varga divisor: D{0}")]
    UnsupportedDivisor(u16),
    /// Varga variation requested for a divisor it does not cover.
    #[error("varga variation {variation} does not apply to D{divisor}")]
    VariationNotApplicable {
        variation: &'static str,
        divisor: u16,
    },
    /// Unknown or internally inconsistent dasha cycle configuration.
    #[error("unsupported dasha cycle: {0}")]
    UnsupportedCycle(String),
}

impl VedicError {
    /// True for the unsupported-scheme family (divisor, variation, cycle).
    pub fn is_unsupported_scheme(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedDivisor(_)
                | Self::VariationNotApplicable { .. }
                | Self::UnsupportedCycle(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            VedicError::InvalidInput("sign must be 1..12").to_string(),
            "invalid input: sign must be 1..12"
        );
        assert_eq!(
            VedicError::UnsupportedDivisor(13).to_string(),
            "unsupported varga divisor: D13"
        );
        assert_eq!(
            VedicError::VariationNotApplicable {
                variation: "HoraParivritti",
                divisor: 9
            }
            .to_string(),
            "varga variation HoraParivritti does not apply to D9"
        );
    }

    #[test]
    fn scheme_family() {
        assert!(VedicError::UnsupportedDivisor(0).is_unsupported_scheme());
        assert!(VedicError::UnsupportedCycle("x".into()).is_unsupported_scheme());
        assert!(!VedicError::InvalidInput("x").is_unsupported_scheme());
    }
}
