//! Shared angle and cyclic sign-counting helpers.
//!
//! All "count the n-th house from a sign" arithmetic in the crate goes
//! through [`house_distance`] and [`nth_sign_from`]. Signs here are 1-based
//! (1 = Mesha .. 12 = Meena) and counting is inclusive: a sign is the 1st
//! house from itself.

use crate::error::VedicError;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-20 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Inclusive house distance from `from` to `to`, both 1-based signs.
///
/// Result is in 1..=12: `house_distance(s, s) == 1`,
/// `house_distance(12, 1) == 2`.
pub const fn house_distance(from: u8, to: u8) -> u8 {
    let f = (from as i16 - 1).rem_euclid(12);
    let t = (to as i16 - 1).rem_euclid(12);
    ((t - f).rem_euclid(12) + 1) as u8
}

/// The `n`-th sign from `sign`, counting inclusively (1-based in and out).
///
/// `nth_sign_from(s, 1) == s`; `nth_sign_from(11, 4) == 2`.
pub const fn nth_sign_from(sign: u8, n: u8) -> u8 {
    ((sign as i16 - 1 + n as i16 - 1).rem_euclid(12) + 1) as u8
}

/// Check a 1-based sign number.
pub fn validate_sign(sign: u8) -> Result<u8, VedicError> {
    if (1..=12).contains(&sign) {
        Ok(sign)
    } else {
        Err(VedicError::InvalidInput("sign must be in 1..=12"))
    }
}

/// Check that a longitude is a finite number.
pub fn validate_longitude(deg: f64) -> Result<f64, VedicError> {
    if deg.is_finite() {
        Ok(deg)
    } else {
        Err(VedicError::InvalidInput("longitude must be finite"))
    }
}
