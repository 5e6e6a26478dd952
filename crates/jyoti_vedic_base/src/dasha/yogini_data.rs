//! Yogini dasha data: 8 yoginis, 36-year cycle.

use crate::graha::Graha;

/// Yogini names (0-indexed).
pub const YOGINI_NAMES: [&str; 8] = [
    "Mangala", "Pingala", "Dhanya", "Bhramari", "Bhadrika", "Ulka", "Siddha", "Sankata",
];

/// Graha ruling each yogini.
pub const YOGINI_GRAHAS: [Graha; 8] = [
    Graha::Chandra,
    Graha::Surya,
    Graha::Guru,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Shani,
    Graha::Shukra,
    Graha::Rahu,
];

/// Periods in years (1..8).
pub const YOGINI_YEARS: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

/// Nakshatra (0-26) to yogini index (0-7).
///
/// For the 1-based nakshatra n, r = (n + 3) mod 8 and the yogini is r - 1,
/// with r = 0 meaning Sankata. Ardra (6) starts at Mangala.
pub const fn yogini_nakshatra_map() -> [u8; 27] {
    let mut map = [0u8; 27];
    let mut i = 0;
    while i < 27 {
        let remainder = ((i + 1 + 3) % 8) as u8;
        map[i] = if remainder == 0 { 7 } else { remainder - 1 };
        i += 1;
    }
    map
}

/// Yogini name for a 0-based index, wrapping modulo 8.
pub fn yogini_name(idx: u8) -> &'static str {
    YOGINI_NAMES[(idx % 8) as usize]
}

/// Graha ruling a yogini, wrapping modulo 8.
pub fn yogini_graha(idx: u8) -> Graha {
    YOGINI_GRAHAS[(idx % 8) as usize]
}
