//! Karana (half-tithi) from the Moon-Sun elongation.
//!
//! A synodic month holds 60 karana slots of 6 degrees. Slot 1 is the fixed
//! Kimstughna; slots 2..=57 cycle the seven movable karanas eight times;
//! slots 58..=60 are the fixed Shakuni, Chatushpada and Naga.

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// Elongation span of one karana.
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

/// Karana slots in a synodic month.
pub const KARANA_SLOTS: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Karana {
    Kimstughna,
    Bava,
    Balava,
    Kaulava,
    Taitila,
    Garaja,
    Vanija,
    Vishti,
    Shakuni,
    Chatushpada,
    Naga,
}

/// The seven movable (chara) karanas in cycle order.
pub const MOVABLE_KARANAS: [Karana; 7] = [
    Karana::Bava,
    Karana::Balava,
    Karana::Kaulava,
    Karana::Taitila,
    Karana::Garaja,
    Karana::Vanija,
    Karana::Vishti,
];

impl Karana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kimstughna => "Kimstughna",
            Self::Bava => "Bava",
            Self::Balava => "Balava",
            Self::Kaulava => "Kaulava",
            Self::Taitila => "Taitila",
            Self::Garaja => "Garaja",
            Self::Vanija => "Vanija",
            Self::Vishti => "Vishti",
            Self::Shakuni => "Shakuni",
            Self::Chatushpada => "Chatushpada",
            Self::Naga => "Naga",
        }
    }

    /// True for the four karanas that occur once a month.
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Self::Kimstughna | Self::Shakuni | Self::Chatushpada | Self::Naga
        )
    }

    /// Karana occupying a 1-based slot (1..=60), or `None` outside that range.
    pub const fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::Kimstughna),
            2..=57 => Some(MOVABLE_KARANAS[((slot - 2) % 7) as usize]),
            58 => Some(Self::Shakuni),
            59 => Some(Self::Chatushpada),
            60 => Some(Self::Naga),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KaranaPosition {
    pub karana: Karana,
    /// 1-based slot in the month (1..=60).
    pub number: u8,
    pub degrees_in_karana: f64,
}

/// Determine the karana from Moon-Sun elongation.
pub fn karana_from_elongation(elongation_deg: f64) -> KaranaPosition {
    let elong = normalize_360(elongation_deg);
    let idx = ((elong / KARANA_SEGMENT_DEG).floor() as u8).min(KARANA_SLOTS - 1);
    let number = idx + 1;
    let karana = match Karana::from_slot(number) {
        Some(k) => k,
        None => Karana::Naga,
    };
    KaranaPosition {
        karana,
        number,
        degrees_in_karana: elong - idx as f64 * KARANA_SEGMENT_DEG,
    }
}
