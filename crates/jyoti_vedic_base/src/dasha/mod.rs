//! Dasha (planetary period) scheduling for fixed-length cycles.
//!
//! Any cycle with a lord order, per-lord years and a nakshatra-to-lord map
//! is supported. Presets: Vimshottari (120 years), Yogini (36), Ashtottari
//! (108). Trees go up to 5 levels (Mahadasha through Pranadasha).

pub mod balance;
pub mod cycle;
pub mod query;
pub mod schedule;
pub mod subperiod;
pub mod types;
pub mod yogini_data;

pub use balance::{BirthBalance, birth_balance};
pub use cycle::{ALL_CYCLE_KINDS, DashaCycle, DashaCycleKind, ashtottari, vimshottari, yogini};
pub use query::{active_periods, active_periods_at_jd, find_active_period};
pub use schedule::{schedule, schedule_from_moon};
pub use subperiod::{build_node, proportional_children, snap_last_child};
pub use types::{
    DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaLord, DashaNode, DashaTimeline,
    MAX_DASHA_DEPTH,
};
pub use yogini_data::{YOGINI_GRAHAS, YOGINI_NAMES, yogini_graha, yogini_name};
