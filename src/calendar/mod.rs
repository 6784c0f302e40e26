//! Pillar & cycle calculator
//!
//! Pure calendar arithmetic producing the four pillars and the
//! daeun/seun/wolun/iljin luck cycles. Year and month pillars follow the
//! solar-term boundaries, the day pillar follows the continuous 60-cycle
//! day index, and the hour pillar buckets the birth hour into twelve
//! two-hour branches.

pub mod cycles;
pub mod ganzhi;
pub mod lunar;
pub mod pillars;
pub mod solar_terms;

pub use cycles::{annual_cycles, iljin_calendar, monthly_cycles};
pub use ganzhi::{branch_sibsin, day_ganzhi, stem_sibsin, year_ganzhi};
pub use pillars::{compute_profile, BirthInstant};
