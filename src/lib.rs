//! Sajuvise - Saju four-pillar and Western astrology engine
//!
//! Converts a birth instant into two parallel symbolic models - a Korean
//! four-pillar chart and a Western natal chart - and computes weighted,
//! explainable favorability scores for life events, time windows, and
//! two-person compatibility.
//!
//! All operations are synchronous, pure, CPU-bound functions over
//! immutable static lookup tables; concurrent invocation is safe without
//! locking. Multi-year simulations parallelize their independent per-year
//! snapshots internally.

pub mod bonus;
pub mod calendar;
pub mod cli;
pub mod compat;
pub mod config;
pub mod error;
pub mod models;
pub mod relations;
pub mod scoring;
pub mod simulator;
pub mod western;

pub use bonus::{calculate_tier7_to10_bonus, BonusInput, BonusSummary, IntegratedScoreResult};
pub use calendar::{annual_cycles, compute_profile, iljin_calendar, monthly_cycles};
pub use compat::{analyze_ganhap, analyze_shinsals, GanHapAnalysis, ShinsalAnalysis};
pub use error::{EngineError, Result};
pub use models::{BirthDescriptor, EventType, SajuProfile};
pub use simulator::{
    find_optimal_timing, generate_fortune_snapshot, simulate_decision, simulate_fortune_flow,
    simulate_life_cycle, simulate_monthly_fortune, simulate_scenario,
};
pub use western::{calculate_synastry, compute_chart, SynastryResult, WesternChart};
