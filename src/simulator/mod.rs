//! Fortune simulator
//!
//! Thin orchestrations over the pillar calculator, interaction engine,
//! weight calculator and bonus engine, repeated across a timeline:
//! yearly flows, monthly breakdowns, life-cycle phases, and
//! scenario/decision comparison. Per-period snapshots are independent and
//! computed in parallel.

pub mod flow;
pub mod lifecycle;
pub mod snapshot;
pub mod timing;

pub use flow::{simulate_fortune_flow, FortuneFlow, OverallTrend, TurningPoint};
pub use lifecycle::{simulate_life_cycle, LifeCycleResult, LifePhase};
pub use snapshot::{
    generate_fortune_snapshot, AreaFortune, FortuneSnapshot, LifeArea, SnapshotOptions, TimePoint,
    Trend,
};
pub use timing::{
    find_optimal_timing, simulate_decision, simulate_monthly_fortune, simulate_scenario,
    DecisionResult, ScenarioOutcome, ScenarioSpec,
};
