//! Tier 7–10 bonus engine
//!
//! Four independent calculators fused into one bounded, confidence-scored
//! bonus: daily and hourly Saju signals (tier 7), Western return and
//! eclipse themes (tier 8), geokguk and yongsin affinity (tier 9), and the
//! integration layer with cross-validation (tier 10).
//!
//! Each sub-calculator runs behind its own error boundary: a failure in
//! one leaves its output field empty and never aborts the aggregate call.

pub mod tier7;
pub mod tier8;
pub mod tier9;

mod integrate;

pub use integrate::{
    calculate_tier7_to10_bonus, integrate_tiers, BonusInput, BonusSummary, CrossValidation,
    IntegratedScoreResult, SubScore, Tier7Result, Tier8Result, Tier9Result,
};

use crate::models::{EventType, Sibsin};

/// Sibsin the event type favors in a target period.
pub(crate) fn favorable_sibsin(event: EventType) -> &'static [Sibsin] {
    match event {
        EventType::Marriage => &[Sibsin::JeongGwan, Sibsin::JeongJae, Sibsin::JeongIn],
        EventType::Investment => &[Sibsin::PyeonJae, Sibsin::JeongJae, Sibsin::SikSin],
        EventType::Move => &[Sibsin::PyeonIn, Sibsin::SikSin],
        EventType::JobChange => &[Sibsin::JeongGwan, Sibsin::PyeonGwan, Sibsin::JeongIn],
        EventType::BusinessOpen => &[Sibsin::SikSin, Sibsin::PyeonJae],
        EventType::Exam => &[Sibsin::JeongIn, Sibsin::SikSin, Sibsin::JeongGwan],
        EventType::Travel => &[Sibsin::SikSin, Sibsin::PyeonIn],
    }
}

/// Sibsin the event type is sensitive to.
pub(crate) fn unfavorable_sibsin(event: EventType) -> &'static [Sibsin] {
    match event {
        EventType::Marriage => &[Sibsin::SangGwan, Sibsin::GeopJae],
        EventType::Investment => &[Sibsin::GeopJae, Sibsin::BiGyeon],
        EventType::Move => &[Sibsin::PyeonGwan],
        EventType::JobChange => &[Sibsin::SangGwan],
        EventType::BusinessOpen => &[Sibsin::PyeonIn, Sibsin::GeopJae],
        EventType::Exam => &[Sibsin::PyeonJae, Sibsin::SangGwan],
        EventType::Travel => &[Sibsin::PyeonGwan],
    }
}
