//! Tier 9: structural affinity signals
//!
//! The geokguk calculator scores how a chart pattern sits with an event
//! type from a fixed 12×7 signed table. The yongsin-depth calculator
//! compares the target period's yearly and monthly stem elements against
//! the profile's favorable/unfavorable element lists.

use crate::bonus::integrate::SubScore;
use crate::calendar::cycles::monthly_cycles;
use crate::calendar::ganzhi::year_ganzhi;
use crate::error::Result;
use crate::models::{EventType, Geokguk, SajuProfile};

/// Yongsin-depth confidence is fixed.
pub const YONGSIN_CONFIDENCE: f64 = 0.9;
const GEOKGUK_CONFIDENCE: f64 = 0.8;

/// Signed affinity and reason for a pattern/event pairing.
///
/// The table is exhaustive over the twelve patterns; an entry of 0.0 with
/// an empty reason marks a neutral pairing.
fn geokguk_affinity(geokguk: Geokguk, event: EventType) -> (f64, &'static str) {
    use EventType::*;
    use Geokguk::*;
    match (geokguk, event) {
        (JeongGwan, Marriage) => (10.0, "정관격 favors formal commitments"),
        (JeongGwan, JobChange) => (8.0, "정관격 thrives on structured advancement"),
        (JeongGwan, Investment) => (-4.0, "정관격 resists speculative positions"),
        (JeongJae, Investment) => (8.0, "정재격 manages steady accumulation well"),
        (JeongJae, Marriage) => (6.0, "정재격 favors stable partnership"),
        (JeongJae, Travel) => (-3.0, "정재격 prefers settled ground"),
        (PyeonJae, Investment) => (12.0, "편재격 reads opportunistic markets"),
        (PyeonJae, BusinessOpen) => (8.0, "편재격 suits ventures with moving capital"),
        (PyeonJae, Exam) => (-5.0, "편재격 scatters study focus"),
        (SikSin, BusinessOpen) => (10.0, "식신격 creates and sustains output"),
        (SikSin, Exam) => (6.0, "식신격 expresses learning fluently"),
        (SikSin, Travel) => (5.0, "식신격 enjoys fresh surroundings"),
        (SangGwan, JobChange) => (6.0, "상관격 breaks out of stale roles"),
        (SangGwan, Marriage) => (-8.0, "상관격 chafes against formal bonds"),
        (SangGwan, Exam) => (-4.0, "상관격 resists structured evaluation"),
        (PyeonGwan, JobChange) => (7.0, "편관격 takes decisive career turns"),
        (PyeonGwan, Move) => (5.0, "편관격 acts boldly on relocation"),
        (PyeonGwan, Marriage) => (-4.0, "편관격 brings pressure into the home"),
        (JeongIn, Exam) => (10.0, "정인격 absorbs and retains deeply"),
        (JeongIn, Marriage) => (5.0, "정인격 anchors a nurturing bond"),
        (JeongIn, Investment) => (-3.0, "정인격 hesitates at market risk"),
        (PyeonIn, Move) => (8.0, "편인격 adapts to unfamiliar ground"),
        (PyeonIn, Travel) => (6.0, "편인격 is drawn to the unconventional path"),
        (PyeonIn, BusinessOpen) => (-5.0, "편인격 second-guesses commercial instinct"),
        (BiGyeon, Travel) => (4.0, "비견격 moves well with companions"),
        (BiGyeon, Investment) => (-6.0, "비견격 splits resources among peers"),
        (GeopJae, Investment) => (-8.0, "겁재격 risks capital drain through rivals"),
        (GeopJae, BusinessOpen) => (-5.0, "겁재격 invites contested partnerships"),
        (GeonRok, JobChange) => (8.0, "건록격 stands on its own professional footing"),
        (GeonRok, BusinessOpen) => (6.0, "건록격 carries ventures on self-reliance"),
        (YangIn, Move) => (4.0, "양인격 cuts cleanly through upheaval"),
        (YangIn, Marriage) => (-6.0, "양인격 needs tempering in close bonds"),
        _ => (0.0, ""),
    }
}

/// Geokguk affinity sub-score for an event.
pub fn geokguk_bonus(profile: &SajuProfile, event: EventType) -> SubScore {
    let (bonus, reason) = geokguk_affinity(profile.geokguk, event);
    let mut reasons = Vec::new();
    let mut penalties = Vec::new();
    if bonus > 0.0 {
        reasons.push(reason.to_string());
    } else if bonus < 0.0 {
        penalties.push(reason.to_string());
    }
    SubScore {
        bonus,
        confidence: GEOKGUK_CONFIDENCE,
        reasons,
        penalties,
    }
}

/// Yongsin-depth sub-score: the yearly and monthly stem elements of the
/// target period checked against the yongsin/kisin lists. Confidence is
/// fixed at 0.9.
pub fn yongsin_depth_bonus(profile: &SajuProfile, year: i32, month: u32) -> Result<SubScore> {
    let mut bonus = 0.0;
    let mut reasons = Vec::new();
    let mut penalties = Vec::new();

    let annual = year_ganzhi(year);
    let annual_element = annual.stem.element();
    if profile.yongsin.contains(&annual_element) {
        bonus += 8.0;
        reasons.push(format!(
            "the {year} yearly stem {} runs on a favorable element",
            annual.stem
        ));
    } else if profile.kisin.contains(&annual_element) {
        bonus -= 8.0;
        penalties.push(format!(
            "the {year} yearly stem {} runs on an unfavorable element",
            annual.stem
        ));
    }

    let months = monthly_cycles(year, profile.day_master)?;
    if let Some(cycle) = months.iter().find(|c| c.month == month) {
        let monthly_element = cycle.stem.element();
        if profile.yongsin.contains(&monthly_element) {
            bonus += 8.0;
            reasons.push(format!(
                "the month-{month} stem {} runs on a favorable element",
                cycle.stem
            ));
        } else if profile.kisin.contains(&monthly_element) {
            bonus -= 8.0;
            penalties.push(format!(
                "the month-{month} stem {} runs on an unfavorable element",
                cycle.stem
            ));
        }
    }

    Ok(SubScore {
        bonus,
        confidence: YONGSIN_CONFIDENCE,
        reasons,
        penalties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::compute_profile;
    use crate::models::{BirthDescriptor, CalendarType, Gender};

    fn profile() -> SajuProfile {
        compute_profile(&BirthDescriptor {
            date: "1990-05-15".to_string(),
            time: Some("10:30".to_string()),
            gender: Gender::Male,
            calendar: CalendarType::Solar,
            leap_month: false,
            timezone: "Asia/Seoul".to_string(),
            latitude: None,
            longitude: None,
        })
        .unwrap()
    }

    #[test]
    fn test_affinity_table_covers_all_patterns() {
        // Every pattern has at least one non-neutral event pairing.
        let patterns = [
            Geokguk::BiGyeon,
            Geokguk::GeopJae,
            Geokguk::SikSin,
            Geokguk::SangGwan,
            Geokguk::PyeonJae,
            Geokguk::JeongJae,
            Geokguk::PyeonGwan,
            Geokguk::JeongGwan,
            Geokguk::PyeonIn,
            Geokguk::JeongIn,
            Geokguk::GeonRok,
            Geokguk::YangIn,
        ];
        for pattern in patterns {
            let touched = EventType::ALL
                .iter()
                .any(|&e| geokguk_affinity(pattern, e).0 != 0.0);
            assert!(touched, "{pattern:?} has no affinity entries");
        }
    }

    #[test]
    fn test_neutral_pairing_has_no_reason() {
        let mut p = profile();
        p.geokguk = Geokguk::BiGyeon;
        let score = geokguk_bonus(&p, EventType::Marriage);
        assert_eq!(score.bonus, 0.0);
        assert!(score.reasons.is_empty());
        assert!(score.penalties.is_empty());
    }

    #[test]
    fn test_signed_pairings_carry_reasons() {
        let mut p = profile();
        p.geokguk = Geokguk::JeongGwan;
        let favorable = geokguk_bonus(&p, EventType::Marriage);
        assert!(favorable.bonus > 0.0);
        assert_eq!(favorable.reasons.len(), 1);

        let sensitive = geokguk_bonus(&p, EventType::Investment);
        assert!(sensitive.bonus < 0.0);
        assert_eq!(sensitive.penalties.len(), 1);
    }

    #[test]
    fn test_yongsin_depth_fixed_confidence() {
        let p = profile();
        let score = yongsin_depth_bonus(&p, 2025, 6).unwrap();
        assert_eq!(score.confidence, YONGSIN_CONFIDENCE);
        assert!(score.bonus.abs() <= 16.0);
    }

    #[test]
    fn test_yongsin_depth_sign_follows_lists() {
        let mut p = profile();
        // Force the lists so the 2024 甲 (wood) yearly stem is favorable.
        p.yongsin = vec![crate::models::Element::Wood];
        p.kisin = vec![];
        let favorable = yongsin_depth_bonus(&p, 2024, 6).unwrap();
        assert!(favorable.bonus > 0.0);

        p.yongsin = vec![];
        p.kisin = vec![crate::models::Element::Wood];
        let unfavorable = yongsin_depth_bonus(&p, 2024, 6).unwrap();
        assert!(unfavorable.bonus < 0.0);
    }
}
