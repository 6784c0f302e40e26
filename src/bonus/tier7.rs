//! Tier 7: daily and hourly Saju signals
//!
//! The daily calculator compares the target date's ganzhi against the
//! profile: event-favorable and event-sensitive sibsin plus the branch
//! relation to the natal day branch. The hourly calculator buckets the
//! target hour and adds a yongsin-element-of-the-hour bonus.

use chrono::NaiveDate;

use crate::bonus::integrate::SubScore;
use crate::bonus::{favorable_sibsin, unfavorable_sibsin};
use crate::calendar::ganzhi::{day_ganzhi, hour_branch, stem_sibsin};
use crate::error::{EngineError, Result};
use crate::models::{EventType, RelationKind, SajuProfile};
use crate::relations::relations_between;

/// Daily bonus bound.
pub const DAILY_CAP: f64 = 25.0;
/// Hourly bonus bound.
pub const HOURLY_CAP: f64 = 15.0;
/// Daily confidence is fixed.
pub const DAILY_CONFIDENCE: f64 = 0.85;
/// Hourly confidence when the natal hour branch matches the target's.
pub const HOURLY_CONFIDENCE_MATCHED: f64 = 0.75;
/// Hourly confidence otherwise.
pub const HOURLY_CONFIDENCE_UNMATCHED: f64 = 0.6;

/// Daily tier-7 bonus for an event on a target date. Bonus is clamped to
/// [-25, 25]; confidence is fixed at 0.85.
pub fn daily_bonus(
    profile: &SajuProfile,
    event: EventType,
    year: i32,
    month: u32,
    day: u32,
) -> Result<SubScore> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EngineError::invalid_input(format!("bad target date {year}-{month:02}-{day:02}"))
    })?;
    let target = day_ganzhi(date);

    let mut bonus = 0.0;
    let mut reasons = Vec::new();
    let mut penalties = Vec::new();

    let sibsin = stem_sibsin(profile.day_master, target.stem);
    if favorable_sibsin(event).contains(&sibsin) {
        bonus += 12.0;
        reasons.push(format!(
            "day stem {} carries {} favorable for {}",
            target.stem,
            sibsin.korean(),
            event.label()
        ));
    }
    if unfavorable_sibsin(event).contains(&sibsin) {
        bonus -= 12.0;
        penalties.push(format!(
            "day stem {} carries {} sensitive for {}",
            target.stem,
            sibsin.korean(),
            event.label()
        ));
    }

    let natal_day = profile.pillars.day.branch.branch;
    for relation in relations_between(target.branch, natal_day) {
        bonus += relation.score_delta;
        let line = format!(
            "day branch {}{} forms {:?} with the natal day branch",
            target.branch,
            natal_day,
            relation.kind
        );
        if relation.score_delta >= 0.0 {
            reasons.push(line);
        } else {
            penalties.push(line);
        }
    }

    // The yongsin element of the day adds a small edge.
    let day_element = target.branch.element();
    if profile.yongsin.contains(&day_element) {
        bonus += 5.0;
        reasons.push(format!("day element {} is a favorable element", day_element));
    } else if profile.kisin.contains(&day_element) {
        bonus -= 5.0;
        penalties.push(format!("day element {} is an unfavorable element", day_element));
    }

    Ok(SubScore {
        bonus: bonus.clamp(-DAILY_CAP, DAILY_CAP),
        confidence: DAILY_CONFIDENCE,
        reasons,
        penalties,
    })
}

/// Hourly tier-7 bonus for a target hour (0-23). Bonus is clamped to
/// [-15, 15]; confidence is 0.75 when the natal hour branch matches the
/// target hour's branch and lower otherwise.
pub fn hourly_bonus(profile: &SajuProfile, event: EventType, hour: u32) -> Result<SubScore> {
    if hour > 23 {
        return Err(EngineError::invalid_input(format!(
            "hour {hour} out of range 0-23"
        )));
    }
    let target_branch = hour_branch(hour);
    let natal_hour = profile.pillars.hour.branch.branch;

    let mut bonus: f64 = 0.0;
    let mut reasons = Vec::new();
    let mut penalties = Vec::new();

    for relation in relations_between(target_branch, natal_hour) {
        let delta = match relation.kind {
            RelationKind::Samhap => 6.0,
            RelationKind::Yukhap => 5.0,
            RelationKind::Chung => -6.0,
            RelationKind::Hyung => -4.0,
            RelationKind::Hai => -3.0,
        };
        bonus += delta;
        let line = format!(
            "hour branch {} forms {:?} with the natal hour branch",
            target_branch, relation.kind
        );
        if delta >= 0.0 {
            reasons.push(line);
        } else {
            penalties.push(line);
        }
    }

    let sibsin = stem_sibsin(
        profile.day_master,
        crate::calendar::ganzhi::hour_stem(profile.pillars.day.stem.stem, target_branch),
    );
    if favorable_sibsin(event).contains(&sibsin) {
        bonus += 4.0;
        reasons.push(format!("hour stem carries {}", sibsin.korean()));
    }

    // Yongsin element of the hour.
    let hour_element = target_branch.element();
    if profile.yongsin.contains(&hour_element) {
        bonus += 5.0;
        reasons.push(format!(
            "hour element {} is a favorable element",
            hour_element
        ));
    } else if profile.kisin.contains(&hour_element) {
        bonus -= 5.0;
        penalties.push(format!(
            "hour element {} is an unfavorable element",
            hour_element
        ));
    }

    let confidence = if profile.has_birth_time && natal_hour == target_branch {
        HOURLY_CONFIDENCE_MATCHED
    } else {
        HOURLY_CONFIDENCE_UNMATCHED
    };

    Ok(SubScore {
        bonus: bonus.clamp(-HOURLY_CAP, HOURLY_CAP),
        confidence,
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
    fn test_daily_bonus_bounded() {
        let p = profile();
        for event in EventType::ALL {
            for day in 1..=28 {
                let score = daily_bonus(&p, event, 2025, 6, day).unwrap();
                assert!(score.bonus.abs() <= DAILY_CAP);
                assert_eq!(score.confidence, DAILY_CONFIDENCE);
            }
        }
    }

    #[test]
    fn test_daily_bonus_invalid_date() {
        let p = profile();
        assert!(daily_bonus(&p, EventType::Marriage, 2025, 2, 30).is_err());
    }

    #[test]
    fn test_hourly_bonus_bounded() {
        let p = profile();
        for hour in 0..24 {
            let score = hourly_bonus(&p, EventType::Move, hour).unwrap();
            assert!(score.bonus.abs() <= HOURLY_CAP);
            assert!(
                score.confidence == HOURLY_CONFIDENCE_MATCHED
                    || score.confidence == HOURLY_CONFIDENCE_UNMATCHED
            );
        }
        assert!(hourly_bonus(&p, EventType::Move, 24).is_err());
    }

    #[test]
    fn test_hourly_confidence_matches_natal_hour() {
        let p = profile();
        // Born 10:30 → natal hour branch 巳 (09:00-10:59).
        let matched = hourly_bonus(&p, EventType::Move, 10).unwrap();
        assert_eq!(matched.confidence, HOURLY_CONFIDENCE_MATCHED);
        let unmatched = hourly_bonus(&p, EventType::Move, 3).unwrap();
        assert_eq!(unmatched.confidence, HOURLY_CONFIDENCE_UNMATCHED);
    }

    #[test]
    fn test_daily_deterministic() {
        let p = profile();
        let a = daily_bonus(&p, EventType::Exam, 2025, 3, 1).unwrap();
        let b = daily_bonus(&p, EventType::Exam, 2025, 3, 1).unwrap();
        assert_eq!(a.bonus, b.bonus);
        assert_eq!(a.reasons, b.reasons);
    }
}
