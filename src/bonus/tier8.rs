//! Tier 8: Western return and eclipse signals
//!
//! Solar/lunar return themes are matched against a per-event keyword set.
//! When no Western data is supplied the sub-results are absent entirely
//! (zero bonus, zero confidence contribution). Eclipses penalize marriage
//! and investment timing, reward a move during a solar eclipse, and scale
//! the penalty when an event-relevant planet is among the affected ones.

use crate::bonus::integrate::SubScore;
use crate::models::EventType;
use crate::western::{CelestialPoint, EclipseInfo, EclipseKind, ReturnTheme};

/// Return-theme bonus bound.
pub const RETURN_CAP: f64 = 15.0;
/// Eclipse bonus bound.
pub const ECLIPSE_CAP: f64 = 20.0;

const SOLAR_RETURN_CONFIDENCE: f64 = 0.7;
const LUNAR_RETURN_CONFIDENCE: f64 = 0.65;
const ECLIPSE_CONFIDENCE: f64 = 0.8;

/// Theme keywords that signal support for each event type.
fn event_keywords(event: EventType) -> &'static [&'static str] {
    match event {
        EventType::Marriage => &["relationship", "love", "partnership", "commitment"],
        EventType::Investment => &["finance", "wealth", "gain", "expansion"],
        EventType::Move => &["home", "relocation", "change", "foundation"],
        EventType::JobChange => &["career", "ambition", "achievement", "authority"],
        EventType::BusinessOpen => &["venture", "creation", "growth", "opportunity"],
        EventType::Exam => &["learning", "focus", "mind", "discipline"],
        EventType::Travel => &["journey", "exploration", "freedom", "distance"],
    }
}

/// Planet whose presence in an eclipse's affected list scales the impact.
fn event_planet(event: EventType) -> Option<CelestialPoint> {
    match event {
        EventType::Marriage => Some(CelestialPoint::Venus),
        EventType::Investment => Some(CelestialPoint::Jupiter),
        EventType::JobChange => Some(CelestialPoint::Saturn),
        EventType::Exam => Some(CelestialPoint::Mercury),
        EventType::Move | EventType::BusinessOpen | EventType::Travel => None,
    }
}

fn return_bonus(theme: &ReturnTheme, event: EventType, label: &str, confidence: f64) -> SubScore {
    let keywords = event_keywords(event);
    let matched: Vec<&str> = theme
        .themes
        .iter()
        .filter_map(|t| {
            let lowered = t.to_lowercase();
            keywords
                .iter()
                .find(|k| lowered.contains(*k))
                .copied()
        })
        .collect();

    let bonus = (5.0 * matched.len() as f64).min(RETURN_CAP);
    let reasons = if matched.is_empty() {
        Vec::new()
    } else {
        vec![format!(
            "{label} themes [{}] align with {}",
            matched.join(", "),
            event.label()
        )]
    };

    SubScore {
        bonus,
        confidence,
        reasons,
        penalties: Vec::new(),
    }
}

/// Solar-return theme bonus. `None` input yields no sub-result.
pub fn solar_return_bonus(theme: Option<&ReturnTheme>, event: EventType) -> Option<SubScore> {
    theme.map(|t| return_bonus(t, event, "solar return", SOLAR_RETURN_CONFIDENCE))
}

/// Lunar-return theme bonus. `None` input yields no sub-result.
pub fn lunar_return_bonus(theme: Option<&ReturnTheme>, event: EventType) -> Option<SubScore> {
    theme.map(|t| return_bonus(t, event, "lunar return", LUNAR_RETURN_CONFIDENCE))
}

/// Eclipse impact on an event. `None` input yields no sub-result.
pub fn eclipse_bonus(eclipse: Option<&EclipseInfo>, event: EventType) -> Option<SubScore> {
    let eclipse = eclipse?;
    let mut bonus: f64 = 0.0;
    let mut reasons = Vec::new();
    let mut penalties = Vec::new();

    match event {
        EventType::Marriage | EventType::Investment => {
            let mut penalty = -10.0;
            if let Some(planet) = event_planet(event) {
                if eclipse.affected_planets.contains(&planet) {
                    penalty *= 1.5;
                    penalties.push(format!(
                        "eclipse touches {:?}, amplifying the impact on {}",
                        planet,
                        event.label()
                    ));
                }
            }
            bonus += penalty;
            penalties.push(format!(
                "an eclipse window disfavors committing to a {}",
                event.label()
            ));
        }
        EventType::Move => {
            if eclipse.kind == EclipseKind::Solar {
                bonus += 8.0;
                reasons.push("a solar eclipse marks a strong threshold for relocation".to_string());
            }
        }
        _ => {}
    }

    Some(SubScore {
        bonus: bonus.clamp(-ECLIPSE_CAP, ECLIPSE_CAP),
        confidence: ECLIPSE_CONFIDENCE,
        reasons,
        penalties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(words: &[&str]) -> ReturnTheme {
        ReturnTheme {
            themes: words.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_western_data_yields_none() {
        assert!(solar_return_bonus(None, EventType::Marriage).is_none());
        assert!(lunar_return_bonus(None, EventType::Marriage).is_none());
        assert!(eclipse_bonus(None, EventType::Marriage).is_none());
    }

    #[test]
    fn test_return_theme_matching() {
        let t = theme(&["a year of love and partnership", "career shifts"]);
        let score = solar_return_bonus(Some(&t), EventType::Marriage).unwrap();
        assert!(score.bonus > 0.0);
        assert_eq!(score.reasons.len(), 1);

        let none = solar_return_bonus(Some(&theme(&["gardening"])), EventType::Marriage).unwrap();
        assert_eq!(none.bonus, 0.0);
        assert!(none.reasons.is_empty());
    }

    #[test]
    fn test_return_bonus_capped() {
        let t = theme(&["love", "relationship", "partnership", "commitment", "love again"]);
        let score = solar_return_bonus(Some(&t), EventType::Marriage).unwrap();
        assert!(score.bonus <= RETURN_CAP);
    }

    #[test]
    fn test_eclipse_penalizes_marriage_and_investment() {
        let eclipse = EclipseInfo {
            kind: EclipseKind::Lunar,
            affected_planets: vec![],
        };
        for event in [EventType::Marriage, EventType::Investment] {
            let score = eclipse_bonus(Some(&eclipse), event).unwrap();
            assert!(score.bonus < 0.0);
            assert!(!score.penalties.is_empty());
        }
    }

    #[test]
    fn test_eclipse_venus_scaling() {
        let plain = EclipseInfo {
            kind: EclipseKind::Lunar,
            affected_planets: vec![],
        };
        let venus = EclipseInfo {
            kind: EclipseKind::Lunar,
            affected_planets: vec![CelestialPoint::Venus],
        };
        let base = eclipse_bonus(Some(&plain), EventType::Marriage).unwrap();
        let scaled = eclipse_bonus(Some(&venus), EventType::Marriage).unwrap();
        assert!(scaled.bonus < base.bonus);
    }

    #[test]
    fn test_solar_eclipse_rewards_move() {
        let solar = EclipseInfo {
            kind: EclipseKind::Solar,
            affected_planets: vec![],
        };
        let lunar = EclipseInfo {
            kind: EclipseKind::Lunar,
            affected_planets: vec![],
        };
        assert!(eclipse_bonus(Some(&solar), EventType::Move).unwrap().bonus > 0.0);
        assert_eq!(eclipse_bonus(Some(&lunar), EventType::Move).unwrap().bonus, 0.0);
    }

    #[test]
    fn test_eclipse_neutral_for_other_events() {
        let eclipse = EclipseInfo {
            kind: EclipseKind::Solar,
            affected_planets: vec![CelestialPoint::Mercury],
        };
        let score = eclipse_bonus(Some(&eclipse), EventType::Travel).unwrap();
        assert_eq!(score.bonus, 0.0);
    }
}
