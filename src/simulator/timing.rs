//! Scenario, decision, monthly, and timing simulations
//!
//! Thin orchestrations over the snapshot generator and the bonus engine:
//! compare named scenarios, pick between decision options, break a year
//! into twelve monthly snapshots, and surface the best time points for a
//! target area.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bonus::{calculate_tier7_to10_bonus, BonusInput, BonusSummary};
use crate::error::{EngineError, Result};
use crate::models::{EventType, SajuProfile};
use crate::simulator::snapshot::{
    generate_fortune_snapshot, FortuneSnapshot, LifeArea, SnapshotOptions, TimePoint,
};

/// A named what-if scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    pub event: EventType,
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub day: Option<u32>,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    /// Combined favorability: snapshot average plus the event bonus.
    pub score: f64,
    pub bonus: BonusSummary,
    pub snapshot: FortuneSnapshot,
}

/// Ranked outcomes of a decision comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Outcomes sorted by descending score.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Name of the top-ranked option.
    pub recommended: String,
}

/// Evaluate one scenario against the profile.
pub fn simulate_scenario(
    profile: &SajuProfile,
    scenario: &ScenarioSpec,
) -> Result<ScenarioOutcome> {
    let snapshot = generate_fortune_snapshot(
        profile,
        TimePoint::month(scenario.year, scenario.month),
        &SnapshotOptions::default(),
    )?;
    let bonus = calculate_tier7_to10_bonus(
        &BonusInput {
            profile,
            western: None,
            target_hour: None,
        },
        scenario.event,
        scenario.year,
        scenario.month,
        scenario.day,
    )?;

    Ok(ScenarioOutcome {
        name: scenario.name.clone(),
        score: snapshot.average_score() + bonus.total,
        bonus,
        snapshot,
    })
}

/// Compare decision options and rank them.
pub fn simulate_decision(
    profile: &SajuProfile,
    options: &[ScenarioSpec],
) -> Result<DecisionResult> {
    if options.is_empty() {
        return Err(EngineError::invalid_input(
            "decision comparison needs at least one option",
        ));
    }

    let mut outcomes = options
        .iter()
        .map(|spec| simulate_scenario(profile, spec))
        .collect::<Result<Vec<ScenarioOutcome>>>()?;
    outcomes.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let recommended = outcomes[0].name.clone();
    Ok(DecisionResult {
        outcomes,
        recommended,
    })
}

/// Twelve monthly snapshots for a year.
pub fn simulate_monthly_fortune(
    profile: &SajuProfile,
    year: i32,
) -> Result<Vec<FortuneSnapshot>> {
    (1..=12u32)
        .into_par_iter()
        .map(|month| {
            generate_fortune_snapshot(
                profile,
                TimePoint::month(year, month),
                &SnapshotOptions::default(),
            )
        })
        .collect()
}

/// Top-3 time points for one target area across a year range (months
/// inclusive), ranked by that area's score.
pub fn find_optimal_timing(
    profile: &SajuProfile,
    area: LifeArea,
    start_year: i32,
    end_year: i32,
) -> Result<Vec<(TimePoint, f64)>> {
    if end_year < start_year {
        return Err(EngineError::invalid_input(format!(
            "end year {end_year} precedes start year {start_year}"
        )));
    }

    let options = SnapshotOptions {
        areas: vec![area],
        ..Default::default()
    };
    let points: Vec<TimePoint> = (start_year..=end_year)
        .flat_map(|year| (1..=12u32).map(move |month| TimePoint::month(year, month)))
        .collect();

    let mut scored: Vec<(TimePoint, f64)> = points
        .par_iter()
        .map(|&point| {
            generate_fortune_snapshot(profile, point, &options)
                .map(|s| (point, s.areas[0].score))
        })
        .collect::<Result<Vec<_>>>()?;

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(3);
    Ok(scored)
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

    fn scenario(name: &str, year: i32, month: u32) -> ScenarioSpec {
        ScenarioSpec {
            name: name.to_string(),
            event: EventType::Move,
            year,
            month,
            day: None,
        }
    }

    #[test]
    fn test_scenario_outcome_shape() {
        let outcome = simulate_scenario(&profile(), &scenario("spring move", 2025, 4)).unwrap();
        assert_eq!(outcome.name, "spring move");
        assert!(outcome.bonus.reasons.len() <= 5);
    }

    #[test]
    fn test_decision_ranks_descending() {
        let options = vec![
            scenario("spring", 2025, 4),
            scenario("summer", 2025, 7),
            scenario("autumn", 2025, 10),
        ];
        let result = simulate_decision(&profile(), &options).unwrap();
        assert_eq!(result.outcomes.len(), 3);
        for pair in result.outcomes.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(result.recommended, result.outcomes[0].name);
    }

    #[test]
    fn test_decision_rejects_empty_options() {
        assert!(simulate_decision(&profile(), &[]).is_err());
    }

    #[test]
    fn test_monthly_fortune_has_twelve_entries() {
        let snapshots = simulate_monthly_fortune(&profile(), 2025).unwrap();
        assert_eq!(snapshots.len(), 12);
        for (i, s) in snapshots.iter().enumerate() {
            assert_eq!(s.time_point.month, Some(i as u32 + 1));
        }
    }

    #[test]
    fn test_optimal_timing_returns_top_three() {
        let best = find_optimal_timing(&profile(), LifeArea::Career, 2025, 2026).unwrap();
        assert_eq!(best.len(), 3);
        for pair in best.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}
