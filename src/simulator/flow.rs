//! Multi-year fortune flow
//!
//! One snapshot per year, computed in parallel, then classified: overall
//! trend from the score sequence's slope, best and most challenging years
//! by average score, and turning points at strict interior local extrema.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::SajuProfile;
use crate::simulator::snapshot::{
    generate_fortune_snapshot, FortuneSnapshot, SnapshotOptions, TimePoint,
};

/// Shape of a multi-year score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallTrend {
    Ascending,
    Plateau,
    Descending,
    Fluctuating,
}

/// A strict local extremum strictly inside the simulated range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurningPoint {
    pub year: i32,
    pub score: f64,
    /// True at a local maximum, false at a local minimum.
    pub is_peak: bool,
}

/// Multi-year simulation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneFlow {
    pub snapshots: Vec<FortuneSnapshot>,
    pub overall_trend: OverallTrend,
    pub best_period: i32,
    pub challenging_period: i32,
    pub turning_points: Vec<TurningPoint>,
}

/// Least-squares slope of a score sequence.
fn slope(scores: &[f64]) -> f64 {
    let n = scores.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = scores.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in scores.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn classify_trend(scores: &[f64]) -> OverallTrend {
    let s = slope(scores);
    let range = scores
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let spread = range.1 - range.0;

    if s.abs() < 0.5 {
        if spread > 15.0 {
            OverallTrend::Fluctuating
        } else {
            OverallTrend::Plateau
        }
    } else if s > 0.0 {
        OverallTrend::Ascending
    } else {
        OverallTrend::Descending
    }
}

/// Strict interior local extrema of the sequence.
fn turning_points(years: &[i32], scores: &[f64]) -> Vec<TurningPoint> {
    let mut points = Vec::new();
    for i in 1..scores.len().saturating_sub(1) {
        let (prev, here, next) = (scores[i - 1], scores[i], scores[i + 1]);
        if here > prev && here > next {
            points.push(TurningPoint {
                year: years[i],
                score: here,
                is_peak: true,
            });
        } else if here < prev && here < next {
            points.push(TurningPoint {
                year: years[i],
                score: here,
                is_peak: false,
            });
        }
    }
    points
}

/// Simulate the yearly fortune flow over an inclusive year range.
pub fn simulate_fortune_flow(
    profile: &SajuProfile,
    start_year: i32,
    end_year: i32,
    options: &SnapshotOptions,
) -> Result<FortuneFlow> {
    if end_year < start_year {
        return Err(EngineError::invalid_input(format!(
            "end year {end_year} precedes start year {start_year}"
        )));
    }

    let years: Vec<i32> = (start_year..=end_year).collect();
    let snapshots: Result<Vec<FortuneSnapshot>> = years
        .par_iter()
        .map(|&year| generate_fortune_snapshot(profile, TimePoint::year(year), options))
        .collect();
    let snapshots = snapshots?;

    let scores: Vec<f64> = snapshots.iter().map(|s| s.average_score()).collect();

    let best_idx = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let worst_idx = scores
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let flow = FortuneFlow {
        overall_trend: classify_trend(&scores),
        best_period: years[best_idx],
        challenging_period: years[worst_idx],
        turning_points: turning_points(&years, &scores),
        snapshots,
    };

    debug!(
        years = years.len(),
        trend = ?flow.overall_trend,
        best = flow.best_period,
        "fortune flow simulated"
    );
    Ok(flow)
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
    fn test_flow_spans_inclusive_range() {
        let flow =
            simulate_fortune_flow(&profile(), 2024, 2030, &SnapshotOptions::default()).unwrap();
        assert_eq!(flow.snapshots.len(), 7);
        assert!((2024..=2030).contains(&flow.best_period));
        assert!((2024..=2030).contains(&flow.challenging_period));
    }

    #[test]
    fn test_flow_rejects_inverted_range() {
        assert!(
            simulate_fortune_flow(&profile(), 2030, 2024, &SnapshotOptions::default()).is_err()
        );
    }

    #[test]
    fn test_turning_points_strictly_interior() {
        let flow =
            simulate_fortune_flow(&profile(), 2024, 2034, &SnapshotOptions::default()).unwrap();
        for tp in &flow.turning_points {
            assert!(tp.year > 2024 && tp.year < 2034);
        }
    }

    #[test]
    fn test_slope_classification() {
        assert_eq!(classify_trend(&[50.0, 55.0, 60.0, 65.0]), OverallTrend::Ascending);
        assert_eq!(classify_trend(&[65.0, 60.0, 55.0, 50.0]), OverallTrend::Descending);
        assert_eq!(classify_trend(&[50.0, 50.5, 50.2, 50.4]), OverallTrend::Plateau);
        assert_eq!(
            classify_trend(&[50.0, 70.0, 48.0, 69.0, 50.0]),
            OverallTrend::Fluctuating
        );
    }

    #[test]
    fn test_turning_point_extraction() {
        let years = [2020, 2021, 2022, 2023, 2024];
        let scores = [50.0, 60.0, 40.0, 55.0, 45.0];
        let points = turning_points(&years, &scores);
        assert_eq!(points.len(), 3);
        assert!(points[0].is_peak);
        assert_eq!(points[0].year, 2021);
        assert!(!points[1].is_peak);
        assert_eq!(points[1].year, 2022);
    }

    #[test]
    fn test_plateau_on_flat_sequence() {
        // A strictly flat sequence has no turning points.
        let years = [2020, 2021, 2022];
        let scores = [50.0, 50.0, 50.0];
        assert!(turning_points(&years, &scores).is_empty());
    }
}
