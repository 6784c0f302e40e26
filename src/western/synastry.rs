//! Synastry: chart-pair comparison
//!
//! Compares every point of one chart against every point of the other,
//! aggregates harmony and tension from the matched aspects, and overlays
//! each chart's planets onto the other's houses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::western::aspects::{aspects_between, AspectRecord};
use crate::western::chart::{normalize_degrees, CelestialPoint, WesternChart};

/// A planet of one chart placed in a house of the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseOverlay {
    pub planet: CelestialPoint,
    /// House index, 1-12.
    pub in_house: u8,
    pub description: String,
}

/// Full synastry comparison result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynastryResult {
    /// Matched aspects, sorted by descending score.
    pub aspects: Vec<AspectRecord>,
    /// Sum of conjunction/sextile/trine scores.
    pub harmony: f64,
    /// Sum of square/opposition scores.
    pub tension: f64,
    /// harmony − tension × 0.5 + 10.
    pub total: f64,
    /// Chart A's planets in chart B's houses.
    pub a_in_b_houses: Vec<HouseOverlay>,
    /// Chart B's planets in chart A's houses.
    pub b_in_a_houses: Vec<HouseOverlay>,
}

/// House index (1-12) containing a longitude, given ascending cusps that
/// may wrap past 0°.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let contains = if start <= end {
            lon >= start && lon < end
        } else {
            // This house straddles 0°.
            lon >= start || lon < end
        };
        if contains {
            return (i + 1) as u8;
        }
    }
    12
}

fn overlay(chart: &WesternChart, houses_of: &WesternChart) -> Vec<HouseOverlay> {
    chart
        .planets
        .iter()
        .map(|p| {
            let in_house = house_of(p.longitude, &houses_of.house_cusps);
            HouseOverlay {
                planet: p.point,
                in_house,
                description: format!(
                    "{:?} falls in house {} of the partner chart",
                    p.point, in_house
                ),
            }
        })
        .collect()
}

/// Compare two natal charts.
pub fn calculate_synastry(chart_a: &WesternChart, chart_b: &WesternChart) -> SynastryResult {
    let aspects = aspects_between(&chart_a.points(), &chart_b.points());

    let mut harmony = 0.0;
    let mut tension = 0.0;
    for aspect in &aspects {
        if aspect.aspect_type.is_harmonious() {
            harmony += aspect.score;
        } else {
            tension += aspect.score;
        }
    }
    let total = harmony - tension * 0.5 + 10.0;

    debug!(
        aspects = aspects.len(),
        harmony, tension, total, "synastry computed"
    );

    SynastryResult {
        a_in_b_houses: overlay(chart_a, chart_b),
        b_in_a_houses: overlay(chart_b, chart_a),
        aspects,
        harmony,
        tension,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::western::chart::compute_chart;
    use crate::models::{BirthDescriptor, CalendarType, Gender};

    fn chart(date: &str, time: &str) -> WesternChart {
        compute_chart(&BirthDescriptor {
            date: date.to_string(),
            time: Some(time.to_string()),
            gender: Gender::Female,
            calendar: CalendarType::Solar,
            leap_month: false,
            timezone: "Asia/Seoul".to_string(),
            latitude: Some(37.57),
            longitude: Some(126.98),
        })
        .unwrap()
    }

    #[test]
    fn test_house_of_simple_cusps() {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = 30.0 * i as f64;
        }
        assert_eq!(house_of(0.0, &cusps), 1);
        assert_eq!(house_of(15.0, &cusps), 1);
        assert_eq!(house_of(30.0, &cusps), 2);
        assert_eq!(house_of(359.9, &cusps), 12);
    }

    #[test]
    fn test_house_of_wrapped_cusps() {
        // First cusp at 330°: house 1 spans 330°..0°, house 2 starts at 0°.
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = normalize_degrees(330.0 + 30.0 * i as f64);
        }
        assert_eq!(house_of(340.0, &cusps), 1);
        assert_eq!(house_of(5.0, &cusps), 2);
        assert_eq!(house_of(329.0, &cusps), 12);
    }

    #[test]
    fn test_synastry_aspects_sorted() {
        let a = chart("1990-05-15", "10:30");
        let b = chart("1992-08-23", "14:00");
        let result = calculate_synastry(&a, &b);
        for pair in result.aspects.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_synastry_total_formula() {
        let a = chart("1990-05-15", "10:30");
        let b = chart("1992-08-23", "14:00");
        let result = calculate_synastry(&a, &b);
        let expected = result.harmony - result.tension * 0.5 + 10.0;
        assert!((result.total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_overlays_cover_all_planets() {
        let a = chart("1990-05-15", "10:30");
        let b = chart("1992-08-23", "14:00");
        let result = calculate_synastry(&a, &b);
        assert_eq!(result.a_in_b_houses.len(), 10);
        assert_eq!(result.b_in_a_houses.len(), 10);
        for overlay in result.a_in_b_houses.iter().chain(&result.b_in_a_houses) {
            assert!((1..=12).contains(&overlay.in_house));
        }
    }

    #[test]
    fn test_self_synastry_is_maximally_conjunct() {
        let a = chart("1990-05-15", "10:30");
        let result = calculate_synastry(&a, &a);
        // Every point conjoins itself exactly.
        let exact = result
            .aspects
            .iter()
            .filter(|r| r.orb < 1e-9 && r.from_point == r.to_point)
            .count();
        assert_eq!(exact, 12);
    }
}
