//! Aspect detection between chart points
//!
//! An aspect matches when the angular separation of two points falls within
//! the aspect's maximum orb of its nominal angle. Separation is always the
//! short way around the circle, so pairs straddling 0°/360° resolve
//! correctly.

use serde::{Deserialize, Serialize};

use crate::western::chart::{normalize_degrees, CelestialPoint};

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Nominal angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Maximum orb allowed for this aspect.
    pub fn max_orb(self) -> f64 {
        match self {
            AspectType::Conjunction => 8.0,
            AspectType::Sextile => 6.0,
            AspectType::Square => 8.0,
            AspectType::Trine => 8.0,
            AspectType::Opposition => 8.0,
        }
    }

    /// Harmonious aspects add to harmony; the rest add to tension.
    pub fn is_harmonious(self) -> bool {
        matches!(
            self,
            AspectType::Conjunction | AspectType::Sextile | AspectType::Trine
        )
    }
}

/// Whether an aspect compares natal positions or a transit overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Natal,
    Transit,
}

/// One matched aspect between two points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectRecord {
    pub from_point: CelestialPoint,
    pub to_point: CelestialPoint,
    pub aspect_type: AspectType,
    /// Residual distance from the nominal angle; never exceeds the
    /// aspect's max orb.
    pub orb: f64,
    /// Tightness score in [0, 1]: 1 at exact, 0 at the orb limit.
    pub score: f64,
    pub kind: AspectKind,
}

/// Angular separation of two longitudes, the short way around.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let delta = (normalize_degrees(a) - normalize_degrees(b)).abs();
    delta.min(360.0 - delta)
}

/// Check one point pair against every aspect type.
pub fn aspects_for_pair(
    from: (CelestialPoint, f64),
    to: (CelestialPoint, f64),
) -> Vec<AspectRecord> {
    let separation = angular_separation(from.1, to.1);
    AspectType::ALL
        .iter()
        .filter_map(|&aspect_type| {
            let orb = (separation - aspect_type.angle()).abs();
            let max_orb = aspect_type.max_orb();
            (orb <= max_orb).then(|| AspectRecord {
                from_point: from.0,
                to_point: to.0,
                aspect_type,
                orb,
                score: 1.0 - orb / max_orb,
                kind: AspectKind::Natal,
            })
        })
        .collect()
}

/// All aspects across two point sets, sorted by descending score.
pub fn aspects_between(
    points_a: &[(CelestialPoint, f64)],
    points_b: &[(CelestialPoint, f64)],
) -> Vec<AspectRecord> {
    let mut aspects: Vec<AspectRecord> = points_a
        .iter()
        .flat_map(|&a| points_b.iter().flat_map(move |&b| aspects_for_pair(a, b)))
        .collect();
    aspects.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    aspects
}
