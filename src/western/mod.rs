//! Western astrology engine
//!
//! Natal chart computation, aspect detection, and synastry comparison.
//! Planetary longitudes sit behind the `Ephemeris` trait so precise data
//! sources can replace the bundled mean-motion approximation.

pub mod aspects;
pub mod chart;
pub mod synastry;

use serde::{Deserialize, Serialize};

pub use aspects::{angular_separation, aspects_between, AspectKind, AspectRecord, AspectType};
pub use chart::{
    compute_chart, compute_chart_with, sun_sign, CelestialPoint, Ephemeris, MeanEphemeris,
    PlanetPosition, WesternChart, ZodiacSign,
};
pub use synastry::{calculate_synastry, house_of, HouseOverlay, SynastryResult};

/// Eclipse kind for timing analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseKind {
    Solar,
    Lunar,
}

/// An eclipse active around a target date, as supplied by the caller's
/// ephemeris source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EclipseInfo {
    pub kind: EclipseKind,
    /// Planets the eclipse touches; penalty scaling keys off these.
    pub affected_planets: Vec<CelestialPoint>,
}

/// Themes of a solar or lunar return chart, as keyword strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnTheme {
    pub themes: Vec<String>,
}

/// Optional Western timing context for the bonus engine. Absent fields
/// simply contribute nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WesternTimingData {
    #[serde(default)]
    pub solar_return: Option<ReturnTheme>,
    #[serde(default)]
    pub lunar_return: Option<ReturnTheme>,
    #[serde(default)]
    pub eclipse: Option<EclipseInfo>,
}
