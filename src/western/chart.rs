//! Western natal chart computation
//!
//! Planetary longitudes come from a pluggable `Ephemeris` source. The
//! bundled `MeanEphemeris` uses mean-motion rates from the J2000 epoch,
//! which keeps the engine deterministic and dependency-free; a precise
//! ephemeris can be swapped in behind the same trait without touching the
//! aspect or synastry math.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::pillars::parse_descriptor;
use crate::error::{EngineError, Result};
use crate::models::BirthDescriptor;

/// The twelve tropical zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing an ecliptic longitude (0° = 0° Aries).
    pub fn from_longitude(longitude: f64) -> ZodiacSign {
        let idx = (normalize_degrees(longitude) / 30.0).floor() as usize;
        Self::ALL[idx.min(11)]
    }
}

/// Chart points the synastry engine compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialPoint {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Ascendant,
    Mc,
}

impl CelestialPoint {
    pub const PLANETS: [CelestialPoint; 10] = [
        CelestialPoint::Sun,
        CelestialPoint::Moon,
        CelestialPoint::Mercury,
        CelestialPoint::Venus,
        CelestialPoint::Mars,
        CelestialPoint::Jupiter,
        CelestialPoint::Saturn,
        CelestialPoint::Uranus,
        CelestialPoint::Neptune,
        CelestialPoint::Pluto,
    ];
}

/// Position of one chart point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub point: CelestialPoint,
    pub longitude: f64,
    pub sign: ZodiacSign,
}

/// A computed natal chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WesternChart {
    pub sun_sign: ZodiacSign,
    pub planets: Vec<PlanetPosition>,
    pub ascendant: f64,
    pub mc: f64,
    /// Equal-house cusps from the ascendant.
    pub house_cusps: [f64; 12],
}

/// Normalize a longitude into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Pluggable source of planetary longitudes.
pub trait Ephemeris {
    /// Ecliptic longitude of a planet at a Julian day, in degrees.
    fn longitude(&self, point: CelestialPoint, jd: f64) -> Result<f64>;
}

/// Mean-motion ephemeris: linear longitudes from J2000 epoch values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanEphemeris;

/// (J2000 mean longitude, mean daily motion in degrees).
fn mean_elements(point: CelestialPoint) -> Result<(f64, f64)> {
    match point {
        CelestialPoint::Sun => Ok((280.460, 0.98564736)),
        CelestialPoint::Moon => Ok((218.316, 13.17639648)),
        CelestialPoint::Mercury => Ok((252.251, 4.09233445)),
        CelestialPoint::Venus => Ok((181.980, 1.60213034)),
        CelestialPoint::Mars => Ok((355.453, 0.52403304)),
        CelestialPoint::Jupiter => Ok((34.351, 0.08308529)),
        CelestialPoint::Saturn => Ok((50.078, 0.03344414)),
        CelestialPoint::Uranus => Ok((314.055, 0.01172834)),
        CelestialPoint::Neptune => Ok((304.348, 0.00598103)),
        CelestialPoint::Pluto => Ok((238.930, 0.00397671)),
        CelestialPoint::Ascendant | CelestialPoint::Mc => Err(EngineError::computation(
            "ephemeris",
            "angles are chart-derived, not ephemeris points",
        )),
    }
}

/// J2000 epoch as a Julian day.
const J2000_JD: f64 = 2_451_545.0;

impl Ephemeris for MeanEphemeris {
    fn longitude(&self, point: CelestialPoint, jd: f64) -> Result<f64> {
        let (l0, rate) = mean_elements(point)?;
        Ok(normalize_degrees(l0 + rate * (jd - J2000_JD)))
    }
}

/// Julian day of a civil date/time treated as UT.
pub fn julian_day(date: NaiveDate, time: Option<NaiveTime>) -> f64 {
    let jdn = i64::from(date.num_days_from_ce()) + 1_721_425;
    let day_fraction = match time {
        Some(t) => (f64::from(t.hour()) + f64::from(t.minute()) / 60.0) / 24.0,
        None => 0.5, // noon when the birth time is unknown
    };
    jdn as f64 - 0.5 + day_fraction
}

/// Tropical sun sign of a calendar date (fixed day boundaries).
pub fn sun_sign(date: NaiveDate) -> ZodiacSign {
    let (month, day) = (date.month(), date.day());
    match (month, day) {
        (3, 21..) | (4, ..=19) => ZodiacSign::Aries,
        (4, _) | (5, ..=20) => ZodiacSign::Taurus,
        (5, _) | (6, ..=21) => ZodiacSign::Gemini,
        (6, _) | (7, ..=22) => ZodiacSign::Cancer,
        (7, _) | (8, ..=22) => ZodiacSign::Leo,
        (8, _) | (9, ..=22) => ZodiacSign::Virgo,
        (9, _) | (10, ..=22) => ZodiacSign::Libra,
        (10, _) | (11, ..=22) => ZodiacSign::Scorpio,
        (11, _) | (12, ..=21) => ZodiacSign::Sagittarius,
        (12, _) | (1, ..=19) => ZodiacSign::Capricorn,
        (1, _) | (2, ..=18) => ZodiacSign::Aquarius,
        _ => ZodiacSign::Pisces,
    }
}

/// Local sidereal time in degrees (approximate, sufficient for equal-house
/// angles).
fn local_sidereal_degrees(jd: f64, longitude: f64, ut_hours: f64) -> f64 {
    let d = jd - J2000_JD;
    normalize_degrees(100.46 + 0.985647 * d + longitude + 15.0 * ut_hours)
}

/// Compute the natal chart for a birth descriptor using the given
/// ephemeris source.
pub fn compute_chart_with(
    descriptor: &BirthDescriptor,
    ephemeris: &dyn Ephemeris,
) -> Result<WesternChart> {
    let instant = parse_descriptor(descriptor)?;
    let jd = julian_day(instant.date, instant.time);

    let mut planets = Vec::with_capacity(CelestialPoint::PLANETS.len());
    for point in CelestialPoint::PLANETS {
        let longitude = ephemeris.longitude(point, jd)?;
        planets.push(PlanetPosition {
            point,
            longitude,
            sign: ZodiacSign::from_longitude(longitude),
        });
    }

    let ut_hours = instant
        .time
        .map(|t| f64::from(t.hour()) + f64::from(t.minute()) / 60.0)
        .unwrap_or(12.0);
    let geo_longitude = descriptor.longitude.unwrap_or(0.0);
    let mc = local_sidereal_degrees(jd, geo_longitude, ut_hours);
    let ascendant = normalize_degrees(mc + 90.0);

    let mut house_cusps = [0.0; 12];
    for (i, cusp) in house_cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(ascendant + 30.0 * i as f64);
    }

    Ok(WesternChart {
        sun_sign: sun_sign(instant.date),
        planets,
        ascendant,
        mc,
        house_cusps,
    })
}

/// Compute the natal chart with the bundled mean-motion ephemeris.
pub fn compute_chart(descriptor: &BirthDescriptor) -> Result<WesternChart> {
    compute_chart_with(descriptor, &MeanEphemeris)
}

impl WesternChart {
    /// All comparable points: planets plus the two angles.
    pub fn points(&self) -> Vec<(CelestialPoint, f64)> {
        let mut points: Vec<(CelestialPoint, f64)> = self
            .planets
            .iter()
            .map(|p| (p.point, p.longitude))
            .collect();
        points.push((CelestialPoint::Ascendant, self.ascendant));
        points.push((CelestialPoint::Mc, self.mc));
        points
    }
}
