//! Four pillar derivation
//!
//! Builds the complete `SajuProfile` from a birth descriptor. The year
//! pillar turns over at 立春, the month pillar at each 節 boundary, the day
//! pillar follows the continuous 60-cycle day index, and the hour pillar
//! buckets the birth hour into the twelve two-hour branches. A missing birth
//! time yields an hour pillar with no sibsin information instead of failing.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use tracing::debug;

use crate::calendar::cycles::daeun_cycles;
use crate::calendar::ganzhi::{
    branch_sibsin, day_ganzhi, geonrok_branch, hidden_stems, hour_branch, hour_stem, life_stage,
    month_branch, month_stem, principal_stem, stem_sibsin, year_ganzhi,
};
use crate::calendar::lunar::lunar_to_solar;
use crate::calendar::solar_terms::solar_month;
use crate::error::{EngineError, Result};
use crate::models::{
    BirthDescriptor, Branch, BranchInfo, CalendarType, DaeunDirection, Element, FiveElementCounts,
    FourPillars, Gender, Geokguk, Pillar, SajuProfile, Sibsin, Stem, StemInfo, YinYang,
};

/// Validated birth instant after descriptor parsing.
#[derive(Debug, Clone, Copy)]
pub struct BirthInstant {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub gender: Gender,
}

/// Parse and validate a birth descriptor into a solar-calendar instant.
pub fn parse_descriptor(descriptor: &BirthDescriptor) -> Result<BirthInstant> {
    // The timezone must resolve even though pillar math runs on the local
    // civil clock; a bad zone name is caller error, not a silent default.
    Tz::from_str(&descriptor.timezone).map_err(|_| {
        EngineError::invalid_input(format!("unparsable timezone '{}'", descriptor.timezone))
    })?;

    if let Some(lat) = descriptor.latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::invalid_input(format!(
                "latitude {lat} out of range"
            )));
        }
    }
    if let Some(lon) = descriptor.longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(EngineError::invalid_input(format!(
                "longitude {lon} out of range"
            )));
        }
    }

    let date = NaiveDate::parse_from_str(&descriptor.date, "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_input(format!("unparsable date '{}'", descriptor.date))
    })?;

    let date = match descriptor.calendar {
        CalendarType::Solar => date,
        CalendarType::Lunar => lunar_to_solar(
            date.year(),
            date.month(),
            date.day(),
            descriptor.leap_month,
        )?,
    };

    let time = match &descriptor.time {
        Some(t) => Some(NaiveTime::parse_from_str(t, "%H:%M").map_err(|_| {
            EngineError::invalid_input(format!("unparsable time '{t}'"))
        })?),
        None => None,
    };

    Ok(BirthInstant {
        date,
        time,
        gender: descriptor.gender,
    })
}

fn stem_info(stem: Stem, day_master: Stem, with_sibsin: bool) -> StemInfo {
    StemInfo {
        stem,
        element: stem.element(),
        yin_yang: stem.yin_yang(),
        sibsin: with_sibsin.then(|| stem_sibsin(day_master, stem)),
    }
}

fn branch_info(branch: Branch, day_master: Stem, with_sibsin: bool) -> BranchInfo {
    BranchInfo {
        branch,
        element: branch.element(),
        yin_yang: branch.yin_yang(),
        sibsin: with_sibsin.then(|| branch_sibsin(day_master, branch)),
    }
}

fn build_pillar(stem: Stem, branch: Branch, day_master: Stem, with_sibsin: bool) -> Pillar {
    Pillar {
        stem: stem_info(stem, day_master, with_sibsin),
        branch: branch_info(branch, day_master, with_sibsin),
        hidden_stems: hidden_stems(branch).to_vec(),
        life_stage: life_stage(day_master, branch),
    }
}

/// Derive the four pillars for a birth instant.
pub fn four_pillars(instant: &BirthInstant) -> Result<FourPillars> {
    let (pillar_year, month_ordinal) = solar_month(instant.date)?;

    let year_gz = year_ganzhi(pillar_year);
    let m_branch = month_branch(month_ordinal);
    let m_stem = month_stem(year_gz.stem, month_ordinal);
    let day_gz = day_ganzhi(instant.date);
    let day_master = day_gz.stem;

    let (h_stem, h_branch, hour_known) = match instant.time {
        Some(t) => {
            let hb = hour_branch(t.hour());
            (hour_stem(day_master, hb), hb, true)
        }
        // Unknown birth hour: a conventional 子-hour placeholder that
        // carries no sibsin information downstream.
        None => (hour_stem(day_master, Branch::Ja), Branch::Ja, false),
    };

    let pillars = FourPillars {
        year: build_pillar(year_gz.stem, year_gz.branch, day_master, true),
        month: build_pillar(m_stem, m_branch, day_master, true),
        day: Pillar {
            // The day stem is the day master itself and carries no sibsin.
            stem: stem_info(day_master, day_master, false),
            branch: branch_info(day_gz.branch, day_master, true),
            hidden_stems: hidden_stems(day_gz.branch).to_vec(),
            life_stage: life_stage(day_master, day_gz.branch),
        },
        hour: build_pillar(h_stem, h_branch, day_master, hour_known),
    };
    Ok(pillars)
}

/// Count the 8 stem/branch element slots.
pub fn five_element_counts(pillars: &FourPillars) -> FiveElementCounts {
    let mut counts = FiveElementCounts::default();
    for (_, pillar) in pillars.iter() {
        counts.add(pillar.stem.element);
        counts.add(pillar.branch.element);
    }
    counts
}

/// Classify the chart pattern (격국) from the month branch's principal qi.
pub fn classify_geokguk(day_master: Stem, month: Branch) -> Geokguk {
    let principal = principal_stem(month);
    match stem_sibsin(day_master, principal) {
        Sibsin::BiGyeon => {
            if geonrok_branch(day_master) == month {
                Geokguk::GeonRok
            } else {
                Geokguk::BiGyeon
            }
        }
        Sibsin::GeopJae => {
            if day_master.yin_yang() == YinYang::Yang {
                Geokguk::YangIn
            } else {
                Geokguk::GeopJae
            }
        }
        Sibsin::SikSin => Geokguk::SikSin,
        Sibsin::SangGwan => Geokguk::SangGwan,
        Sibsin::PyeonJae => Geokguk::PyeonJae,
        Sibsin::JeongJae => Geokguk::JeongJae,
        Sibsin::PyeonGwan => Geokguk::PyeonGwan,
        Sibsin::JeongGwan => Geokguk::JeongGwan,
        Sibsin::PyeonIn => Geokguk::PyeonIn,
        Sibsin::JeongIn => Geokguk::JeongIn,
    }
}

/// Favorable/unfavorable elements from day-master strength.
///
/// Strength counts the slots whose element matches or generates the day
/// master. A strong master favors the elements it produces and controls;
/// a weak one favors its own element and its resource.
pub fn yongsin_kisin(
    day_master: Stem,
    counts: &FiveElementCounts,
) -> (Vec<Element>, Vec<Element>) {
    let dm = day_master.element();
    let resource = Element::ALL
        .into_iter()
        .find(|e| e.generates() == dm)
        .unwrap_or(dm);
    let support = counts.get(dm) + counts.get(resource);

    if support >= 4 {
        // Strong: drain and spend.
        let yongsin = vec![dm.generates(), dm.controls()];
        let kisin = vec![dm, resource];
        (yongsin, kisin)
    } else {
        // Weak: feed and stand with peers.
        let officer = Element::ALL
            .into_iter()
            .find(|e| e.controls() == dm)
            .unwrap_or(dm);
        let yongsin = vec![resource, dm];
        let kisin = vec![officer, dm.generates()];
        (yongsin, kisin)
    }
}

/// Daeun direction: yang year stem with male, or yin with female, runs
/// forward; the other combinations run backward.
pub fn daeun_direction(year_stem: Stem, gender: Gender) -> DaeunDirection {
    let yang_year = year_stem.yin_yang() == YinYang::Yang;
    let male = gender == Gender::Male;
    if yang_year == male {
        DaeunDirection::Forward
    } else {
        DaeunDirection::Backward
    }
}

/// Compute the full Saju profile from a birth descriptor.
pub fn compute_profile(descriptor: &BirthDescriptor) -> Result<SajuProfile> {
    let instant = parse_descriptor(descriptor)?;
    let pillars = four_pillars(&instant)?;
    let day_master = pillars.day.stem.stem;

    let counts = five_element_counts(&pillars);
    debug_assert_eq!(counts.total(), 8);

    let geokguk = classify_geokguk(day_master, pillars.month.branch.branch);
    let (yongsin, kisin) = yongsin_kisin(day_master, &counts);
    let direction = daeun_direction(pillars.year.stem.stem, instant.gender);
    let (start_age, cycles) = daeun_cycles(&instant, &pillars, direction, day_master)?;

    debug!(
        day_master = %day_master,
        geokguk = geokguk.korean(),
        "profile computed for {}",
        instant.date
    );

    Ok(SajuProfile {
        day_master,
        five_element_counts: counts,
        yongsin,
        kisin,
        geokguk,
        daeun_direction: direction,
        daeun_start_age: start_age,
        daeun_cycles: cycles,
        birth_year: instant.date.year(),
        gender: instant.gender,
        has_birth_time: instant.time.is_some(),
        pillars,
    })
}
