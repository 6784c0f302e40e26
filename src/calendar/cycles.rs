//! Luck cycle derivation (대운/세운/월운/일진)
//!
//! Derived views over the same 60-cycle arithmetic the pillars use. Each
//! function is independent and recomputed per request; nothing here caches.

use chrono::NaiveDate;

use crate::calendar::ganzhi::{day_ganzhi, month_branch, month_stem, stem_sibsin, year_ganzhi};
use crate::calendar::pillars::BirthInstant;
use crate::calendar::solar_terms::{days_from_prev_jie, days_to_next_jie, solar_month};
use crate::error::{EngineError, Result};
use crate::models::{
    AnnualCycle, DaeunCycle, DaeunDirection, FourPillars, GanzhiCycle, IljinEntry, MonthlyCycle,
    Stem,
};

/// 60-cycle index of a stem/branch pair.
fn cycle_index(stem_index: usize, branch_index: usize) -> i64 {
    (6 * stem_index as i64 - 5 * branch_index as i64).rem_euclid(60)
}

/// Daeun start age and the ten decade cycles.
///
/// Start age is the distance to the nearest 節 boundary in the daeun
/// direction, divided by three and clamped to 1–10. Cycles step the month
/// pillar through the 60-cycle in the daeun direction.
pub fn daeun_cycles(
    instant: &BirthInstant,
    pillars: &FourPillars,
    direction: DaeunDirection,
    day_master: Stem,
) -> Result<(u8, Vec<DaeunCycle>)> {
    let days = match direction {
        DaeunDirection::Forward => days_to_next_jie(instant.date)?,
        DaeunDirection::Backward => days_from_prev_jie(instant.date)?,
    };
    let start_age = ((days as f64 / 3.0).round() as i64).clamp(1, 10) as u8;

    let month_index = cycle_index(
        pillars.month.stem.stem.index(),
        pillars.month.branch.branch.index(),
    );

    let mut cycles = Vec::with_capacity(10);
    for i in 1..=10i64 {
        let step = match direction {
            DaeunDirection::Forward => month_index + i,
            DaeunDirection::Backward => month_index - i,
        };
        let gz = GanzhiCycle::from_index(step);
        let age = start_age as i64 + 10 * (i - 1);
        cycles.push(DaeunCycle {
            stem: gz.stem,
            branch: gz.branch,
            start_age: age as u8,
            end_age: (age + 9) as u8,
            sibsin: stem_sibsin(day_master, gz.stem),
        });
    }
    Ok((start_age, cycles))
}

/// Annual cycles (세운) for `n` years from `start_year`.
pub fn annual_cycles(start_year: i32, n: usize, day_master: Stem) -> Vec<AnnualCycle> {
    (start_year..start_year + n as i32)
        .map(|year| {
            let gz = year_ganzhi(year);
            AnnualCycle {
                year,
                stem: gz.stem,
                branch: gz.branch,
                sibsin: stem_sibsin(day_master, gz.stem),
            }
        })
        .collect()
}

/// Monthly cycles (월운) for a calendar year: always 12 entries, sorted by
/// month. Each entry is the solar-month pillar in effect at mid-month,
/// which keeps the mapping stable against 節 boundary days.
pub fn monthly_cycles(year: i32, day_master: Stem) -> Result<Vec<MonthlyCycle>> {
    let mut cycles = Vec::with_capacity(12);
    for month in 1..=12u32 {
        let mid = NaiveDate::from_ymd_opt(year, month, 15)
            .ok_or_else(|| EngineError::invalid_input(format!("bad month {year}-{month}")))?;
        let (pillar_year, ordinal) = solar_month(mid)?;
        let y_stem = year_ganzhi(pillar_year).stem;
        let stem = month_stem(y_stem, ordinal);
        let branch = month_branch(ordinal);
        cycles.push(MonthlyCycle {
            year,
            month,
            stem,
            branch,
            sibsin: stem_sibsin(day_master, stem),
        });
    }
    Ok(cycles)
}

/// Daily calendar (일진) for a month: one entry per calendar day, `day`
/// fields consecutive from 1.
pub fn iljin_calendar(year: i32, month: u32, day_master: Stem) -> Result<Vec<IljinEntry>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::invalid_input(format!("bad month {year}-{month:02}")))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::invalid_input(format!("bad month {year}-{month:02}")))?;
    let days_in_month = (next_first - first).num_days() as u32;

    let mut entries = Vec::with_capacity(days_in_month as usize);
    for day in 1..=days_in_month {
        let date = first + chrono::Duration::days(i64::from(day) - 1);
        let gz = day_ganzhi(date);
        entries.push(IljinEntry {
            day,
            stem: gz.stem,
            branch: gz.branch,
            sibsin: stem_sibsin(day_master, gz.stem),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::pillars::{compute_profile, four_pillars, parse_descriptor};
    use crate::models::{BirthDescriptor, CalendarType, Gender};

    fn instant() -> BirthInstant {
        parse_descriptor(&BirthDescriptor {
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
    fn test_cycle_index_round_trip() {
        // 甲子 is 0, 戊午 is 54, 癸亥 is 59.
        assert_eq!(cycle_index(0, 0), 0);
        assert_eq!(cycle_index(4, 6), 54);
        assert_eq!(cycle_index(9, 11), 59);
    }

    #[test]
    fn test_daeun_always_ten_cycles() {
        let inst = instant();
        let pillars = four_pillars(&inst).unwrap();
        for direction in [DaeunDirection::Forward, DaeunDirection::Backward] {
            let (start_age, cycles) =
                daeun_cycles(&inst, &pillars, direction, Stem::Gap).unwrap();
            assert_eq!(cycles.len(), 10);
            assert!((1..=10).contains(&start_age));
            // Ages tile the century in 10-year blocks.
            for (i, c) in cycles.iter().enumerate() {
                assert_eq!(c.start_age, start_age + 10 * i as u8);
                assert_eq!(c.end_age, c.start_age + 9);
            }
        }
    }

    #[test]
    fn test_daeun_steps_from_month_pillar() {
        let inst = instant();
        let pillars = four_pillars(&inst).unwrap();
        let month_index = cycle_index(
            pillars.month.stem.stem.index(),
            pillars.month.branch.branch.index(),
        );
        let (_, forward) =
            daeun_cycles(&inst, &pillars, DaeunDirection::Forward, Stem::Gap).unwrap();
        let expected = GanzhiCycle::from_index(month_index + 1);
        assert_eq!(forward[0].stem, expected.stem);
        assert_eq!(forward[0].branch, expected.branch);
    }

    #[test]
    fn test_annual_cycles_span() {
        let cycles = annual_cycles(2024, 5, Stem::Gap);
        assert_eq!(cycles.len(), 5);
        assert_eq!(cycles[0].year, 2024);
        assert_eq!(cycles[0].stem, Stem::Gap); // 2024 is 甲辰
        assert_eq!(cycles[4].year, 2028);
    }

    #[test]
    fn test_monthly_cycles_always_twelve() {
        let cycles = monthly_cycles(2024, Stem::Gap).unwrap();
        assert_eq!(cycles.len(), 12);
        for (i, c) in cycles.iter().enumerate() {
            assert_eq!(c.month, i as u32 + 1);
        }
    }

    #[test]
    fn test_iljin_month_lengths() {
        // February 2024 is a leap month: 29 consecutive days.
        let feb = iljin_calendar(2024, 2, Stem::Gap).unwrap();
        assert_eq!(feb.len(), 29);
        for (i, e) in feb.iter().enumerate() {
            assert_eq!(e.day, i as u32 + 1);
        }

        assert_eq!(iljin_calendar(2024, 4, Stem::Gap).unwrap().len(), 30);
        assert_eq!(iljin_calendar(2024, 1, Stem::Gap).unwrap().len(), 31);
    }

    #[test]
    fn test_iljin_consecutive_in_cycle() {
        let days = iljin_calendar(2024, 3, Stem::Gap).unwrap();
        for pair in days.windows(2) {
            let a = cycle_index(pair[0].stem.index(), pair[0].branch.index());
            let b = cycle_index(pair[1].stem.index(), pair[1].branch.index());
            assert_eq!((a + 1) % 60, b);
        }
    }

    #[test]
    fn test_profile_daeun_integration() {
        let profile = compute_profile(&BirthDescriptor {
            date: "1990-05-15".to_string(),
            time: Some("10:30".to_string()),
            gender: Gender::Male,
            calendar: CalendarType::Solar,
            leap_month: false,
            timezone: "Asia/Seoul".to_string(),
            latitude: None,
            longitude: None,
        })
        .unwrap();
        assert_eq!(profile.daeun_cycles.len(), 10);
    }
}
