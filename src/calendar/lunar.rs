//! Lunar calendar input conversion
//!
//! Converts a Korean lunisolar birth date to the solar date the pillar
//! calculator works on. Month starts come from mean new moons; month
//! numbering follows the classical rules: month 11 contains the winter
//! solstice, and in a 13-month year the first month without a mid-month
//! term (中氣) repeats the previous month's number as the leap month.
//!
//! Mean-moon month starts can differ from the official almanac by one day
//! near midnight boundaries; this matches the accuracy of the solar-term
//! approximation used elsewhere in this module tree.

use chrono::{Datelike, NaiveDate};

use crate::calendar::solar_terms::{winter_solstice, zhong_date};
use crate::error::{EngineError, Result};

/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530588861;

/// JD of the first mean new moon of 2000 (2000-01-06 18:14 UTC).
const NEW_MOON_EPOCH_JD: f64 = 2451550.09766;

/// Offset between `num_days_from_ce` and JDN.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// KST offset in fractional days; lunar month boundaries are taken in
/// Korean civil time.
const KST_OFFSET_DAYS: f64 = 9.0 / 24.0;

fn jd_to_date(jd: f64) -> Result<NaiveDate> {
    let jdn = (jd + 0.5 + KST_OFFSET_DAYS).floor() as i64;
    let ndc = jdn - JDN_CE_OFFSET;
    NaiveDate::from_num_days_from_ce_opt(
        i32::try_from(ndc).map_err(|_| EngineError::invalid_input("date out of range"))?,
    )
    .ok_or_else(|| EngineError::invalid_input("date out of range"))
}

fn date_to_jd(date: NaiveDate) -> f64 {
    (i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET) as f64 - 0.5
}

/// Civil date of the `k`-th mean new moon from the 2000 epoch.
fn new_moon_date(k: i64) -> Result<NaiveDate> {
    jd_to_date(NEW_MOON_EPOCH_JD + SYNODIC_MONTH * k as f64)
}

/// Largest lunation number whose new moon falls on or before `date`.
fn lunation_on_or_before(date: NaiveDate) -> Result<i64> {
    let approx = ((date_to_jd(date) - NEW_MOON_EPOCH_JD) / SYNODIC_MONTH).floor() as i64;
    // The floor estimate can land one month off either way.
    for k in (approx - 1..=approx + 2).rev() {
        if new_moon_date(k)? <= date {
            return Ok(k);
        }
    }
    Err(EngineError::invalid_input(format!(
        "no lunation found before {date}"
    )))
}

/// Whether the lunar month starting at `start` (exclusive end `end`)
/// contains a mid-month term.
fn contains_zhongqi(start: NaiveDate, end: NaiveDate) -> Result<bool> {
    for year in [start.year(), end.year()] {
        for month in 1..=12 {
            let z = zhong_date(year, month)?;
            if z >= start && z < end {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// One month of the enumerated lunisolar year.
#[derive(Debug, Clone, Copy)]
struct LunarMonth {
    number: u32,
    leap: bool,
    start: NaiveDate,
    days: u32,
}

/// Enumerate the lunar months covering lunar year `year`, from month 11 of
/// the preceding solstice anchor through month 10 of `year`.
fn enumerate_months(year: i32) -> Result<Vec<LunarMonth>> {
    let anchor_prev = winter_solstice(year - 1)?;
    let anchor_next = winter_solstice(year)?;
    let k0 = lunation_on_or_before(anchor_prev)?;
    let k1 = lunation_on_or_before(anchor_next)?;
    let month_count = (k1 - k0) as usize; // 12 in a common year, 13 with a leap
    let has_leap = month_count == 13;

    let mut months = Vec::with_capacity(month_count + 2);
    let mut number = 11u32; // anchor month
    let mut leap_assigned = false;

    for i in 0..(month_count + 2) {
        let k = k0 + i as i64;
        let start = new_moon_date(k)?;
        let end = new_moon_date(k + 1)?;
        let days = (end - start).num_days() as u32;

        let is_leap =
            has_leap && !leap_assigned && i > 0 && !contains_zhongqi(start, end)?;
        if is_leap {
            leap_assigned = true;
            // A leap month repeats the number of the month before it.
            let prev = months
                .last()
                .map(|m: &LunarMonth| m.number)
                .unwrap_or(number);
            months.push(LunarMonth {
                number: prev,
                leap: true,
                start,
                days,
            });
            continue;
        }

        if i > 0 {
            number = if number == 12 { 1 } else { number + 1 };
        }
        months.push(LunarMonth {
            number,
            leap: false,
            start,
            days,
        });
    }

    Ok(months)
}

/// Convert a lunar birth date to its solar calendar date.
pub fn lunar_to_solar(year: i32, month: u32, day: u32, leap_month: bool) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::invalid_input(format!(
            "lunar month {month} out of range 1-12"
        )));
    }
    if !(1..=30).contains(&day) {
        return Err(EngineError::invalid_input(format!(
            "lunar day {day} out of range 1-30"
        )));
    }
    if !(1901..=2099).contains(&year) {
        return Err(EngineError::invalid_input(format!(
            "lunar year {year} outside supported range 1901-2099"
        )));
    }

    let months = enumerate_months(year)?;
    let target = months
        .iter()
        // Skip the anchor months 11/12, which belong to the previous
        // lunar year's numbering.
        .skip_while(|m| m.number >= 11)
        .find(|m| m.number == month && m.leap == leap_month)
        .ok_or_else(|| {
            EngineError::invalid_input(format!(
                "lunar {year}-{month}{} does not exist",
                if leap_month { " (leap)" } else { "" }
            ))
        })?;

    if day > target.days {
        return Err(EngineError::invalid_input(format!(
            "lunar {year}-{month}-{day} exceeds month length {}",
            target.days
        )));
    }

    Ok(target.start + chrono::Duration::days(i64::from(day) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_lengths_are_29_or_30() {
        for year in [1990, 2000, 2024] {
            for m in enumerate_months(year).unwrap() {
                assert!(
                    m.days == 29 || m.days == 30,
                    "lunar month {:?} has {} days",
                    m,
                    m.days
                );
            }
        }
    }

    #[test]
    fn test_lunar_new_year_window() {
        // Lunar 1-1 always lands between Jan 21 and Feb 21.
        for year in [1985, 1995, 2005, 2015, 2025] {
            let d = lunar_to_solar(year, 1, 1, false).unwrap();
            assert_eq!(d.year(), year);
            let within = (d.month() == 1 && d.day() >= 21) || (d.month() == 2 && d.day() <= 21);
            assert!(within, "lunar new year {year} fell on {d}");
        }
    }

    #[test]
    fn test_leap_month_rejected_in_common_month() {
        // No year has both a leap month 1 and leap month 7; asking for a
        // leap month that does not exist must fail, not misresolve.
        let err = lunar_to_solar(2024, 1, 1, true);
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_input_ranges() {
        assert!(lunar_to_solar(2024, 13, 1, false).is_err());
        assert!(lunar_to_solar(2024, 1, 31, false).is_err());
        assert!(lunar_to_solar(1800, 1, 1, false).is_err());
    }

    #[test]
    fn test_solar_date_ordering() {
        // Later lunar days map to later solar dates within a month.
        let a = lunar_to_solar(1990, 4, 1, false).unwrap();
        let b = lunar_to_solar(1990, 4, 15, false).unwrap();
        assert_eq!((b - a).num_days(), 14);
    }
}
