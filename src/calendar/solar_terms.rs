//! Solar term (절기) boundary dates
//!
//! Uses the standard 0.2422-coefficient approximation per century, valid for
//! 1900–2100. Dates are accurate to the day for the supported range, which is
//! the granularity the pillar calculator needs; per-year almanac corrections
//! are intentionally not applied.

use chrono::NaiveDate;

use crate::error::{EngineError, Result};

/// Century coefficients for the 24 terms, January onward, two per month.
/// Order: 小寒 大寒 立春 雨水 驚蟄 春分 清明 穀雨 立夏 小滿 芒種 夏至
///        小暑 大暑 立秋 處暑 白露 秋分 寒露 霜降 立冬 小雪 大雪 冬至
const TERMS_1900: [f64; 24] = [
    6.11, 20.84, 4.6295, 19.4599, 6.3826, 21.4155, 5.59, 20.888, 6.318, 21.86, 6.5, 22.2, 7.928,
    23.65, 8.35, 23.95, 8.44, 23.822, 9.098, 24.218, 8.218, 23.08, 7.9, 22.6,
];
const TERMS_2000: [f64; 24] = [
    5.4055, 20.12, 3.87, 18.73, 5.63, 20.646, 4.81, 20.1, 5.52, 21.04, 5.678, 21.37, 7.108, 22.83,
    7.5, 23.13, 7.646, 23.042, 8.318, 23.438, 7.438, 22.36, 7.18, 21.94,
];

/// Day of month on which the `term_index`-th term of `year` falls.
/// `term_index` counts from 0 (小寒) to 23 (冬至).
fn term_day(year: i32, term_index: usize) -> Result<u32> {
    if !(1900..=2100).contains(&year) {
        return Err(EngineError::invalid_input(format!(
            "year {year} outside supported solar-term range 1900-2100"
        )));
    }
    let (table, y) = if year < 2000 {
        (&TERMS_1900, year - 1900)
    } else {
        (&TERMS_2000, year - 2000)
    };
    let c = table[term_index];
    let y = f64::from(y);
    let day = (y * 0.2422 + c).floor() as i64 - (y as i64 - 1).div_euclid(4);
    Ok(day.clamp(1, 31) as u32)
}

/// Date of the 節 (month-opening term) in the given calendar month.
pub fn jie_date(year: i32, month: u32) -> Result<NaiveDate> {
    let term_index = ((month - 1) * 2) as usize;
    let day = term_day(year, term_index)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::invalid_input(format!("bad term date {year}-{month}-{day}")))
}

/// Date of the 中 (mid-month term) in the given calendar month.
pub fn zhong_date(year: i32, month: u32) -> Result<NaiveDate> {
    let term_index = ((month - 1) * 2 + 1) as usize;
    let day = term_day(year, term_index)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::invalid_input(format!("bad term date {year}-{month}-{day}")))
}

/// 立春 of the given year: the year-pillar boundary.
pub fn lichun(year: i32) -> Result<NaiveDate> {
    jie_date(year, 2)
}

/// Winter solstice (冬至) of the given year, anchoring lunar month 11.
pub fn winter_solstice(year: i32) -> Result<NaiveDate> {
    zhong_date(year, 12)
}

/// Solar month of a date: the governing year-stem year and the month
/// ordinal counted from the 立春 month (0 = 寅).
pub fn solar_month(date: NaiveDate) -> Result<(i32, usize)> {
    use chrono::Datelike;
    let year = date.year();

    if date < lichun(year)? {
        // Before 立春 the date belongs to the previous pillar year: either
        // the 丑 month (past 小寒) or the tail of the 子 month.
        if date >= jie_date(year, 1)? {
            return Ok((year - 1, 11));
        }
        return Ok((year - 1, 10));
    }

    let mut ordinal = 0;
    for month in 3..=12 {
        if date >= jie_date(year, month)? {
            ordinal = month as usize - 2;
        }
    }
    Ok((year, ordinal))
}

/// Days from `date` to the next 節 boundary (exclusive of `date` itself
/// when it falls on a boundary day).
pub fn days_to_next_jie(date: NaiveDate) -> Result<i64> {
    use chrono::Datelike;
    let year = date.year();
    for month in 1..=12 {
        let jie = jie_date(year, month)?;
        if jie > date {
            return Ok((jie - date).num_days());
        }
    }
    let jie = jie_date(year + 1, 1)?;
    Ok((jie - date).num_days())
}

/// Days from the previous 節 boundary to `date`.
pub fn days_from_prev_jie(date: NaiveDate) -> Result<i64> {
    use chrono::Datelike;
    let year = date.year();
    let mut prev: Option<NaiveDate> = None;
    for month in 1..=12 {
        let jie = jie_date(year, month)?;
        if jie <= date {
            prev = Some(jie);
        }
    }
    let prev = match prev {
        Some(d) => d,
        None => jie_date(year - 1, 12)?,
    };
    Ok((date - prev).num_days())
}
