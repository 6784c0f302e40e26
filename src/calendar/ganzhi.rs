//! Sexagenary cycle arithmetic
//!
//! Pure lookup math over the stem/branch cycles: sibsin classification
//! against a day master, hidden stems, twelve life stages, and the fixed
//! offset tables that derive month stems from year stems (five tigers) and
//! hour stems from day stems (five rats).

use chrono::{Datelike, NaiveDate};

use crate::models::{Branch, Element, GanzhiCycle, LifeStage, Sibsin, Stem, YinYang};

/// Days from 0001-01-01 (CE) to the reference 甲子 day.
///
/// 1949-10-01 is a documented 甲子 day; `(days_from_ce + 14) % 60` lands
/// index 0 on it, which also yields the verified 戊午 for 2000-01-01.
const DAY_CYCLE_OFFSET: i64 = 14;

/// Sexagenary index of a calendar day (0 = 甲子).
pub fn day_cycle_index(date: NaiveDate) -> i64 {
    (i64::from(date.num_days_from_ce()) + DAY_CYCLE_OFFSET).rem_euclid(60)
}

/// Ganzhi of a calendar day.
pub fn day_ganzhi(date: NaiveDate) -> GanzhiCycle {
    GanzhiCycle::from_index(day_cycle_index(date))
}

/// Ganzhi of a calendar year (year-level view, no 立春 adjustment).
///
/// 1984 is 甲子; the pillar calculator applies the 立春 boundary before
/// calling this.
pub fn year_ganzhi(year: i32) -> GanzhiCycle {
    GanzhiCycle::from_index(i64::from(year) - 4)
}

/// Classify a stem/branch element against the day master (십신).
pub fn sibsin_for(day_master: Stem, element: Element, yin_yang: YinYang) -> Sibsin {
    let dm_element = day_master.element();
    let same_polarity = day_master.yin_yang() == yin_yang;

    if element == dm_element {
        if same_polarity {
            Sibsin::BiGyeon
        } else {
            Sibsin::GeopJae
        }
    } else if dm_element.generates() == element {
        if same_polarity {
            Sibsin::SikSin
        } else {
            Sibsin::SangGwan
        }
    } else if dm_element.controls() == element {
        if same_polarity {
            Sibsin::PyeonJae
        } else {
            Sibsin::JeongJae
        }
    } else if element.controls() == dm_element {
        if same_polarity {
            Sibsin::PyeonGwan
        } else {
            Sibsin::JeongGwan
        }
    } else {
        // element generates the day master
        if same_polarity {
            Sibsin::PyeonIn
        } else {
            Sibsin::JeongIn
        }
    }
}

/// Sibsin of a stem against the day master.
pub fn stem_sibsin(day_master: Stem, stem: Stem) -> Sibsin {
    sibsin_for(day_master, stem.element(), stem.yin_yang())
}

/// Sibsin of a branch (by its principal element) against the day master.
pub fn branch_sibsin(day_master: Stem, branch: Branch) -> Sibsin {
    sibsin_for(day_master, branch.element(), branch.yin_yang())
}

/// Hidden stems (지장간) of each branch, principal qi last.
pub fn hidden_stems(branch: Branch) -> &'static [Stem] {
    match branch {
        Branch::Ja => &[Stem::Gye],
        Branch::Chuk => &[Stem::Gye, Stem::Shin, Stem::Gi],
        Branch::In => &[Stem::Mu, Stem::Byeong, Stem::Gap],
        Branch::Myo => &[Stem::Eul],
        Branch::Jin => &[Stem::Eul, Stem::Gye, Stem::Mu],
        Branch::Sa => &[Stem::Mu, Stem::Gyeong, Stem::Byeong],
        Branch::O => &[Stem::Gi, Stem::Jeong],
        Branch::Mi => &[Stem::Jeong, Stem::Eul, Stem::Gi],
        Branch::Sin => &[Stem::Mu, Stem::Im, Stem::Gyeong],
        Branch::Yu => &[Stem::Shin],
        Branch::Sul => &[Stem::Shin, Stem::Jeong, Stem::Mu],
        Branch::Hae => &[Stem::Gap, Stem::Im],
    }
}

/// Principal hidden stem (본기) of a branch.
pub fn principal_stem(branch: Branch) -> Stem {
    // hidden_stems keeps the principal qi last
    *hidden_stems(branch)
        .last()
        .unwrap_or(&Stem::Gap)
}

const LIFE_STAGES: [LifeStage; 12] = [
    LifeStage::JangSaeng,
    LifeStage::MokYok,
    LifeStage::GwanDae,
    LifeStage::GeonRok,
    LifeStage::JeWang,
    LifeStage::Soe,
    LifeStage::Byeong,
    LifeStage::Sa,
    LifeStage::Myo,
    LifeStage::Jeol,
    LifeStage::Tae,
    LifeStage::Yang,
];

/// Branch where each stem begins its 장생 stage.
fn jangsaeng_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Gap => Branch::Hae,
        Stem::Eul => Branch::O,
        Stem::Byeong | Stem::Mu => Branch::In,
        Stem::Jeong | Stem::Gi => Branch::Yu,
        Stem::Gyeong => Branch::Sa,
        Stem::Shin => Branch::Ja,
        Stem::Im => Branch::Sin,
        Stem::Gye => Branch::Myo,
    }
}

/// Twelve life stage (십이운성) of a stem over a branch. Yang stems advance
/// forward through the branch cycle, yin stems backward.
pub fn life_stage(stem: Stem, branch: Branch) -> LifeStage {
    let start = jangsaeng_branch(stem).index() as i64;
    let target = branch.index() as i64;
    let steps = match stem.yin_yang() {
        YinYang::Yang => (target - start).rem_euclid(12),
        YinYang::Yin => (start - target).rem_euclid(12),
    };
    LIFE_STAGES[steps as usize]
}

/// 건록 branch of a day master (the GeonRok life-stage position).
pub fn geonrok_branch(stem: Stem) -> Branch {
    Branch::ALL
        .into_iter()
        .find(|&b| life_stage(stem, b) == LifeStage::GeonRok)
        .unwrap_or(Branch::In)
}

/// Two-hour branch bucket of a birth hour. 23:00–00:59 is 子.
pub fn hour_branch(hour: u32) -> Branch {
    Branch::from_index((((hour + 1) / 2) % 12) as usize)
}

/// Hour stem from the day stem (five rats offset table).
///
/// 甲/己 days start the 子 hour at 甲, 乙/庚 at 丙, 丙/辛 at 戊,
/// 丁/壬 at 庚, 戊/癸 at 壬.
pub fn hour_stem(day_stem: Stem, hour_branch: Branch) -> Stem {
    let start = (day_stem.index() % 5) * 2;
    Stem::from_index(start + hour_branch.index())
}

/// Month stem from the year stem (five tigers offset table).
///
/// `month_ordinal` counts solar months from the 寅 month (0 = 寅).
/// 甲/己 years start the 寅 month at 丙, 乙/庚 at 戊, 丙/辛 at 庚,
/// 丁/壬 at 壬, 戊/癸 at 甲.
pub fn month_stem(year_stem: Stem, month_ordinal: usize) -> Stem {
    let start = (year_stem.index() % 5) * 2 + 2;
    Stem::from_index(start + month_ordinal)
}

/// Branch of a solar month. Ordinal 0 (the 立春 month) is 寅.
pub fn month_branch(month_ordinal: usize) -> Branch {
    Branch::from_index(month_ordinal + 2)
}
