//! Integration tests for the sajuvise engine
//!
//! These exercise the public library API end to end: profile derivation,
//! cycle views, relation classification, synastry, the bonus engine, and
//! the simulators. Everything here is pure computation, so the suite needs
//! no fixtures or temp directories.

use sajuvise::bonus::{calculate_tier7_to10_bonus, BonusInput};
use sajuvise::calendar::{compute_profile, iljin_calendar, monthly_cycles};
use sajuvise::compat::{analyze_ganhap, analyze_shinsals};
use sajuvise::models::{
    BirthDescriptor, Branch, CalendarType, EventType, Gender, RelationKind, Stem,
};
use sajuvise::relations::ganhap::combination_element;
use sajuvise::relations::{display_title, relations_between};
use sajuvise::scoring::{calculate_weights, QueryDomain, Transit, WeightLayer};
use sajuvise::simulator::{
    find_optimal_timing, simulate_fortune_flow, simulate_life_cycle, simulate_monthly_fortune,
    LifeArea, SnapshotOptions,
};
use sajuvise::western::{
    aspects_between, calculate_synastry, compute_chart, sun_sign, AspectType, CelestialPoint,
    ZodiacSign,
};

fn descriptor(date: &str, time: Option<&str>, gender: Gender) -> BirthDescriptor {
    BirthDescriptor {
        date: date.to_string(),
        time: time.map(str::to_string),
        gender,
        calendar: CalendarType::Solar,
        leap_month: false,
        timezone: "Asia/Seoul".to_string(),
        latitude: Some(37.57),
        longitude: Some(126.98),
    }
}

#[test]
fn five_element_counts_always_sum_to_eight() {
    let dates = [
        "1955-01-01",
        "1972-02-04",
        "1984-06-30",
        "1990-05-15",
        "2000-02-29",
        "2012-12-21",
        "2024-02-04",
    ];
    for date in dates {
        let profile = compute_profile(&descriptor(date, Some("10:30"), Gender::Male)).unwrap();
        assert_eq!(
            profile.five_element_counts.total(),
            8,
            "element slots for {date}"
        );
    }
}

#[test]
fn daeun_cycles_always_ten() {
    for (date, gender) in [
        ("1990-05-15", Gender::Male),
        ("1990-05-15", Gender::Female),
        ("1985-11-03", Gender::Female),
        ("2001-07-19", Gender::Male),
    ] {
        let profile = compute_profile(&descriptor(date, None, gender)).unwrap();
        assert_eq!(profile.daeun_cycles.len(), 10);
        assert!((1..=10).contains(&profile.daeun_start_age));
    }
}

#[test]
fn monthly_cycles_return_twelve_sorted_months() {
    let cycles = monthly_cycles(2024, Stem::Gap).unwrap();
    assert_eq!(cycles.len(), 12);
    let months: Vec<u32> = cycles.iter().map(|c| c.month).collect();
    assert_eq!(months, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn iljin_calendar_matches_month_lengths() {
    let feb = iljin_calendar(2024, 2, Stem::Gap).unwrap();
    assert_eq!(feb.len(), 29);
    assert_eq!(feb.first().unwrap().day, 1);
    assert_eq!(feb.last().unwrap().day, 29);
    for (i, entry) in feb.iter().enumerate() {
        assert_eq!(entry.day, i as u32 + 1, "iljin days must be consecutive");
    }

    assert_eq!(iljin_calendar(2024, 4, Stem::Gap).unwrap().len(), 30);
    assert_eq!(iljin_calendar(2024, 1, Stem::Gap).unwrap().len(), 31);
}

#[test]
fn day_pillar_is_idempotent() {
    let a = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let b = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    assert_eq!(a.pillars.day.stem.stem, b.pillars.day.stem.stem);
    assert_eq!(a.pillars.day.branch.branch, b.pillars.day.branch.branch);
}

#[test]
fn ja_o_pair_is_always_chung() {
    let matches = relations_between(Branch::Ja, Branch::O);
    assert!(matches.iter().any(|r| r.kind == RelationKind::Chung));
    assert_eq!(
        display_title(Branch::Ja, Branch::O),
        Some(RelationKind::Chung)
    );
}

#[test]
fn sun_sign_pins_the_equinox_boundary() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    assert_eq!(sun_sign(date), ZodiacSign::Pisces);
    let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
    assert_eq!(sun_sign(date), ZodiacSign::Aries);
}

#[test]
fn aspect_angles_classify_correctly() {
    let sun = (CelestialPoint::Sun, 0.0);
    let cases = [
        (120.0, AspectType::Trine),
        (90.0, AspectType::Square),
        (180.0, AspectType::Opposition),
    ];
    for (longitude, expected) in cases {
        let found = aspects_between(&[sun], &[(CelestialPoint::Moon, longitude)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].aspect_type, expected);
        assert!(found[0].orb < 1e-9);
    }

    // Wrap-around conjunction across 0°.
    let found = aspects_between(&[(CelestialPoint::Sun, 359.0)], &[(CelestialPoint::Moon, 1.0)]);
    assert_eq!(found[0].aspect_type, AspectType::Conjunction);
}

#[test]
fn synastry_aspects_sorted_by_score() {
    let a = compute_chart(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let b = compute_chart(&descriptor("1992-08-23", Some("14:00"), Gender::Female)).unwrap();
    let result = calculate_synastry(&a, &b);
    for pair in result.aspects.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for aspect in &result.aspects {
        assert!((0.0..=1.0).contains(&aspect.score));
        assert!(aspect.orb <= aspect.aspect_type.max_orb());
    }
}

#[test]
fn ganhap_respects_bounds_and_self_pairs() {
    // A stem never combines with itself, the root of the identical-stems
    // property.
    for stem in Stem::ALL {
        assert_eq!(combination_element(stem, stem), None);
    }

    let a = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let b = compute_profile(&descriptor("1988-03-08", Some("06:00"), Gender::Female)).unwrap();
    let analysis = analyze_ganhap(&a, &b);
    assert!(analysis.combinations.len() <= 16);
    assert!(analysis.harmony <= 100);
}

#[test]
fn shinsal_analysis_classifies_and_describes() {
    let a = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let b = compute_profile(&descriptor("1992-08-23", Some("14:00"), Gender::Female)).unwrap();
    let analysis = analyze_shinsals(&a, &b);
    for line in analysis
        .lucky_interactions
        .iter()
        .chain(&analysis.unlucky_interactions)
    {
        assert!(line.chars().count() > 20);
    }
}

#[test]
fn layer_weights_stay_clamped() {
    let profile = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let result = calculate_weights(
        profile.geokguk,
        &profile.yongsin,
        QueryDomain::Career,
        &[Transit::SaturnReturn, Transit::Eclipse],
    );
    for layer in WeightLayer::ALL {
        let w = result.weights.get(layer);
        assert!((0.3..=1.5).contains(&w), "{layer:?} = {w}");
    }
    let summary = result.summary();
    assert_eq!(summary.top.len(), 3);
    assert_eq!(summary.bottom.len(), 3);
}

#[test]
fn bonus_summary_respects_presentation_limits() {
    let profile = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let input = BonusInput {
        profile: &profile,
        western: None,
        target_hour: Some(10),
    };
    for event in EventType::ALL {
        for month in [1, 6, 12] {
            let summary =
                calculate_tier7_to10_bonus(&input, event, 2025, month, Some(10)).unwrap();
            assert!(summary.reasons.len() <= 5);
            assert!(summary.penalties.len() <= 3);
            assert!((0.0..=1.0).contains(&summary.confidence));
            assert!(!summary.recommendation.is_empty());
        }
    }
}

#[test]
fn fortune_flow_and_simulators_hold_their_shapes() {
    let profile = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();

    let flow = simulate_fortune_flow(&profile, 2024, 2030, &SnapshotOptions::default()).unwrap();
    assert_eq!(flow.snapshots.len(), 7);
    for tp in &flow.turning_points {
        assert!(tp.year > 2024 && tp.year < 2030);
    }

    let monthly = simulate_monthly_fortune(&profile, 2025).unwrap();
    assert_eq!(monthly.len(), 12);

    let lifecycle = simulate_life_cycle(&profile, 2025).unwrap();
    assert_eq!(lifecycle.phases.len(), 6);

    let timing = find_optimal_timing(&profile, LifeArea::Wealth, 2025, 2025).unwrap();
    assert_eq!(timing.len(), 3);
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(compute_profile(&descriptor("1990-02-30", None, Gender::Male)).is_err());
    assert!(compute_profile(&descriptor("tomorrow", None, Gender::Male)).is_err());

    let mut bad = descriptor("1990-05-15", None, Gender::Male);
    bad.timezone = "Nowhere/Void".to_string();
    assert!(compute_profile(&bad).is_err());

    let mut bad = descriptor("1990-05-15", None, Gender::Male);
    bad.longitude = Some(999.0);
    assert!(compute_profile(&bad).is_err());
}

#[test]
fn missing_birth_time_still_yields_full_profile() {
    let profile = compute_profile(&descriptor("1990-05-15", None, Gender::Male)).unwrap();
    assert!(!profile.has_birth_time);
    assert!(profile.pillars.hour.stem.sibsin.is_none());
    assert_eq!(profile.five_element_counts.total(), 8);
    assert_eq!(profile.daeun_cycles.len(), 10);
}

#[test]
fn profile_round_trips_through_json() {
    let profile = compute_profile(&descriptor("1990-05-15", Some("10:30"), Gender::Male)).unwrap();
    let json = serde_json::to_string(&profile).unwrap();
    let back: sajuvise::models::SajuProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back.pillars, profile.pillars);
    assert_eq!(back.day_master, profile.day_master);
}
