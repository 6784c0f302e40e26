//! Life-cycle phase simulation
//!
//! Divides a life into the six Korean-age phases and scores each one from
//! sampled yearly snapshots plus the daeun cycle in effect. Korean age is
//! `year − birth_year + 1`.

use serde::Serialize;

use crate::error::Result;
use crate::models::{SajuProfile, Sibsin};
use crate::simulator::snapshot::{
    generate_fortune_snapshot, SnapshotOptions, TimePoint,
};

/// One life phase.
#[derive(Debug, Clone, Serialize)]
pub struct LifePhase {
    /// Korean phase name.
    pub name: &'static str,
    /// Inclusive Korean-age range.
    pub age_range: (u8, u8),
    pub theme: &'static str,
    pub score: f64,
    pub challenges: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Life-cycle simulation result.
#[derive(Debug, Clone, Serialize)]
pub struct LifeCycleResult {
    pub phases: Vec<LifePhase>,
    /// Index into `phases` for the phase containing the current Korean age.
    pub current_phase: usize,
    /// Starting Korean age of the next phase, if one remains.
    pub next_milestone: Option<u8>,
}

const PHASES: [(&str, (u8, u8), &str); 6] = [
    ("성장기", (1, 12), "foundation and early formation"),
    ("청소년기", (13, 19), "learning and identity"),
    ("청년기", (20, 35), "launch and expansion"),
    ("장년기", (36, 50), "achievement and responsibility"),
    ("중년기", (51, 65), "harvest and redirection"),
    ("노년기", (66, 100), "wisdom and legacy"),
];

/// Favorability of the daeun sibsin governing an age.
fn daeun_quality(profile: &SajuProfile, age: u8) -> (f64, Option<Sibsin>) {
    let cycle = profile
        .daeun_cycles
        .iter()
        .find(|c| age >= c.start_age && age <= c.end_age);
    match cycle {
        Some(c) => {
            let delta = match c.sibsin {
                Sibsin::JeongGwan | Sibsin::JeongJae | Sibsin::JeongIn | Sibsin::SikSin => 6.0,
                Sibsin::PyeonJae | Sibsin::PyeonGwan | Sibsin::PyeonIn => 2.0,
                Sibsin::BiGyeon => 0.0,
                Sibsin::GeopJae | Sibsin::SangGwan => -5.0,
            };
            (delta, Some(c.sibsin))
        }
        None => (0.0, None),
    }
}

/// Simulate the full life cycle as of `current_year`.
pub fn simulate_life_cycle(profile: &SajuProfile, current_year: i32) -> Result<LifeCycleResult> {
    let korean_age = (current_year - profile.birth_year + 1).max(1) as u8;
    let options = SnapshotOptions::default();

    let mut phases = Vec::with_capacity(PHASES.len());
    for (name, (start, end), theme) in PHASES {
        // Sample the phase at its boundary and midpoint years, skipping
        // samples outside the supported solar-term range.
        let mid = start + (end - start) / 2;
        let mut total = 0.0;
        let mut samples = 0;
        for age in [start, mid, end] {
            let year = profile.birth_year + i32::from(age) - 1;
            if let Ok(snapshot) =
                generate_fortune_snapshot(profile, TimePoint::year(year), &options)
            {
                total += snapshot.average_score();
                samples += 1;
            }
        }
        let base = if samples > 0 {
            total / f64::from(samples)
        } else {
            50.0
        };

        let (daeun_delta, sibsin) = daeun_quality(profile, mid);
        let score = (base + daeun_delta).clamp(0.0, 100.0);

        let mut challenges = Vec::new();
        let mut opportunities = Vec::new();
        match sibsin {
            Some(s) if daeun_delta > 0.0 => {
                opportunities.push(format!("{} daeun carries this phase", s.korean()));
            }
            Some(s) if daeun_delta < 0.0 => {
                challenges.push(format!("{} daeun demands restraint here", s.korean()));
            }
            _ => {}
        }
        if score >= 60.0 {
            opportunities.push(format!("strong footing for {theme}"));
        } else if score <= 40.0 {
            challenges.push(format!("headwinds around {theme}"));
        }

        phases.push(LifePhase {
            name,
            age_range: (start, end),
            theme,
            score,
            challenges,
            opportunities,
        });
    }

    let current_phase = phases
        .iter()
        .position(|p| korean_age >= p.age_range.0 && korean_age <= p.age_range.1)
        .unwrap_or(phases.len() - 1);
    let next_milestone = phases.get(current_phase + 1).map(|p| p.age_range.0);

    Ok(LifeCycleResult {
        phases,
        current_phase,
        next_milestone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::compute_profile;
    use crate::models::{BirthDescriptor, CalendarType, Gender};

    fn profile() -> SajuProfile {
        compute_profile(&BirthDescriptor {
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
    fn test_six_phases_tile_the_lifespan() {
        let result = simulate_life_cycle(&profile(), 2025).unwrap();
        assert_eq!(result.phases.len(), 6);
        // Phase ranges are contiguous.
        for pair in result.phases.windows(2) {
            assert_eq!(pair[0].age_range.1 + 1, pair[1].age_range.0);
        }
        for phase in &result.phases {
            assert!((0.0..=100.0).contains(&phase.score));
        }
    }

    #[test]
    fn test_current_phase_from_korean_age() {
        // Born 1990, year 2025: Korean age 36 → 장년기 (index 3).
        let result = simulate_life_cycle(&profile(), 2025).unwrap();
        assert_eq!(result.current_phase, 3);
        assert_eq!(result.next_milestone, Some(51));
    }

    #[test]
    fn test_last_phase_has_no_milestone() {
        let result = simulate_life_cycle(&profile(), 2060).unwrap();
        assert_eq!(result.current_phase, 5);
        assert!(result.next_milestone.is_none());
    }

    #[test]
    fn test_childhood_phase() {
        let result = simulate_life_cycle(&profile(), 1995).unwrap();
        // Korean age 6 → 성장기.
        assert_eq!(result.current_phase, 0);
        assert_eq!(result.phases[0].name, "성장기");
    }
}
