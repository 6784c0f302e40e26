//! Fortune snapshot: one time point, one profile
//!
//! Scores each requested life area against the time point's ganzhi. The
//! area's flags (sibsin, branch relations, element affinity, samjae state)
//! run through the generic scoring factory, and the dynamic layer weights
//! scale the result before it lands on the 0-100 scale.

use serde::{Deserialize, Serialize};

use crate::calendar::cycles::monthly_cycles;
use crate::calendar::ganzhi::{stem_sibsin, year_ganzhi};
use crate::compat::shinsal::{cheoneul_targets, samjae_branches};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::models::{Branch, Element, RelationKind, SajuProfile, Sibsin, Stem};
use crate::relations::{display_title, relations_between, relations_with_chart};
use crate::scoring::{calculate_weights, Bucket, QueryDomain, ScoreConfig, ScoreConfigBuilder, ScoreInput};

/// A point on the simulated timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub year: i32,
    /// Month granularity when present; yearly otherwise.
    #[serde(default)]
    pub month: Option<u32>,
}

impl TimePoint {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month: Some(month),
        }
    }
}

/// Life areas scored by a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeArea {
    Career,
    Wealth,
    Love,
    Health,
}

impl LifeArea {
    pub const DEFAULT: [LifeArea; 4] = [
        LifeArea::Career,
        LifeArea::Wealth,
        LifeArea::Love,
        LifeArea::Health,
    ];

    pub fn domain(self) -> QueryDomain {
        match self {
            LifeArea::Career => QueryDomain::Career,
            LifeArea::Wealth => QueryDomain::Wealth,
            LifeArea::Love => QueryDomain::Love,
            LifeArea::Health => QueryDomain::Health,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LifeArea::Career => "career",
            LifeArea::Wealth => "wealth",
            LifeArea::Love => "love",
            LifeArea::Health => "health",
        }
    }
}

/// Score movement relative to the preceding time point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

/// One area's outlook at a time point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaFortune {
    pub area: LifeArea,
    /// Score in [0, 100].
    pub score: f64,
    pub trend: Trend,
    pub key_factors: Vec<String>,
    pub advice: String,
}

/// Snapshot of every requested area at one time point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneSnapshot {
    pub time_point: TimePoint,
    pub areas: Vec<AreaFortune>,
    pub dominant_element: Element,
    /// Human-readable labels of the branch relations active at this point.
    pub active_interactions: Vec<String>,
    pub keywords: Vec<String>,
}

impl FortuneSnapshot {
    /// Mean score across areas.
    pub fn average_score(&self) -> f64 {
        if self.areas.is_empty() {
            return 0.0;
        }
        self.areas.iter().map(|a| a.score).sum::<f64>() / self.areas.len() as f64
    }
}

/// Options for snapshot generation.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub areas: Vec<LifeArea>,
    pub scoring: ScoringConfig,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            areas: LifeArea::DEFAULT.to_vec(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Sibsin that lift each life area.
fn area_favorable(area: LifeArea) -> &'static [Sibsin] {
    match area {
        LifeArea::Career => &[Sibsin::JeongGwan, Sibsin::PyeonGwan, Sibsin::JeongIn],
        LifeArea::Wealth => &[Sibsin::JeongJae, Sibsin::PyeonJae, Sibsin::SikSin],
        LifeArea::Love => &[Sibsin::JeongGwan, Sibsin::JeongJae],
        LifeArea::Health => &[Sibsin::JeongIn, Sibsin::BiGyeon],
    }
}

/// Sibsin that press on each life area.
fn area_sensitive(area: LifeArea) -> &'static [Sibsin] {
    match area {
        LifeArea::Career => &[Sibsin::SangGwan],
        LifeArea::Wealth => &[Sibsin::GeopJae, Sibsin::BiGyeon],
        LifeArea::Love => &[Sibsin::SangGwan, Sibsin::GeopJae],
        LifeArea::Health => &[Sibsin::PyeonGwan],
    }
}

fn element_keywords(element: Element) -> &'static [&'static str] {
    match element {
        Element::Wood => &["growth", "planning", "renewal"],
        Element::Fire => &["expression", "visibility", "momentum"],
        Element::Earth => &["stability", "trust", "consolidation"],
        Element::Metal => &["decision", "structure", "harvest"],
        Element::Water => &["learning", "flexibility", "connection"],
    }
}

/// The snapshot score tables and flag bindings, parameterized by the
/// normalization bounds from the engine config.
fn snapshot_score_config(scoring: &ScoringConfig) -> ScoreConfig {
    ScoreConfigBuilder::new(scoring.max_score, scoring.max_raw)
        .positive_score("favorable_sibsin", 10.0)
        .negative_score("sensitive_sibsin", -10.0)
        .branch_score("samhap", 8.0)
        .branch_score("yukhap", 6.0)
        .branch_score("chung", -8.0)
        .branch_score("hyung", -5.0)
        .branch_score("hai", -4.0)
        .special_score("yongsin_element", 8.0)
        .special_score("kisin_element", -8.0)
        .samjae(scoring.samjae.clone())
        .bind("hasFavorableSibsin", Bucket::Positive, "favorable_sibsin")
        .bind("hasSensitiveSibsin", Bucket::Negative, "sensitive_sibsin")
        .bind("hasSamhap", Bucket::Branch, "samhap")
        .bind("hasYukhap", Bucket::Branch, "yukhap")
        .bind("hasChung", Bucket::Branch, "chung")
        .bind("hasHyung", Bucket::Branch, "hyung")
        .bind("hasHai", Bucket::Branch, "hai")
        .bind("hasYongsinElement", Bucket::Special, "yongsin_element")
        .bind("hasKisinElement", Bucket::Special, "kisin_element")
        .build()
}

fn relation_flag(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::Samhap => "hasSamhap",
        RelationKind::Yukhap => "hasYukhap",
        RelationKind::Chung => "hasChung",
        RelationKind::Hyung => "hasHyung",
        RelationKind::Hai => "hasHai",
    }
}

/// Ganzhi governing a time point.
fn time_point_ganzhi(profile: &SajuProfile, point: TimePoint) -> Result<(Stem, Branch)> {
    match point.month {
        Some(month) => {
            let cycles = monthly_cycles(point.year, profile.day_master)?;
            let cycle = cycles
                .into_iter()
                .find(|c| c.month == month)
                .ok_or_else(|| {
                    crate::error::EngineError::invalid_input(format!("bad month {month}"))
                })?;
            Ok((cycle.stem, cycle.branch))
        }
        None => {
            let gz = year_ganzhi(point.year);
            Ok((gz.stem, gz.branch))
        }
    }
}

/// Samjae state of a target year against the natal year branch: whether
/// the year falls in the samjae window, and the mitigating/aggravating
/// context read from the chart.
fn samjae_state(profile: &SajuProfile, target_year: i32) -> (bool, bool, bool) {
    let natal_year = profile.pillars.year.branch.branch;
    let target = year_ganzhi(target_year).branch;
    let active = samjae_branches(natal_year).contains(&target);
    if !active {
        return (false, false, false);
    }

    let has_gwiin = cheoneul_targets(profile.day_master).iter().any(|t| {
        profile
            .pillars
            .iter()
            .any(|(_, p)| p.branch.branch == *t)
    });
    let has_chung = relations_between(target, profile.pillars.day.branch.branch)
        .iter()
        .any(|r| r.kind == RelationKind::Chung);
    (true, has_gwiin, has_chung)
}

/// Build the flag record for one area at a target ganzhi.
fn area_input(
    profile: &SajuProfile,
    area: LifeArea,
    point_year: i32,
    stem: Stem,
    branch: Branch,
    factors: &mut Vec<String>,
) -> ScoreInput {
    let mut input = ScoreInput::new();

    let sibsin = stem_sibsin(profile.day_master, stem);
    if area_favorable(area).contains(&sibsin) {
        input = input.flag("hasFavorableSibsin");
        factors.push(format!("{} supports {}", sibsin.korean(), area.label()));
    }
    if area_sensitive(area).contains(&sibsin) {
        input = input.flag("hasSensitiveSibsin");
        factors.push(format!("{} presses on {}", sibsin.korean(), area.label()));
    }

    for relation in relations_with_chart(branch, &profile.pillars) {
        input = input.flag(relation_flag(relation.kind));
    }

    let element = stem.element();
    if profile.yongsin.contains(&element) {
        input = input.flag("hasYongsinElement");
        factors.push(format!("favorable element {} is active", element));
    } else if profile.kisin.contains(&element) {
        input = input.flag("hasKisinElement");
        factors.push(format!("unfavorable element {} is active", element));
    }

    let (active, has_gwiin, has_chung) = samjae_state(profile, point_year);
    if active {
        input = input.samjae(has_gwiin, has_chung);
        if has_gwiin {
            factors.push("samjae year, softened by a guardian star".to_string());
        } else {
            factors.push("samjae year calls for care".to_string());
        }
    }

    input
}

/// Score one area at a target ganzhi: factory evaluation scaled by the
/// domain's layer-weight emphasis, centered on 50.
fn area_score(
    profile: &SajuProfile,
    config: &ScoreConfig,
    area: LifeArea,
    point_year: i32,
    stem: Stem,
    branch: Branch,
    factors: &mut Vec<String>,
) -> f64 {
    let weights = calculate_weights(profile.geokguk, &profile.yongsin, area.domain(), &[]).weights;
    let emphasis = (weights.ten_god + weights.branch + weights.element_core) / 3.0;

    let input = area_input(profile, area, point_year, stem, branch, factors);
    let result = config.evaluate(&input);
    (50.0 + result.score * emphasis).clamp(0.0, 100.0)
}

fn advice_for(area: LifeArea, trend: Trend) -> String {
    let verb = match trend {
        Trend::Rising => "press the advantage",
        Trend::Stable => "hold a steady course",
        Trend::Falling => "consolidate and avoid overreach",
    };
    format!("In {}, {}.", area.label(), verb)
}

fn previous_point(point: TimePoint) -> TimePoint {
    match point.month {
        Some(1) => TimePoint::month(point.year - 1, 12),
        Some(m) => TimePoint::month(point.year, m - 1),
        None => TimePoint::year(point.year - 1),
    }
}

/// Generate the fortune snapshot for one time point.
pub fn generate_fortune_snapshot(
    profile: &SajuProfile,
    point: TimePoint,
    options: &SnapshotOptions,
) -> Result<FortuneSnapshot> {
    let (stem, branch) = time_point_ganzhi(profile, point)?;
    let previous = previous_point(point);
    let (prev_stem, prev_branch) = time_point_ganzhi(profile, previous)?;
    let config = snapshot_score_config(&options.scoring);

    let mut areas = Vec::with_capacity(options.areas.len());
    for &area in &options.areas {
        let mut factors = Vec::new();
        let score = area_score(profile, &config, area, point.year, stem, branch, &mut factors);
        let mut prev_factors = Vec::new();
        let prev_score = area_score(
            profile,
            &config,
            area,
            previous.year,
            prev_stem,
            prev_branch,
            &mut prev_factors,
        );

        let trend = if score > prev_score + 3.0 {
            Trend::Rising
        } else if score < prev_score - 3.0 {
            Trend::Falling
        } else {
            Trend::Stable
        };

        areas.push(AreaFortune {
            area,
            score,
            trend,
            advice: advice_for(area, trend),
            key_factors: factors,
        });
    }

    let active_interactions: Vec<String> = profile
        .pillars
        .iter()
        .filter_map(|(_, pillar)| {
            display_title(branch, pillar.branch.branch)
                .map(|kind| format!("{}{} {:?}", branch, pillar.branch.branch, kind))
        })
        .collect();

    let dominant_element = stem.element();
    let keywords = element_keywords(dominant_element)
        .iter()
        .map(|s| s.to_string())
        .collect();

    Ok(FortuneSnapshot {
        time_point: point,
        areas,
        dominant_element,
        active_interactions,
        keywords,
    })
}
