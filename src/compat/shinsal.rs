//! Shinsal (신살) star interaction analysis
//!
//! Each star is a fixed lookup keyed off one profile's day or year
//! stem/branch; an interaction fires when the partner chart supplies the
//! target. Lucky and unlucky interactions aggregate into the overall
//! impact classification.

use serde::{Deserialize, Serialize};

use crate::models::{Branch, SajuProfile, Stem};

/// Overall compatibility impact from the star interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallImpact {
    VeryPositive,
    Positive,
    Neutral,
    Challenging,
}

/// Star interaction analysis between two profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShinsalAnalysis {
    pub lucky_interactions: Vec<String>,
    pub unlucky_interactions: Vec<String>,
    pub overall_impact: OverallImpact,
}

/// 천을귀인 target branches by day stem.
pub(crate) fn cheoneul_targets(day_stem: Stem) -> &'static [Branch] {
    match day_stem {
        Stem::Gap | Stem::Mu | Stem::Gyeong => &[Branch::Chuk, Branch::Mi],
        Stem::Eul | Stem::Gi => &[Branch::Ja, Branch::Sin],
        Stem::Byeong | Stem::Jeong => &[Branch::Hae, Branch::Yu],
        Stem::Shin => &[Branch::In, Branch::O],
        Stem::Im | Stem::Gye => &[Branch::Sa, Branch::Myo],
    }
}

/// 문창귀인 target branch by day stem.
fn munchang_target(day_stem: Stem) -> Branch {
    match day_stem {
        Stem::Gap => Branch::Sa,
        Stem::Eul => Branch::O,
        Stem::Byeong | Stem::Mu => Branch::Sin,
        Stem::Jeong | Stem::Gi => Branch::Yu,
        Stem::Gyeong => Branch::Hae,
        Stem::Shin => Branch::Ja,
        Stem::Im => Branch::In,
        Stem::Gye => Branch::Myo,
    }
}

/// Triad base of a branch for the travel/romance star families.
fn triad_of(branch: Branch) -> usize {
    // 申子辰 0, 寅午戌 1, 巳酉丑 2, 亥卯未 3
    match branch {
        Branch::Sin | Branch::Ja | Branch::Jin => 0,
        Branch::In | Branch::O | Branch::Sul => 1,
        Branch::Sa | Branch::Yu | Branch::Chuk => 2,
        Branch::Hae | Branch::Myo | Branch::Mi => 3,
    }
}

/// 삼재 year branches for a natal year-branch triad. A chart enters its
/// samjae in the three years whose branches these are.
pub(crate) fn samjae_branches(year_branch: Branch) -> &'static [Branch; 3] {
    [
        &[Branch::In, Branch::Myo, Branch::Jin],
        &[Branch::Sin, Branch::Yu, Branch::Sul],
        &[Branch::Hae, Branch::Ja, Branch::Chuk],
        &[Branch::Sa, Branch::O, Branch::Mi],
    ][triad_of(year_branch)]
}

/// 도화살 target branch by year/day branch triad.
fn dohwa_target(branch: Branch) -> Branch {
    [Branch::Yu, Branch::Myo, Branch::O, Branch::Ja][triad_of(branch)]
}

/// 역마살 target branch by triad.
fn yeokma_target(branch: Branch) -> Branch {
    [Branch::In, Branch::Sin, Branch::Hae, Branch::Sa][triad_of(branch)]
}

/// 겁살 target branch by triad.
fn geopsal_target(branch: Branch) -> Branch {
    [Branch::Sa, Branch::Hae, Branch::In, Branch::Sin][triad_of(branch)]
}

/// 화개살 target branch by triad.
fn hwagae_target(branch: Branch) -> Branch {
    [Branch::Jin, Branch::Sul, Branch::Chuk, Branch::Mi][triad_of(branch)]
}

/// 양인살 target branch; yang stems only.
fn yangin_target(day_stem: Stem) -> Option<Branch> {
    match day_stem {
        Stem::Gap => Some(Branch::Myo),
        Stem::Byeong | Stem::Mu => Some(Branch::O),
        Stem::Gyeong => Some(Branch::Yu),
        Stem::Im => Some(Branch::Ja),
        _ => None,
    }
}

/// 천덕귀인 target by month branch; the classical table mixes stem and
/// branch targets.
enum CheondeokTarget {
    OfStem(Stem),
    OfBranch(Branch),
}

fn cheondeok_target(month_branch: Branch) -> CheondeokTarget {
    use CheondeokTarget::*;
    match month_branch {
        Branch::In => OfStem(Stem::Jeong),
        Branch::Myo => OfBranch(Branch::Sin),
        Branch::Jin => OfStem(Stem::Im),
        Branch::Sa => OfStem(Stem::Shin),
        Branch::O => OfBranch(Branch::Hae),
        Branch::Mi => OfStem(Stem::Gap),
        Branch::Sin => OfStem(Stem::Gye),
        Branch::Yu => OfBranch(Branch::In),
        Branch::Sul => OfStem(Stem::Byeong),
        Branch::Hae => OfStem(Stem::Eul),
        Branch::Ja => OfBranch(Branch::Sa),
        Branch::Chuk => OfStem(Stem::Gyeong),
    }
}

fn branches_of(profile: &SajuProfile) -> Vec<Branch> {
    profile
        .pillars
        .iter()
        .map(|(_, p)| p.branch.branch)
        .collect()
}

fn stems_of(profile: &SajuProfile) -> Vec<Stem> {
    profile.pillars.iter().map(|(_, p)| p.stem.stem).collect()
}

/// Collect the star interactions one direction: stars rooted in `owner`,
/// supplied by `partner`.
fn directional_interactions(
    owner: &SajuProfile,
    partner: &SajuProfile,
    owner_label: &str,
    partner_label: &str,
    lucky: &mut Vec<String>,
    unlucky: &mut Vec<String>,
) {
    let partner_branches = branches_of(partner);
    let partner_stems = stems_of(partner);
    let day_stem = owner.day_master;
    let day_branch = owner.pillars.day.branch.branch;
    let year_branch = owner.pillars.year.branch.branch;

    if cheoneul_targets(day_stem)
        .iter()
        .any(|t| partner_branches.contains(t))
    {
        lucky.push(format!(
            "{partner_label} carries the 천을귀인 branch for {owner_label}'s day master, the strongest protective star"
        ));
    }

    if partner_branches.contains(&munchang_target(day_stem)) {
        lucky.push(format!(
            "{partner_label} supplies {owner_label}'s 문창귀인, sharpening expression and learning together"
        ));
    }

    match cheondeok_target(owner.pillars.month.branch.branch) {
        CheondeokTarget::OfStem(s) if partner_stems.contains(&s) => {
            lucky.push(format!(
                "{partner_label} carries the 천덕귀인 stem for {owner_label}'s birth month, a quiet benefactor influence"
            ));
        }
        CheondeokTarget::OfBranch(b) if partner_branches.contains(&b) => {
            lucky.push(format!(
                "{partner_label} carries the 천덕귀인 branch for {owner_label}'s birth month, a quiet benefactor influence"
            ));
        }
        _ => {}
    }

    if partner_branches.contains(&hwagae_target(day_branch)) {
        lucky.push(format!(
            "{partner_label} activates {owner_label}'s 화개살, deepening shared reflection and artistry"
        ));
    }

    // Romance/travel/raw-edge stars read as friction in a pairing.
    for base in [year_branch, day_branch] {
        if partner_branches.contains(&dohwa_target(base)) {
            unlucky.push(format!(
                "{partner_label} stirs {owner_label}'s 도화살, which can pull attention outside the bond"
            ));
            break;
        }
    }

    for base in [year_branch, day_branch] {
        if partner_branches.contains(&yeokma_target(base)) {
            unlucky.push(format!(
                "{partner_label} triggers {owner_label}'s 역마살, an unsettled, on-the-move undercurrent"
            ));
            break;
        }
    }

    if let Some(target) = yangin_target(day_stem) {
        if partner_branches.contains(&target) {
            unlucky.push(format!(
                "{partner_label} touches {owner_label}'s 양인살, sharpening tempers when pressure rises"
            ));
        }
    }

    if partner_branches.contains(&geopsal_target(year_branch)) {
        unlucky.push(format!(
            "{partner_label} lands on {owner_label}'s 겁살, inviting resource friction between the two"
        ));
    }
}

fn classify(lucky: usize, unlucky: usize) -> OverallImpact {
    if lucky >= unlucky + 2 {
        OverallImpact::VeryPositive
    } else if lucky > unlucky {
        OverallImpact::Positive
    } else if unlucky > lucky + 1 {
        OverallImpact::Challenging
    } else {
        OverallImpact::Neutral
    }
}

/// Analyze star interactions between two profiles.
pub fn analyze_shinsals(a: &SajuProfile, b: &SajuProfile) -> ShinsalAnalysis {
    let mut lucky = Vec::new();
    let mut unlucky = Vec::new();

    directional_interactions(a, b, "the first chart", "the second chart", &mut lucky, &mut unlucky);
    directional_interactions(b, a, "the second chart", "the first chart", &mut lucky, &mut unlucky);

    let overall_impact = classify(lucky.len(), unlucky.len());
    ShinsalAnalysis {
        lucky_interactions: lucky,
        unlucky_interactions: unlucky,
        overall_impact,
    }
}
