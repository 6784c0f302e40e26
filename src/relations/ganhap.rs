//! Ganhap (간합) stem combination detection
//!
//! Exactly five stem pairs combine, each transforming into a fixed element.
//! Between two profiles every combination across the 4×4 pillar
//! cross-product is checked, so a single analysis yields at most 16
//! combinations.

use serde::{Deserialize, Serialize};

use crate::models::{Element, FourPillars, PillarPosition, Stem, StemCombination};

/// The five valid stem pairs and their transformed elements.
const GANHAP_PAIRS: [(Stem, Stem, Element); 5] = [
    (Stem::Gap, Stem::Gi, Element::Earth),
    (Stem::Eul, Stem::Gyeong, Element::Metal),
    (Stem::Byeong, Stem::Shin, Element::Water),
    (Stem::Jeong, Stem::Im, Element::Wood),
    (Stem::Mu, Stem::Gye, Element::Fire),
];

/// Transformed element of a stem pair, if the two stems combine.
pub fn combination_element(a: Stem, b: Stem) -> Option<Element> {
    GANHAP_PAIRS
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, element)| element)
}

/// Significance tier of a combination set, in message priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GanhapSignificance {
    DayPillarBond,
    MultipleBonds,
    SingleBond,
    None,
}

/// Detect every stem combination across the pillar cross-product of two
/// charts. Identical stems never combine, so two identical profiles yield
/// an empty list.
pub fn detect_combinations(a: &FourPillars, b: &FourPillars) -> Vec<StemCombination> {
    let mut combinations = Vec::new();
    for (pos_a, pillar_a) in a.iter() {
        for (pos_b, pillar_b) in b.iter() {
            let stem_a = pillar_a.stem.stem;
            let stem_b = pillar_b.stem.stem;
            if let Some(element) = combination_element(stem_a, stem_b) {
                combinations.push(StemCombination {
                    stem1: stem_a,
                    stem2: stem_b,
                    pillar1: pos_a,
                    pillar2: pos_b,
                    result_element: element,
                });
            }
        }
    }
    combinations
}

/// Whether a day-pillar-to-day-pillar combination is present.
pub fn has_day_pillar_bond(combinations: &[StemCombination]) -> bool {
    combinations
        .iter()
        .any(|c| c.pillar1 == PillarPosition::Day && c.pillar2 == PillarPosition::Day)
}

/// Harmony score: 20 points per combination, +30 when the day pillars
/// combine, capped at 100.
pub fn harmony_score(combinations: &[StemCombination]) -> u32 {
    let mut score = 20 * combinations.len() as u32;
    if has_day_pillar_bond(combinations) {
        score += 30;
    }
    score.min(100)
}

/// Significance tier: day-pillar bond > two or more bonds > one bond > none.
pub fn significance(combinations: &[StemCombination]) -> GanhapSignificance {
    if has_day_pillar_bond(combinations) {
        GanhapSignificance::DayPillarBond
    } else if combinations.len() >= 2 {
        GanhapSignificance::MultipleBonds
    } else if combinations.len() == 1 {
        GanhapSignificance::SingleBond
    } else {
        GanhapSignificance::None
    }
}
