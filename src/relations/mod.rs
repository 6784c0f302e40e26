//! Branch/stem interaction engine
//!
//! Detects samhap/yukhap/chung/hyung/hai branch relations and ganhap stem
//! combinations between any two stem/branch sets. Every pair is evaluated
//! against all relation tables independently and every match is recorded
//! for scoring; a fixed priority order applies to the display title only.

pub mod ganhap;

use crate::models::{Branch, BranchRelation, Element, FourPillars, RelationKind};

/// Samhap triads and their transformed element. The engine evaluates the
/// two-branch form: any pair within a triad matches.
const SAMHAP_GROUPS: [([Branch; 3], Element); 4] = [
    ([Branch::Sin, Branch::Ja, Branch::Jin], Element::Water),
    ([Branch::In, Branch::O, Branch::Sul], Element::Fire),
    ([Branch::Sa, Branch::Yu, Branch::Chuk], Element::Metal),
    ([Branch::Hae, Branch::Myo, Branch::Mi], Element::Wood),
];

/// The six yukhap pairs and their transformed element.
const YUKHAP_PAIRS: [(Branch, Branch, Element); 6] = [
    (Branch::Ja, Branch::Chuk, Element::Earth),
    (Branch::In, Branch::Hae, Element::Wood),
    (Branch::Myo, Branch::Sul, Element::Fire),
    (Branch::Jin, Branch::Yu, Element::Metal),
    (Branch::Sa, Branch::Sin, Element::Water),
    (Branch::O, Branch::Mi, Element::Fire),
];

/// The six chung pairs (branches six apart).
const CHUNG_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::O),
    (Branch::Chuk, Branch::Mi),
    (Branch::In, Branch::Sin),
    (Branch::Myo, Branch::Yu),
    (Branch::Jin, Branch::Sul),
    (Branch::Sa, Branch::Hae),
];

/// Hyung pairs: the 寅巳申 and 丑戌未 triads in two-branch form plus the
/// 子卯 pair. Pinned to this simplified table; the classical three-branch
/// rule is intentionally not applied.
const HYUNG_PAIRS: [(Branch, Branch); 7] = [
    (Branch::In, Branch::Sa),
    (Branch::Sa, Branch::Sin),
    (Branch::In, Branch::Sin),
    (Branch::Chuk, Branch::Sul),
    (Branch::Sul, Branch::Mi),
    (Branch::Chuk, Branch::Mi),
    (Branch::Ja, Branch::Myo),
];

/// The six hai pairs.
const HAI_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Mi),
    (Branch::Chuk, Branch::O),
    (Branch::In, Branch::Sa),
    (Branch::Myo, Branch::Jin),
    (Branch::Sin, Branch::Hae),
    (Branch::Yu, Branch::Sul),
];

/// Score deltas contributed by each relation kind.
fn score_delta(kind: RelationKind) -> f64 {
    match kind {
        RelationKind::Samhap => 8.0,
        RelationKind::Yukhap => 6.0,
        RelationKind::Chung => -8.0,
        RelationKind::Hyung => -5.0,
        RelationKind::Hai => -4.0,
    }
}

fn pair_matches(table: &[(Branch, Branch)], a: Branch, b: Branch) -> bool {
    table
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

fn samhap_element(a: Branch, b: Branch) -> Option<Element> {
    if a == b {
        return None;
    }
    SAMHAP_GROUPS
        .iter()
        .find(|(group, _)| group.contains(&a) && group.contains(&b))
        .map(|&(_, element)| element)
}

fn yukhap_element(a: Branch, b: Branch) -> Option<Element> {
    YUKHAP_PAIRS
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, element)| element)
}

fn relation(kind: RelationKind, a: Branch, b: Branch, element: Option<Element>) -> BranchRelation {
    BranchRelation {
        kind,
        branches: (a, b),
        result_element: element,
        score_delta: score_delta(kind),
        label_key: kind.label_key(),
    }
}

/// Evaluate a branch pair against every relation table. All matches are
/// returned; a pair can be, say, both hyung and hai at once (寅巳).
pub fn relations_between(a: Branch, b: Branch) -> Vec<BranchRelation> {
    let mut matches = Vec::new();
    if let Some(element) = samhap_element(a, b) {
        matches.push(relation(RelationKind::Samhap, a, b, Some(element)));
    }
    if let Some(element) = yukhap_element(a, b) {
        matches.push(relation(RelationKind::Yukhap, a, b, Some(element)));
    }
    if pair_matches(&CHUNG_PAIRS, a, b) {
        matches.push(relation(RelationKind::Chung, a, b, None));
    }
    if pair_matches(&HYUNG_PAIRS, a, b) {
        matches.push(relation(RelationKind::Hyung, a, b, None));
    }
    if pair_matches(&HAI_PAIRS, a, b) {
        matches.push(relation(RelationKind::Hai, a, b, None));
    }
    matches
}

/// Display title kind for a pair: first match in the fixed priority order
/// samhap > yukhap > chung > hyung > hai. Scoring never uses this; it
/// consumes the exhaustive list from `relations_between`.
pub fn display_title(a: Branch, b: Branch) -> Option<RelationKind> {
    if samhap_element(a, b).is_some() {
        return Some(RelationKind::Samhap);
    }
    if yukhap_element(a, b).is_some() {
        return Some(RelationKind::Yukhap);
    }
    if pair_matches(&CHUNG_PAIRS, a, b) {
        return Some(RelationKind::Chung);
    }
    if pair_matches(&HYUNG_PAIRS, a, b) {
        return Some(RelationKind::Hyung);
    }
    if pair_matches(&HAI_PAIRS, a, b) {
        return Some(RelationKind::Hai);
    }
    None
}

/// Relations between a single branch (e.g. a target date's day branch) and
/// every natal branch of a chart.
pub fn relations_with_chart(branch: Branch, pillars: &FourPillars) -> Vec<BranchRelation> {
    pillars
        .iter()
        .flat_map(|(_, pillar)| relations_between(branch, pillar.branch.branch))
        .collect()
}
