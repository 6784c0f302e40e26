//! Ganhap/shinsal compatibility analyzer
//!
//! Pairwise analysis between two pillar outputs: stem combinations across
//! the 4×4 pillar cross-product, and star interactions from the per-stem
//! shinsal lookup tables.

pub mod shinsal;

use serde::{Deserialize, Serialize};

use crate::models::{SajuProfile, StemCombination};
use crate::relations::ganhap::{
    detect_combinations, harmony_score, significance, GanhapSignificance,
};

pub use shinsal::{analyze_shinsals, OverallImpact, ShinsalAnalysis};

/// Stem combination analysis between two profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanHapAnalysis {
    /// At most 16 combinations (4×4 pillar cross-product).
    pub combinations: Vec<StemCombination>,
    /// 20 per combination, +30 for a day-pillar bond, capped at 100.
    pub harmony: u32,
    pub significance: GanhapSignificance,
    pub message: String,
}

fn significance_message(significance: GanhapSignificance, count: usize) -> String {
    match significance {
        GanhapSignificance::DayPillarBond => {
            "The day pillars themselves combine, the strongest bond two charts can form."
                .to_string()
        }
        GanhapSignificance::MultipleBonds => format!(
            "{count} stem combinations weave the two charts together across their pillars."
        ),
        GanhapSignificance::SingleBond => {
            "A single stem combination links the two charts at one pillar.".to_string()
        }
        GanhapSignificance::None => {
            "No stem combinations form between these two charts.".to_string()
        }
    }
}

/// Analyze stem combinations (간합) between two profiles.
pub fn analyze_ganhap(a: &SajuProfile, b: &SajuProfile) -> GanHapAnalysis {
    let combinations = detect_combinations(&a.pillars, &b.pillars);
    let harmony = harmony_score(&combinations);
    let sig = significance(&combinations);
    let message = significance_message(sig, combinations.len());

    GanHapAnalysis {
        harmony,
        significance: sig,
        message,
        combinations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::compute_profile;
    use crate::models::{BirthDescriptor, CalendarType, Gender};

    fn profile(date: &str, gender: Gender) -> SajuProfile {
        compute_profile(&BirthDescriptor {
            date: date.to_string(),
            time: Some("10:30".to_string()),
            gender,
            calendar: CalendarType::Solar,
            leap_month: false,
            timezone: "Asia/Seoul".to_string(),
            latitude: None,
            longitude: None,
        })
        .unwrap()
    }

    #[test]
    fn test_ganhap_analysis_bounds() {
        let a = profile("1990-05-15", Gender::Male);
        let b = profile("1992-08-23", Gender::Female);
        let analysis = analyze_ganhap(&a, &b);
        assert!(analysis.combinations.len() <= 16);
        assert!(analysis.harmony <= 100);
        assert!(!analysis.message.is_empty());
    }

    #[test]
    fn test_ganhap_harmony_formula() {
        let a = profile("1990-05-15", Gender::Male);
        let b = profile("1992-08-23", Gender::Female);
        let analysis = analyze_ganhap(&a, &b);
        let day_bond = analysis.combinations.iter().any(|c| {
            c.pillar1 == crate::models::PillarPosition::Day
                && c.pillar2 == crate::models::PillarPosition::Day
        });
        let expected =
            (20 * analysis.combinations.len() as u32 + if day_bond { 30 } else { 0 }).min(100);
        assert_eq!(analysis.harmony, expected);
    }

    #[test]
    fn test_ganhap_symmetric_count() {
        let a = profile("1990-05-15", Gender::Male);
        let b = profile("1992-08-23", Gender::Female);
        assert_eq!(
            analyze_ganhap(&a, &b).combinations.len(),
            analyze_ganhap(&b, &a).combinations.len()
        );
    }
}
