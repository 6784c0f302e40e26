//! Generic config-driven score evaluator
//!
//! One evaluator parameterized by a config struct rather than a type per
//! category. Callers describe their category's score tables and flag
//! bindings declaratively; evaluation maps an input record of boolean flags
//! to a normalized point total with per-flag contributions preserved for
//! explainability.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Score-table bucket a flag resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Positive,
    Negative,
    Branch,
    Special,
}

/// Resolved binding of a flag name to its score-table slot.
#[derive(Debug, Clone)]
struct FlagBinding {
    bucket: Bucket,
    lookup_key: String,
}

/// Samjae (삼재) penalty configuration. Gwiin mitigation is checked before
/// chung aggravation, and wins when both flags are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamjaeConfig {
    pub base_penalty: f64,
    pub mitigated_penalty: f64,
    pub aggravated_penalty: f64,
}

impl Default for SamjaeConfig {
    fn default() -> Self {
        Self {
            base_penalty: -6.0,
            mitigated_penalty: -2.0,
            aggravated_penalty: -10.0,
        }
    }
}

/// Declarative scoring configuration.
///
/// The flag binding table is built once at construction; evaluation never
/// inspects flag-name conventions at runtime.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    positive_scores: FxHashMap<String, f64>,
    negative_scores: FxHashMap<String, f64>,
    branch_scores: FxHashMap<String, f64>,
    special_scores: FxHashMap<String, f64>,
    samjae: SamjaeConfig,
    bindings: FxHashMap<String, FlagBinding>,
    max_score: f64,
    max_raw: f64,
}

/// Builder collecting score tables and flag bindings.
#[derive(Debug, Default)]
pub struct ScoreConfigBuilder {
    positive_scores: FxHashMap<String, f64>,
    negative_scores: FxHashMap<String, f64>,
    branch_scores: FxHashMap<String, f64>,
    special_scores: FxHashMap<String, f64>,
    samjae: Option<SamjaeConfig>,
    bindings: FxHashMap<String, FlagBinding>,
    max_score: f64,
    max_raw: f64,
}

impl ScoreConfigBuilder {
    pub fn new(max_score: f64, max_raw: f64) -> Self {
        Self {
            max_score,
            max_raw,
            ..Default::default()
        }
    }

    pub fn positive_score(mut self, key: impl Into<String>, score: f64) -> Self {
        self.positive_scores.insert(key.into(), score);
        self
    }

    pub fn negative_score(mut self, key: impl Into<String>, score: f64) -> Self {
        self.negative_scores.insert(key.into(), score);
        self
    }

    pub fn branch_score(mut self, key: impl Into<String>, score: f64) -> Self {
        self.branch_scores.insert(key.into(), score);
        self
    }

    pub fn special_score(mut self, key: impl Into<String>, score: f64) -> Self {
        self.special_scores.insert(key.into(), score);
        self
    }

    pub fn samjae(mut self, config: SamjaeConfig) -> Self {
        self.samjae = Some(config);
        self
    }

    /// Bind a flag name to a bucket slot. Evaluation resolves the flag
    /// through this table only.
    pub fn bind(
        mut self,
        flag: impl Into<String>,
        bucket: Bucket,
        lookup_key: impl Into<String>,
    ) -> Self {
        self.bindings.insert(
            flag.into(),
            FlagBinding {
                bucket,
                lookup_key: lookup_key.into(),
            },
        );
        self
    }

    pub fn build(self) -> ScoreConfig {
        ScoreConfig {
            positive_scores: self.positive_scores,
            negative_scores: self.negative_scores,
            branch_scores: self.branch_scores,
            special_scores: self.special_scores,
            samjae: self.samjae.unwrap_or_default(),
            bindings: self.bindings,
            max_score: self.max_score,
            max_raw: self.max_raw,
        }
    }
}

/// Input record: active boolean flags plus the samjae state.
#[derive(Debug, Clone, Default)]
pub struct ScoreInput {
    flags: Vec<String>,
    samjae_active: bool,
    has_gwiin: bool,
    has_chung: bool,
}

impl ScoreInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flags.push(name.into());
        self
    }

    pub fn flag_if(self, name: impl Into<String>, condition: bool) -> Self {
        if condition {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn samjae(mut self, has_gwiin: bool, has_chung: bool) -> Self {
        self.samjae_active = true;
        self.has_gwiin = has_gwiin;
        self.has_chung = has_chung;
        self
    }
}

/// Evaluation result with per-flag contributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub raw_sum: f64,
    pub contributions: Vec<(String, f64)>,
}

impl ScoreConfig {
    fn table(&self, bucket: Bucket) -> &FxHashMap<String, f64> {
        match bucket {
            Bucket::Positive => &self.positive_scores,
            Bucket::Negative => &self.negative_scores,
            Bucket::Branch => &self.branch_scores,
            Bucket::Special => &self.special_scores,
        }
    }

    /// Evaluate an input record. Unmapped flags and unknown lookup keys
    /// contribute 0; they never fail the evaluation.
    pub fn evaluate(&self, input: &ScoreInput) -> ScoreResult {
        let mut raw_sum = 0.0;
        let mut contributions = Vec::new();

        for flag in &input.flags {
            let contribution = self
                .bindings
                .get(flag)
                .and_then(|binding| self.table(binding.bucket).get(&binding.lookup_key))
                .copied()
                .unwrap_or(0.0);
            if contribution != 0.0 {
                raw_sum += contribution;
                contributions.push((flag.clone(), contribution));
            }
        }

        if input.samjae_active {
            // Gwiin mitigation takes precedence; chung is ignored with it.
            let penalty = if input.has_gwiin {
                self.samjae.mitigated_penalty
            } else if input.has_chung {
                self.samjae.aggravated_penalty
            } else {
                self.samjae.base_penalty
            };
            raw_sum += penalty;
            contributions.push(("samjae".to_string(), penalty));
        }

        let normalized = if self.max_raw > 0.0 {
            (raw_sum / self.max_raw).min(1.0)
        } else {
            0.0
        };
        let score = (self.max_score * normalized * 100.0).round() / 100.0;

        ScoreResult {
            score,
            raw_sum,
            contributions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoreConfig {
        ScoreConfigBuilder::new(100.0, 20.0)
            .positive_score("jeonggwan", 6.0)
            .positive_score("siksin", 5.0)
            .negative_score("sanggwan", -4.0)
            .branch_score("samhap", 8.0)
            .branch_score("chung", -8.0)
            .special_score("cheoneul", 10.0)
            .bind("hasJeongGwan", Bucket::Positive, "jeonggwan")
            .bind("hasSikSin", Bucket::Positive, "siksin")
            .bind("hasSangGwan", Bucket::Negative, "sanggwan")
            .bind("hasSamhap", Bucket::Branch, "samhap")
            .bind("hasChungRelation", Bucket::Branch, "chung")
            .bind("hasCheonEulGwiin", Bucket::Special, "cheoneul")
            .build()
    }

    #[test]
    fn test_basic_evaluation() {
        let result = config().evaluate(
            &ScoreInput::new()
                .flag("hasJeongGwan")
                .flag("hasSamhap"),
        );
        assert_eq!(result.raw_sum, 14.0);
        assert_eq!(result.score, 70.0);
        assert_eq!(result.contributions.len(), 2);
    }

    #[test]
    fn test_raw_sum_capped_at_max_raw() {
        let result = config().evaluate(
            &ScoreInput::new()
                .flag("hasJeongGwan")
                .flag("hasSikSin")
                .flag("hasSamhap")
                .flag("hasCheonEulGwiin"),
        );
        assert!(result.raw_sum > 20.0);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_unmapped_flag_contributes_zero() {
        let mapped = config().evaluate(&ScoreInput::new().flag("hasJeongGwan"));
        let with_unknown = config().evaluate(
            &ScoreInput::new()
                .flag("hasJeongGwan")
                .flag("hasNoSuchFlag"),
        );
        assert_eq!(mapped.score, with_unknown.score);
    }

    #[test]
    fn test_binding_with_missing_table_key_contributes_zero() {
        let config = ScoreConfigBuilder::new(100.0, 10.0)
            .bind("hasOrphan", Bucket::Special, "not-in-table")
            .build();
        let result = config.evaluate(&ScoreInput::new().flag("hasOrphan"));
        assert_eq!(result.raw_sum, 0.0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_samjae_gwiin_checked_before_chung() {
        let config = config();

        let base = config.evaluate(&ScoreInput::new().samjae(false, false));
        assert_eq!(base.raw_sum, -6.0);

        // Gwiin mitigates even when chung is also present.
        let both = config.evaluate(&ScoreInput::new().samjae(true, true));
        assert_eq!(both.raw_sum, -2.0);

        let chung_only = config.evaluate(&ScoreInput::new().samjae(false, true));
        assert_eq!(chung_only.raw_sum, -10.0);
    }

    #[test]
    fn test_score_rounded_to_two_decimals() {
        let config = ScoreConfigBuilder::new(10.0, 3.0)
            .positive_score("x", 1.0)
            .bind("x", Bucket::Positive, "x")
            .build();
        let result = config.evaluate(&ScoreInput::new().flag("x"));
        // 10 × (1/3) = 3.333... → 3.33
        assert_eq!(result.score, 3.33);
    }

    #[test]
    fn test_flag_if_builder() {
        let input = ScoreInput::new()
            .flag_if("hasJeongGwan", true)
            .flag_if("hasSikSin", false);
        let result = config().evaluate(&input);
        assert_eq!(result.contributions.len(), 1);
    }
}
