//! Declarative scoring engine
//!
//! Two pieces: a generic, config-driven score evaluator and the 10-layer
//! dynamic weight calculator.
//!
//! # Scoring Formula
//!
//! ```text
//! score = round(max_score × min(raw_sum / max_raw, 1), 2)
//!
//! Where raw_sum is the sum of every matched flag's table score. Flag names
//! resolve through an explicit {flag → (bucket, key)} binding table built at
//! config construction; unmapped flags contribute 0 and never error.
//! ```
//!
//! # Weight Layers
//!
//! Ten layers, each starting at its default weight and multiplied through
//! geokguk/yongsin/domain/transit modifiers in that order, then clamped to
//! [0.3, 1.5]. Every modification is recorded as a {step, reason} entry.

pub mod factory;
pub mod weights;

pub use factory::{Bucket, SamjaeConfig, ScoreConfig, ScoreConfigBuilder, ScoreInput, ScoreResult};
pub use weights::{
    boosted_domains, calculate_weights, LayerWeights, QueryDomain, Transit, WeightLayer,
    WeightResult, WeightStep, WeightSummary, MAX_WEIGHT, MIN_WEIGHT,
};
