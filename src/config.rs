//! Engine configuration
//!
//! Optional `sajuvise.toml` overrides for the scoring normalization bounds
//! and the samjae penalties. Everything falls back to the built-in
//! defaults; a missing file is not an error, a malformed one is.

use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::scoring::SamjaeConfig;

/// Scoring normalization settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Factory output bound: evaluated scores land in ±max_score.
    pub max_score: f64,
    /// Raw-sum saturation point.
    pub max_raw: f64,
    pub samjae: SamjaeConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: 50.0,
            max_raw: 30.0,
            samjae: SamjaeConfig::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::invalid_input(format!("cannot read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            EngineError::invalid_input(format!("malformed config {}: {e}", path.display()))
        })
    }

    /// Load `sajuvise.toml` from a directory if present, else defaults.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join("sajuvise.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.scoring.max_score, 50.0);
        assert_eq!(config.scoring.max_raw, 30.0);
        assert_eq!(config.scoring.samjae.base_penalty, -6.0);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: EngineConfig = toml::from_str(
            r#"
            [scoring]
            max_raw = 40.0

            [scoring.samjae]
            base_penalty = -8.0
            mitigated_penalty = -3.0
            aggravated_penalty = -12.0
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.max_raw, 40.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.scoring.max_score, 50.0);
        assert_eq!(config.scoring.samjae.base_penalty, -8.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = EngineConfig::load_or_default(Path::new("/nonexistent-dir")).unwrap();
        assert_eq!(config.scoring.max_score, 50.0);
    }
}
