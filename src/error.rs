//! Engine error types
//!
//! Invalid input fails fast and is surfaced verbatim to the caller (the web
//! layer maps it to 400). Per-feature computation failures never abort an
//! aggregate call; the affected output field is simply left empty. Unknown
//! pattern keys are treated as zero-contribution and never escape as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed date/time, out-of-range coordinates, unparsable timezone.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A single advanced sub-feature failed. Collected per feature; callers
    /// log it and keep the rest of the aggregate result.
    #[error("computation failed in {feature}: {message}")]
    Computation {
        feature: &'static str,
        message: String,
    },

    /// An unmapped sibsin/geokguk/relation key. Internal only: every lookup
    /// path converts this to a zero contribution before returning.
    #[error("unknown pattern key: {0}")]
    UnknownPattern(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EngineError::InvalidInput(message.into())
    }

    pub fn computation(feature: &'static str, message: impl Into<String>) -> Self {
        EngineError::Computation {
            feature,
            message: message.into(),
        }
    }
}
