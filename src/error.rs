//! Error types for the fallible edges of the engine.
//!
//! Gameplay itself never fails: an illegal drop simply returns the run to
//! its source. Only deal-code parsing and configuration loading can error.

use thiserror::Error;

/// Deal code errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealCodeError {
    /// The code is empty or contains non-digit characters
    #[error("deal code must be a decimal number, got '{0}'")]
    NotANumber(String),

    /// The code is not below 52!
    #[error("deal code is out of range (must be below 52!)")]
    OutOfRange,

    /// A deck handed to the encoder was not a permutation of the 52 cards
    #[error("deck is not a permutation of the 52 cards: {0}")]
    InvalidDeck(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed
    #[error("could not parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Umbrella error for the engine's public API.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    DealCode(#[from] DealCodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
