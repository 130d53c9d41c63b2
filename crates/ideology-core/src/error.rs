//! Configuration errors.

use thiserror::Error;

/// Errors raised while building a parameter set or a model instance.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population size must be positive")]
    EmptyPopulation,

    #[error("parameter set needs at least one ideology anchor")]
    NoAnchors,

    #[error("expected one label per anchor, got {anchors} anchors and {labels} labels")]
    LabelCountMismatch { anchors: usize, labels: usize },

    #[error("anchor {index} = {value} lies outside [-1, 1]")]
    AnchorOutOfRange { index: usize, value: f64 },

    #[error("anchors must be strictly increasing, anchor {index} does not exceed its predecessor")]
    AnchorsNotIncreasing { index: usize },

    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown preset '{0}', expected 'extended' or 'classic'")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
