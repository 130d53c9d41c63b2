//! Multiverse: batch runs of independent realities.
//!
//! A reality is one [`SocietyModel`](ideology_core::SocietyModel) with its own
//! seed. The multiverse runs many of them in parallel, accumulates each one's
//! snapshots into a time series and tabulates how the realities ended up.
//!
//! Reality `i` is seeded with `base_seed + i`. These streams are practically
//! independent for exploratory work but carry no formal guarantee of
//! statistical independence across arbitrarily many realities.
//!
//! # Modules
//!
//! - [`config`]: run configuration loaded from TOML
//! - [`runner`]: the parallel reality runner
//! - [`report`]: per-reality summaries and cross-reality tallies
//! - [`output`]: JSON Lines and JSON writers

pub mod config;
pub mod output;
pub mod report;
pub mod runner;

pub use config::RunConfig;
pub use output::{OutputError, SeriesWriter};
pub use report::{DominantTally, MultiverseReport, RealitySummary};
pub use runner::{Multiverse, RealityRun};

use ideology_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while running a multiverse.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid run setting {name}: must be at least 1")]
    InvalidSetting { name: &'static str },

    #[error("model error: {0}")]
    Model(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}
