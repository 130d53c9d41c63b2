//! Ideology dynamics engine.
//!
//! A population of agents, each holding a static income and a mutable ideology
//! in [-1, 1], re-evaluates its ideology each step with a probability driven by
//! aggregate satisfaction. Agents that re-evaluate score every ideology anchor
//! with a utility function, pick one through a softmax-weighted draw and snap to
//! it. Macro aggregates (inequality, satisfaction, unemployment, growth) are then
//! recomputed from the whole population and feed back into the next step.
//!
//! # Modules
//!
//! - [`params`]: anchors, bucket edges, labels and tunable constants
//! - [`config`]: TOML model configuration and presets
//! - [`population`]: per-agent income and ideology arrays
//! - [`macro_state`]: macro scalars and the feedback updater
//! - [`mobility`]: satisfaction-driven re-evaluation probability
//! - [`utility`]: utility of a candidate ideology for one agent
//! - [`choice`]: softmax and weighted anchor sampling
//! - [`binning`]: bucket edges and classification
//! - [`model`]: the simulation instance

pub mod binning;
pub mod choice;
pub mod config;
pub mod error;
pub mod macro_state;
pub mod mobility;
pub mod model;
pub mod params;
pub mod population;
pub mod utility;

pub use config::ModelConfig;
pub use error::ConfigError;
pub use macro_state::MacroState;
pub use mobility::MobilityCurve;
pub use model::{SocietyModel, StepStats};
pub use params::{IncomeModel, InitialMacro, MacroPins, ParameterSet, Preset};
pub use population::Population;
pub use utility::UtilityTerms;

// Snapshot types live in the shared events crate
pub use ideology_events::{BucketShare, MacroField, MacroSnapshot, Snapshot};
