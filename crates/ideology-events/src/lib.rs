//! Shared snapshot and time-series types for the ideology simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod series;
pub mod snapshot;

// Re-export snapshot types
pub use snapshot::{BucketShare, MacroField, MacroSnapshot, ParseFieldError, Snapshot};

// Re-export series types
pub use series::{SeriesRow, TimeSeries};
