//! Snapshot Types
//!
//! The single output record of the engine: the share of the population in each
//! ideology bucket plus the macro scalars at the moment the snapshot was taken.
//!
//! A snapshot carries no step index or reality identifier. Callers attach those
//! when they accumulate snapshots into a [`TimeSeries`](crate::TimeSeries).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of the population classified into one ideology bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub label: String,
    pub proportion: f64,
}

impl BucketShare {
    pub fn new(label: impl Into<String>, proportion: f64) -> Self {
        Self {
            label: label.into(),
            proportion,
        }
    }
}

/// Macro scalars carried by every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroSnapshot {
    /// Aggregate satisfaction S, in [0, 1]
    pub satisfaction: f64,
    /// Mobility evaluated from S at the time the snapshot was taken
    pub mobility: f64,
    /// Inequality proxy G, in [0, 1]
    pub inequality: f64,
    /// Variance of the ideology distribution
    pub polarization: f64,
    /// Mean ideology, in [-1, 1]
    pub mean_ideology: f64,
    /// Unemployment proxy U, in [0, 1]
    pub unemployment: f64,
    /// Growth proxy C, in [-0.05, 0.1]
    pub growth: f64,
}

impl MacroSnapshot {
    /// Returns the value of one macro field.
    pub fn value(&self, field: MacroField) -> f64 {
        match field {
            MacroField::Satisfaction => self.satisfaction,
            MacroField::Mobility => self.mobility,
            MacroField::Inequality => self.inequality,
            MacroField::Polarization => self.polarization,
            MacroField::MeanIdeology => self.mean_ideology,
            MacroField::Unemployment => self.unemployment,
            MacroField::Growth => self.growth,
        }
    }
}

/// Names of the macro fields in a snapshot, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroField {
    Satisfaction,
    Mobility,
    Inequality,
    Polarization,
    MeanIdeology,
    Unemployment,
    Growth,
}

impl MacroField {
    /// All macro fields in output order.
    pub const ALL: [MacroField; 7] = [
        MacroField::Satisfaction,
        MacroField::Mobility,
        MacroField::Inequality,
        MacroField::Polarization,
        MacroField::MeanIdeology,
        MacroField::Unemployment,
        MacroField::Growth,
    ];

    /// Stable snake_case name used as a column key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroField::Satisfaction => "satisfaction",
            MacroField::Mobility => "mobility",
            MacroField::Inequality => "inequality",
            MacroField::Polarization => "polarization",
            MacroField::MeanIdeology => "mean_ideology",
            MacroField::Unemployment => "unemployment",
            MacroField::Growth => "growth",
        }
    }
}

impl fmt::Display for MacroField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a macro field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError(pub String);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown macro field: '{}'", self.0)
    }
}

impl std::error::Error for ParseFieldError {}

impl FromStr for MacroField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MacroField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

/// One observation of the simulated society.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Bucket shares in anchor order
    pub buckets: Vec<BucketShare>,
    #[serde(flatten)]
    pub macros: MacroSnapshot,
}

impl Snapshot {
    /// Creates a snapshot from bucket shares and macro scalars.
    pub fn new(buckets: Vec<BucketShare>, macros: MacroSnapshot) -> Self {
        Self { buckets, macros }
    }

    /// Returns the share of the bucket with the given label.
    pub fn proportion(&self, label: &str) -> Option<f64> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.proportion)
    }

    /// Looks up a value by key: a bucket label first, then a macro field name.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.proportion(key).or_else(|| {
            key.parse::<MacroField>()
                .ok()
                .map(|field| self.macros.value(field))
        })
    }

    /// Sum of all bucket shares. Equals 1 up to rounding for a non-empty population.
    pub fn bucket_total(&self) -> f64 {
        self.buckets.iter().map(|b| b.proportion).sum()
    }

    /// Label of the largest bucket. The first bucket wins ties.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<&BucketShare> = None;
        for bucket in &self.buckets {
            match best {
                Some(current) if bucket.proportion <= current.proportion => {}
                _ => best = Some(bucket),
            }
        }
        best.map(|b| b.label.as_str())
    }

    /// All values as ordered `(name, value)` pairs: buckets first, then macro fields.
    pub fn fields(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = self
            .buckets
            .iter()
            .map(|b| (b.label.as_str(), b.proportion))
            .collect();
        out.extend(
            MacroField::ALL
                .iter()
                .map(|field| (field.as_str(), self.macros.value(*field))),
        );
        out
    }
}
