//! Model Configuration
//!
//! Loads parameter overrides from a TOML file so experiments can be adjusted
//! without recompiling. Every field is optional; anything left out falls back
//! to the chosen preset.
//!
//! ```toml
//! preset = "classic"
//! m0 = 0.3
//!
//! [initial]
//! satisfaction = 0.6
//!
//! [pinned]
//! satisfaction = 1.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::mobility::MobilityCurve;
use crate::params::{IncomeModel, InitialMacro, MacroPins, ParameterSet, Preset};

/// Overrides applied on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base anchor and label set
    pub preset: Preset,
    /// Custom anchors, strictly increasing within [-1, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<f64>>,
    /// Custom labels, one per anchor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_crit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m0: Option<f64>,
    /// Shape of the Pareto income draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pareto_shape: Option<f64>,
    /// Give every agent this income instead of a Pareto draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equal_income: Option<f64>,
    /// Macro values before the first step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<InitialMacro>,
    /// Macro scalars held constant, merged over the preset's pins
    pub pinned: MacroPins,
}

impl ModelConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolves the preset and overrides into a validated parameter set.
    pub fn to_parameters(&self) -> Result<ParameterSet, ConfigError> {
        let base = match (&self.anchors, &self.labels) {
            (None, None) => ParameterSet::preset(self.preset),
            (anchors, labels) => {
                let anchors = anchors.clone().unwrap_or_else(|| self.preset.anchors());
                let labels = labels.clone().unwrap_or_else(|| self.preset.labels());
                ParameterSet::new(anchors, labels)?
            }
        };

        let defaults = MobilityCurve::default();
        let mobility = MobilityCurve::new(
            self.s_crit.unwrap_or(defaults.s_crit),
            self.sigma.unwrap_or(defaults.sigma),
            self.m0.unwrap_or(defaults.m0),
        );

        let income = match (self.equal_income, self.pareto_shape) {
            (Some(value), _) => IncomeModel::Equal { value },
            (None, Some(shape)) => IncomeModel::Pareto { shape },
            (None, None) => IncomeModel::default(),
        };

        let params = base
            .with_mobility(mobility)
            .with_income(income)
            .with_initial(self.initial.unwrap_or_default())
            .with_pins(self.preset.pins().merged(self.pinned));

        params.validate()?;
        Ok(params)
    }
}
