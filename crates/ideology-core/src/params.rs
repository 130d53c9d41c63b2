//! Parameter Set
//!
//! Immutable description of one simulated society: the ideology anchors and
//! their labels, the bucket edges derived from them, the mobility curve, the
//! income model, the seed values of the macro state and any pinned macro scalars.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::binning::bucket_edges;
use crate::error::ConfigError;
use crate::mobility::MobilityCurve;

/// Default Pareto shape for the income draw
pub const DEFAULT_PARETO_SHAPE: f64 = 2.0;

/// Built-in anchor and label sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Six buckets with dynamic unemployment and growth
    #[default]
    Extended,
    /// Four buckets with unemployment and growth held constant
    Classic,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Extended => "extended",
            Preset::Classic => "classic",
        }
    }

    pub fn anchors(&self) -> Vec<f64> {
        match self {
            Preset::Extended => vec![-0.9, -0.6, -0.2, 0.2, 0.6, 0.9],
            Preset::Classic => vec![-0.8, -0.3, 0.3, 0.8],
        }
    }

    pub fn labels(&self) -> Vec<String> {
        let labels: &[&str] = match self {
            Preset::Extended => &[
                "Communism",
                "Socialism",
                "Social democracy",
                "Liberalism",
                "Capitalism",
                "Libertarianism",
            ],
            Preset::Classic => &[
                "Communism",
                "Social democracy",
                "Capitalism",
                "Libertarianism",
            ],
        };
        labels.iter().map(|s| s.to_string()).collect()
    }

    /// Macro scalars the preset holds fixed.
    pub fn pins(&self) -> MacroPins {
        match self {
            Preset::Extended => MacroPins::default(),
            Preset::Classic => {
                let initial = InitialMacro::default();
                MacroPins {
                    satisfaction: None,
                    unemployment: Some(initial.unemployment),
                    growth: Some(initial.growth),
                }
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extended" => Ok(Preset::Extended),
            "classic" => Ok(Preset::Classic),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// How incomes are drawn at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomeModel {
    /// Pareto draw normalized by the population maximum
    Pareto { shape: f64 },
    /// Every agent gets the same income
    Equal { value: f64 },
}

impl Default for IncomeModel {
    fn default() -> Self {
        IncomeModel::Pareto {
            shape: DEFAULT_PARETO_SHAPE,
        }
    }
}

/// Macro values in effect before the first step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialMacro {
    pub inequality: f64,
    pub satisfaction: f64,
    pub unemployment: f64,
    pub growth: f64,
}

impl Default for InitialMacro {
    fn default() -> Self {
        Self {
            inequality: 0.45,
            satisfaction: 0.55,
            unemployment: 0.1,
            growth: 0.02,
        }
    }
}

/// Macro scalars held at a fixed value instead of being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroPins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unemployment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
}

impl MacroPins {
    /// Overlays `other` on top of `self`; pins set in `other` win.
    pub fn merged(self, other: MacroPins) -> MacroPins {
        MacroPins {
            satisfaction: other.satisfaction.or(self.satisfaction),
            unemployment: other.unemployment.or(self.unemployment),
            growth: other.growth.or(self.growth),
        }
    }

    /// True when unemployment and growth are both held constant.
    pub fn is_static_labor_market(&self) -> bool {
        self.unemployment.is_some() && self.growth.is_some()
    }
}

/// Complete, immutable parameter set of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    anchors: Vec<f64>,
    edges: Vec<f64>,
    labels: Vec<String>,
    mobility: MobilityCurve,
    income: IncomeModel,
    initial: InitialMacro,
    pins: MacroPins,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::preset(Preset::Extended)
    }
}

impl ParameterSet {
    /// Builds a parameter set from custom anchors and labels.
    ///
    /// Anchors must be non-empty, finite, inside [-1, 1] and strictly
    /// increasing, with exactly one label per anchor. All other settings take
    /// their defaults and no macro scalar is pinned.
    pub fn new(anchors: Vec<f64>, labels: Vec<String>) -> Result<Self, ConfigError> {
        validate_anchors(&anchors, &labels)?;
        Ok(Self::from_parts(anchors, labels, MacroPins::default()))
    }

    /// Builds one of the built-in parameter sets.
    pub fn preset(preset: Preset) -> Self {
        Self::from_parts(preset.anchors(), preset.labels(), preset.pins())
    }

    pub fn extended() -> Self {
        Self::preset(Preset::Extended)
    }

    pub fn classic() -> Self {
        Self::preset(Preset::Classic)
    }

    fn from_parts(anchors: Vec<f64>, labels: Vec<String>, pins: MacroPins) -> Self {
        let edges = bucket_edges(&anchors);
        Self {
            anchors,
            edges,
            labels,
            mobility: MobilityCurve::default(),
            income: IncomeModel::default(),
            initial: InitialMacro::default(),
            pins,
        }
    }

    pub fn with_mobility(mut self, mobility: MobilityCurve) -> Self {
        self.mobility = mobility;
        self
    }

    pub fn with_income(mut self, income: IncomeModel) -> Self {
        self.income = income;
        self
    }

    pub fn with_initial(mut self, initial: InitialMacro) -> Self {
        self.initial = initial;
        self
    }

    /// Replaces the pinned macro scalars.
    pub fn with_pins(mut self, pins: MacroPins) -> Self {
        self.pins = pins;
        self
    }

    pub fn anchors(&self) -> &[f64] {
        &self.anchors
    }

    /// K + 1 bucket edges, from -1 to 1.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn bucket_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn mobility(&self) -> &MobilityCurve {
        &self.mobility
    }

    pub fn income(&self) -> IncomeModel {
        self.income
    }

    pub fn initial(&self) -> InitialMacro {
        self.initial
    }

    pub fn pins(&self) -> MacroPins {
        self.pins
    }

    /// Checks every setting. Called by model construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_anchors(&self.anchors, &self.labels)?;

        let MobilityCurve { s_crit, sigma, m0 } = self.mobility;
        require(s_crit.is_finite(), "s_crit", s_crit)?;
        require(sigma.is_finite() && sigma > 0.0, "sigma", sigma)?;
        require(m0.is_finite() && m0 >= 0.0, "m0", m0)?;

        match self.income {
            IncomeModel::Pareto { shape } => {
                require(shape.is_finite() && shape > 0.0, "pareto_shape", shape)?
            }
            IncomeModel::Equal { value } => {
                require((0.0..=1.0).contains(&value), "equal_income", value)?
            }
        }

        let initial = self.initial;
        require(initial.inequality.is_finite(), "initial.inequality", initial.inequality)?;
        require(initial.satisfaction.is_finite(), "initial.satisfaction", initial.satisfaction)?;
        require(initial.unemployment.is_finite(), "initial.unemployment", initial.unemployment)?;
        require(initial.growth.is_finite(), "initial.growth", initial.growth)?;

        let pins = [
            ("pinned.satisfaction", self.pins.satisfaction),
            ("pinned.unemployment", self.pins.unemployment),
            ("pinned.growth", self.pins.growth),
        ];
        for (name, pin) in pins {
            if let Some(value) = pin {
                require(value.is_finite(), name, value)?;
            }
        }

        Ok(())
    }
}

fn require(ok: bool, name: &'static str, value: f64) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn validate_anchors(anchors: &[f64], labels: &[String]) -> Result<(), ConfigError> {
    if anchors.is_empty() {
        return Err(ConfigError::NoAnchors);
    }
    if anchors.len() != labels.len() {
        return Err(ConfigError::LabelCountMismatch {
            anchors: anchors.len(),
            labels: labels.len(),
        });
    }
    for (index, &value) in anchors.iter().enumerate() {
        if !(-1.0..=1.0).contains(&value) {
            return Err(ConfigError::AnchorOutOfRange { index, value });
        }
        if index > 0 && value <= anchors[index - 1] {
            return Err(ConfigError::AnchorsNotIncreasing { index });
        }
    }
    Ok(())
}
