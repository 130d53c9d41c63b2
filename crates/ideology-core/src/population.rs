//! Population State
//!
//! Agents are identified by index into two parallel arrays: a static income in
//! [0, 1] and a mutable ideology in [-1, 1]. Aggregate statistics run directly
//! over those arrays.

use rand::Rng;

use crate::binning;
use crate::params::IncomeModel;

/// Per-agent income and ideology.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    income: Vec<f64>,
    ideology: Vec<f64>,
}

impl Population {
    /// Draws a population of `n` agents.
    ///
    /// All incomes are drawn first, then all ideologies, so the number of draws
    /// consumed depends only on `n`.
    pub fn generate<R: Rng>(n: usize, income: IncomeModel, rng: &mut R) -> Self {
        let income = match income {
            IncomeModel::Pareto { shape } => {
                let raw: Vec<f64> = (0..n).map(|_| pareto_draw(rng, shape)).collect();
                normalize_by_max(raw)
            }
            IncomeModel::Equal { value } => vec![value; n],
        };

        let ideology = (0..n).map(|_| -1.0 + 2.0 * rng.gen::<f64>()).collect();

        Self { income, ideology }
    }

    pub fn len(&self) -> usize {
        self.ideology.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideology.is_empty()
    }

    pub fn income(&self) -> &[f64] {
        &self.income
    }

    pub fn ideology(&self) -> &[f64] {
        &self.ideology
    }

    pub(crate) fn set_ideology(&mut self, index: usize, value: f64) {
        self.ideology[index] = value;
    }

    pub fn mean_ideology(&self) -> f64 {
        mean(&self.ideology)
    }

    /// Variance of ideology (polarization).
    pub fn ideology_variance(&self) -> f64 {
        variance(&self.ideology)
    }

    pub fn income_std_dev(&self) -> f64 {
        std_dev(&self.income)
    }

    /// Number of agents per bucket for the given edges.
    pub fn bucket_counts(&self, edges: &[f64]) -> Vec<usize> {
        binning::bucket_counts(&self.ideology, edges)
    }
}

/// Lomax (Pareto II) draw with the given shape, via the inverse CDF.
///
/// Very small shapes overflow the exponential; such draws are capped at
/// `f64::MAX` so normalization by the maximum stays finite.
fn pareto_draw<R: Rng>(rng: &mut R, shape: f64) -> f64 {
    let u: f64 = rng.gen();
    let exponential = -(-u).ln_1p();
    (exponential / shape).exp_m1().min(f64::MAX)
}

fn normalize_by_max(mut values: Vec<f64>) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for value in values.iter_mut() {
            *value /= max;
        }
    }
    values
}

/// Arithmetic mean. Returns 0 for an empty slice.
///
/// Accumulates offsets from the first element, so a slice of identical values
/// returns that value exactly.
pub fn mean(values: &[f64]) -> f64 {
    let Some(&pivot) = values.first() else {
        return 0.0;
    };
    let offset: f64 = values.iter().map(|v| v - pivot).sum();
    pivot + offset / values.len() as f64
}

/// Population variance (divisor N). Returns 0 for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let squares: f64 = values.iter().map(|v| (v - mu) * (v - mu)).sum();
    squares / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}
