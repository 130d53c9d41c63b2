//! Ideological Mobility
//!
//! Probability that an agent reconsiders its ideology during a step, as a
//! function of aggregate satisfaction:
//!
//! ```text
//! m(S) = m0 * (1 - tanh((S - S_crit) / sigma))
//! ```
//!
//! Satisfied societies churn less. At `S == S_crit` the curve passes through `m0`.

use serde::{Deserialize, Serialize};

/// Default critical satisfaction
pub const DEFAULT_S_CRIT: f64 = 0.7;
/// Default transition width
pub const DEFAULT_SIGMA: f64 = 0.08;
/// Default mobility at the critical point
pub const DEFAULT_M0: f64 = 0.35;

/// Parameters of the mobility curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobilityCurve {
    /// Satisfaction at which mobility equals `m0`
    pub s_crit: f64,
    /// Width of the tanh transition
    pub sigma: f64,
    /// Mobility at the critical point
    pub m0: f64,
}

impl Default for MobilityCurve {
    fn default() -> Self {
        Self {
            s_crit: DEFAULT_S_CRIT,
            sigma: DEFAULT_SIGMA,
            m0: DEFAULT_M0,
        }
    }
}

impl MobilityCurve {
    pub fn new(s_crit: f64, sigma: f64, m0: f64) -> Self {
        Self { s_crit, sigma, m0 }
    }

    /// Raw mobility at satisfaction `s`. Lies in `[0, 2 * m0)`.
    pub fn at(&self, s: f64) -> f64 {
        self.m0 * (1.0 - ((s - self.s_crit) / self.sigma).tanh())
    }

    /// Mobility clamped to [0, 1], usable as a Bernoulli parameter.
    pub fn probability(&self, s: f64) -> f64 {
        self.at(s).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equals_m0_at_critical_point() {
        let curve = MobilityCurve::default();
        assert_eq!(curve.at(curve.s_crit), curve.m0);
    }

    #[test]
    fn test_bounds_of_default_curve() {
        let curve = MobilityCurve::default();
        assert!(curve.at(0.0) < 2.0 * curve.m0);
        assert!(curve.at(0.0) > 1.9 * curve.m0);
        assert!(curve.at(1.0) < 0.001);
        assert!(curve.at(1.0) >= 0.0);
    }

    #[test]
    fn test_probability_is_clamped() {
        let curve = MobilityCurve::new(0.7, 0.08, 0.9);
        assert!(curve.at(0.0) > 1.0);
        assert_eq!(curve.probability(0.0), 1.0);

        let negative = MobilityCurve::new(0.7, 0.08, -0.2);
        assert_eq!(negative.probability(0.5), 0.0);
    }

    proptest! {
        #[test]
        fn prop_non_increasing_in_satisfaction(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let curve = MobilityCurve::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve.at(high) <= curve.at(low));
            prop_assert!(curve.probability(high) <= curve.probability(low));
        }
    }
}
