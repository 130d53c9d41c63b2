//! Ideology Utility
//!
//! Utility an agent assigns to a candidate ideology, as the sum of four terms:
//! - Material benefit (low incomes gain from the far left, high incomes from the far right)
//! - Inertia (penalty proportional to the jump from the current position)
//! - Satisfaction (a satisfied society pulls choices toward the centre)
//! - Macro pressure (unemployment discourages extremes, growth nudges rightward)

use crate::macro_state::MacroState;

/// Utility weight constants
pub mod weights {
    /// Candidates below this position count as far left
    pub const FAR_LEFT: f64 = -0.5;
    /// Candidates above this position count as far right
    pub const FAR_RIGHT: f64 = 0.5;
    /// Material gain of the far left, scaled by (1 - income)
    pub const FAR_LEFT_MATERIAL: f64 = 2.0;
    /// Material gain of the far right, scaled by income
    pub const FAR_RIGHT_MATERIAL: f64 = 1.6;
    /// Flat material gain of the centre
    pub const CENTRE_MATERIAL: f64 = 0.6;
    /// Unemployment penalty per unit of extremity
    pub const UNEMPLOYMENT: f64 = 0.5;
    /// Growth bonus per unit of rightward position
    pub const GROWTH: f64 = 0.4;
}

/// Breakdown of the utility of one candidate ideology.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UtilityTerms {
    pub material: f64,
    pub inertia: f64,
    pub satisfaction: f64,
    pub macro_term: f64,
}

impl UtilityTerms {
    pub fn total(&self) -> f64 {
        self.material + self.inertia + self.satisfaction + self.macro_term
    }
}

/// Computes the utility terms for an agent with `income` and `current`
/// ideology considering `target`.
pub fn utility_terms(income: f64, current: f64, target: f64, state: &MacroState) -> UtilityTerms {
    let material = if target < weights::FAR_LEFT {
        weights::FAR_LEFT_MATERIAL * (1.0 - income)
    } else if target > weights::FAR_RIGHT {
        weights::FAR_RIGHT_MATERIAL * income
    } else {
        weights::CENTRE_MATERIAL
    };

    UtilityTerms {
        material,
        inertia: -(target - current).abs(),
        satisfaction: state.satisfaction() * (1.0 - target.abs()),
        macro_term: -weights::UNEMPLOYMENT * state.unemployment() * target.abs()
            + weights::GROWTH * state.growth() * target,
    }
}

/// Total utility of `target`.
pub fn utility(income: f64, current: f64, target: f64, state: &MacroState) -> f64 {
    utility_terms(income, current, target, state).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{IncomeModel, InitialMacro, MacroPins};
    use crate::population::Population;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn state(satisfaction: f64, unemployment: f64, growth: f64) -> MacroState {
        let mut rng = SmallRng::seed_from_u64(1);
        let population = Population::generate(4, IncomeModel::default(), &mut rng);
        let pins = MacroPins {
            satisfaction: Some(satisfaction),
            unemployment: Some(unemployment),
            growth: Some(growth),
        };
        MacroState::initial(InitialMacro::default(), pins, &population)
    }

    #[test]
    fn test_material_regions() {
        let s = state(0.0, 0.0, 0.0);
        assert_eq!(utility_terms(0.25, -0.8, -0.8, &s).material, 1.5);
        assert_eq!(utility_terms(0.5, 0.8, 0.8, &s).material, 0.8);
        assert_eq!(utility_terms(0.9, 0.0, 0.2, &s).material, 0.6);
        // Boundaries belong to the centre
        assert_eq!(utility_terms(0.9, 0.0, -0.5, &s).material, 0.6);
        assert_eq!(utility_terms(0.9, 0.0, 0.5, &s).material, 0.6);
    }

    #[test]
    fn test_inertia_penalizes_jumps() {
        let s = state(0.0, 0.0, 0.0);
        let terms = utility_terms(0.5, -0.6, 0.9, &s);
        assert!((terms.inertia + 1.5).abs() < 1e-12);
        assert_eq!(utility_terms(0.5, 0.2, 0.2, &s).inertia, 0.0);
    }

    #[test]
    fn test_satisfaction_pulls_to_centre() {
        let s = state(1.0, 0.0, 0.0);
        let centre = utility_terms(0.5, 0.0, 0.2, &s).satisfaction;
        let edge = utility_terms(0.5, 0.0, 0.9, &s).satisfaction;
        assert!(centre > edge);
        assert!((centre - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_macro_term() {
        let s = state(0.5, 0.2, 0.05);
        let terms = utility_terms(0.5, 0.0, -0.6, &s);
        let expected = -0.5 * 0.2 * 0.6 + 0.4 * 0.05 * -0.6;
        assert!((terms.macro_term - expected).abs() < 1e-12);
    }

    #[test]
    fn test_total_is_sum() {
        let s = state(0.6, 0.1, 0.02);
        let terms = utility_terms(0.3, -0.1, 0.6, &s);
        assert_eq!(
            utility(0.3, -0.1, 0.6, &s),
            terms.material + terms.inertia + terms.satisfaction + terms.macro_term
        );
    }
}
