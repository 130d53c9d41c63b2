//! Macro State and Feedback
//!
//! Aggregates recomputed from the whole population after every step. They
//! close the loop: satisfaction drives mobility, and every scalar enters the
//! utility agents use to choose their next ideology.

use crate::params::{InitialMacro, MacroPins};
use crate::population::Population;

/// Feedback coefficients
pub mod coefficients {
    /// G = clip(INEQUALITY_SCALE * std(income))
    pub const INEQUALITY_SCALE: f64 = 1.8;

    pub const SATISFACTION_BASE: f64 = 0.75;
    pub const SATISFACTION_MEAN_IDEOLOGY: f64 = 0.4;
    pub const SATISFACTION_POLARIZATION: f64 = 0.3;
    pub const SATISFACTION_INEQUALITY: f64 = 0.2;

    pub const UNEMPLOYMENT_BASE: f64 = 0.08;
    pub const UNEMPLOYMENT_INEQUALITY: f64 = 0.5;
    pub const UNEMPLOYMENT_POLARIZATION: f64 = 0.2;
    pub const UNEMPLOYMENT_SATISFACTION: f64 = 0.3;

    pub const GROWTH_BASE: f64 = 0.05;
    pub const GROWTH_SATISFACTION: f64 = 0.3;
    pub const GROWTH_INEQUALITY: f64 = 0.2;
    pub const GROWTH_POLARIZATION: f64 = 0.2;
}

/// Lower bound of growth
pub const GROWTH_MIN: f64 = -0.05;
/// Upper bound of growth
pub const GROWTH_MAX: f64 = 0.1;

/// Macro scalars of the society.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroState {
    inequality: f64,
    satisfaction: f64,
    unemployment: f64,
    growth: f64,
    mean_ideology: f64,
    polarization: f64,
}

impl MacroState {
    /// State in effect before the first step.
    ///
    /// G, S, U and C start from the seed values (pins win); mean ideology and
    /// polarization describe the freshly drawn population.
    pub fn initial(initial: InitialMacro, pins: MacroPins, population: &Population) -> Self {
        let satisfaction = pins.satisfaction.unwrap_or(initial.satisfaction);
        let unemployment = pins.unemployment.unwrap_or(initial.unemployment);
        let growth = pins.growth.unwrap_or(initial.growth);

        Self {
            inequality: unit(initial.inequality),
            satisfaction: unit(satisfaction),
            unemployment: unit(unemployment),
            growth: growth.clamp(GROWTH_MIN, GROWTH_MAX),
            mean_ideology: population.mean_ideology(),
            polarization: population.ideology_variance(),
        }
    }

    /// Recomputes every scalar from the population. Pinned scalars keep their
    /// configured value, still passed through their clip range.
    pub fn recompute(&mut self, population: &Population, pins: MacroPins) {
        use coefficients::*;

        let inequality = unit(INEQUALITY_SCALE * population.income_std_dev());
        let mean_ideology = population.mean_ideology();
        let polarization = population.ideology_variance();

        let satisfaction = unit(pins.satisfaction.unwrap_or(
            SATISFACTION_BASE
                - SATISFACTION_MEAN_IDEOLOGY * mean_ideology.abs()
                - SATISFACTION_POLARIZATION * polarization
                - SATISFACTION_INEQUALITY * inequality,
        ));

        let unemployment = unit(pins.unemployment.unwrap_or(
            UNEMPLOYMENT_BASE + UNEMPLOYMENT_INEQUALITY * inequality
                + UNEMPLOYMENT_POLARIZATION * polarization
                - UNEMPLOYMENT_SATISFACTION * satisfaction,
        ));

        let growth = pins
            .growth
            .unwrap_or(
                GROWTH_BASE + GROWTH_SATISFACTION * satisfaction
                    - GROWTH_INEQUALITY * inequality
                    - GROWTH_POLARIZATION * polarization,
            )
            .clamp(GROWTH_MIN, GROWTH_MAX);

        *self = Self {
            inequality,
            satisfaction,
            unemployment,
            growth,
            mean_ideology,
            polarization,
        };
    }

    /// Inequality proxy G
    pub fn inequality(&self) -> f64 {
        self.inequality
    }

    /// Satisfaction S
    pub fn satisfaction(&self) -> f64 {
        self.satisfaction
    }

    /// Unemployment proxy U
    pub fn unemployment(&self) -> f64 {
        self.unemployment
    }

    /// Growth proxy C
    pub fn growth(&self) -> f64 {
        self.growth
    }

    pub fn mean_ideology(&self) -> f64 {
        self.mean_ideology
    }

    /// Variance of ideology
    pub fn polarization(&self) -> f64 {
        self.polarization
    }
}

fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
