//! Simulation Instance
//!
//! Owns the parameter set, the population, the macro state, the step clock and
//! the single random generator that drives every stochastic decision.
//!
//! # Step
//!
//! 1. Evaluate the re-evaluation probability from current satisfaction
//! 2. For every agent in index order, draw a Bernoulli trial
//! 3. Agents whose trial succeeds score every anchor, softmax the utilities
//!    and snap to a sampled anchor (one more draw)
//! 4. Recompute the macro state from the updated population
//! 5. Advance the clock
//!
//! The generator is seeded once at construction. For fixed `(n, seed,
//! parameters)` the sequence of draws, and therefore every snapshot, is
//! identical across runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::binning::{classify, proportions};
use crate::choice::{sample_index, softmax_into};
use crate::error::ConfigError;
use crate::macro_state::MacroState;
use crate::params::ParameterSet;
use crate::population::Population;
use crate::utility::utility;
use ideology_events::{BucketShare, MacroSnapshot, Snapshot};

/// Counters describing the most recent step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Agents whose Bernoulli trial succeeded
    pub reevaluated: usize,
    /// Re-evaluating agents that ended up in a different bucket
    pub switched: usize,
}

/// One independently seeded simulated society.
#[derive(Debug, Clone)]
pub struct SocietyModel {
    params: ParameterSet,
    population: Population,
    macro_state: MacroState,
    rng: SmallRng,
    seed: u64,
    t: u64,
    last_step: StepStats,
    utilities: Vec<f64>,
    probabilities: Vec<f64>,
}

impl SocietyModel {
    /// Builds a society of `n` agents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPopulation`] when `n` is zero, or the
    /// validation error of `params`.
    pub fn new(n: usize, seed: u64, params: ParameterSet) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        params.validate()?;

        let mut rng = seeded_rng(seed);
        let population = Population::generate(n, params.income(), &mut rng);
        let macro_state = MacroState::initial(params.initial(), params.pins(), &population);

        info!(
            agents = n,
            seed,
            buckets = params.bucket_count(),
            static_labor_market = params.pins().is_static_labor_market(),
            "Society model constructed"
        );

        let buckets = params.bucket_count();
        Ok(Self {
            params,
            population,
            macro_state,
            rng,
            seed,
            t: 0,
            last_step: StepStats::default(),
            utilities: Vec::with_capacity(buckets),
            probabilities: Vec::with_capacity(buckets),
        })
    }

    /// Builds a society with the extended preset.
    pub fn with_defaults(n: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::new(n, seed, ParameterSet::default())
    }

    /// Advances the simulation by one step.
    pub fn step(&mut self) {
        let probability = self.reevaluation_probability();
        let anchors = self.params.anchors();
        let edges = self.params.edges();
        let mut stats = StepStats::default();

        for i in 0..self.population.len() {
            if self.rng.gen::<f64>() >= probability {
                continue;
            }
            stats.reevaluated += 1;

            let income = self.population.income()[i];
            let current = self.population.ideology()[i];

            self.utilities.clear();
            self.utilities.extend(
                anchors
                    .iter()
                    .map(|&target| utility(income, current, target, &self.macro_state)),
            );
            softmax_into(&self.utilities, &mut self.probabilities);

            let next = anchors[sample_index(&mut self.rng, &self.probabilities)];
            if classify(next, edges) != classify(current, edges) {
                stats.switched += 1;
            }
            self.population.set_ideology(i, next);
        }

        self.macro_state
            .recompute(&self.population, self.params.pins());
        self.t += 1;
        self.last_step = stats;

        debug!(
            t = self.t,
            reevaluated = stats.reevaluated,
            switched = stats.switched,
            satisfaction = self.macro_state.satisfaction(),
            polarization = self.macro_state.polarization(),
            "Step complete"
        );
    }

    /// Advances the simulation by `steps` steps.
    pub fn step_n(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Bucket shares and macro scalars at the current step.
    pub fn snapshot(&self) -> Snapshot {
        let counts = self.population.bucket_counts(self.params.edges());
        let shares = proportions(&counts, self.population.len());

        let buckets = self
            .params
            .labels()
            .iter()
            .zip(shares)
            .map(|(label, proportion)| BucketShare::new(label.clone(), proportion))
            .collect();

        let state = &self.macro_state;
        Snapshot::new(
            buckets,
            MacroSnapshot {
                satisfaction: state.satisfaction(),
                mobility: self.mobility(),
                inequality: state.inequality(),
                polarization: state.polarization(),
                mean_ideology: state.mean_ideology(),
                unemployment: state.unemployment(),
                growth: state.growth(),
            },
        )
    }

    /// Raw mobility at current satisfaction.
    pub fn mobility(&self) -> f64 {
        self.params.mobility().at(self.macro_state.satisfaction())
    }

    /// Mobility clamped to [0, 1].
    pub fn reevaluation_probability(&self) -> f64 {
        self.params
            .mobility()
            .probability(self.macro_state.satisfaction())
    }

    /// Steps taken so far.
    pub fn t(&self) -> u64 {
        self.t
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Bucket labels in anchor order.
    pub fn labels(&self) -> &[String] {
        self.params.labels()
    }

    pub fn anchors(&self) -> &[f64] {
        self.params.anchors()
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn macro_state(&self) -> &MacroState {
        &self.macro_state
    }

    pub fn last_step_stats(&self) -> StepStats {
        self.last_step
    }
}

/// Seeds the generator, expanding the 64-bit seed with SplitMix64.
fn seeded_rng(seed: u64) -> SmallRng {
    let mut state = seed;
    let mut bytes = <SmallRng as SeedableRng>::Seed::default();
    for chunk in bytes.as_mut().chunks_mut(8) {
        let word = splitmix64(&mut state).to_le_bytes();
        chunk.copy_from_slice(&word[..chunk.len()]);
    }
    SmallRng::from_seed(bytes)
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
