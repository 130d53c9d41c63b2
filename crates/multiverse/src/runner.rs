//! Parallel reality runner.

use ideology_core::{ConfigError, ParameterSet, SocietyModel};
use ideology_events::TimeSeries;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::report::MultiverseReport;
use crate::RunError;

/// Output of one reality.
#[derive(Debug, Clone, PartialEq)]
pub struct RealityRun {
    pub reality: u32,
    pub seed: u64,
    pub series: TimeSeries,
}

/// Runs many independently seeded realities with shared parameters.
#[derive(Debug, Clone)]
pub struct Multiverse {
    config: RunConfig,
    params: ParameterSet,
}

impl Multiverse {
    /// Validates the run settings and resolves the model parameters once.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        if config.agents == 0 {
            return Err(ConfigError::EmptyPopulation.into());
        }
        if config.steps == 0 {
            return Err(RunError::InvalidSetting { name: "steps" });
        }
        if config.realities == 0 {
            return Err(RunError::InvalidSetting { name: "realities" });
        }
        if config.sample_every == 0 {
            return Err(RunError::InvalidSetting {
                name: "sample_every",
            });
        }

        let params = config.model.to_parameters()?;
        Ok(Self { config, params })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Bucket labels shared by every reality.
    pub fn labels(&self) -> &[String] {
        self.params.labels()
    }

    /// Seed of reality `reality`.
    pub fn reality_seed(&self, reality: u32) -> u64 {
        self.config.seed.wrapping_add(u64::from(reality))
    }

    /// Runs every reality and tabulates the results.
    ///
    /// Realities run in parallel but the report is ordered by reality id, so
    /// it does not depend on scheduling.
    pub fn run(&self) -> Result<MultiverseReport, RunError> {
        info!(
            realities = self.config.realities,
            agents = self.config.agents,
            steps = self.config.steps,
            base_seed = self.config.seed,
            "Starting multiverse"
        );

        let runs = (0..self.config.realities)
            .into_par_iter()
            .map(|reality| self.run_reality(reality))
            .collect::<Result<Vec<_>, _>>()?;

        let report = MultiverseReport::new(self.labels().to_vec(), runs);
        info!(
            realities = report.runs().len(),
            rows = report.row_count(),
            "Multiverse complete"
        );
        Ok(report)
    }

    /// Runs a single reality to completion.
    pub fn run_reality(&self, reality: u32) -> Result<RealityRun, RunError> {
        let seed = self.reality_seed(reality);
        let mut model = SocietyModel::new(self.config.agents, seed, self.params.clone())?;
        let mut series = TimeSeries::with_reality(reality);

        for _ in 0..self.config.steps {
            model.step();
            let t = model.t();
            if t % self.config.sample_every == 0 || t == self.config.steps {
                series.push(t, model.snapshot());
            }
        }

        debug!(reality, seed, rows = series.len(), "Reality finished");
        Ok(RealityRun {
            reality,
            seed,
            series,
        })
    }
}
