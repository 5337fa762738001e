//! Engine hyperparameters.
//!
//! [`GaConfig`] holds everything that controls the generation loop.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a GA run.
///
/// # Defaults
///
/// ```
/// use evoparam::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoparam::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_number_best_candidates(120)
///     .with_crossover_rate(0.8)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals in the population. Invariant across the run.
    pub population_size: usize,

    /// How many individuals fitness-proportional selection draws each
    /// generation as the recombination pool.
    pub number_best_candidates: usize,

    /// Probability of producing an offspring for each unordered pair of
    /// selected individuals (0.0–1.0).
    pub crossover_rate: f64,

    /// Per-cell mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of generations to run. Zero is legal and yields an empty
    /// history without evaluating fitness.
    pub generations: usize,

    /// Random seed for reproducibility. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            number_best_candidates: 70,
            crossover_rate: 0.7,
            mutation_rate: 0.1,
            generations: 100,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the selection pool size.
    pub fn with_number_best_candidates(mut self, n: usize) -> Self {
        self.number_best_candidates = n;
        self
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Direct construction and deserialized documents can carry values the
    /// clamping builders never produce, so the runner validates before
    /// every run.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::invalid_parameter(
                "population_size",
                "must be at least 2",
            ));
        }
        if self.number_best_candidates == 0 {
            return Err(Error::invalid_parameter(
                "number_best_candidates",
                "must be at least 1",
            ));
        }
        if self.number_best_candidates > self.population_size {
            return Err(Error::InvalidOperation(format!(
                "number_best_candidates ({}) exceeds population_size ({})",
                self.number_best_candidates, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::invalid_parameter(
                "crossover_rate",
                "must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::invalid_parameter(
                "mutation_rate",
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}
