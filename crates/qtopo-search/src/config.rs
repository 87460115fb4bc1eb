//! Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Cost assigned to placements whose occupied cells are not grid-connected.
pub const FITNESS_SENTINEL: f64 = 150_000.0;

/// Parameters of the genetic/tabu search.
///
/// Every field has a default, so partial YAML or JSON documents deserialize.
///
/// ```
/// use qtopo_search::GaConfig;
///
/// let config = GaConfig::default().with_generations(50).with_seed(7);
/// assert_eq!(config.population_size, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Total generations, including the initial evaluation.
    pub generations: usize,
    /// Probability that a child slot is produced by PBX rather than a
    /// shuffled parent copy.
    pub crossover_rate: f64,
    /// Per-child mutation probability.
    pub mutation_rate: f64,
    /// Individuals sampled per selection tournament.
    pub tournament_size: usize,
    /// Retry budget for a single operator slot before the fallback rule applies.
    pub max_attempts: usize,
    /// Seed for reproducible runs. Entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            crossover_rate: 0.85,
            mutation_rate: 0.15,
            tournament_size: 3,
            max_attempts: 1000,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Set the population size.
    #[must_use]
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations.
    #[must_use]
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the crossover rate.
    #[must_use]
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the mutation rate.
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the tournament size.
    #[must_use]
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the per-slot retry budget.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> SearchResult<()> {
        if self.population_size < 2 {
            return Err(SearchError::InvalidConfig(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(SearchError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        if self.tournament_size == 0 {
            return Err(SearchError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SearchError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
