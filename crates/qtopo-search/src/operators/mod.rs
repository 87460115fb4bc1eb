//! Genetic operators: tournament selection, position-based crossover and
//! swap / vacancy-exchange mutation.
//!
//! Crossover and mutation reject candidates that are tabu or repeat a gene.
//! Rejections are retried up to [`OperatorContext::max_attempts`] times per
//! slot. Once the budget is spent the last candidate with distinct genes is
//! accepted even if it is tabu, so a saturated grid can never stall a
//! generation.

pub mod crossover;
pub mod mutation;
pub mod selection;

pub use crossover::crossover;
pub use mutation::mutate;
pub use selection::tournament_select;

use crate::config::GaConfig;
use crate::individual::Individual;
use crate::tabu::TabuList;

/// Shared inputs of the crossover and mutation operators.
#[derive(Debug, Clone, Copy)]
pub struct OperatorContext<'a> {
    /// Number of grid cells; genes are drawn from `0..cells`.
    pub cells: usize,
    /// Individuals currently forbidden.
    pub tabu: &'a TabuList,
    /// Probability of PBX over a shuffled parent copy.
    pub crossover_rate: f64,
    /// Per-child mutation probability.
    pub mutation_rate: f64,
    /// Retry budget per slot.
    pub max_attempts: usize,
}

impl<'a> OperatorContext<'a> {
    /// Context from a search configuration.
    pub fn new(cells: usize, tabu: &'a TabuList, config: &GaConfig) -> Self {
        Self {
            cells,
            tabu,
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Whether `candidate` may enter the next generation.
    pub fn accepts(&self, candidate: &Individual) -> bool {
        !self.tabu.contains(candidate) && candidate.has_distinct_genes()
    }
}
