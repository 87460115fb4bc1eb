//! Genetic/tabu search engine.
//!
//! ```text
//! Init ──► Evaluate ──► ┌─────────────────────────────────────────────┐
//!                       │ Select ×2 ─► Crossover ─► Mutate ─►         │
//!                       │ EvaluateChildren ─► Compete ─► TabuUpdate   │ × (generations − 1)
//!                       └─────────────────────────────────────────────┘
//!                                            │
//!                                            ▼
//!                                          Done
//! ```
//!
//! Replacement is per slot: child `k` replaces individual `k` only if it is
//! strictly fitter. Weaker individuals not beaten by their own slot's child
//! survive. The global best only ever improves, and each new global best is
//! made tabu.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::GaConfig;
use crate::error::SearchResult;
use crate::fitness::FitnessEvaluator;
use crate::individual::{Individual, initialize_population};
use crate::operators::{OperatorContext, crossover, mutate, tournament_select};
use crate::repair::PlacementProblem;
use crate::tabu::TabuList;

/// Snapshot of the search after one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation number, `0` for the initial population.
    pub generation: usize,
    /// Global best fitness so far.
    pub best_fitness: f64,
    /// Best fitness in the current population.
    pub population_best_fitness: f64,
    /// Mean fitness of the current population.
    pub mean_fitness: f64,
    /// Global best individual so far.
    pub best_individual: Individual,
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The best individual found.
    pub best: Individual,
    /// Its fitness.
    pub best_fitness: f64,
    /// One record per generation, initial population first.
    pub history: Vec<GenerationRecord>,
}

/// Hybrid genetic algorithm with a tabu list.
pub struct GaEngine<'a> {
    problem: &'a PlacementProblem,
    config: GaConfig,
}

impl<'a> GaEngine<'a> {
    /// Create an engine for `problem`, rejecting an invalid configuration.
    pub fn new(problem: &'a PlacementProblem, config: GaConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self { problem, config })
    }

    /// The search configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Run the search to completion.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchOutcome {
        self.run_with_observer(rng, |_| {})
    }

    /// Run the search, reporting every generation to `observer`.
    #[instrument(skip(self, rng, observer), fields(qubits = self.problem.num_qubits(), grid = %self.problem.shape()))]
    pub fn run_with_observer<R, F>(&self, rng: &mut R, mut observer: F) -> SearchOutcome
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationRecord),
    {
        let evaluator = FitnessEvaluator::new(self.problem);
        let cells = self.problem.num_cells();
        let n = self.problem.num_qubits();
        let mut tabu = TabuList::for_qubits(n);

        info!(
            "Starting search: {} qubits on {} grid, population {}, {} generations",
            n,
            self.problem.shape(),
            self.config.population_size,
            self.config.generations
        );

        // Init / Evaluate
        let mut population = initialize_population(
            cells,
            n,
            self.config.population_size,
            self.config.max_attempts,
            rng,
        );
        let mut fitness = evaluator.evaluate_population(&population);

        let first = best_index(&fitness);
        let mut best = population[first].clone();
        let mut best_fitness = fitness[first];
        tabu.push(best.clone());

        let mut history = Vec::with_capacity(self.config.generations);
        let record = self.record(0, &fitness, &best, best_fitness);
        observer(&record);
        history.push(record);

        for generation in 1..self.config.generations {
            // Select
            let pool_a =
                tournament_select(&population, &fitness, self.config.tournament_size, rng);
            let pool_b =
                tournament_select(&population, &fitness, self.config.tournament_size, rng);

            // Crossover / Mutate
            let ctx = OperatorContext::new(cells, &tabu, &self.config);
            let mut children = crossover(&pool_a, &pool_b, &ctx, rng);
            let mutated = mutate(&mut children, &ctx, rng);

            // EvaluateChildren
            let child_fitness = evaluator.evaluate_population(&children);

            // Compete
            let mut replaced = 0;
            for (slot, (child, child_fit)) in children.into_iter().zip(child_fitness).enumerate() {
                if child_fit < fitness[slot] {
                    population[slot] = child;
                    fitness[slot] = child_fit;
                    replaced += 1;
                }
            }

            // TabuUpdate
            tabu.tick();
            let top = best_index(&fitness);
            if fitness[top] <= best_fitness {
                best = population[top].clone();
                best_fitness = fitness[top];
                tabu.push(best.clone());
            }

            debug!(
                generation,
                best_fitness,
                population_best = fitness[top],
                replaced,
                mutated,
                tabu = tabu.len(),
                "Generation complete"
            );

            let record = self.record(generation, &fitness, &best, best_fitness);
            observer(&record);
            history.push(record);
        }

        info!("Search finished, best fitness {}", best_fitness);

        SearchOutcome {
            best,
            best_fitness,
            history,
        }
    }

    fn record(
        &self,
        generation: usize,
        fitness: &[f64],
        best: &Individual,
        best_fitness: f64,
    ) -> GenerationRecord {
        let population_best_fitness = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_fitness = fitness.iter().sum::<f64>() / fitness.len().max(1) as f64;
        GenerationRecord {
            generation,
            best_fitness,
            population_best_fitness,
            mean_fitness,
            best_individual: best.clone(),
        }
    }
}

/// Index of the first minimum.
fn best_index(fitness: &[f64]) -> usize {
    fitness
        .iter()
        .enumerate()
        .fold(0, |best, (i, &f)| if f < fitness[best] { i } else { best })
}
