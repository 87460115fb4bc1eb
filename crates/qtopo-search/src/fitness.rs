//! Placement fitness.
//!
//! The cost of a placement is the weighted hop distance, in the repaired
//! coupling graph, between coupled qubits that did not end up adjacent:
//!
//! ```text
//! cost = Σ_{i>j, M[i][j]≠0, d(i,j)>1} M[i][j] · d(i,j)
//! ```
//!
//! Placements whose occupied cells are not grid-connected score
//! [`FITNESS_SENTINEL`]. A coupled pair left without any path after repair
//! scores the sentinel plus the cost accumulated up to that pair.

use qtopo_core::Graph;

use crate::config::FITNESS_SENTINEL;
use crate::individual::Individual;
use crate::repair::{PlacementProblem, repair_on};

/// Scores individuals against a fixed placement problem.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    problem: &'a PlacementProblem,
}

impl<'a> FitnessEvaluator<'a> {
    /// Create an evaluator for `problem`.
    pub fn new(problem: &'a PlacementProblem) -> Self {
        Self { problem }
    }

    /// The problem being scored.
    pub fn problem(&self) -> &'a PlacementProblem {
        self.problem
    }

    /// Fitness of one individual. Lower is better; zero means every
    /// coupled pair is grid-adjacent.
    pub fn evaluate(&self, individual: &Individual) -> f64 {
        let pruned = self.problem.pruned_grid(individual);
        if !pruned.is_connected() {
            return FITNESS_SENTINEL;
        }
        let repair = repair_on(self.problem, individual, &pruned);
        weighted_excess_distance(self.problem, &repair.graph)
    }

    /// Fitness of every individual, in order.
    pub fn evaluate_population(&self, population: &[Individual]) -> Vec<f64> {
        population.iter().map(|ind| self.evaluate(ind)).collect()
    }

    /// Whether `fitness` marks an infeasible placement.
    #[inline]
    pub fn is_infeasible(fitness: f64) -> bool {
        fitness >= FITNESS_SENTINEL
    }
}

fn weighted_excess_distance(problem: &PlacementProblem, graph: &Graph) -> f64 {
    let mut cost = 0.0;
    // Coupled pairs arrive grouped by their first qubit, so one BFS per
    // group answers every distance query of that group.
    let mut source = usize::MAX;
    let mut distances: Vec<Option<usize>> = vec![];

    for (i, j, weight) in problem.coupling().coupled_pairs() {
        if i != source {
            source = i;
            distances = graph.bfs_distances(i);
        }
        match distances[j] {
            None => return FITNESS_SENTINEL + cost,
            Some(d) if d > 1 => cost += f64::from(weight) * d as f64,
            Some(_) => {}
        }
    }

    cost
}
