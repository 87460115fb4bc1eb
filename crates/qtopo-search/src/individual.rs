//! Placement individuals and population initialization.

use rand::Rng;
use rand::seq::index;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A qubit-to-cell assignment.
///
/// Gene `i` is the grid index of qubit `i`. Valid individuals hold pairwise
/// distinct genes below the grid's cell count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Individual(Vec<usize>);

impl Individual {
    /// Wrap a gene vector.
    pub fn new(genes: Vec<usize>) -> Self {
        Self(genes)
    }

    /// Draw `n` distinct cells uniformly from `0..cells`.
    pub fn random<R: Rng + ?Sized>(cells: usize, n: usize, rng: &mut R) -> Self {
        Self(index::sample(rng, cells, n).into_vec())
    }

    /// The genes, indexed by qubit.
    #[inline]
    pub fn genes(&self) -> &[usize] {
        &self.0
    }

    /// Mutable access to the genes.
    #[inline]
    pub fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Number of genes (qubits).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the individual has no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Grid index assigned to `qubit`.
    #[inline]
    pub fn cell(&self, qubit: usize) -> usize {
        self.0[qubit]
    }

    /// Whether all genes are pairwise distinct.
    pub fn has_distinct_genes(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.0.iter().all(|g| seen.insert(*g))
    }

    /// Whether this is a valid placement on a grid of `cells` cells.
    pub fn is_valid_placement(&self, cells: usize) -> bool {
        self.0.iter().all(|&g| g < cells) && self.has_distinct_genes()
    }

    /// Occupancy mask over `cells` grid cells.
    pub fn occupancy(&self, cells: usize) -> Vec<bool> {
        let mut used = vec![false; cells];
        for &g in &self.0 {
            used[g] = true;
        }
        used
    }

    /// Grid cells not used by this individual, ascending.
    pub fn vacant_cells(&self, cells: usize) -> Vec<usize> {
        self.occupancy(cells)
            .iter()
            .enumerate()
            .filter_map(|(k, &used)| (!used).then_some(k))
            .collect()
    }
}

impl From<Vec<usize>> for Individual {
    fn from(genes: Vec<usize>) -> Self {
        Self(genes)
    }
}

/// Build a population of `size` distinct random individuals.
///
/// Each draw is rejected if it is already present. After `size * max_attempts`
/// draws the remaining slots accept duplicates, which only happens when the
/// grid admits fewer distinct placements than the population needs.
pub fn initialize_population<R: Rng + ?Sized>(
    cells: usize,
    n: usize,
    size: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<Individual> {
    let mut population = Vec::with_capacity(size);
    let mut seen = FxHashSet::default();
    let budget = size.saturating_mul(max_attempts);
    let mut draws = 0usize;
    let mut duplicates = 0usize;

    while population.len() < size {
        let candidate = Individual::random(cells, n, rng);
        draws += 1;
        if seen.insert(candidate.clone()) {
            population.push(candidate);
        } else if draws >= budget {
            population.push(candidate);
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        warn!(
            "Population initialization exhausted {} draws; accepted {} duplicate individuals",
            budget, duplicates
        );
    }

    population
}
