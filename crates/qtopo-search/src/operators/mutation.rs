//! Swap and vacancy-exchange mutation.

use rand::Rng;
use rand::seq::{SliceRandom, index};
use tracing::debug;

use super::OperatorContext;
use crate::individual::Individual;

/// Mutate each child with probability `ctx.mutation_rate`.
///
/// A mutated child is either swap-mutated or vacancy-exchanged, chosen
/// uniformly. Tabu or non-distinct results are retried from the original
/// child.
pub fn mutate<R: Rng + ?Sized>(
    children: &mut [Individual],
    ctx: &OperatorContext<'_>,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for child in children.iter_mut() {
        if !rng.gen_bool(ctx.mutation_rate) {
            continue;
        }
        if let Some(mutant) = mutate_one(child, ctx, rng) {
            *child = mutant;
            mutated += 1;
        }
    }
    mutated
}

fn mutate_one<R: Rng + ?Sized>(
    original: &Individual,
    ctx: &OperatorContext<'_>,
    rng: &mut R,
) -> Option<Individual> {
    let mut fallback = None;

    for _ in 0..ctx.max_attempts {
        let candidate = if rng.gen_bool(0.5) {
            swap_mutation(original, rng)
        } else {
            vacancy_exchange(original, ctx.cells, rng)
        };

        if ctx.accepts(&candidate) {
            return Some(candidate);
        }
        if candidate.has_distinct_genes() {
            fallback = Some(candidate);
        }
    }

    debug!(
        "Mutation exhausted {} attempts, accepting tabu candidate",
        ctx.max_attempts
    );
    fallback
}

/// Apply between 1 and `ceil(n / 2)` random pairwise gene swaps.
pub fn swap_mutation<R: Rng + ?Sized>(original: &Individual, rng: &mut R) -> Individual {
    let mut mutant = original.clone();
    let n = mutant.len();
    if n < 2 {
        return mutant;
    }

    let swaps = rng.gen_range(1..=n.div_ceil(2));
    for _ in 0..swaps {
        let pair = index::sample(rng, n, 2);
        mutant.genes_mut().swap(pair.index(0), pair.index(1));
    }
    mutant
}

/// Move a random subset of qubits to distinct random vacant cells.
///
/// On a full grid there are no vacancies and a swap mutation is applied
/// instead.
pub fn vacancy_exchange<R: Rng + ?Sized>(
    original: &Individual,
    cells: usize,
    rng: &mut R,
) -> Individual {
    let vacant = original.vacant_cells(cells);
    let n = original.len();
    if vacant.is_empty() || n == 0 {
        return swap_mutation(original, rng);
    }

    let moves = rng.gen_range(1..=n.min(vacant.len()));
    let positions = index::sample(rng, n, moves);
    let targets: Vec<usize> = vacant.choose_multiple(rng, moves).copied().collect();

    let mut mutant = original.clone();
    for (pos, cell) in positions.into_iter().zip(targets) {
        mutant.genes_mut()[pos] = cell;
    }
    mutant
}
