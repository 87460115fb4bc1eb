//! Position-based crossover (PBX).
//!
//! For each child slot, `parent1` is the slot's individual from the first
//! selected pool and `parent2` a random, different individual from the second.
//! With probability `1 - crossover_rate` the child is a shuffled copy of one
//! parent. Otherwise PBX copies a random non-empty subset of `parent1`'s
//! positions, fills the remaining positions with `parent2`'s unused genes in
//! `parent2`'s order, and falls back to random vacant cells when `parent2`
//! runs out of novel genes. A mirrored child is built from `parent2`'s
//! complementary positions and one of the two is kept.

use rand::Rng;
use rand::seq::{SliceRandom, index};
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use super::OperatorContext;
use crate::individual::Individual;

/// Produce `pool_a.len()` children from two selected pools.
pub fn crossover<R: Rng + ?Sized>(
    pool_a: &[Individual],
    pool_b: &[Individual],
    ctx: &OperatorContext<'_>,
    rng: &mut R,
) -> Vec<Individual> {
    let size = pool_a.len();
    let mut children = Vec::with_capacity(size);

    if pool_b.is_empty() {
        return children;
    }

    for parent1 in pool_a {
        if let Some(child) = cross_slot(parent1, pool_b, ctx, rng) {
            children.push(child);
        }
    }

    if children.len() < size {
        let n = pool_a.first().map_or(0, Individual::len);
        pad_with_random(&mut children, size, n, ctx, rng);
    }

    children
}

fn cross_slot<R: Rng + ?Sized>(
    parent1: &Individual,
    pool_b: &[Individual],
    ctx: &OperatorContext<'_>,
    rng: &mut R,
) -> Option<Individual> {
    let mut fallback = None;

    for _ in 0..ctx.max_attempts {
        let parent2 = pick_mate(parent1, pool_b, ctx.max_attempts, rng);

        let candidate = if rng.gen_range(0.0..1.0) >= ctx.crossover_rate {
            let mut child = if rng.gen_bool(0.5) {
                parent1.clone()
            } else {
                parent2.clone()
            };
            child.genes_mut().shuffle(rng);
            child
        } else {
            pbx(parent1, parent2, ctx.cells, rng)
        };

        if ctx.accepts(&candidate) {
            return Some(candidate);
        }
        if candidate.has_distinct_genes() {
            fallback = Some(candidate);
        }
    }

    debug!(
        "Crossover slot exhausted {} attempts, accepting tabu candidate",
        ctx.max_attempts
    );
    fallback
}

/// Draw a mate from `pool` that differs from `parent` by value.
///
/// When the pool has converged to copies of `parent`, the last draw is used.
fn pick_mate<'p, R: Rng + ?Sized>(
    parent: &Individual,
    pool: &'p [Individual],
    max_attempts: usize,
    rng: &mut R,
) -> &'p Individual {
    let mut mate = &pool[rng.gen_range(0..pool.len())];
    for _ in 1..max_attempts {
        if mate != parent {
            break;
        }
        mate = &pool[rng.gen_range(0..pool.len())];
    }
    mate
}

/// Position-based crossover of two parents.
pub fn pbx<R: Rng + ?Sized>(
    parent1: &Individual,
    parent2: &Individual,
    cells: usize,
    rng: &mut R,
) -> Individual {
    let n = parent1.len();
    if n == 0 {
        return parent1.clone();
    }

    let mut chosen = vec![false; n];
    let amount = rng.gen_range(1..=n);
    for pos in index::sample(rng, n, amount) {
        chosen[pos] = true;
    }

    let child1 = build_child(parent1, parent2, |pos| chosen[pos], cells, rng);
    let child2 = build_child(parent2, parent1, |pos| !chosen[pos], cells, rng);

    if rng.gen_bool(0.5) { child1 } else { child2 }
}

/// Copy `donor`'s genes at the kept positions, then fill the rest from
/// `filler` in order, then from random vacant cells.
fn build_child<R: Rng + ?Sized>(
    donor: &Individual,
    filler: &Individual,
    keep: impl Fn(usize) -> bool,
    cells: usize,
    rng: &mut R,
) -> Individual {
    let n = donor.len();
    let mut genes: Vec<Option<usize>> = (0..n)
        .map(|pos| keep(pos).then(|| donor.cell(pos)))
        .collect();
    let mut used: FxHashSet<usize> = genes.iter().flatten().copied().collect();

    let open: Vec<usize> = (0..n).filter(|&pos| genes[pos].is_none()).collect();
    let mut open = open.into_iter().peekable();

    for &gene in filler.genes() {
        let Some(&pos) = open.peek() else {
            break;
        };
        if used.insert(gene) {
            genes[pos] = Some(gene);
            open.next();
        }
    }

    let remaining: Vec<usize> = open.collect();
    if !remaining.is_empty() {
        let vacant: Vec<usize> = (0..cells).filter(|c| !used.contains(c)).collect();
        for (&pos, &cell) in remaining
            .iter()
            .zip(vacant.choose_multiple(rng, remaining.len()))
        {
            genes[pos] = Some(cell);
        }
    }

    Individual::new(genes.into_iter().flatten().collect())
}

/// Top up `children` with fresh random individuals not already present.
fn pad_with_random<R: Rng + ?Sized>(
    children: &mut Vec<Individual>,
    size: usize,
    n: usize,
    ctx: &OperatorContext<'_>,
    rng: &mut R,
) {
    let mut seen: FxHashSet<Individual> = children.iter().cloned().collect();
    let missing = size - children.len();
    let budget = ctx.max_attempts.saturating_mul(missing);
    let mut attempts = 0usize;

    while children.len() < size {
        let candidate = Individual::random(ctx.cells, n, rng);
        attempts += 1;
        if seen.insert(candidate.clone()) || attempts >= budget {
            children.push(candidate);
        }
    }

    warn!("Padded {} crossover slots with random individuals", missing);
}
