//! Tournament selection.

use rand::Rng;
use rand::seq::index;

use crate::individual::Individual;

/// Select a new pool of `population.len()` individuals by tournament.
///
/// Each tournament samples `tournament_size` distinct indices (clamped to
/// the population size) and keeps the fittest; ties go to the first sampled.
/// Tournaments are independent, so an individual can win several times.
pub fn tournament_select<R: Rng + ?Sized>(
    population: &[Individual],
    fitness: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    debug_assert_eq!(population.len(), fitness.len());
    let size = tournament_size.clamp(1, population.len().max(1));

    (0..population.len())
        .map(|_| {
            let winner = index::sample(rng, population.len(), size)
                .into_iter()
                .reduce(|best, idx| if fitness[idx] < fitness[best] { idx } else { best })
                .unwrap_or(0);
            population[winner].clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn population() -> Vec<Individual> {
        (0..4).map(|i| Individual::new(vec![i, i + 4])).collect()
    }

    #[test]
    fn test_size_preserved() {
        let mut rng = SmallRng::seed_from_u64(5);
        let pop = population();
        let selected = tournament_select(&pop, &[3.0, 2.0, 1.0, 0.0], 2, &mut rng);
        assert_eq!(selected.len(), pop.len());
        assert!(selected.iter().all(|s| pop.contains(s)));
    }

    #[test]
    fn test_full_tournament_picks_best() {
        let mut rng = SmallRng::seed_from_u64(6);
        let pop = population();
        let selected = tournament_select(&pop, &[3.0, 0.5, 1.0, 2.0], 10, &mut rng);
        assert!(selected.iter().all(|s| s == &pop[1]));
    }

    #[test]
    fn test_never_picks_worst_with_pairs() {
        let mut rng = SmallRng::seed_from_u64(7);
        let pop = population();
        for _ in 0..20 {
            let selected = tournament_select(&pop, &[0.0, 1.0, 2.0, 9.0], 2, &mut rng);
            assert!(!selected.contains(&pop[3]));
        }
    }
}
