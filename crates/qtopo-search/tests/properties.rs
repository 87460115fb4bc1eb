//! Property-based tests for placement invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use qtopo_core::{CouplingMatrix, GridShape};
use qtopo_search::operators::crossover::pbx;
use qtopo_search::operators::mutation::{swap_mutation, vacancy_exchange};
use qtopo_search::{
    FITNESS_SENTINEL, FitnessEvaluator, Individual, PlacementProblem, initialize_population,
    repair,
};

/// A random symmetric, zero-diagonal coupling matrix over 2..=7 qubits.
fn arb_coupling() -> impl Strategy<Value = CouplingMatrix> {
    (2_usize..=7).prop_flat_map(|n| {
        prop::collection::vec(0_u32..=3, n * (n - 1) / 2).prop_map(move |upper| {
            let mut rows = vec![vec![0; n]; n];
            let mut k = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    rows[i][j] = upper[k];
                    rows[j][i] = upper[k];
                    k += 1;
                }
            }
            CouplingMatrix::from_rows(rows).unwrap()
        })
    })
}

/// A coupling matrix, a grid that fits it, and a random seed.
fn arb_problem() -> impl Strategy<Value = (PlacementProblem, u64)> {
    (arb_coupling(), 0_u32..=2, any::<u64>()).prop_map(|(coupling, slack, seed)| {
        let n = coupling.num_qubits();
        let base = GridShape::resolve(n, None, None).unwrap();
        let shape = GridShape::new(base.rows + slack, base.columns).unwrap();
        (PlacementProblem::new(coupling, shape), seed)
    })
}

proptest! {
    /// Initialization, crossover and mutation all yield valid placements.
    #[test]
    fn test_operators_preserve_permutation((problem, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (cells, n) = (problem.num_cells(), problem.num_qubits());

        let population = initialize_population(cells, n, 8, 50, &mut rng);
        for ind in &population {
            prop_assert!(ind.is_valid_placement(cells));
            prop_assert_eq!(ind.len(), n);
        }

        for pair in population.windows(2) {
            let child = pbx(&pair[0], &pair[1], cells, &mut rng);
            prop_assert!(child.is_valid_placement(cells));
            prop_assert!(swap_mutation(&child, &mut rng).is_valid_placement(cells));
            prop_assert!(vacancy_exchange(&child, cells, &mut rng).is_valid_placement(cells));
        }
    }

    /// Fitness is non-negative and hits the sentinel exactly when the
    /// occupied cells are not grid-connected.
    #[test]
    fn test_fitness_sentinel_iff_disconnected((problem, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let eval = FitnessEvaluator::new(&problem);

        for _ in 0..10 {
            let ind = Individual::random(problem.num_cells(), problem.num_qubits(), &mut rng);
            let fitness = eval.evaluate(&ind);
            prop_assert!(fitness >= 0.0);
            prop_assert_eq!(
                fitness >= FITNESS_SENTINEL,
                !problem.is_grid_connected(&ind)
            );
        }
    }

    /// Coupled pairs placed side by side never add cost: a placement where
    /// every coupled pair is grid-adjacent scores zero, and any positive
    /// cost needs at least one non-adjacent coupled pair.
    #[test]
    fn test_adjacent_pairs_cost_nothing((problem, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let eval = FitnessEvaluator::new(&problem);

        for _ in 0..10 {
            let ind = Individual::random(problem.num_cells(), problem.num_qubits(), &mut rng);
            let fitness = eval.evaluate(&ind);
            if fitness >= FITNESS_SENTINEL {
                continue;
            }
            let all_adjacent = problem.coupling().coupled_pairs().all(|(i, j, _)| {
                problem
                    .qubit_coordinate(&ind, i)
                    .manhattan(&problem.qubit_coordinate(&ind, j))
                    == 1
            });
            if all_adjacent {
                prop_assert_eq!(fitness, 0.0);
            }
            if fitness > 0.0 {
                prop_assert!(!all_adjacent);
            }
        }
    }

    /// Repairing the same individual twice gives identical edge matrices.
    #[test]
    fn test_repair_idempotent((problem, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ind = Individual::random(problem.num_cells(), problem.num_qubits(), &mut rng);

        match (repair(&problem, &ind), repair(&problem, &ind)) {
            (Some(a), Some(b)) => {
                prop_assert_eq!(&a.direct, &b.direct);
                prop_assert_eq!(&a.augmented, &b.augmented);
                // Every direct edge survives augmentation.
                for (i, j) in a.direct.upper_pairs() {
                    prop_assert!(a.augmented.get(i, j));
                }
            }
            (None, None) => prop_assert!(!problem.is_grid_connected(&ind)),
            _ => prop_assert!(false, "repair is not deterministic"),
        }
    }
}
