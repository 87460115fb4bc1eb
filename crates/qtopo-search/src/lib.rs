//! qtopo placement search
//!
//! Maps a circuit's qubit-interaction graph onto a rectangular grid of
//! physical qubit sites and repairs the result into a connected coupling
//! graph.
//!
//! # Overview
//!
//! ```text
//! CouplingMatrix ──► GaEngine ──────────────────────────► best Individual
//!                    │ initialize_population                 │
//!                    │ FitnessEvaluator (repair + cost)      ▼
//!                    │ tournament_select ×2             repair()
//!                    │ crossover (PBX) + TabuList            │
//!                    │ mutate (swap / vacancy exchange)      ▼
//!                    └ per-slot replacement           TopologyLayout
//! ```
//!
//! An [`Individual`] assigns every qubit a distinct grid cell. Its fitness
//! is the coupling-weighted hop distance between coupled qubits that are
//! not adjacent in the repaired coupling graph, or [`FITNESS_SENTINEL`] if
//! the occupied cells are not grid-connected.
//!
//! # Example
//!
//! ```rust
//! use qtopo_core::CouplingMatrix;
//! use qtopo_search::{GaConfig, optimize_topology};
//!
//! // A 4-qubit chain fits a 2x2 grid with every hop adjacent.
//! let chain = CouplingMatrix::from_rows(vec![
//!     vec![0, 1, 0, 0],
//!     vec![1, 0, 1, 0],
//!     vec![0, 1, 0, 1],
//!     vec![0, 0, 1, 0],
//! ])
//! .unwrap();
//!
//! let config = GaConfig::default().with_generations(30).with_seed(42);
//! let placement = optimize_topology(&chain, Some(2), Some(2), &config).unwrap();
//!
//! assert_eq!(placement.fitness, 0.0);
//! assert_eq!(placement.layout.positions.len(), 4);
//! assert_eq!(placement.layout.edges.len(), 3);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod individual;
pub mod operators;
pub mod output;
pub mod repair;
pub mod tabu;

pub use config::{FITNESS_SENTINEL, GaConfig};
pub use engine::{GaEngine, GenerationRecord, SearchOutcome};
pub use error::{SearchError, SearchResult};
pub use fitness::FitnessEvaluator;
pub use individual::{Individual, initialize_population};
pub use output::TopologyLayout;
pub use repair::{EdgeMatrix, PlacementProblem, Repair, repair};
pub use tabu::{TabuEntry, TabuList};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use qtopo_core::{Circuit, CoreError, CouplingMatrix, GridShape};

/// A finished placement.
#[derive(Debug, Clone)]
pub struct Placement {
    /// Named positions and edges for topology generation.
    pub layout: TopologyLayout,
    /// The winning individual.
    pub best: Individual,
    /// Its fitness.
    pub fitness: f64,
    /// Direct-adjacency and augmented edge matrices of the final repair.
    pub repair: Repair,
    /// Per-generation convergence records.
    pub history: Vec<GenerationRecord>,
}

/// Place a coupling matrix on a grid.
///
/// `rows` and `columns` follow [`GridShape::resolve`]. Fewer than two qubits
/// is a precondition failure and yields [`CoreError::InvalidQubitCount`]
/// without running the search.
pub fn optimize_topology(
    coupling: &CouplingMatrix,
    rows: Option<u32>,
    columns: Option<u32>,
    config: &GaConfig,
) -> SearchResult<Placement> {
    optimize_topology_with_observer(coupling, rows, columns, config, |_| {})
}

/// [`optimize_topology`], reporting every generation to `observer`.
pub fn optimize_topology_with_observer<F>(
    coupling: &CouplingMatrix,
    rows: Option<u32>,
    columns: Option<u32>,
    config: &GaConfig,
    observer: F,
) -> SearchResult<Placement>
where
    F: FnMut(&GenerationRecord),
{
    let n = coupling.num_qubits();
    if n < 2 {
        warn!("Refusing to place {} qubit(s): at least 2 are required", n);
        return Err(CoreError::InvalidQubitCount { found: n }.into());
    }
    config.validate()?;

    let shape = GridShape::resolve(n, rows, columns)?;
    let problem = PlacementProblem::new(coupling.clone(), shape);

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let outcome =
        GaEngine::new(&problem, config.clone())?.run_with_observer(&mut rng, observer);

    let repair = repair(&problem, &outcome.best).ok_or(SearchError::Disconnected {
        fitness: outcome.best_fitness,
    })?;
    let layout = TopologyLayout::from_repair(&problem, &outcome.best, &repair);

    info!(
        "Placed {} qubits on {} grid: fitness {}, {} couplers ({} direct)",
        n,
        shape,
        outcome.best_fitness,
        repair.augmented.count(),
        repair.direct.count()
    );

    Ok(Placement {
        layout,
        best: outcome.best,
        fitness: outcome.best_fitness,
        repair,
        history: outcome.history,
    })
}

/// Build the coupling matrix of a decomposed circuit and place it.
pub fn place_circuit(
    circuit: &Circuit,
    rows: Option<u32>,
    columns: Option<u32>,
    config: &GaConfig,
) -> SearchResult<Placement> {
    let coupling = CouplingMatrix::from_circuit(circuit)?;
    optimize_topology(&coupling, rows, columns, config)
}
