//! Connectivity repair of a placement.
//!
//! Given an individual, the physical coupling graph is rebuilt in two passes:
//!
//! 1. **Direct adjacency**: every coupled qubit pair whose cells are
//!    grid-adjacent gets an edge.
//! 2. **Path augmentation**: every coupled pair whose distance in the graph
//!    so far differs from its Manhattan distance (or has no path at all) gets
//!    every edge of a shortest path between its cells on the pruned grid.
//!
//! The pruned grid keeps only occupied cells, so each path node maps back
//! to a qubit. If the occupied cells are not grid-connected there is nothing
//! to repair.

use qtopo_core::{CouplingMatrix, GridCoordinate, GridShape, Graph};

use crate::individual::Individual;

/// The fixed inputs of one placement search.
#[derive(Debug, Clone)]
pub struct PlacementProblem {
    coupling: CouplingMatrix,
    shape: GridShape,
    coordinates: Vec<GridCoordinate>,
    grid_graph: Graph,
}

impl PlacementProblem {
    /// Build the problem for a coupling matrix on a grid.
    pub fn new(coupling: CouplingMatrix, shape: GridShape) -> Self {
        Self {
            coordinates: shape.standard_coordinates(),
            grid_graph: shape.grid_graph(),
            coupling,
            shape,
        }
    }

    /// The coupling matrix.
    pub fn coupling(&self) -> &CouplingMatrix {
        &self.coupling
    }

    /// The grid shape.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of qubits to place.
    pub fn num_qubits(&self) -> usize {
        self.coupling.num_qubits()
    }

    /// Number of grid cells.
    pub fn num_cells(&self) -> usize {
        self.coordinates.len()
    }

    /// Coordinate of grid index `k`.
    #[inline]
    pub fn coordinate(&self, k: usize) -> GridCoordinate {
        self.coordinates[k]
    }

    /// Coordinate of `qubit` under `individual`.
    #[inline]
    pub fn qubit_coordinate(&self, individual: &Individual, qubit: usize) -> GridCoordinate {
        self.coordinates[individual.cell(qubit)]
    }

    /// The complete grid graph pruned to the cells `individual` occupies.
    pub fn pruned_grid(&self, individual: &Individual) -> Graph {
        self.grid_graph.induced_subgraph(individual.genes())
    }

    /// Whether the occupied cells form a connected grid region.
    pub fn is_grid_connected(&self, individual: &Individual) -> bool {
        self.pruned_grid(individual).is_connected()
    }
}

/// Dense boolean adjacency matrix over qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMatrix {
    n: usize,
    bits: Vec<bool>,
}

impl EdgeMatrix {
    /// An empty matrix over `n` qubits.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            bits: vec![false; n * n],
        }
    }

    /// Set the symmetric entry `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize) {
        self.bits[i * self.n + j] = true;
        self.bits[j * self.n + i] = true;
    }

    /// Whether `(i, j)` is set.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.bits[i * self.n + j]
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Set entries `(i, j)` with `i < j`, ordered by `i` then `j`.
    pub fn upper_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n).flat_map(move |i| {
            ((i + 1)..self.n).filter_map(move |j| self.get(i, j).then_some((i, j)))
        })
    }

    /// Number of set pairs.
    pub fn count(&self) -> usize {
        self.upper_pairs().count()
    }
}

/// Outcome of repairing one individual.
#[derive(Debug, Clone)]
pub struct Repair {
    /// Edges from the direct-adjacency pass only.
    pub direct: EdgeMatrix,
    /// Direct edges plus path-augmentation edges.
    pub augmented: EdgeMatrix,
    /// The repaired coupling graph over qubit indices.
    pub graph: Graph,
}

impl Repair {
    /// Hop distance between two qubits in the repaired graph.
    pub fn distance(&self, a: usize, b: usize) -> Option<usize> {
        self.graph.distance(a, b)
    }
}

/// Repair `individual` into a physical coupling graph.
///
/// Returns `None` when the occupied cells are not grid-connected.
pub fn repair(problem: &PlacementProblem, individual: &Individual) -> Option<Repair> {
    let pruned = problem.pruned_grid(individual);
    if !pruned.is_connected() {
        return None;
    }
    Some(repair_on(problem, individual, &pruned))
}

/// Run both repair passes on an already pruned, connected grid.
pub(crate) fn repair_on(
    problem: &PlacementProblem,
    individual: &Individual,
    pruned: &Graph,
) -> Repair {
    let n = problem.num_qubits();
    let coupling = problem.coupling();

    // Cell -> qubit lookup for path nodes.
    let mut qubit_at = vec![usize::MAX; problem.num_cells()];
    for (q, &cell) in individual.genes().iter().enumerate() {
        qubit_at[cell] = q;
    }

    let mut graph = Graph::new(n);
    let mut direct = EdgeMatrix::new(n);

    for (i, j, _) in coupling.coupled_pairs() {
        let (ci, cj) = (
            problem.qubit_coordinate(individual, i),
            problem.qubit_coordinate(individual, j),
        );
        if ci.manhattan(&cj) == 1 {
            graph.add_edge(i, j);
            direct.set(i, j);
        }
    }

    let mut augmented = direct.clone();

    for (i, j, _) in coupling.coupled_pairs() {
        let manhattan = problem
            .qubit_coordinate(individual, i)
            .manhattan(&problem.qubit_coordinate(individual, j)) as usize;
        if graph.distance(i, j) == Some(manhattan) {
            continue;
        }
        let Some(path) = pruned.shortest_path(individual.cell(i), individual.cell(j)) else {
            continue;
        };
        for hop in path.windows(2) {
            let (a, b) = (qubit_at[hop[0]], qubit_at[hop[1]]);
            graph.add_edge(a, b);
            augmented.set(a, b);
        }
    }

    Repair {
        direct,
        augmented,
        graph,
    }
}
