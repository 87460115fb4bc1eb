//! qtopo core types
//!
//! Inputs and geometric primitives for grid topology placement:
//!
//! - [`Circuit`] / [`Operation`]: the decomposed circuit handed over by the
//!   circuit decomposer
//! - [`CouplingMatrix`]: symmetric pairwise interaction counts between qubits
//! - [`GridShape`] / [`GridCoordinate`]: the rectangular site grid and its
//!   row-major standard coordinate list
//! - [`Graph`]: a small undirected graph with BFS shortest paths and induced
//!   subgraphs, used for both the grid graph and the repaired coupling graph
//!
//! # Example
//!
//! ```rust
//! use qtopo_core::{Circuit, CouplingMatrix, GridShape};
//!
//! let mut circuit = Circuit::with_size("chain", 4);
//! circuit.gate2("cx", 0, 1).unwrap();
//! circuit.gate2("cx", 1, 2).unwrap();
//! circuit.gate2("cx", 2, 3).unwrap();
//!
//! let matrix = CouplingMatrix::from_circuit(&circuit).unwrap();
//! assert_eq!(matrix.weight(1, 2), 1);
//!
//! let grid = GridShape::resolve(matrix.num_qubits(), None, None).unwrap();
//! assert_eq!((grid.rows, grid.columns), (2, 2));
//! ```

pub mod circuit;
pub mod coupling;
pub mod error;
pub mod graph;
pub mod grid;
pub mod qubit;

pub use circuit::{Circuit, Operation, OperationKind};
pub use coupling::CouplingMatrix;
pub use error::{CoreError, CoreResult};
pub use graph::Graph;
pub use grid::{GridCoordinate, GridShape};
pub use qubit::QubitId;
