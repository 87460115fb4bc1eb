//! Error types for the core crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building placement inputs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Placement needs at least two qubits.
    #[error("Placement requires at least 2 qubits, got {found}")]
    InvalidQubitCount {
        /// Number of qubits in the input.
        found: usize,
    },

    /// The grid has fewer cells than there are qubits.
    #[error("Grid {rows}x{columns} is too small to place {required} qubits")]
    GridTooSmall {
        /// Number of grid rows.
        rows: u32,
        /// Number of grid columns.
        columns: u32,
        /// Number of qubits to place.
        required: usize,
    },

    /// A grid dimension was zero.
    #[error("Invalid grid dimensions: rows={rows:?}, columns={columns:?}")]
    InvalidGridDimension {
        /// Requested rows, if any.
        rows: Option<u32>,
        /// Requested columns, if any.
        columns: Option<u32>,
    },

    /// An operation references a qubit outside the circuit.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit circuit{}", format_operation_context(.operation))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits declared by the circuit.
        num_qubits: u32,
        /// Optional operation name for context.
        operation: Option<String>,
    },

    /// The coupling matrix is not square, symmetric, or has a non-zero diagonal.
    #[error("Invalid coupling matrix: {0}")]
    InvalidCouplingMatrix(String),
}

#[allow(clippy::ref_option)]
fn format_operation_context(operation: &Option<String>) -> String {
    match operation {
        Some(name) => format!(" (operation: {name})"),
        None => String::new(),
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
