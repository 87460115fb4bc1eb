//! Qubit coupling matrix derived from a decomposed circuit.
//!
//! `M[i][j]` counts the multi-qubit operations that act jointly on qubits
//! `i` and `j`. The matrix is symmetric with a zero diagonal and is never
//! mutated once built.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::Circuit;
use crate::error::{CoreError, CoreResult};

/// Symmetric, zero-diagonal qubit interaction weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct CouplingMatrix {
    num_qubits: usize,
    /// Row-major `num_qubits * num_qubits` weights.
    weights: Vec<u32>,
}

impl CouplingMatrix {
    /// Build the coupling matrix of a decomposed circuit.
    ///
    /// Every unordered operand pair of every multi-qubit gate gets its weight
    /// incremented once. Barriers and measurements are skipped.
    pub fn from_circuit(circuit: &Circuit) -> CoreResult<Self> {
        circuit.validate()?;

        let n = circuit.num_qubits();
        let mut matrix = Self::zeros(n);
        let mut coupling_ops = 0usize;

        for op in circuit.operations.iter().filter(|op| op.is_multi_qubit_gate()) {
            let qubits = op.distinct_qubits();
            for (a, &qa) in qubits.iter().enumerate() {
                for &qb in &qubits[a + 1..] {
                    matrix.increment(qa.index(), qb.index());
                }
            }
            coupling_ops += 1;
        }

        debug!(
            "Built coupling matrix for '{}': {} qubits, {} multi-qubit ops, {} coupled pairs",
            circuit.name,
            n,
            coupling_ops,
            matrix.coupled_pairs().count()
        );

        Ok(matrix)
    }

    /// Build a coupling matrix from explicit rows.
    ///
    /// The rows must form a square, symmetric matrix with a zero diagonal.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> CoreResult<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(CoreError::InvalidCouplingMatrix(format!(
                "row {i} has {} entries, expected {n}",
                row.len()
            )));
        }

        let weights: Vec<u32> = rows.into_iter().flatten().collect();
        let matrix = Self {
            num_qubits: n,
            weights,
        };

        for i in 0..n {
            if matrix.weight(i, i) != 0 {
                return Err(CoreError::InvalidCouplingMatrix(format!(
                    "diagonal entry ({i}, {i}) is non-zero"
                )));
            }
            for j in (i + 1)..n {
                if matrix.weight(i, j) != matrix.weight(j, i) {
                    return Err(CoreError::InvalidCouplingMatrix(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ"
                    )));
                }
            }
        }

        Ok(matrix)
    }

    /// An all-zero matrix over `n` qubits.
    pub fn zeros(n: usize) -> Self {
        Self {
            num_qubits: n,
            weights: vec![0; n * n],
        }
    }

    fn increment(&mut self, i: usize, j: usize) {
        let n = self.num_qubits;
        self.weights[i * n + j] += 1;
        self.weights[j * n + i] += 1;
    }

    /// Number of qubits (matrix dimension).
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Interaction weight between qubits `i` and `j`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> u32 {
        self.weights[i * self.num_qubits + j]
    }

    /// Whether qubits `i` and `j` interact at all.
    #[inline]
    pub fn is_coupled(&self, i: usize, j: usize) -> bool {
        self.weight(i, j) != 0
    }

    /// Coupled pairs `(i, j, weight)` with `i > j`, ordered by `i` then `j`.
    pub fn coupled_pairs(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        (0..self.num_qubits).flat_map(move |i| {
            (0..i).filter_map(move |j| {
                let w = self.weight(i, j);
                (w != 0).then_some((i, j, w))
            })
        })
    }

    /// Sum of weights over unordered pairs.
    pub fn total_weight(&self) -> u64 {
        self.coupled_pairs().map(|(_, _, w)| u64::from(w)).sum()
    }

    /// Number of coupled neighbours of qubit `i`.
    pub fn degree(&self, i: usize) -> usize {
        (0..self.num_qubits)
            .filter(|&j| self.is_coupled(i, j))
            .count()
    }

    /// The matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        if self.num_qubits == 0 {
            return vec![];
        }
        self.weights
            .chunks(self.num_qubits)
            .map(<[u32]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<u32>>> for CouplingMatrix {
    type Error = CoreError;

    fn try_from(rows: Vec<Vec<u32>>) -> CoreResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<CouplingMatrix> for Vec<Vec<u32>> {
    fn from(matrix: CouplingMatrix) -> Self {
        matrix.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Operation;
    use crate::qubit::QubitId;

    #[test]
    fn test_from_circuit_counts_pairs() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.gate2("cx", 0, 1).unwrap();
        circuit.gate2("cx", 1, 0).unwrap();
        circuit.gate2("cz", 2, 3).unwrap();
        circuit
            .push(Operation::new("h", [QubitId(2)]))
            .unwrap();

        let m = CouplingMatrix::from_circuit(&circuit).unwrap();
        assert_eq!(m.weight(0, 1), 2);
        assert_eq!(m.weight(1, 0), 2);
        assert_eq!(m.weight(2, 3), 1);
        assert_eq!(m.weight(0, 2), 0);
        assert_eq!(m.total_weight(), 3);
    }

    #[test]
    fn test_three_qubit_gate_couples_every_pair() {
        let mut circuit = Circuit::with_size("toffoli", 3);
        circuit
            .push(Operation::new("ccx", [QubitId(0), QubitId(1), QubitId(2)]))
            .unwrap();

        let m = CouplingMatrix::from_circuit(&circuit).unwrap();
        let pairs: Vec<_> = m.coupled_pairs().collect();
        assert_eq!(pairs, vec![(1, 0, 1), (2, 0, 1), (2, 1, 1)]);
    }

    #[test]
    fn test_barrier_and_measure_ignored() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .push(Operation::new("barrier", [QubitId(0), QubitId(1), QubitId(2)]))
            .unwrap();
        circuit
            .push(Operation::new("measure", [QubitId(0), QubitId(1)]))
            .unwrap();

        let m = CouplingMatrix::from_circuit(&circuit).unwrap();
        assert_eq!(m.total_weight(), 0);
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(CouplingMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).is_ok());
        assert!(matches!(
            CouplingMatrix::from_rows(vec![vec![0, 1], vec![2, 0]]),
            Err(CoreError::InvalidCouplingMatrix(_))
        ));
        assert!(matches!(
            CouplingMatrix::from_rows(vec![vec![1, 0], vec![0, 0]]),
            Err(CoreError::InvalidCouplingMatrix(_))
        ));
        assert!(matches!(
            CouplingMatrix::from_rows(vec![vec![0, 1, 0], vec![1, 0]]),
            Err(CoreError::InvalidCouplingMatrix(_))
        ));
    }

    #[test]
    fn test_serde_as_rows() {
        let m: CouplingMatrix = serde_json::from_str("[[0,3],[3,0]]").unwrap();
        assert_eq!(m.weight(0, 1), 3);
        assert_eq!(m.degree(0), 1);
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[0,3],[3,0]]");

        assert!(serde_json::from_str::<CouplingMatrix>("[[0,3],[1,0]]").is_err());
    }
}
