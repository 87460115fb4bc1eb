//! Decomposed circuit model consumed by the coupling matrix builder.
//!
//! The circuit decomposer upstream expands composite gates into elementary
//! operations. Only the operand lists matter for placement, so an
//! [`Operation`] carries a name, a coarse [`OperationKind`] and its qubits.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::qubit::QubitId;

/// The kind of a decomposed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// A unitary gate.
    #[default]
    Gate,
    /// Measurement.
    Measure,
    /// Barrier (synchronization point).
    Barrier,
    /// Reset to |0⟩.
    Reset,
}

impl OperationKind {
    /// Infer the kind from a lower-case operation name.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "measure" => OperationKind::Measure,
            "barrier" => OperationKind::Barrier,
            "reset" => OperationKind::Reset,
            _ => OperationKind::Gate,
        }
    }
}

/// A single decomposed operation with its operand qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name (`cx`, `cz`, `ccx`, `measure`, ...).
    pub name: String,
    /// Operation kind. Inferred from the name when omitted in serialized input.
    #[serde(default)]
    pub kind: OperationKind,
    /// Qubits the operation acts on.
    pub qubits: Vec<QubitId>,
}

impl Operation {
    /// Create an operation, inferring its kind from the name.
    pub fn new(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let name = name.into();
        Self {
            kind: OperationKind::from_name(&name),
            name,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Whether this operation contributes to qubit coupling.
    ///
    /// Barriers, measurements and resets never couple qubits, even when they
    /// span several of them.
    pub fn is_multi_qubit_gate(&self) -> bool {
        self.kind == OperationKind::Gate
            && OperationKind::from_name(&self.name) == OperationKind::Gate
            && self.distinct_qubits().len() >= 2
    }

    /// Operand qubits with duplicates removed, preserving first occurrence.
    pub fn distinct_qubits(&self) -> Vec<QubitId> {
        let mut seen = Vec::with_capacity(self.qubits.len());
        for &q in &self.qubits {
            if !seen.contains(&q) {
                seen.push(q);
            }
        }
        seen
    }
}

/// A decomposed circuit: a qubit count and a flat list of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Circuit name.
    #[serde(default)]
    pub name: String,
    /// Number of qubits in the circuit.
    pub num_qubits: u32,
    /// Operations in program order.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit with the given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            operations: vec![],
        }
    }

    /// Append an operation, checking that every operand is in range.
    pub fn push(&mut self, operation: Operation) -> CoreResult<&mut Self> {
        self.check_operation(&operation)?;
        self.operations.push(operation);
        Ok(self)
    }

    /// Append a two-qubit gate.
    pub fn gate2(&mut self, name: &str, q0: u32, q1: u32) -> CoreResult<&mut Self> {
        self.push(Operation::new(name, [QubitId(q0), QubitId(q1)]))
    }

    /// Number of qubits in the circuit.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Verify that every operand of every operation is in range.
    pub fn validate(&self) -> CoreResult<()> {
        self.operations
            .iter()
            .try_for_each(|op| self.check_operation(op))
    }

    fn check_operation(&self, operation: &Operation) -> CoreResult<()> {
        match operation.qubits.iter().find(|q| q.0 >= self.num_qubits) {
            Some(&qubit) => Err(CoreError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                operation: Some(operation.name.clone()),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inference() {
        assert_eq!(OperationKind::from_name("cx"), OperationKind::Gate);
        assert_eq!(OperationKind::from_name("MEASURE"), OperationKind::Measure);
        assert_eq!(OperationKind::from_name("barrier"), OperationKind::Barrier);
    }

    #[test]
    fn test_multi_qubit_filter() {
        let cx = Operation::new("cx", [QubitId(0), QubitId(1)]);
        let h = Operation::new("h", [QubitId(0)]);
        let barrier = Operation::new("barrier", [QubitId(0), QubitId(1), QubitId(2)]);
        let degenerate = Operation::new("cz", [QubitId(2), QubitId(2)]);

        assert!(cx.is_multi_qubit_gate());
        assert!(!h.is_multi_qubit_gate());
        assert!(!barrier.is_multi_qubit_gate());
        assert!(!degenerate.is_multi_qubit_gate());
    }

    #[test]
    fn test_push_out_of_range() {
        let mut circuit = Circuit::with_size("test", 2);
        assert!(circuit.gate2("cx", 0, 1).is_ok());
        let err = circuit.gate2("cx", 0, 2).unwrap_err();
        assert!(matches!(err, CoreError::QubitOutOfRange { num_qubits: 2, .. }));
        assert_eq!(circuit.operations.len(), 1);
    }

    #[test]
    fn test_deserialize_without_kind() {
        let json = r#"{
            "num_qubits": 3,
            "operations": [
                { "name": "ccx", "qubits": [0, 1, 2] },
                { "name": "measure", "kind": "measure", "qubits": [0] }
            ]
        }"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.operations[0].is_multi_qubit_gate());
        assert_eq!(circuit.operations[1].kind, OperationKind::Measure);
        assert!(circuit.validate().is_ok());
    }
}
