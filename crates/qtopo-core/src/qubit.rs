//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a logical qubit in the circuit being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a `usize`, for matrix and vector indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The external name of this qubit (`q{i}`).
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}
