//! Tenure-bounded tabu list of recently claimed individuals.

use std::collections::VecDeque;

use crate::individual::Individual;

/// A tabu entry: an individual and the generations it stays forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuEntry {
    /// The forbidden individual.
    pub individual: Individual,
    /// Remaining tenure in generations.
    pub tenure: usize,
}

/// Individuals that crossover and mutation must not produce again.
///
/// Entries are pushed with a fixed tenure and aged once per generation by
/// [`tick`](Self::tick). At most one expired entry is evicted per tick, so
/// an entry can outlive its tenure when several expire together.
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    entries: VecDeque<TabuEntry>,
    tenure: usize,
}

impl TabuList {
    /// Create an empty list whose entries start with `tenure`.
    pub fn new(tenure: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            tenure,
        }
    }

    /// Tabu list for an `n`-qubit problem: tenure `n * (n - 1) / 2`.
    pub fn for_qubits(n: usize) -> Self {
        Self::new(n * n.saturating_sub(1) / 2)
    }

    /// Initial tenure of new entries.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Forbid `individual` for the configured tenure.
    pub fn push(&mut self, individual: Individual) {
        self.entries.push_back(TabuEntry {
            individual,
            tenure: self.tenure,
        });
    }

    /// Age every entry by one generation and evict the first expired one.
    ///
    /// Returns the evicted entry, if any.
    pub fn tick(&mut self) -> Option<TabuEntry> {
        for entry in &mut self.entries {
            entry.tenure = entry.tenure.saturating_sub(1);
        }
        let expired = self.entries.iter().position(|e| e.tenure == 0)?;
        self.entries.remove(expired)
    }

    /// Whether `individual` is currently forbidden, regardless of tenure.
    pub fn contains(&self, individual: &Individual) -> bool {
        self.entries.iter().any(|e| &e.individual == individual)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TabuEntry> {
        self.entries.iter()
    }
}
