//! Search error types.

use thiserror::Error;

use qtopo_core::CoreError;

/// Errors that can occur while optimizing a placement.
///
/// Operator retry exhaustion is not an error: crossover and mutation fall
/// back to a weaker acceptance rule instead (see [`crate::operators`]).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Invalid input (qubit count, grid dimensions, coupling matrix).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid search configuration.
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    /// The best placement found does not form a connected grid region.
    #[error("No connected placement found (best fitness {fitness})")]
    Disconnected {
        /// Fitness of the best individual.
        fitness: f64,
    },
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
