//! Error types for the Strata engine.

use thiserror::Error;

/// Top-level error type for world operations.
///
/// The engine performs no I/O; every failure is a configuration or
/// invariant problem surfaced at construction or lookup time.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Lookup of a chunk that was never generated
    #[error("Chunk {index} is not resident")]
    ChunkNotResident {
        /// Requested chunk index
        index: i64,
    },
}

/// Result type alias for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
