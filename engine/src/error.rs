//! Engine error type and result alias.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by model construction, stepping, and checkpointing.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid grid geometry.
    #[error("invalid grid: {0}")]
    Grid(String),

    /// An operation requires `Model::init` to have run first.
    #[error("model not initialized before `{0}`")]
    Uninitialized(&'static str),

    /// Swarm particles outside every material shape.
    #[error("material assignment failed: {count} particle(s) covered by no material shape")]
    Unassigned {
        /// Number of uncovered particles.
        count: usize,
    },

    /// Checkpoint file I/O failure.
    #[error("checkpoint write failed: {path}")]
    Checkpoint {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Checkpoint manifest (de)serialization failure.
    #[error("checkpoint manifest serialization failed")]
    Manifest(#[from] serde_json::Error),
}
