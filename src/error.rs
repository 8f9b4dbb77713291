//! Error types.
//!
//! Gameplay itself has no recoverable errors; these cover the edges where the
//! engine meets files, parsers and serialized state.

use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors from a best-score store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("best score store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed best score record in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors capturing or restoring a session snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot snapshot while a move is settling")]
    MoveInFlight,

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// A decoded grid whose shape cannot be indexed safely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridShapeError {
    #[error("grid size {0} outside 1..={}", crate::core::MAX_GRID_SIZE)]
    Size(usize),

    #[error("{size}x{size} grid holds {cells} cells")]
    CellCount { size: usize, cells: usize },
}

/// A direction name that matches none of up/down/left/right.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized direction: {0}")]
pub struct ParseDirectionError(pub String);
