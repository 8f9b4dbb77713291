//! # tile-merge
//!
//! Move engine and session orchestration for 2048-style sliding-tile puzzles.
//!
//! ## Design Principles
//!
//! 1. **Plan, then commit**: A move is computed as a list of relocations and
//!    merge intents over a read-only grid, then applied to a fresh grid in
//!    one step.
//!
//! 2. **Two-phase merges**: Merge intents are resolved separately, right
//!    before the next spawn, so no tile merges twice in a move.
//!
//! 3. **Session-owned state**: Tile ids, RNG and score live in the
//!    `GameSession`; there are no globals.
//!
//! ## Modules
//!
//! - `core`: Tiles, grid, directions, RNG, configuration
//! - `engine`: Move engine, tile spawner, terminal detection
//! - `session`: Game orchestration, input mapping, score events, snapshots
//! - `store`: Best-score persistence
//! - `error`: Error types

pub mod core;
pub mod engine;
pub mod error;
pub mod session;
pub mod store;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Coord, Direction, GameRng, GameRngState, Grid, SessionConfig, Tile, TileId, TileIdAllocator,
};

pub use crate::engine::{
    resolve_merges, MergeIntent, MoveEngine, MoveOutcome, TerminalDetector, TileMotion, TileSpawner,
};

pub use crate::session::{
    GameSession, InputEvent, MoveStatus, ScoreEvent, ScoreEvents, SessionSnapshot, SettleReport,
};

pub use crate::store::{BestScoreStore, JsonFileStore, MemoryStore};

pub use crate::error::{
    ConfigError, GridShapeError, ParseDirectionError, SnapshotError, StoreError,
};
