//! Core types: tiles, grid, directions, RNG, configuration.
//!
//! These are the data the move engine operates on. Nothing here knows about
//! scores or sessions.

pub mod tile;
pub mod grid;
pub mod direction;
pub mod rng;
pub mod config;

pub use tile::{Tile, TileId, TileIdAllocator};
pub use grid::{CellList, Coord, Grid, MAX_GRID_SIZE};
pub use direction::Direction;
pub use rng::{GameRng, GameRngState};
pub use config::SessionConfig;
