//! Move engine, tile spawner and terminal detection.
//!
//! ## Example
//!
//! ```
//! use tile_merge::core::{Coord, Direction, Grid};
//! use tile_merge::engine::{resolve_merges, MoveEngine, TerminalDetector};
//!
//! let mut grid = Grid::from_values(&[
//!     vec![2, 0, 0, 2],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//! ]);
//!
//! let outcome = MoveEngine::apply(&mut grid, Direction::Left);
//! assert!(outcome.moved);
//! assert_eq!(outcome.score_delta, 4);
//!
//! resolve_merges(&mut grid, &outcome.merges);
//! assert_eq!(grid.get(Coord::new(0, 0)).map(|t| t.value), Some(4));
//! assert!(TerminalDetector::is_movable(&grid));
//! ```

mod moves;
mod spawner;
mod terminal;

pub use moves::{resolve_merges, MergeIntent, MoveEngine, MoveOutcome, TileMotion};
pub use spawner::TileSpawner;
pub use terminal::TerminalDetector;
