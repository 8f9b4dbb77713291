//! Game-over detection.

use smallvec::SmallVec;

use crate::core::{Coord, Direction, Grid};

use super::moves::MoveEngine;

/// Decides whether any move remains.
pub struct TerminalDetector;

impl TerminalDetector {
    /// True if a cell is empty or two neighbouring tiles share a value.
    ///
    /// Only the neighbour below and the neighbour to the right are checked;
    /// adjacency is symmetric so that covers every pair.
    #[must_use]
    pub fn is_movable(grid: &Grid) -> bool {
        let size = grid.size();
        grid.coords().any(|coord| {
            let Some(tile) = grid.get(coord) else {
                return true;
            };
            let equal_at =
                |neighbour: Coord| grid.get(neighbour).is_some_and(|n| n.value == tile.value);

            (coord.row + 1 < size && equal_at(Coord::new(coord.row + 1, coord.col)))
                || (coord.col + 1 < size && equal_at(Coord::new(coord.row, coord.col + 1)))
        })
    }

    /// Inverse of [`TerminalDetector::is_movable`].
    #[must_use]
    pub fn is_terminal(grid: &Grid) -> bool {
        !Self::is_movable(grid)
    }

    /// Directions that would move at least one tile.
    #[must_use]
    pub fn available_moves(grid: &Grid) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| MoveEngine::plan(grid, direction).moved)
            .collect()
    }
}
