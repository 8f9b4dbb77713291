//! The sliding/merging move engine.
//!
//! A move runs in three phases:
//!
//! 1. **Plan**: a read-only pass over the grid computes every relocation and
//!    every merge intent. Tiles nearest the target edge are visited first so
//!    a tile never slides past one that has yet to move.
//! 2. **Commit**: the planned relocations are applied to a fresh grid, which
//!    replaces the old one in a single assignment. Merge survivors keep their
//!    pre-merge value at this point.
//! 3. **Resolve**: `resolve_merges` folds each consumed tile into its
//!    survivor. The session runs this right before the next spawn.
//!
//! A tile that already carries a merge intent blocks further merges into its
//! cell for the rest of the pass, so no tile merges twice in one move.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, Direction, Grid, TileId};

/// One tile changing cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMotion {
    pub tile: TileId,
    pub from: Coord,
    pub to: Coord,
}

/// A pending merge produced by the plan phase.
///
/// `survivor` is the tile that slid into `at`; `consumed` is the tile that
/// was sitting there. Both had face value `value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeIntent {
    pub survivor: TileId,
    pub consumed: TileId,
    pub at: Coord,
    pub value: u32,
}

impl MergeIntent {
    /// Value of the tile once the merge resolves.
    #[must_use]
    pub fn merged_value(&self) -> u32 {
        self.value * 2
    }
}

/// Result of planning (and possibly committing) a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub direction: Direction,

    /// Whether any tile changed cells.
    pub moved: bool,

    /// Points earned: the sum of both values of every merge.
    pub score_delta: u64,

    /// Relocations in processing order.
    pub motions: Vec<TileMotion>,

    /// Merge intents in processing order.
    pub merges: Vec<MergeIntent>,
}

impl MoveOutcome {
    fn unmoved(direction: Direction) -> Self {
        Self {
            direction,
            moved: false,
            score_delta: 0,
            motions: Vec::new(),
            merges: Vec::new(),
        }
    }
}

/// Scratch occupancy used while planning.
#[derive(Clone, Copy)]
struct Slot {
    id: TileId,
    value: u32,
    merge_locked: bool,
}

/// Stateless move engine.
pub struct MoveEngine;

impl MoveEngine {
    /// Cells in the order tiles are processed for `direction`.
    ///
    /// Rows and columns run in natural order, except columns are reversed for
    /// `Right` and rows for `Down`, so the scan starts at the edge tiles are
    /// sliding toward.
    #[must_use]
    pub fn traversal(size: usize, direction: Direction) -> SmallVec<[Coord; 16]> {
        let mut order = SmallVec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                let row = if direction == Direction::Down { size - i - 1 } else { i };
                let col = if direction == Direction::Right { size - j - 1 } else { j };
                order.push(Coord::new(row, col));
            }
        }
        order
    }

    /// Compute a move without touching the grid.
    #[must_use]
    pub fn plan(grid: &Grid, direction: Direction) -> MoveOutcome {
        let size = grid.size();
        let index = |c: Coord| c.row * size + c.col;

        let mut scratch: Vec<Option<Slot>> = vec![None; grid.cell_count()];
        for (coord, tile) in grid.tiles() {
            scratch[index(coord)] = Some(Slot {
                id: tile.id,
                value: tile.value,
                merge_locked: false,
            });
        }

        let mut outcome = MoveOutcome::unmoved(direction);

        for origin in Self::traversal(size, direction) {
            let Some(slot) = scratch[index(origin)] else {
                continue;
            };

            let mut last_free = origin;
            let mut blocker = None;
            while let Some(next) = last_free.step(direction, size) {
                if let Some(other) = scratch[index(next)] {
                    blocker = Some((next, other));
                    break;
                }
                last_free = next;
            }

            match blocker {
                Some((at, other)) if !other.merge_locked && other.value == slot.value => {
                    scratch[index(origin)] = None;
                    scratch[index(at)] = Some(Slot {
                        merge_locked: true,
                        ..slot
                    });
                    outcome.motions.push(TileMotion {
                        tile: slot.id,
                        from: origin,
                        to: at,
                    });
                    outcome.merges.push(MergeIntent {
                        survivor: slot.id,
                        consumed: other.id,
                        at,
                        value: slot.value,
                    });
                    outcome.score_delta += u64::from(slot.value) + u64::from(other.value);
                }
                _ if last_free != origin => {
                    scratch[index(origin)] = None;
                    scratch[index(last_free)] = Some(slot);
                    outcome.motions.push(TileMotion {
                        tile: slot.id,
                        from: origin,
                        to: last_free,
                    });
                }
                _ => {}
            }
        }

        outcome.moved = !outcome.motions.is_empty();
        outcome
    }

    /// Build the post-move grid from `grid` and a plan for it.
    ///
    /// Every tile comes out with its transient flags cleared. Consumed tiles
    /// are dropped; survivors sit in the merge cell with their old value.
    #[must_use]
    pub fn commit(grid: &Grid, outcome: &MoveOutcome) -> Grid {
        let destinations: FxHashMap<TileId, Coord> =
            outcome.motions.iter().map(|m| (m.tile, m.to)).collect();
        let consumed: FxHashSet<TileId> = outcome.merges.iter().map(|m| m.consumed).collect();

        let mut next = Grid::new(grid.size());
        for (coord, tile) in grid.tiles() {
            if consumed.contains(&tile.id) {
                continue;
            }
            let to = destinations.get(&tile.id).copied().unwrap_or(coord);
            debug_assert!(next.is_empty_at(to), "two tiles planned into {to}");

            let mut tile = *tile;
            tile.clear_flags();
            next.set(to, Some(tile));
        }
        next
    }

    /// Plan and commit a move in place.
    ///
    /// Flags are reset even when nothing moves. Merges are left pending; call
    /// [`resolve_merges`] with `outcome.merges` to finish them.
    pub fn apply(grid: &mut Grid, direction: Direction) -> MoveOutcome {
        let outcome = Self::plan(grid, direction);
        if outcome.moved {
            *grid = Self::commit(grid, &outcome);
        } else {
            grid.clear_flags();
        }

        tracing::debug!(
            %direction,
            moved = outcome.moved,
            merges = outcome.merges.len(),
            score_delta = outcome.score_delta,
            "applied move"
        );
        outcome
    }
}

/// Fold every consumed tile into its survivor.
///
/// Survivors gain the consumed value and are flagged `just_merged`. Intents
/// whose survivor is no longer at `at` are skipped.
pub fn resolve_merges(grid: &mut Grid, merges: &[MergeIntent]) {
    for intent in merges {
        match grid.get_mut(intent.at) {
            Some(tile) if tile.id == intent.survivor => tile.absorb(intent.value),
            _ => tracing::warn!(
                survivor = %intent.survivor,
                at = %intent.at,
                "stale merge intent skipped"
            ),
        }
    }
}
