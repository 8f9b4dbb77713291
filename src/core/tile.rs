//! Tiles and tile identity.
//!
//! Every tile placed on the grid gets a `TileId` from the session-owned
//! `TileIdAllocator`. Ids are stable across moves until the tile is consumed
//! by a merge, and are never reused within a session.
//!
//! ```
//! use tile_merge::core::{Tile, TileIdAllocator};
//!
//! let mut ids = TileIdAllocator::new();
//! let a = Tile::spawned(ids.allocate(), 2);
//! let b = Tile::spawned(ids.allocate(), 4);
//!
//! assert_ne!(a.id, b.id);
//! assert!(a.just_spawned);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a tile within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Monotonic tile id source.
///
/// Owned by the session and reset on every new game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileIdAllocator {
    next: u32,
}

impl TileIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator that hands out `next` first.
    #[must_use]
    pub const fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `allocate` will return.
    #[must_use]
    pub const fn peek(&self) -> TileId {
        TileId(self.next)
    }

    /// Start over from id 0.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// A numbered game piece occupying one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identity until consumed by a merge.
    pub id: TileId,

    /// Face value. Always a power of two, at least 2.
    pub value: u32,

    /// Placed by the spawner since the last move.
    pub just_spawned: bool,

    /// Produced by a merge since the last move.
    pub just_merged: bool,
}

impl Tile {
    /// Create a settled tile (no transient flags).
    #[must_use]
    pub fn new(id: TileId, value: u32) -> Self {
        debug_assert!(is_tile_value(value), "tile value {value} is not a power of two >= 2");
        Self {
            id,
            value,
            just_spawned: false,
            just_merged: false,
        }
    }

    /// Create a freshly spawned tile.
    #[must_use]
    pub fn spawned(id: TileId, value: u32) -> Self {
        Self {
            just_spawned: true,
            ..Self::new(id, value)
        }
    }

    /// Clear `just_spawned` and `just_merged`.
    pub fn clear_flags(&mut self) {
        self.just_spawned = false;
        self.just_merged = false;
    }

    /// Absorb another tile's value.
    pub fn absorb(&mut self, value: u32) {
        self.value += value;
        self.just_merged = true;
        debug_assert!(
            is_tile_value(self.value),
            "merged value {} is not a power of two",
            self.value
        );
    }
}

/// Check a raw value is a legal tile value.
#[must_use]
pub const fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}
