//! Random tile placement after a successful move.

use crate::core::{Coord, GameRng, Grid, Tile, TileIdAllocator};

/// Places new tiles on empty cells.
#[derive(Clone, Copy, Debug)]
pub struct TileSpawner {
    four_probability: f64,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl TileSpawner {
    /// Create a spawner that produces a 4 with `four_probability`, else a 2.
    #[must_use]
    pub fn new(four_probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&four_probability),
            "four_probability must be in [0, 1]"
        );
        Self { four_probability }
    }

    /// Chance of a 4.
    #[must_use]
    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }

    /// Put a new tile on a uniformly chosen empty cell.
    ///
    /// Returns `None` and leaves the grid untouched when it is full.
    pub fn spawn(
        &self,
        grid: &mut Grid,
        rng: &mut GameRng,
        ids: &mut TileIdAllocator,
    ) -> Option<(Coord, Tile)> {
        let empty = grid.empty_cells();
        let at = *rng.choose(&empty)?;

        let value = if rng.gen_bool(self.four_probability) { 4 } else { 2 };
        let tile = Tile::spawned(ids.allocate(), value);
        grid.set(at, Some(tile));

        tracing::trace!(%at, value, id = %tile.id, "spawned tile");
        Some((at, tile))
    }
}
