//! The N×N board.
//!
//! ## Layout
//!
//! Cells are stored row-major in an `im::Vector`, so cloning a grid for a
//! planning snapshot is O(1). Coordinates are `(row, col)` with both in
//! `[0, size)`. Accessors panic on out-of-range coordinates; callers build
//! coordinates from the grid itself, so a bad one is a bug.
//!
//! ```
//! use tile_merge::core::{Coord, Grid};
//!
//! let grid = Grid::from_values(&[
//!     vec![2, 0],
//!     vec![0, 4],
//! ]);
//!
//! assert_eq!(grid.get(Coord::new(0, 0)).map(|t| t.value), Some(2));
//! assert_eq!(grid.empty_cells().len(), 2);
//! ```

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::direction::Direction;
use super::tile::{Tile, TileId};
use crate::error::GridShapeError;

/// Largest supported side length.
pub const MAX_GRID_SIZE: usize = 16;

/// A cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `direction`, or `None` past the edge.
    #[must_use]
    pub fn step(self, direction: Direction, size: usize) -> Option<Coord> {
        let (d_col, d_row) = direction.offset();
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Coord { row, col })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Empty-cell list; inline for boards up to 4×4.
pub type CellList = SmallVec<[Coord; 16]>;

/// Fixed-size square board of optional tiles.
///
/// Deserialization checks the side length and cell count, so a decoded grid
/// is always safe to index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vector<Option<Tile>>,
}

/// Wire form of a `Grid` before shape checks.
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vector<Option<Tile>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridShapeError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if !(1..=MAX_GRID_SIZE).contains(&raw.size) {
            return Err(GridShapeError::Size(raw.size));
        }
        if raw.cells.len() != raw.size * raw.size {
            return Err(GridShapeError::CellCount {
                size: raw.size,
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create an empty `size`×`size` grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Grid must have at least one cell");
        assert!(size <= MAX_GRID_SIZE, "At most {MAX_GRID_SIZE}x{MAX_GRID_SIZE} grids supported");

        Self {
            size,
            cells: std::iter::repeat(None).take(size * size).collect(),
        }
    }

    /// Build a grid from a square matrix of values; 0 means empty.
    ///
    /// Tiles get ids 0, 1, 2, ... in row-major order. Returns the grid only;
    /// use [`Grid::next_free_id`] to continue allocating past them.
    #[must_use]
    pub fn from_values(rows: &[Vec<u32>]) -> Self {
        let size = rows.len();
        let mut grid = Self::new(size);
        let mut next_id = 0;

        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values.len(), size, "row {row} has {} cells, expected {size}", values.len());
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    grid.set(Coord::new(row, col), Some(Tile::new(TileId(next_id), value)));
                    next_id += 1;
                }
            }
        }

        grid
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check a coordinate lies on the board.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index(&self, coord: Coord) -> usize {
        assert!(self.contains(coord), "coordinate {coord} outside {0}x{0} grid", self.size);
        coord.row * self.size + coord.col
    }

    /// Tile at `coord`, if any.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.cells[self.index(coord)].as_ref()
    }

    /// Mutable tile at `coord`, if any.
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        let index = self.index(coord);
        self.cells[index].as_mut()
    }

    /// Place or clear a cell.
    pub fn set(&mut self, coord: Coord, tile: Option<Tile>) {
        let index = self.index(coord);
        self.cells[index] = tile;
    }

    /// Remove and return the tile at `coord`.
    pub fn take(&mut self, coord: Coord) -> Option<Tile> {
        let index = self.index(coord);
        self.cells[index].take()
    }

    /// Check whether `coord` holds no tile.
    #[must_use]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord).is_none()
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Visit every cell in row-major order.
    pub fn for_each_cell<F>(&self, mut f: F)
    where
        F: FnMut(Coord, Option<&Tile>),
    {
        for (index, cell) in self.cells.iter().enumerate() {
            f(Coord::new(index / self.size, index % self.size), cell.as_ref());
        }
    }

    /// Visit every tile mutably in row-major order.
    pub fn for_each_tile_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Coord, &mut Tile),
    {
        let size = self.size;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if let Some(tile) = cell {
                f(Coord::new(index / size, index % size), tile);
            }
        }
    }

    /// Occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.as_ref()
                .map(|tile| (Coord::new(index / size, index % size), tile))
        })
    }

    /// Empty coordinates in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> CellList {
        let mut empty = CellList::new();
        self.for_each_cell(|coord, cell| {
            if cell.is_none() {
                empty.push(coord);
            }
        });
        empty
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|(_, tile)| u64::from(tile.value)).sum()
    }

    /// Highest tile value, 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles().map(|(_, tile)| tile.value).max().unwrap_or(0)
    }

    /// Row-major value matrix; 0 for empty cells.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<u32>> {
        let mut rows = vec![vec![0; self.size]; self.size];
        for (coord, tile) in self.tiles() {
            rows[coord.row][coord.col] = tile.value;
        }
        rows
    }

    /// One past the highest tile id on the board.
    #[must_use]
    pub fn next_free_id(&self) -> u32 {
        self.tiles().map(|(_, tile)| tile.id.0 + 1).max().unwrap_or(0)
    }

    /// Check no tile id appears twice.
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.tiles().all(|(_, tile)| seen.insert(tile.id))
    }

    /// Clear `just_spawned` and `just_merged` on every tile.
    pub fn clear_flags(&mut self) {
        self.for_each_tile_mut(|_, tile| tile.clear_flags());
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values() {
            let line: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { format!("{:>5}", ".") } else { format!("{v:>5}") })
                .collect();
            writeln!(f, "{}", line.join(""))?;
        }
        Ok(())
    }
}
