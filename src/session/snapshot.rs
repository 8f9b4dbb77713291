//! Serializable session checkpoints.

use serde::{Deserialize, Serialize};

use super::events::ScoreEvents;
use crate::core::{GameRngState, Grid, SessionConfig, TileIdAllocator};
use crate::error::SnapshotError;

/// Everything needed to resume a settled session exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: SessionConfig,
    pub grid: Grid,
    pub score: u64,
    pub best_score: u64,
    pub active: bool,
    pub moves_made: u64,
    pub ids: TileIdAllocator,
    pub rng: GameRngState,
    pub events: ScoreEvents,
}

impl SessionSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a bincode snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: SessionSnapshot = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.config
            .validate()
            .map_err(|e| SnapshotError::Invalid(e.to_string()))?;

        if self.grid.size() != self.config.size {
            return Err(SnapshotError::Invalid(format!(
                "grid is {0}x{0} but config says {1}x{1}",
                self.grid.size(),
                self.config.size
            )));
        }
        if !self.grid.has_unique_ids() {
            return Err(SnapshotError::Invalid("duplicate tile ids".into()));
        }
        if self.ids.peek().raw() < self.grid.next_free_id() {
            return Err(SnapshotError::Invalid(format!(
                "id allocator at {} would reuse ids up to {}",
                self.ids.peek().raw(),
                self.grid.next_free_id()
            )));
        }
        if self.grid.tiles().any(|(_, tile)| !crate::core::tile::is_tile_value(tile.value)) {
            return Err(SnapshotError::Invalid("tile value is not a power of two".into()));
        }
        Ok(())
    }
}
