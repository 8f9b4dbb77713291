//! Game session orchestration.
//!
//! A `GameSession` owns the grid, score, best score, tile-id allocator, RNG
//! and the pending score events. One move is processed at a time:
//!
//! 1. `move_tiles` plans and commits the slide, books the score and marks the
//!    move in flight. Further moves are dropped until it settles.
//! 2. After the configured delay, `poll` (or an explicit `settle`) resolves
//!    pending merges, spawns a tile and checks for game over.
//!
//! With a zero settle delay both steps happen inside `move_tiles`.
//!
//! ```
//! use tile_merge::core::{Direction, SessionConfig};
//! use tile_merge::session::{GameSession, MoveStatus};
//! use tile_merge::store::MemoryStore;
//!
//! let config = SessionConfig::new().with_seed(7).with_settle_delay(std::time::Duration::ZERO);
//! let mut session = GameSession::new(config, MemoryStore::new()).unwrap();
//! assert_eq!(session.grid().tile_count(), 2);
//!
//! let status = session.move_tiles(Direction::Left);
//! assert!(matches!(status, MoveStatus::Moved { .. } | MoveStatus::Blocked));
//! assert!(!session.is_busy());
//! ```

mod events;
mod input;
mod snapshot;

pub use events::{ScoreEvent, ScoreEvents};
pub use input::InputEvent;
pub use snapshot::SessionSnapshot;

use std::time::Instant;

use crate::core::{Coord, Direction, GameRng, Grid, SessionConfig, Tile, TileIdAllocator};
use crate::engine::{resolve_merges, MergeIntent, MoveEngine, TerminalDetector, TileSpawner};
use crate::error::{ConfigError, SnapshotError};
use crate::store::{BestScoreStore, MemoryStore};

/// What happened to a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// Dropped: the game is over or a previous move is still settling.
    Ignored,
    /// Nothing could slide in that direction; state unchanged.
    Blocked,
    /// Tiles moved.
    Moved { score_delta: u64 },
}

/// Result of settling a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleReport {
    /// Merges resolved.
    pub merges: usize,
    /// Tile placed by the spawner, if the board had room.
    pub spawned: Option<(Coord, Tile)>,
    /// The board has no moves left.
    pub game_over: bool,
}

/// A committed move waiting for its deferred phase.
#[derive(Clone, Debug)]
struct PendingSettle {
    merges: Vec<MergeIntent>,
    due: Instant,
}

/// A single-player game.
pub struct GameSession<S: BestScoreStore = MemoryStore> {
    config: SessionConfig,
    grid: Grid,
    score: u64,
    best_score: u64,
    active: bool,
    moves_made: u64,
    events: ScoreEvents,
    ids: TileIdAllocator,
    rng: GameRng,
    spawner: TileSpawner,
    store: S,
    in_flight: Option<PendingSettle>,
}

impl<S: BestScoreStore> GameSession<S> {
    /// Create a session and start the first game.
    ///
    /// The best score is read from `store`; a failing store reads as 0.
    pub fn new(config: SessionConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let best_score = load_best_or_zero(&store);
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let mut session = Self {
            grid: Grid::new(config.size),
            spawner: TileSpawner::new(config.four_probability),
            config,
            score: 0,
            best_score,
            active: true,
            moves_made: 0,
            events: ScoreEvents::new(),
            ids: TileIdAllocator::new(),
            rng,
            store,
            in_flight: None,
        };
        session.start();
        Ok(session)
    }

    /// Resume from a snapshot.
    pub fn restore(snapshot: SessionSnapshot, store: S) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let best_score = snapshot.best_score.max(load_best_or_zero(&store));

        Ok(Self {
            spawner: TileSpawner::new(snapshot.config.four_probability),
            rng: GameRng::from_state(&snapshot.rng),
            config: snapshot.config,
            grid: snapshot.grid,
            score: snapshot.score,
            best_score,
            active: snapshot.active,
            moves_made: snapshot.moves_made,
            events: snapshot.events,
            ids: snapshot.ids,
            store,
            in_flight: None,
        })
    }

    /// Start a new game.
    ///
    /// Clears the board, score, pending events and any in-flight move, resets
    /// tile ids, and places the opening tiles. The best score carries over.
    pub fn start(&mut self) {
        self.grid = Grid::new(self.config.size);
        self.score = 0;
        self.active = true;
        self.moves_made = 0;
        self.events.clear();
        self.ids.reset();
        self.in_flight = None;

        for _ in 0..self.config.initial_tiles {
            self.spawner.spawn(&mut self.grid, &mut self.rng, &mut self.ids);
        }

        tracing::info!(size = self.config.size, best_score = self.best_score, "new game");
    }

    /// Slide tiles toward `direction`.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveStatus {
        if !self.active || self.in_flight.is_some() {
            return MoveStatus::Ignored;
        }

        let outcome = MoveEngine::apply(&mut self.grid, direction);
        if !outcome.moved {
            return MoveStatus::Blocked;
        }

        self.score += outcome.score_delta;
        self.moves_made += 1;
        if outcome.score_delta > 0 {
            self.events.push(outcome.score_delta);
        }

        let delay = self.config.settle_delay();
        self.in_flight = Some(PendingSettle {
            merges: outcome.merges,
            due: Instant::now() + delay,
        });
        if delay.is_zero() {
            self.settle();
        }

        MoveStatus::Moved {
            score_delta: outcome.score_delta,
        }
    }

    /// Route a UI input. Unrecognised keys are ignored.
    pub fn handle_input(&mut self, input: &InputEvent) -> MoveStatus {
        match input.direction() {
            Some(direction) => self.move_tiles(direction),
            None => MoveStatus::Ignored,
        }
    }

    /// Settle the in-flight move if its delay has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<SettleReport> {
        let due = self.in_flight.as_ref()?.due;
        if due <= now {
            self.settle()
        } else {
            None
        }
    }

    /// Run the deferred phase of the in-flight move now.
    ///
    /// Returns `None` if no move is in flight.
    pub fn settle(&mut self) -> Option<SettleReport> {
        let pending = self.in_flight.take()?;

        resolve_merges(&mut self.grid, &pending.merges);
        let spawned = self.spawner.spawn(&mut self.grid, &mut self.rng, &mut self.ids);
        debug_assert!(self.grid.has_unique_ids(), "tile id reused:\n{}", self.grid);

        let game_over = TerminalDetector::is_terminal(&self.grid);
        if game_over {
            self.finish();
        }

        Some(SettleReport {
            merges: pending.merges.len(),
            spawned,
            game_over,
        })
    }

    fn finish(&mut self) {
        self.active = false;
        if self.score > self.best_score {
            self.best_score = self.score;
            if let Err(e) = self.store.save_best_score(self.best_score) {
                tracing::warn!(
                    error = %e,
                    best_score = self.best_score,
                    "failed to persist best score"
                );
            }
        }
        tracing::info!(
            score = self.score,
            best_score = self.best_score,
            moves = self.moves_made,
            "game over"
        );
    }

    /// Mark an animated score event as done.
    pub fn acknowledge_score_event(&mut self, token: u64) -> bool {
        self.events.acknowledge(token)
    }

    /// Capture the session. Refused while a move is settling.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SnapshotError> {
        if self.in_flight.is_some() {
            return Err(SnapshotError::MoveInFlight);
        }
        Ok(SessionSnapshot {
            config: self.config.clone(),
            grid: self.grid.clone(),
            score: self.score,
            best_score: self.best_score,
            active: self.active,
            moves_made: self.moves_made,
            ids: self.ids.clone(),
            rng: self.rng.state(),
            events: self.events.clone(),
        })
    }

    // === Render-facing accessors ===

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// A move is committed but not yet settled.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn pending_score_events(&self) -> &[ScoreEvent] {
        self.events.pending()
    }

    #[must_use]
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the board, e.g. to set up a specific position.
    ///
    /// Drops any in-flight move and reactivates the game if the board can
    /// still move. Loaded tiles are renumbered from the session's allocator in
    /// row-major order, so ids stay unique for the whole session.
    pub fn load_grid(&mut self, mut grid: Grid) {
        assert_eq!(grid.size(), self.config.size, "grid size does not match session");
        grid.for_each_tile_mut(|_, tile| tile.id = self.ids.allocate());
        self.grid = grid;
        self.in_flight = None;
        self.active = TerminalDetector::is_movable(&self.grid);
    }
}

fn load_best_or_zero<S: BestScoreStore>(store: &S) -> u64 {
    store.load_best_score().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "best score unavailable, starting from 0");
        0
    })
}
