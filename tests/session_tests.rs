//! Session integration tests.
//!
//! These drive a `GameSession` through the same calls an embedding UI makes:
//! inputs, settling, score-event acknowledgement, new games and snapshots.

use std::time::{Duration, Instant};

use tile_merge::core::{Direction, Grid, SessionConfig, Tile, TileId};
use tile_merge::session::{GameSession, InputEvent, MoveStatus, SessionSnapshot};
use tile_merge::store::{BestScoreStore, JsonFileStore, MemoryStore};

fn instant(seed: u64) -> SessionConfig {
    SessionConfig::new().with_seed(seed).with_settle_delay(Duration::ZERO)
}

/// Play until the game ends or `limit` moves have been tried.
fn play_out<S: BestScoreStore>(session: &mut GameSession<S>, limit: usize) {
    for i in 0..limit {
        if !session.is_active() {
            break;
        }
        session.move_tiles(Direction::ALL[i % 4]);
    }
}

// =============================================================================
// Scoring and events
// =============================================================================

#[test]
fn test_merge_books_score_and_event() {
    let mut session = GameSession::new(instant(1), MemoryStore::new()).unwrap();
    session.load_grid(Grid::from_values(&[
        vec![2, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![2, 0, 0, 0],
    ]));

    let status = session.move_tiles(Direction::Down);
    assert_eq!(status, MoveStatus::Moved { score_delta: 4 });
    assert_eq!(session.score(), 4);

    let events = session.pending_score_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].amount, 4);

    // Resolved merge plus one spawned tile.
    assert_eq!(session.grid().tile_count(), 2);
    assert_eq!(session.grid().max_value(), 4);
}

#[test]
fn test_non_scoring_move_enqueues_no_event() {
    let mut session = GameSession::new(instant(2), MemoryStore::new()).unwrap();
    session.load_grid(Grid::from_values(&[
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 8],
    ]));

    session.move_tiles(Direction::Up);
    assert!(session.pending_score_events().is_empty());
}

#[test]
fn test_acknowledge_keeps_later_events() {
    let mut session = GameSession::new(instant(3), MemoryStore::new()).unwrap();

    session.load_grid(Grid::from_values(&[
        vec![2, 2, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ]));
    session.move_tiles(Direction::Left);

    session.load_grid(Grid::from_values(&[
        vec![8, 8, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ]));
    session.move_tiles(Direction::Left);

    let tokens: Vec<_> = session.pending_score_events().iter().map(|e| e.token).collect();
    assert_eq!(tokens.len(), 2);

    assert!(session.acknowledge_score_event(tokens[0]));
    let remaining = session.pending_score_events();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token, tokens[1]);
    assert_eq!(remaining[0].amount, 16);
}

// =============================================================================
// Input and pacing
// =============================================================================

#[test]
fn test_input_adapter_routes_keys_and_swipes() {
    let mut session = GameSession::new(instant(4), MemoryStore::new()).unwrap();
    session.load_grid(Grid::from_values(&[
        vec![0, 0, 0, 0],
        vec![0, 4, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ]));

    assert_eq!(session.handle_input(&InputEvent::key("Shift")), MoveStatus::Ignored);
    assert!(matches!(session.handle_input(&InputEvent::key("ArrowUp")), MoveStatus::Moved { .. }));
    assert!(matches!(
        session.handle_input(&InputEvent::Swipe(Direction::Right)),
        MoveStatus::Moved { .. } | MoveStatus::Blocked
    ));
}

#[test]
fn test_settle_waits_for_delay() {
    let config = SessionConfig::new().with_seed(5).with_settle_delay(Duration::from_millis(100));
    let mut session = GameSession::new(config, MemoryStore::new()).unwrap();
    session.load_grid(Grid::from_values(&[
        vec![4, 0, 0, 4],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ]));

    let moved_at = Instant::now();
    assert_eq!(session.move_tiles(Direction::Left), MoveStatus::Moved { score_delta: 8 });

    // Score is booked immediately; the merge and spawn wait.
    assert_eq!(session.score(), 8);
    assert_eq!(session.grid().tile_count(), 1);
    assert_eq!(session.grid().max_value(), 4);
    assert_eq!(session.move_tiles(Direction::Down), MoveStatus::Ignored);

    let report = session.poll(moved_at + Duration::from_secs(1)).unwrap();
    assert_eq!(report.merges, 1);
    assert!(report.spawned.is_some());
    assert!(!report.game_over);
    assert_eq!(session.grid().max_value(), 8);
    assert_eq!(session.grid().tile_count(), 2);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_game_eventually_ends_and_restarts() {
    let config = instant(6).with_size(2);
    let mut session = GameSession::new(config, MemoryStore::new()).unwrap();

    play_out(&mut session, 10_000);
    assert!(!session.is_active());
    assert_eq!(session.move_tiles(Direction::Up), MoveStatus::Ignored);
    assert!(session.best_score() >= session.score());

    let best = session.best_score();
    session.start();
    assert!(session.is_active());
    assert_eq!(session.score(), 0);
    assert_eq!(session.best_score(), best);
    assert_eq!(session.grid().tile_count(), 2);
    assert!(session.pending_score_events().is_empty());
}

#[test]
fn test_new_game_restarts_tile_ids() {
    let mut session = GameSession::new(instant(7), MemoryStore::new()).unwrap();
    play_out(&mut session, 20);

    session.start();
    let mut ids: Vec<_> = session.grid().tiles().map(|(_, t)| t.id.raw()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn test_best_score_survives_sessions_via_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");

    let first_best = {
        let config = instant(8).with_size(2);
        let mut session = GameSession::new(config, JsonFileStore::new(&path)).unwrap();
        play_out(&mut session, 10_000);
        assert!(!session.is_active());
        session.best_score()
    };

    let session = GameSession::new(instant(9), JsonFileStore::new(&path)).unwrap();
    assert_eq!(session.best_score(), first_best);
}

#[test]
fn test_same_seed_same_game() {
    let run = || {
        let mut session = GameSession::new(instant(10), MemoryStore::new()).unwrap();
        play_out(&mut session, 200);
        (session.grid().clone(), session.score())
    };

    assert_eq!(run(), run());
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_restore_continues_identically() {
    let mut original = GameSession::new(instant(11), MemoryStore::new()).unwrap();
    play_out(&mut original, 30);

    let bytes = original.snapshot().unwrap().to_bytes().unwrap();
    let snapshot = SessionSnapshot::from_bytes(&bytes).unwrap();
    let mut restored = GameSession::restore(snapshot, MemoryStore::new()).unwrap();

    assert_eq!(restored.grid(), original.grid());
    assert_eq!(restored.score(), original.score());

    for i in 0..30 {
        let direction = Direction::ALL[(i * 3) % 4];
        assert_eq!(original.move_tiles(direction), restored.move_tiles(direction));
    }
    assert_eq!(restored.grid(), original.grid());
    assert_eq!(restored.score(), original.score());
}

#[test]
fn test_snapshot_rejects_garbage() {
    assert!(SessionSnapshot::from_bytes(&[1, 2, 3]).is_err());
}

#[test]
fn test_snapshot_rejects_mismatched_grid() {
    let session = GameSession::new(instant(12), MemoryStore::new()).unwrap();
    let mut snapshot = session.snapshot().unwrap();
    snapshot.grid = Grid::new(3);

    assert!(snapshot.validate().is_err());
    assert!(GameSession::restore(snapshot, MemoryStore::new()).is_err());
}

#[test]
fn test_snapshot_rejects_truncated_grid() {
    let session = GameSession::new(instant(13), MemoryStore::new()).unwrap();
    let snapshot = session.snapshot().unwrap();

    // Same field order as SessionSnapshot, with a 4x4 grid holding 3 cells.
    let mut cells = vec![None; 3];
    cells[0] = Some(Tile::new(TileId(0), 2));
    let bytes = bincode::serialize(&(
        &snapshot.config,
        (4usize, cells),
        snapshot.score,
        snapshot.best_score,
        snapshot.active,
        snapshot.moves_made,
        &snapshot.ids,
        &snapshot.rng,
        &snapshot.events,
    ))
    .unwrap();
    assert!(SessionSnapshot::from_bytes(&bytes).is_err());

    let mut json = serde_json::to_value(&snapshot).unwrap();
    json["grid"]["cells"].as_array_mut().unwrap().truncate(3);
    assert!(serde_json::from_value::<SessionSnapshot>(json).is_err());
}
