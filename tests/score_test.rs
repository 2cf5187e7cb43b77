//! Tests for the score counters and their JSON snapshot.

use std::fs;

use tempfile::TempDir;
use tictactoe::game::{GameResult, Player, Win};
use tictactoe::score::{ScoreStore, Scores};

fn x_win() -> GameResult {
    GameResult::Win(Win {
        player: Player::X,
        line: [0, 1, 2],
    })
}

fn o_win() -> GameResult {
    GameResult::Win(Win {
        player: Player::O,
        line: [0, 3, 6],
    })
}

#[test]
fn record_increments_exactly_one_counter() {
    let mut scores = Scores::default();
    scores.record(x_win());
    scores.record(o_win());
    scores.record(o_win());
    scores.record(GameResult::Draw);
    assert_eq!(scores, Scores { x: 1, o: 2, draws: 1 });
}

#[test]
fn snapshot_uses_uppercase_mark_keys() {
    let scores = Scores { x: 3, o: 1, draws: 2 };
    let value = serde_json::to_value(scores).unwrap();
    assert_eq!(value, serde_json::json!({"X": 3, "O": 1, "draws": 2}));
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = ScoreStore::with_path(dir.path().join("nested").join("scores.json"));
    let scores = Scores { x: 5, o: 4, draws: 9 };
    store.save(&scores);
    assert_eq!(store.load(), scores);
}

#[test]
fn missing_snapshot_loads_as_zeroes() {
    let dir = TempDir::new().unwrap();
    let store = ScoreStore::with_path(dir.path().join("scores.json"));
    assert_eq!(store.load(), Scores::default());
}

#[test]
fn corrupt_snapshot_falls_back_to_zeroes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(&path, "not json {").unwrap();
    let store = ScoreStore::with_path(&path);
    assert_eq!(store.load(), Scores::default());
}

#[test]
fn clear_removes_the_snapshot_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    let store = ScoreStore::with_path(&path);

    store.save(&Scores { x: 1, o: 0, draws: 0 });
    assert!(path.exists());
    store.clear();
    assert!(!path.exists());

    // Clearing again is a no-op, not an error.
    store.clear();
    assert_eq!(store.load(), Scores::default());
}
