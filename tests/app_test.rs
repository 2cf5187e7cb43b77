//! Tests for the application state machine: scoring, persistence wiring,
//! mode switching, and the scheduled computer move.

use std::time::{Duration, Instant};

use tempfile::TempDir;
use tictactoe::ai::Heuristic;
use tictactoe::app::{App, COMPUTER_MOVE_DELAY, Mode, Theme};
use tictactoe::game::{Cell, Player};
use tictactoe::score::ScoreStore;

fn new_app(dir: &TempDir, mode: Mode) -> App {
    let store = ScoreStore::with_path(dir.path().join("scores.json"));
    App::new(mode, Theme::Light, Heuristic::seeded(1), store)
}

fn occupied(app: &App) -> usize {
    app.game()
        .board()
        .iter()
        .filter(|&&c| c != Cell::Empty)
        .count()
}

/// X takes the top row: X@0, O@4, X@1, O@8, X@2.
fn play_x_win(app: &mut App, now: Instant) {
    for action in [0, 4, 1, 8, 2] {
        app.apply_move(action, now);
    }
}

#[test]
fn completed_round_updates_scores_once() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsPlayer);
    let now = Instant::now();

    play_x_win(&mut app, now);
    assert_eq!(app.scores().x, 1);
    assert!(app.can_new_round());
    assert_eq!(app.result_label(), "Winner: X!");

    // Re-poking the finished round must not re-record.
    app.apply_move(5, now);
    app.apply_move(0, now);
    assert_eq!(app.scores().x, 1);
}

#[test]
fn scores_survive_across_app_instances() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();
    {
        let mut app = new_app(&dir, Mode::PlayerVsPlayer);
        play_x_win(&mut app, now);
    }
    let app = new_app(&dir, Mode::PlayerVsPlayer);
    assert_eq!(app.scores().x, 1);
    assert_eq!(app.scores().o, 0);
}

#[test]
fn reset_all_zeroes_scores_and_removes_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    let now = Instant::now();

    let mut app = new_app(&dir, Mode::PlayerVsPlayer);
    play_x_win(&mut app, now);
    assert!(path.exists());

    app.reset_all(now);
    assert_eq!(app.scores(), Default::default());
    assert!(app.game().is_untouched());
    assert!(!path.exists());

    let restarted = new_app(&dir, Mode::PlayerVsPlayer);
    assert_eq!(restarted.scores(), Default::default());
}

#[test]
fn new_round_keeps_scores_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsPlayer);
    let now = Instant::now();

    play_x_win(&mut app, now);
    app.new_round(now);
    assert_eq!(app.scores().x, 1);
    assert!(app.game().is_untouched());
    assert_eq!(app.game().current_player(), Player::X);

    app.new_round(now);
    assert!(app.game().is_untouched());
    assert_eq!(app.game().current_player(), Player::X);
    assert_eq!(app.game().result(), None);
}

#[test]
fn mode_switch_is_rejected_mid_round() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsPlayer);
    let now = Instant::now();

    assert!(app.can_set_mode());
    app.apply_move(0, now);
    assert!(!app.can_set_mode());
    app.set_mode(Mode::PlayerVsComputer, now);
    assert_eq!(app.mode(), Mode::PlayerVsPlayer);

    play_x_win_from_second_move(&mut app, now);
    assert!(app.can_set_mode());
    app.set_mode(Mode::PlayerVsComputer, now);
    assert_eq!(app.mode(), Mode::PlayerVsComputer);
}

fn play_x_win_from_second_move(app: &mut App, now: Instant) {
    for action in [4, 1, 8, 2] {
        app.apply_move(action, now);
    }
}

#[test]
fn computer_moves_only_after_its_delay() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsComputer);
    let t0 = Instant::now();

    app.apply_move(0, t0);
    assert_eq!(occupied(&app), 1);

    app.tick(t0 + Duration::from_millis(10));
    assert_eq!(occupied(&app), 1);

    app.tick(t0 + COMPUTER_MOVE_DELAY);
    assert_eq!(occupied(&app), 2);
    assert_eq!(app.game().current_player(), Player::X);
}

#[test]
fn computer_move_fires_at_most_once() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsComputer);
    let t0 = Instant::now();

    app.apply_move(0, t0);
    app.tick(t0 + COMPUTER_MOVE_DELAY);
    app.tick(t0 + COMPUTER_MOVE_DELAY * 2);
    assert_eq!(occupied(&app), 2);
}

#[test]
fn stale_computer_move_is_cancelled_by_a_new_round() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsComputer);
    let t0 = Instant::now();

    app.apply_move(0, t0);
    app.new_round(t0 + Duration::from_millis(10));

    app.tick(t0 + Duration::from_secs(2));
    assert!(app.game().is_untouched());
}

#[test]
fn human_move_during_the_delay_cancels_the_timer() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsComputer);
    let t0 = Instant::now();

    app.apply_move(0, t0);
    // The player plays O themselves before the computer's timer fires.
    app.apply_move(4, t0 + Duration::from_millis(100));
    assert_eq!(occupied(&app), 2);

    // The old timer must not produce a second O move; it is X's turn now.
    app.tick(t0 + Duration::from_secs(2));
    assert_eq!(occupied(&app), 2);
    assert_eq!(app.game().current_player(), Player::X);
}

#[test]
fn no_computer_move_is_scheduled_in_pvp_mode() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsPlayer);
    let t0 = Instant::now();

    app.apply_move(0, t0);
    app.tick(t0 + Duration::from_secs(2));
    assert_eq!(occupied(&app), 1);
    assert_eq!(app.game().current_player(), Player::O);
}

#[test]
fn theme_toggle_flips_between_light_and_dark() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, Mode::PlayerVsPlayer);
    assert_eq!(app.theme(), Theme::Light);
    app.toggle_theme();
    assert_eq!(app.theme(), Theme::Dark);
    app.toggle_theme();
    assert_eq!(app.theme(), Theme::Light);
}
