use std::time::{Duration, Instant};

use tracing::debug;

use crate::ai::Heuristic;
use crate::game::{Action, GameResult, Player, TicTacToe};
use crate::score::{ScoreStore, Scores};

/// Delay before the computer plays, so its move reads as a response.
pub const COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(450);

/// The computer always plays O; X is always human.
pub const COMPUTER_MARK: Player = Player::O;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    PlayerVsPlayer,
    PlayerVsComputer,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingMove {
    generation: u64,
    due: Instant,
}

/// Owned application state. Every mutation goes through one of the methods
/// below; each of them re-arms (or cancels) the scheduled computer move so a
/// stale timer can never act on a board that changed since it was armed.
pub struct App {
    game: TicTacToe,
    mode: Mode,
    theme: Theme,
    scores: Scores,
    store: ScoreStore,
    chooser: Heuristic,
    generation: u64,
    pending: Option<PendingMove>,
}

impl App {
    pub fn new(mode: Mode, theme: Theme, chooser: Heuristic, store: ScoreStore) -> Self {
        let scores = store.load();
        App {
            game: TicTacToe::default(),
            mode,
            theme,
            scores,
            store,
            chooser,
            generation: 0,
            pending: None,
        }
    }

    pub fn game(&self) -> &TicTacToe {
        &self.game
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn can_new_round(&self) -> bool {
        self.game.is_terminal()
    }

    /// Mode switching is only allowed between rounds, never mid-play.
    pub fn can_set_mode(&self) -> bool {
        self.game.is_untouched() || self.game.is_terminal()
    }

    pub fn result_label(&self) -> String {
        match self.game.result() {
            Some(GameResult::Win(win)) => format!("Winner: {}!", win.player),
            Some(GameResult::Draw) => "Draw!".to_string(),
            None => "Playing...".to_string(),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Plays the current mark at `action`. Occupied cells and finished rounds
    /// are rejected by the round itself and ignored here, mirroring disabled
    /// cells in the UI. The round result is recorded the moment the round
    /// ends; `step` rejects anything after that, so a terminal board can
    /// never record twice.
    pub fn apply_move(&mut self, action: Action, now: Instant) {
        let player = self.game.current_player();
        match self.game.step(action) {
            Ok(()) => {
                debug!(action, %player, "move accepted");
                if let Some(result) = self.game.result() {
                    self.scores.record(result);
                    self.store.save(&self.scores);
                }
                self.reschedule(now);
            }
            Err(reason) => debug!(action, reason, "move rejected"),
        }
    }

    pub fn set_mode(&mut self, mode: Mode, now: Instant) {
        if mode == self.mode || !self.can_set_mode() {
            return;
        }
        self.mode = mode;
        self.reschedule(now);
    }

    /// Clears the board for the next round; scores carry over. Calling it
    /// again on a fresh round changes nothing.
    pub fn new_round(&mut self, now: Instant) {
        self.game = TicTacToe::default();
        self.reschedule(now);
    }

    /// Clears the board, zeroes the scores, and deletes the saved snapshot.
    pub fn reset_all(&mut self, now: Instant) {
        self.game = TicTacToe::default();
        self.scores = Scores::default();
        self.store.clear();
        self.reschedule(now);
    }

    /// Fires the pending computer move once its delay has elapsed. Called
    /// every frame.
    pub fn tick(&mut self, now: Instant) {
        let Some(pending) = self.pending else {
            return;
        };
        if pending.generation != self.generation || now < pending.due {
            return;
        }
        self.pending = None;
        if let Some(action) = self.chooser.choose(self.game.board(), COMPUTER_MARK) {
            self.apply_move(action, now);
        }
    }

    // Every mutation lands here: drop whatever was scheduled, then arm a new
    // timer only if it is actually the computer's turn in a live round.
    fn reschedule(&mut self, now: Instant) {
        self.generation += 1;
        self.pending = None;
        if self.mode == Mode::PlayerVsComputer
            && !self.game.is_terminal()
            && self.game.current_player() == COMPUTER_MARK
        {
            self.pending = Some(PendingMove {
                generation: self.generation,
                due: now + COMPUTER_MOVE_DELAY,
            });
        }
    }
}
