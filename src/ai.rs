use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::game::{Action, Cell, Player, available_moves, detect_win};

const CENTER: Action = 4;
const CORNERS: [Action; 4] = [0, 2, 6, 8];
const SIDES: [Action; 4] = [1, 3, 5, 7];

/// One-ply move policy for the computer mark, evaluated in strict priority
/// order:
///
/// 1. complete an own line,
/// 2. block the opponent's completing move,
/// 3. take the center,
/// 4. take a random empty corner,
/// 5. take a random empty side.
///
/// Steps 1 and 2 scan moves in ascending index order and return the first
/// hit. The rng is owned by the chooser so tests can seed it.
pub struct Heuristic {
    rng: SmallRng,
}

impl Heuristic {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::seed_from_u64(rand::rng().random()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks a move for `mark`. Returns `None` only when the board is full.
    pub fn choose(&mut self, board: &[Cell; 9], mark: Player) -> Option<Action> {
        let moves = available_moves(board);
        if moves.is_empty() {
            return None;
        }

        if let Some(win) = Self::completing_move(board, &moves, mark) {
            return Some(win);
        }
        if let Some(block) = Self::completing_move(board, &moves, mark.opponent()) {
            return Some(block);
        }
        if board[CENTER] == Cell::Empty {
            return Some(CENTER);
        }
        if let Some(corner) = self.pick_random(board, &CORNERS) {
            return Some(corner);
        }
        self.pick_random(board, &SIDES)
    }

    /// First move (ascending) that would complete a line for `player`.
    fn completing_move(board: &[Cell; 9], moves: &[Action], player: Player) -> Option<Action> {
        moves.iter().copied().find(|&action| {
            let mut copy = *board;
            copy[action] = Cell::Occupied(player);
            detect_win(&copy).is_some_and(|win| win.player == player)
        })
    }

    fn pick_random(&mut self, board: &[Cell; 9], candidates: &[Action]) -> Option<Action> {
        let open: Vec<Action> = candidates
            .iter()
            .copied()
            .filter(|&i| board[i] == Cell::Empty)
            .collect();
        if open.is_empty() {
            None
        } else {
            Some(open[self.rng.random_range(0..open.len())])
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new()
    }
}
