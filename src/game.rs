use std::fmt;

/// Board cell index, 0-8 in row-major order.
pub type Action = usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "."),
            Cell::Occupied(p) => write!(f, "{p}"),
        }
    }
}

pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // middle column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// A completed line and the player who owns it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Win {
    pub player: Player,
    pub line: [usize; 3],
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    Win(Win),
    Draw,
}

/// Scans `WIN_LINES` in declared order and returns the first line fully
/// occupied by a single player. The scan order is part of the contract: on a
/// (hand-built) board with several complete lines the earliest declared one
/// wins.
pub fn detect_win(board: &[Cell; 9]) -> Option<Win> {
    for line in WIN_LINES {
        if let Cell::Occupied(player) = board[line[0]]
            && line.iter().all(|&i| board[i] == Cell::Occupied(player))
        {
            return Some(Win { player, line });
        }
    }
    None
}

/// Indices of every empty cell, in ascending order.
pub fn available_moves(board: &[Cell; 9]) -> Vec<Action> {
    board
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Cell::Empty)
        .map(|(i, _)| i)
        .collect()
}

/// One round of tic-tac-toe: the board, whose turn it is, and the cached
/// result. Moves are only accepted while the round is live; everything else
/// is rejected without changing state.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: [Cell; 9],
    current_player: Player,
    result: Option<GameResult>,
}

impl TicTacToe {
    pub fn board(&self) -> &[Cell; 9] {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// True while no move has been played this round.
    pub fn is_untouched(&self) -> bool {
        self.board.iter().all(|&c| c == Cell::Empty)
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.result {
            Some(GameResult::Win(win)) => Some(win.line),
            _ => None,
        }
    }

    pub fn allowed_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        available_moves(&self.board)
    }

    pub fn step(&mut self, action: Action) -> Result<(), &'static str> {
        if action >= 9 {
            return Err("Position out of bounds");
        }
        if self.board[action] != Cell::Empty {
            return Err("Cell already occupied");
        }
        if self.is_terminal() {
            return Err("Round already finished");
        }

        self.board[action] = Cell::Occupied(self.current_player);
        self.update_result();
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    // A win is checked before full occupancy, so a winning final move never
    // counts as a draw.
    fn update_result(&mut self) {
        if let Some(win) = detect_win(&self.board) {
            self.result = Some(GameResult::Win(win));
            return;
        }

        if self.board.iter().all(|&c| c != Cell::Empty) {
            self.result = Some(GameResult::Draw);
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        TicTacToe {
            board: [Cell::Empty; 9],
            current_player: Player::X,
            result: None,
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.board[row * 3 + col])?;
                if col < 2 {
                    write!(f, " ")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
