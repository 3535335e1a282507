//! Tic-tac-toe implementation of the `game-core` state contract.
//!
//! Reference domain for the MCTS engine: two players (X = 1, O = 2), 3x3
//! board, win by completing a line, draw on a full board. Moves are board
//! positions 0-8, row-major.

use std::fmt;

use game_core::{GameError, GameState, Outcome, PlayerId};

/// Player 1 (X, moves first).
pub const PLAYER_X: PlayerId = 1;
/// Player 2 (O).
pub const PLAYER_O: PlayerId = 2;

/// Winning positions: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A tic-tac-toe position.
///
/// Cells hold 0 (empty) or a [`PlayerId`]. The state is a plain value:
/// [`apply`](GameState::apply) returns a new board and never mutates the
/// receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeState {
    board: [u8; 9],
    previous_player: PlayerId,
}

impl TicTacToeState {
    /// Empty board; X is on move (the fictitious previous player is O).
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            previous_player: PLAYER_O,
        }
    }

    /// The player on move.
    pub fn current_player(&self) -> PlayerId {
        3 - self.previous_player
    }

    /// Cell contents at `position` (0 = empty).
    pub fn cell(&self, position: u8) -> u8 {
        self.board[position as usize]
    }

    fn winner(&self) -> Option<PlayerId> {
        for line in &LINES {
            let [a, b, c] = *line;
            if self.board[a] != 0 && self.board[a] == self.board[b] && self.board[b] == self.board[c]
            {
                return Some(self.board[a]);
            }
        }
        None
    }

    fn board_full(&self) -> bool {
        self.board.iter().all(|&cell| cell != 0)
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToeState {
    type Move = u8;

    fn previous_player(&self) -> PlayerId {
        self.previous_player
    }

    fn legal_moves(&self) -> Vec<u8> {
        if self.result().is_some() {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    fn result(&self) -> Option<Outcome> {
        if let Some(winner) = self.winner() {
            return Some(Outcome::win(winner, 3 - winner));
        }
        if self.board_full() {
            return Some(Outcome::draw(PLAYER_X, PLAYER_O));
        }
        None
    }

    fn apply(&self, mv: &u8) -> Result<Self, GameError> {
        let position = *mv;
        if position >= 9 {
            return Err(GameError::IllegalMove(format!(
                "position {position} is off the board"
            )));
        }
        if self.result().is_some() {
            return Err(GameError::IllegalMove(format!(
                "position {position} played after the game ended"
            )));
        }
        if self.board[position as usize] != 0 {
            return Err(GameError::IllegalMove(format!(
                "position {position} is already occupied"
            )));
        }
        let mut next = *self;
        next.board[position as usize] = self.current_player();
        next.previous_player = self.current_player();
        Ok(next)
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.chunks(3) {
            for &cell in row {
                let symbol = match cell {
                    PLAYER_X => 'X',
                    PLAYER_O => 'O',
                    _ => '.',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
