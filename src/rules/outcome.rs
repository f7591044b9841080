//! Terminal-state detection.

use crate::board::{Board, Color};
use crate::movegen::has_any_legal_move;

/// Whether a game is still running, and who won if not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won(Color),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(color) => Some(color),
        }
    }
}

/// Evaluates the board after `mover` has moved.
///
/// A side with no pieces left loses outright. Otherwise, if the side to
/// move next has pieces but no legal destination for any of them, `mover`
/// wins.
pub fn check_game_over(board: &Board, mover: Color) -> GameStatus {
    let next = mover.opponent();
    for color in [next, mover] {
        if board.count(color) == 0 {
            return GameStatus::Won(color.opponent());
        }
    }
    if !has_any_legal_move(next, board) {
        return GameStatus::Won(mover);
    }
    GameStatus::InProgress
}
