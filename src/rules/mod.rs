//! Rule engine.
//!
//! Stateless operations over boards: the starting layout, the legal
//! destinations for the side to move, applying a move (capture removal and
//! promotion), and terminal-state detection.

pub mod apply;
pub mod outcome;

pub use apply::{apply_move, can_continue_capture, play_move, AppliedMove};
pub use outcome::{check_game_over, GameStatus};

pub use crate::movegen::RuleError;

use crate::board::{Board, Cell, Color, Piece, HOME_ROWS, STANDARD_SIZE};
use crate::movegen;

/// Creates the standard 8x8 starting position.
pub fn initial_board() -> Board {
    initial_board_sized(STANDARD_SIZE, STANDARD_SIZE)
}

/// Creates a starting position on a board of the given size.
///
/// Black fills the dark squares of the top three rows, white the dark
/// squares of the bottom three. Boards shorter than six rows get
/// overlapping bands; black wins the overlap.
///
/// # Panics
///
/// Panics if `rows` or `cols` is zero.
pub fn initial_board_sized(rows: u8, cols: u8) -> Board {
    let mut board = Board::new(rows, cols);
    for row in 0..rows {
        let color = if row < HOME_ROWS {
            Color::Black
        } else if row >= rows.saturating_sub(HOME_ROWS) {
            Color::White
        } else {
            continue;
        };
        for col in 0..cols {
            let cell = Cell::new(row, col);
            if cell.is_dark() {
                board.place(cell, Piece::regular(color));
            }
        }
    }
    board
}

/// Returns the legal destinations for `current_player`'s piece at `cell`.
///
/// Captures take precedence: if the piece can capture, only capture
/// landings are offered. A piece of the other color yields an empty list;
/// an empty or off-board cell is an error.
pub fn possible_moves(board: &Board, current_player: Color, cell: Cell) -> Result<Vec<Cell>, RuleError> {
    let piece = movegen::piece_at(cell, board)?;
    if piece.color != current_player {
        return Ok(Vec::new());
    }
    movegen::legal_destinations(cell, board)
}
