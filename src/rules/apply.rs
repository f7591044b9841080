//! Move application.
//!
//! Moves are applied to a copy of the board: the mover is relocated, any
//! jumped enemy is removed, and a regular piece reaching the far rank is
//! crowned. The caller's board is never touched.

use crate::board::{Board, Cell, Color};
use crate::movegen::{self, RuleError};

/// The result of applying one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub board: Board,
    /// Cell of the enemy piece removed by this move, if it was a capture.
    pub captured: Option<Cell>,
    /// Whether the moving piece was crowned on arrival.
    pub promoted: bool,
}

/// Applies a move and returns the resulting board.
///
/// `to` must be one of the legal destinations of the piece at `from`
/// (captures first, as reported by `possible_moves`); otherwise the move
/// is rejected with `IllegalMove`.
pub fn apply_move(from: Cell, to: Cell, board: &Board) -> Result<Board, RuleError> {
    play_move(from, to, board).map(|applied| applied.board)
}

/// Applies a move and reports what happened along the way.
pub fn play_move(from: Cell, to: Cell, board: &Board) -> Result<AppliedMove, RuleError> {
    let piece = movegen::piece_at(from, board)?;
    if !movegen::legal_destinations(from, board)?.contains(&to) {
        return Err(RuleError::IllegalMove { from, to });
    }

    let mut next = board.clone();
    next.take(from);
    next.set(to, Some(piece));

    let captured = jumped_enemy(from, to, &next, piece.color);
    if let Some(cell) = captured {
        next.take(cell);
    }

    let promoted = !piece.is_king() && to.row == piece.color.promotion_row(next.rows());
    if promoted {
        next.set(to, Some(piece.promoted()));
    }

    Ok(AppliedMove { board: next, captured, promoted })
}

/// Returns the first piece strictly between `from` and `to` if it belongs
/// to the opponent of `color`.
fn jumped_enemy(from: Cell, to: Cell, board: &Board, color: Color) -> Option<Cell> {
    let (dir, distance) = from.diagonal_to(to)?;
    (1..distance)
        .filter_map(|step| from.offset(dir, step))
        .find(|&cell| board.get(cell).is_some())
        .filter(|&cell| matches!(board.get(cell), Some(p) if p.color != color))
}

/// Returns true if the piece at `from` has a further capture available.
///
/// Multi-jump turns are not enforced by `GameState`; this only reports
/// whether one would be possible.
pub fn can_continue_capture(board: &Board, from: Cell) -> Result<bool, RuleError> {
    let piece = movegen::piece_at(from, board)?;
    Ok(!movegen::captures(piece.color, from, board)?.is_empty())
}
