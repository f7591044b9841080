//! King move generation.
//!
//! Kings slide any distance along a diagonal and capture by leaping the
//! first enemy piece on a diagonal, landing on any empty cell beyond it.

use crate::board::{Board, Cell, Color, DIAGONALS};

/// Returns every empty cell reachable by sliding from `cell`, direction by
/// direction, stopping before the first occupied cell.
pub fn moves(cell: Cell, board: &Board) -> Vec<Cell> {
    let mut dests = Vec::new();
    for dir in DIAGONALS {
        let mut step = 1;
        while let Some(next) = cell.offset(dir, step) {
            if !board.is_vacant(next) {
                break;
            }
            dests.push(next);
            step += 1;
        }
    }
    dests
}

/// Returns every capture landing cell for a king of `color` at `cell`.
///
/// Along each diagonal the first piece met must be an enemy; an own piece
/// blocks the line. Landings are the empty cells after that enemy, up to
/// the edge or the next piece.
pub fn captures(cell: Cell, color: Color, board: &Board) -> Vec<Cell> {
    let mut landings = Vec::new();
    for dir in DIAGONALS {
        let mut jumped = false;
        let mut step = 1;
        while let Some(next) = cell.offset(dir, step) {
            if !board.contains(next) {
                break;
            }
            match board.get(next) {
                Some(piece) => {
                    if piece.color == color || jumped {
                        break;
                    }
                    jumped = true;
                }
                None if jumped => landings.push(next),
                None => {}
            }
            step += 1;
        }
    }
    landings
}
