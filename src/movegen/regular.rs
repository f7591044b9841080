//! Regular-piece move generation.
//!
//! A regular piece steps one square diagonally forward and captures by
//! jumping an adjacent enemy in any of the four diagonal directions.

use crate::board::{Board, Cell, Color, Direction, DIAGONALS};

/// Returns the empty forward-diagonal cells adjacent to `cell`, left first.
pub fn moves(cell: Cell, color: Color, board: &Board) -> Vec<Cell> {
    let forward = [
        Direction { d_row: color.forward(), d_col: -1 },
        Direction { d_row: color.forward(), d_col: 1 },
    ];
    forward
        .iter()
        .filter_map(|&dir| cell.offset(dir, 1))
        .filter(|&dest| board.is_vacant(dest))
        .collect()
}

/// Returns landing cells two squares away whose middle cell holds a piece
/// not of `color`.
pub fn captures(cell: Cell, color: Color, board: &Board) -> Vec<Cell> {
    let mut landings = Vec::new();
    for dir in DIAGONALS {
        let (middle, landing) = match (cell.offset(dir, 1), cell.offset(dir, 2)) {
            (Some(m), Some(l)) => (m, l),
            _ => continue,
        };
        if !board.is_vacant(landing) {
            continue;
        }
        if matches!(board.get(middle), Some(p) if p.color != color) {
            landings.push(landing);
        }
    }
    landings
}
