//! Legal move generation.
//!
//! Computes, for a single piece, the cells it may step to and the cells it
//! may land on by capturing. Nothing here mutates a board; applying moves is
//! the job of `rules`.

pub mod king;
pub mod regular;

use thiserror::Error;

use crate::board::{Board, Cell, Color, Piece, PieceKind};

/// Errors raised by the rule layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("no piece at {0}")]
    PieceNotFound(Cell),

    #[error("cell {0} is off the board")]
    OffBoard(Cell),

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Cell, to: Cell },
}

/// Returns the piece occupying `cell`.
pub fn piece_at(cell: Cell, board: &Board) -> Result<Piece, RuleError> {
    if !board.contains(cell) {
        return Err(RuleError::OffBoard(cell));
    }
    board.get(cell).ok_or(RuleError::PieceNotFound(cell))
}

/// Returns the non-capturing destinations of the piece at `cell`.
///
/// Regular pieces step one square diagonally forward; kings slide along
/// every diagonal until the edge or the first occupied cell.
pub fn simple_moves(cell: Cell, board: &Board) -> Result<Vec<Cell>, RuleError> {
    let piece = piece_at(cell, board)?;
    Ok(match piece.kind {
        PieceKind::Regular => regular::moves(cell, piece.color, board),
        PieceKind::King => king::moves(cell, board),
    })
}

/// Returns the capture landing cells of the piece at `cell`, treating every
/// piece not of `color` as an enemy.
pub fn captures(color: Color, cell: Cell, board: &Board) -> Result<Vec<Cell>, RuleError> {
    let piece = piece_at(cell, board)?;
    Ok(match piece.kind {
        PieceKind::Regular => regular::captures(cell, color, board),
        PieceKind::King => king::captures(cell, color, board),
    })
}

/// Returns the destinations the piece at `cell` may legally move to:
/// its captures if it has any, its simple moves otherwise.
pub fn legal_destinations(cell: Cell, board: &Board) -> Result<Vec<Cell>, RuleError> {
    let piece = piece_at(cell, board)?;
    let caps = captures(piece.color, cell, board)?;
    if !caps.is_empty() {
        return Ok(caps);
    }
    simple_moves(cell, board)
}

/// Returns true if any piece of `color` has a simple move or a capture.
pub fn has_any_legal_move(color: Color, board: &Board) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .any(|(cell, piece)| match piece.kind {
            PieceKind::Regular => {
                !regular::moves(cell, color, board).is_empty()
                    || !regular::captures(cell, color, board).is_empty()
            }
            PieceKind::King => {
                !king::moves(cell, board).is_empty() || !king::captures(cell, color, board).is_empty()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::diagram::parse_diagram;

    fn board(rows: &str) -> Board {
        parse_diagram(rows).unwrap()
    }

    #[test]
    fn piece_at_empty_cell_fails() {
        let b = Board::empty();
        assert_eq!(piece_at(Cell::new(4, 4), &b), Err(RuleError::PieceNotFound(Cell::new(4, 4))));
        assert_eq!(piece_at(Cell::new(9, 4), &b), Err(RuleError::OffBoard(Cell::new(9, 4))));
    }

    #[test]
    fn simple_moves_on_empty_cell_fail() {
        let b = Board::empty();
        assert!(simple_moves(Cell::new(0, 0), &b).is_err());
        assert!(captures(Color::White, Cell::new(0, 0), &b).is_err());
    }

    #[test]
    fn captures_take_precedence_over_steps() {
        let b = board(
            "........
             ........
             ........
             ...b....
             ....w...
             ........
             ........
             ........",
        );
        assert_eq!(simple_moves(Cell::new(4, 4), &b).unwrap(), vec![Cell::new(3, 5)]);
        assert_eq!(legal_destinations(Cell::new(4, 4), &b).unwrap(), vec![Cell::new(2, 2)]);
    }

    #[test]
    fn legal_destinations_fall_back_to_steps() {
        let b = board(
            "........
             ........
             ........
             ........
             ....w...
             ........
             ........
             ........",
        );
        assert_eq!(
            legal_destinations(Cell::new(4, 4), &b).unwrap(),
            vec![Cell::new(3, 3), Cell::new(3, 5)]
        );
    }

    #[test]
    fn blocked_side_has_no_legal_move() {
        // White regular on the top row cannot advance further.
        let b = board(
            ".w......
             ........
             ........
             ........
             ........
             ........
             ........
             ....b...",
        );
        assert!(!has_any_legal_move(Color::White, &b));
        assert!(!has_any_legal_move(Color::Black, &b));
    }

    #[test]
    fn capture_alone_counts_as_legal_move() {
        // White at (1,1) is walled in forward but can capture backward.
        let b = board(
            "b.b.....
             .w......
             b.b.....
             ........
             ........
             ........
             ........
             ........",
        );
        assert!(regular::moves(Cell::new(1, 1), Color::White, &b).is_empty());
        assert!(has_any_legal_move(Color::White, &b));
    }

    #[test]
    fn missing_color_has_no_legal_move() {
        let b = board(
            "........
             ........
             ........
             ........
             ....w...
             ........
             ........
             ........",
        );
        assert!(!has_any_legal_move(Color::Black, &b));
        assert!(has_any_legal_move(Color::White, &b));
    }
}
