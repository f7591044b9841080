//! Text board diagrams.
//!
//! A diagram is one line per row, top row first, one character per cell:
//! `.` for empty, `w`/`W` for a white regular/king, `b`/`B` for a black
//! regular/king. Leading and trailing whitespace on each line is ignored,
//! as are blank lines, so diagrams can be written as indented string
//! literals.

use crate::board::{Board, Cell, Piece};

/// Errors that can occur while parsing a diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("diagram has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("invalid character '{ch}' at row {row}, column {col}")]
    InvalidChar { ch: char, row: usize, col: usize },

    #[error("diagram is {rows}x{cols}, larger than the supported 255x255")]
    TooLarge { rows: usize, cols: usize },
}

/// Parses a diagram into a board sized to match it.
pub fn parse_diagram(s: &str) -> Result<Board, DiagramError> {
    let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let first = lines.first().ok_or(DiagramError::Empty)?;
    let cols = first.chars().count();

    if lines.len() > u8::MAX as usize || cols > u8::MAX as usize {
        return Err(DiagramError::TooLarge { rows: lines.len(), cols });
    }

    let mut board = Board::new(lines.len() as u8, cols as u8);
    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(DiagramError::RaggedRow { row, expected: cols, found });
        }
        for (col, ch) in line.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let piece = Piece::from_diagram_char(ch).ok_or(DiagramError::InvalidChar { ch, row, col })?;
            board.set(Cell::new(row as u8, col as u8), Some(piece));
        }
    }
    Ok(board)
}

/// Encodes a board as a diagram, rows separated by `\n`.
pub fn encode_diagram(board: &Board) -> String {
    board
        .row_slices()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or('.', Piece::diagram_char))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
