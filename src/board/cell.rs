//! Board coordinates and diagonal directions.
//!
//! Cells are 0-indexed `(row, col)` pairs. Row 0 is the top edge of the
//! board (black's home rank), so white advances toward decreasing rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Cell { row, col }
    }

    /// Returns the cell `steps` squares away along `dir`, or `None` if that
    /// would leave the non-negative quadrant. Upper bounds are the board's job.
    pub fn offset(self, dir: Direction, steps: u8) -> Option<Cell> {
        let row = self.row as i16 + dir.d_row as i16 * steps as i16;
        let col = self.col as i16 + dir.d_col as i16 * steps as i16;
        if row < 0 || col < 0 || row > u8::MAX as i16 || col > u8::MAX as i16 {
            return None;
        }
        Some(Cell::new(row as u8, col as u8))
    }

    /// Returns true if the cell is a dark (playable) square.
    pub const fn is_dark(self) -> bool {
        (self.row ^ self.col) & 1 == 1
    }

    /// If `to` lies on one of the four diagonals through `self`, returns the
    /// direction and the distance in squares.
    pub fn diagonal_to(self, to: Cell) -> Option<(Direction, u8)> {
        let d_row = to.row as i16 - self.row as i16;
        let d_col = to.col as i16 - self.col as i16;
        if d_row == 0 || d_row.abs() != d_col.abs() {
            return None;
        }
        let dir = Direction::new(d_row.signum() as i8, d_col.signum() as i8);
        Some((dir, d_row.unsigned_abs() as u8))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four diagonal unit vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    pub const UP_LEFT: Direction = Direction::new(-1, -1);
    pub const UP_RIGHT: Direction = Direction::new(-1, 1);
    pub const DOWN_LEFT: Direction = Direction::new(1, -1);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);

    const fn new(d_row: i8, d_col: i8) -> Self {
        Direction { d_row, d_col }
    }
}

/// All diagonal directions, in the order move lists are generated.
pub const DIAGONALS: [Direction; 4] = [
    Direction::UP_LEFT,
    Direction::UP_RIGHT,
    Direction::DOWN_LEFT,
    Direction::DOWN_RIGHT,
];
