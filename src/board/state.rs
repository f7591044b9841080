//! Board representation.
//!
//! A rectangular grid of optional pieces stored row-major in a flat vector.
//! Off-board lookups are reported as `None`/`false` rather than panicking,
//! since cells arrive from clients unvalidated.

use serde::ser::{Serialize, Serializer};

use super::cell::Cell;
use super::piece::{Color, Piece};

/// Side length of the standard board.
pub const STANDARD_SIZE: u8 = 8;

/// Number of rows each side fills in the standard setup.
pub const HOME_ROWS: u8 = 3;

/// Complete piece placement at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    cols: u8,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn new(rows: u8, cols: u8) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        Board {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Creates an empty 8x8 board.
    pub fn empty() -> Self {
        Board::new(STANDARD_SIZE, STANDARD_SIZE)
    }

    /// Creates the standard 8x8 starting position.
    pub fn standard() -> Self {
        crate::rules::initial_board()
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Returns true if the cell lies on the board.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.cols as usize + cell.col as usize)
        } else {
            None
        }
    }

    /// Returns the piece at a cell, or `None` if the cell is empty or off the board.
    pub fn get(&self, cell: Cell) -> Option<Piece> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Returns true if the cell is on the board and holds no piece.
    pub fn is_vacant(&self, cell: Cell) -> bool {
        matches!(self.index(cell), Some(i) if self.cells[i].is_none())
    }

    /// Writes a cell. Returns false if the cell is off the board.
    pub fn set(&mut self, cell: Cell, piece: Option<Piece>) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = piece;
                true
            }
            None => false,
        }
    }

    /// Places a piece on an empty cell. Returns false if the cell is occupied or off the board.
    pub fn place(&mut self, cell: Cell, piece: Piece) -> bool {
        if !self.is_vacant(cell) {
            return false;
        }
        self.set(cell, Some(piece))
    }

    /// Removes and returns the piece at a cell.
    pub fn take(&mut self, cell: Cell) -> Option<Piece> {
        self.index(cell).and_then(|i| self.cells[i].take())
    }

    /// Number of pieces of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|p| matches!(p, Some(piece) if piece.color == color))
            .count()
    }

    /// Number of pieces of both colors.
    pub fn total(&self) -> usize {
        self.cells.iter().filter(|p| p.is_some()).count()
    }

    /// Iterates over occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().filter_map(move |(i, p)| {
            p.map(|piece| (Cell::new((i / cols) as u8, (i % cols) as u8), piece))
        })
    }

    /// Iterates over the rows, top to bottom.
    pub fn row_slices(&self) -> impl Iterator<Item = &[Option<Piece>]> + '_ {
        self.cells.chunks(self.cols as usize)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

/// Serializes as a list of rows, each a list of `null` or `{color, type}`.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.row_slices())
    }
}
