//! Board representation.
//!
//! Contains cells and diagonal directions, piece colors and kinds, and the
//! grid that holds them.

pub mod cell;
pub mod piece;
pub mod state;

pub use cell::{Cell, Direction, DIAGONALS};
pub use piece::{Color, Piece, PieceKind};
pub use state::{Board, HOME_ROWS, STANDARD_SIZE};
