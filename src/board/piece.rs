//! Piece colors and kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a regular piece's forward step.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the row on which a regular piece of this color is promoted.
    pub const fn promotion_row(self, rows: u8) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => rows - 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a piece is a regular man or a promoted king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Regular,
    King,
}

/// A piece on the board. Promotion produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: PieceKind,
}

impl Piece {
    pub const fn regular(color: Color) -> Self {
        Piece { color, kind: PieceKind::Regular }
    }

    pub const fn king(color: Color) -> Self {
        Piece { color, kind: PieceKind::King }
    }

    pub const fn is_king(self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns the king of the same color. Kings are returned unchanged.
    pub const fn promoted(self) -> Self {
        Piece::king(self.color)
    }

    /// Returns the single-character diagram symbol.
    pub const fn diagram_char(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Regular) => 'w',
            (Color::White, PieceKind::King) => 'W',
            (Color::Black, PieceKind::Regular) => 'b',
            (Color::Black, PieceKind::King) => 'B',
        }
    }

    /// Parses a piece from its diagram symbol.
    pub fn from_diagram_char(c: char) -> Option<Piece> {
        match c {
            'w' => Some(Piece::regular(Color::White)),
            'W' => Some(Piece::king(Color::White)),
            'b' => Some(Piece::regular(Color::Black)),
            'B' => Some(Piece::king(Color::Black)),
            _ => None,
        }
    }
}
