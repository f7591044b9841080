//! Per-room game state.
//!
//! Tracks the board, the side to move, the current selection and its legal
//! destinations, and whether the game has ended. Selections and moves are
//! the only transitions; everything else is read through `snapshot`.
//!
//! The turn passes after every applied move, including captures that could
//! continue with another jump. `MoveOutcome::can_continue` reports that
//! case without acting on it.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::board::{Board, Cell, Color};
use crate::rules::{self, GameStatus, RuleError};

/// Reasons a selection or move was rejected. The state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("the game is over")]
    GameOver,

    #[error("cell {0} is off the board")]
    OffBoard(Cell),

    #[error("no piece is selected")]
    NoActivePiece,

    #[error("{to} is not a legal destination for the selected piece")]
    DestinationNotLegal { to: Cell },

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// What an applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Cell,
    pub to: Cell,
    pub captured: Option<Cell>,
    pub promoted: bool,
    /// The moved piece could capture again from `to`.
    pub can_continue: bool,
    pub status: GameStatus,
}

/// Read-only view sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Color,
    pub is_game_over: bool,
    pub winner: Option<Color>,
    pub active_piece: Option<Cell>,
    pub possible_moves: Vec<Cell>,
}

/// Authoritative state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    status: GameStatus,
    active_piece: Option<Cell>,
    possible_moves: Vec<Cell>,
}

impl GameState {
    /// Creates a game on the standard board with white to move.
    pub fn new() -> Self {
        GameState::from_board(rules::initial_board(), Color::White)
    }

    /// Creates a game from an arbitrary position.
    ///
    /// The status starts in progress; it is only evaluated after a move.
    pub fn from_board(board: Board, current_player: Color) -> Self {
        GameState {
            board,
            current_player,
            status: GameStatus::InProgress,
            active_piece: None,
            possible_moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }

    pub fn active_piece(&self) -> Option<Cell> {
        self.active_piece
    }

    pub fn possible_moves(&self) -> &[Cell] {
        &self.possible_moves
    }

    /// Selects the piece at `cell` and computes its legal destinations.
    ///
    /// Selecting an empty cell or an opponent's piece is accepted: the cell
    /// becomes the active piece with no destinations.
    pub fn select_piece(&mut self, cell: Cell) -> Result<(), TransitionError> {
        if self.is_game_over() {
            return Err(TransitionError::GameOver);
        }
        if !self.board.contains(cell) {
            return Err(TransitionError::OffBoard(cell));
        }

        let moves = match rules::possible_moves(&self.board, self.current_player, cell) {
            Ok(moves) => moves,
            Err(RuleError::PieceNotFound(_)) => {
                debug!(%cell, "selected an empty cell");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        self.active_piece = Some(cell);
        self.possible_moves = moves;
        Ok(())
    }

    /// Moves the active piece to `to`, passes the turn, and re-evaluates
    /// whether the game is over.
    pub fn move_to(&mut self, to: Cell) -> Result<MoveOutcome, TransitionError> {
        if self.is_game_over() {
            return Err(TransitionError::GameOver);
        }
        let from = self.active_piece.ok_or(TransitionError::NoActivePiece)?;
        if !self.possible_moves.contains(&to) {
            return Err(TransitionError::DestinationNotLegal { to });
        }

        let applied = rules::play_move(from, to, &self.board).map_err(|e| {
            // Destinations were derived from this board, so this is a defect.
            error!(%from, %to, error = %e, "offered destination rejected by rules");
            TransitionError::from(e)
        })?;
        let can_continue = rules::can_continue_capture(&applied.board, to)?;

        let mover = self.current_player;
        self.board = applied.board;
        self.active_piece = None;
        self.possible_moves.clear();
        self.current_player = mover.opponent();
        self.status = rules::check_game_over(&self.board, mover);

        Ok(MoveOutcome {
            from,
            to,
            captured: applied.captured,
            promoted: applied.promoted,
            can_continue,
            status: self.status,
        })
    }

    /// Returns a copy of the state for broadcasting.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current_player: self.current_player,
            is_game_over: self.is_game_over(),
            winner: self.winner(),
            active_piece: self.active_piece,
            possible_moves: self.possible_moves.clone(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
