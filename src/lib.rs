//! Checkers engine library.
//!
//! Exposes the board model, move generation, rules, game state, rooms, and
//! protocol modules for use by the server and self-play binaries and by
//! integration tests.

pub mod board;
pub mod config;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod room;
pub mod rules;
pub mod selfplay;
pub mod server;
