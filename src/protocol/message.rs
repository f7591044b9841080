//! Wire messages.
//!
//! Requests arrive as JSON objects tagged by `type`, with the sending
//! client's id alongside. Events leave wrapped in an `Outbound` envelope
//! naming the clients that should receive them. Field names are camelCase
//! on the wire.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::game::GameSnapshot;
use crate::room::{ClientId, Player, RoomId, RoomSettings};

/// A request together with the client that sent it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Inbound {
    pub client: ClientId,
    #[serde(flatten)]
    pub request: Request,
}

/// The origin and destination of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub from: Cell,
    pub to: Cell,
}

/// A client-to-server request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    /// Open a new room and take its first seat.
    CreateRoom {
        username: String,
        #[serde(default)]
        settings: Option<RoomSettings>,
    },

    /// Take the second seat of an existing room, starting the game.
    JoinRoom { room_id: RoomId, username: String },

    /// Select a piece and ask for its legal destinations.
    SelectPiece { room_id: RoomId, cell: Cell },

    /// Move a piece.
    MakeMove {
        room_id: RoomId,
        #[serde(rename = "move")]
        mv: MoveData,
    },

    /// The client's connection closed.
    Disconnect,
}

/// A server-to-client event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Event {
    RoomCreated {
        room_id: RoomId,
    },
    GameStarted {
        players: Vec<Player>,
        game_state: GameSnapshot,
        current_room: RoomId,
    },
    UpdatedState {
        game_state: GameSnapshot,
    },
    JoinError {
        message: String,
    },
    MoveError {
        message: String,
    },
    Error {
        message: String,
    },
    PlayerLeft {
        room_id: RoomId,
        client: ClientId,
    },
}

/// An event addressed to one or more clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outbound {
    pub to: Vec<ClientId>,
    pub event: Event,
}

impl Outbound {
    /// Addresses an event to a single client.
    pub fn reply(client: &str, event: Event) -> Self {
        Outbound {
            to: vec![client.to_string()],
            event,
        }
    }

    /// Addresses an event to several clients.
    pub fn broadcast(to: Vec<ClientId>, event: Event) -> Self {
        Outbound { to, event }
    }
}
