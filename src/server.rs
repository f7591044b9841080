//! Request dispatch.
//!
//! Owns the room table and turns each inbound request into the events that
//! should be delivered. User mistakes become error events addressed to the
//! sender; they never stop the server.

use tracing::{info, warn};

use crate::board::Cell;
use crate::config::ServerConfig;
use crate::protocol::message::{Event, Inbound, MoveData, Outbound, Request};
use crate::room::{Departure, Player, RoomError, RoomSettings, RoomTable};

/// Holds every room between requests.
pub struct Server {
    rooms: RoomTable,
    default_settings: RoomSettings,
}

impl Server {
    pub fn new(config: &ServerConfig) -> Self {
        let rooms = match config.seed {
            Some(seed) => RoomTable::with_seed(seed),
            None => RoomTable::default(),
        };
        Server {
            rooms,
            default_settings: config.default_settings,
        }
    }

    pub fn rooms(&self) -> &RoomTable {
        &self.rooms
    }

    /// Handles one request and returns the events it produced, in order.
    pub fn handle(&mut self, inbound: Inbound) -> Vec<Outbound> {
        let Inbound { client, request } = inbound;
        match request {
            Request::CreateRoom { username, settings } => self.create_room(&client, username, settings),
            Request::JoinRoom { room_id, username } => self.join_room(&client, &room_id, username),
            Request::SelectPiece { room_id, cell } => self.select_piece(&client, &room_id, cell),
            Request::MakeMove { room_id, mv } => self.make_move(&client, &room_id, mv),
            Request::Disconnect => {
                info!(%client, "client disconnected");
                self.depart(&client)
            }
        }
    }

    fn create_room(
        &mut self,
        client: &str,
        username: String,
        settings: Option<RoomSettings>,
    ) -> Vec<Outbound> {
        // A client sits in at most one room at a time.
        let mut out = self.depart(client);
        let settings = settings.unwrap_or(self.default_settings);
        let room_id = self.rooms.create(Player::new(client, username), settings);
        out.push(Outbound::reply(client, Event::RoomCreated { room_id }));
        out
    }

    fn join_room(&mut self, client: &str, room_id: &str, username: String) -> Vec<Outbound> {
        match self.rooms.join(room_id, Player::new(client, username)) {
            Ok(room) => vec![Outbound::broadcast(
                room.member_ids(),
                Event::GameStarted {
                    players: room.players().to_vec(),
                    game_state: room.game().snapshot(),
                    current_room: room.id().to_string(),
                },
            )],
            Err(e) => {
                warn!(%client, room = %room_id, error = %e, "join rejected");
                vec![Outbound::reply(client, Event::JoinError { message: e.to_string() })]
            }
        }
    }

    fn select_piece(&mut self, client: &str, room_id: &str, cell: Cell) -> Vec<Outbound> {
        match self.rooms.select_piece(room_id, client, cell) {
            Ok(room) => vec![Outbound::broadcast(
                room.member_ids(),
                Event::UpdatedState { game_state: room.game().snapshot() },
            )],
            Err(e) => {
                warn!(%client, room = %room_id, %cell, error = %e, "selection rejected");
                vec![error_reply(client, e)]
            }
        }
    }

    fn make_move(&mut self, client: &str, room_id: &str, mv: MoveData) -> Vec<Outbound> {
        match self.rooms.make_move(room_id, client, mv.from, mv.to) {
            Ok((_, room)) => vec![Outbound::broadcast(
                room.member_ids(),
                Event::UpdatedState { game_state: room.game().snapshot() },
            )],
            Err(e) => {
                warn!(%client, room = %room_id, from = %mv.from, to = %mv.to, error = %e, "move rejected");
                vec![error_reply(client, e)]
            }
        }
    }

    /// Removes `client` from its rooms and tells whoever remains.
    fn depart(&mut self, client: &str) -> Vec<Outbound> {
        self.rooms
            .leave(client)
            .into_iter()
            .filter(|d| !d.remaining.is_empty())
            .map(|Departure { room_id, remaining }| {
                Outbound::broadcast(
                    remaining,
                    Event::PlayerLeft {
                        room_id,
                        client: client.to_string(),
                    },
                )
            })
            .collect()
    }
}

/// Maps a failed selection or move to the event the sender sees.
fn error_reply(client: &str, err: RoomError) -> Outbound {
    let message = err.to_string();
    let event = match err {
        RoomError::RoomNotFound(_) => Event::Error { message },
        _ => Event::MoveError { message },
    };
    Outbound::reply(client, event)
}
