//! Rooms and the room table.
//!
//! A room seats up to two players around one `GameState`. The table is an
//! owned map from room id to room; whoever dispatches requests holds it and
//! passes it by reference. Every operation runs to completion before the
//! next, so a room's game is only ever touched by one request at a time.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Cell, Color};
use crate::game::{GameState, MoveOutcome, TransitionError};

/// Identifies a connected client.
pub type ClientId = String;

/// Identifies a room.
pub type RoomId = String;

/// Length of generated room ids.
const ROOM_ID_LEN: usize = 6;

/// Maximum number of players in a room.
pub const MAX_PLAYERS: usize = 2;

/// Per-room options chosen at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    /// Accepted and stored, but move generation does not consult it.
    #[serde(default)]
    pub mandatory_captures: bool,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: ClientId,
    pub username: String,
    pub color: Option<Color>,
}

impl Player {
    pub fn new(id: impl Into<ClientId>, username: impl Into<String>) -> Self {
        Player {
            id: id.into(),
            username: username.into(),
            color: None,
        }
    }
}

/// Errors returned by room operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),

    #[error("room '{0}' is full")]
    RoomFull(RoomId),

    #[error("player is already in room '{0}'")]
    AlreadyInRoom(RoomId),

    #[error("player is not in room '{0}'")]
    NotInRoom(RoomId),

    #[error("game in room '{0}' has not started")]
    GameNotStarted(RoomId),

    #[error("it is {0}'s turn")]
    NotYourTurn(Color),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// A session pairing up to two players around one game.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    players: Vec<Player>,
    game: GameState,
    started: bool,
    settings: RoomSettings,
}

impl Room {
    fn new(id: RoomId, owner: Player, settings: RoomSettings) -> Self {
        Room {
            id,
            players: vec![owner],
            game: GameState::new(),
            started: false,
            settings,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn settings(&self) -> RoomSettings {
        self.settings
    }

    /// Returns the seated player with the given client id.
    pub fn player(&self, client: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == client)
    }

    /// Client ids of everyone seated, for broadcasting.
    pub fn member_ids(&self) -> Vec<ClientId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Checks that `client` may act now: seated, game started, and holding
    /// the color to move.
    fn authorize(&self, client: &str) -> Result<(), RoomError> {
        let player = self
            .player(client)
            .ok_or_else(|| RoomError::NotInRoom(self.id.clone()))?;
        if !self.started {
            return Err(RoomError::GameNotStarted(self.id.clone()));
        }
        let to_move = self.game.current_player();
        if player.color != Some(to_move) {
            return Err(RoomError::NotYourTurn(to_move));
        }
        Ok(())
    }
}

/// A client's removal from one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    /// Players still seated; empty if the room was removed.
    pub remaining: Vec<ClientId>,
}

/// Every live room, keyed by id.
pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
    rng: SmallRng,
}

impl RoomTable {
    /// Creates an empty table whose ids and color draws come from `rng`.
    pub fn new(rng: SmallRng) -> Self {
        RoomTable {
            rooms: HashMap::new(),
            rng,
        }
    }

    /// Creates an empty table with a reproducible id sequence.
    pub fn with_seed(seed: u64) -> Self {
        RoomTable::new(SmallRng::seed_from_u64(seed))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn generate_id(&mut self) -> RoomId {
        loop {
            let id: RoomId = (0..ROOM_ID_LEN)
                .map(|_| self.rng.gen_range(b'A'..=b'Z') as char)
                .collect();
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }

    /// Opens a room with `owner` in the first seat and returns its id.
    pub fn create(&mut self, owner: Player, settings: RoomSettings) -> RoomId {
        let id = self.generate_id();
        info!(room = %id, client = %owner.id, username = %owner.username, "room created");
        self.rooms.insert(id.clone(), Room::new(id.clone(), owner, settings));
        id
    }

    pub fn get(&self, id: &str) -> Result<&Room, RoomError> {
        self.rooms
            .get(id)
            .ok_or_else(|| RoomError::RoomNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Room, RoomError> {
        self.rooms
            .get_mut(id)
            .ok_or_else(|| RoomError::RoomNotFound(id.to_string()))
    }

    pub fn remove(&mut self, id: &str) -> Option<Room> {
        self.rooms.remove(id)
    }

    /// Seats `player` as the second player, assigns colors at random, and
    /// starts the game.
    pub fn join(&mut self, id: &str, mut player: Player) -> Result<&Room, RoomError> {
        let white_first = self.rng.gen_bool(0.5);
        let room = self
            .rooms
            .get_mut(id)
            .ok_or_else(|| RoomError::RoomNotFound(id.to_string()))?;
        if room.player(&player.id).is_some() {
            return Err(RoomError::AlreadyInRoom(room.id.clone()));
        }
        if room.started || room.players.len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull(room.id.clone()));
        }

        let (host, guest) = if white_first {
            (Color::White, Color::Black)
        } else {
            (Color::Black, Color::White)
        };
        room.players[0].color = Some(host);
        player.color = Some(guest);
        info!(room = %room.id, client = %player.id, username = %player.username, "player joined, game started");
        room.players.push(player);
        room.started = true;
        Ok(&*room)
    }

    /// Removes `client` from every room it sits in. Rooms left empty are
    /// dropped.
    pub fn leave(&mut self, client: &str) -> Vec<Departure> {
        let mut departures = Vec::new();
        for room in self.rooms.values_mut() {
            if room.player(client).is_none() {
                continue;
            }
            room.players.retain(|p| p.id != client);
            departures.push(Departure {
                room_id: room.id.clone(),
                remaining: room.member_ids(),
            });
        }
        for departure in &departures {
            if departure.remaining.is_empty() {
                debug!(room = %departure.room_id, "room emptied, removing");
                self.rooms.remove(&departure.room_id);
            }
        }
        departures
    }

    /// Selects a piece on behalf of `client`.
    pub fn select_piece(&mut self, id: &str, client: &str, cell: Cell) -> Result<&Room, RoomError> {
        let room = self.get_mut(id)?;
        room.authorize(client)?;
        room.game.select_piece(cell)?;
        Ok(&*room)
    }

    /// Moves a piece on behalf of `client`. If `from` is not the current
    /// selection it is selected first.
    pub fn make_move(
        &mut self,
        id: &str,
        client: &str,
        from: Cell,
        to: Cell,
    ) -> Result<(MoveOutcome, &Room), RoomError> {
        let room = self.get_mut(id)?;
        room.authorize(client)?;
        let outcome = if room.game.active_piece() == Some(from) {
            room.game.move_to(to)?
        } else {
            // A rejected move must not leave the reselection behind.
            let previous = room.game.clone();
            match room.game.select_piece(from).and_then(|()| room.game.move_to(to)) {
                Ok(outcome) => outcome,
                Err(e) => {
                    room.game = previous;
                    return Err(e.into());
                }
            }
        };
        info!(
            room = %room.id,
            %from,
            %to,
            captured = outcome.captured.is_some(),
            promoted = outcome.promoted,
            "move applied"
        );
        if let Some(winner) = outcome.status.winner() {
            info!(room = %room.id, %winner, "game over");
        }
        Ok((outcome, &*room))
    }
}

impl Default for RoomTable {
    fn default() -> Self {
        RoomTable::new(SmallRng::from_entropy())
    }
}
