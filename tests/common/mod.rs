#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
//! Shared test utilities for UNO rooms client integration tests.
//!
//! Provides [`MockRoomApi`], an in-memory [`RoomApi`] whose "server" room
//! is a shared handle tests mutate to script server-side changes, plus
//! fixture builders for rooms, players, and cards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use uno_rooms_client::error::{Result, UnoRoomsError};
use uno_rooms_client::protocol::{
    Card, CardColor, PlayRequest, Player, PlayerId, Room, RoomCreated, RoomJoined, Rules,
};
use uno_rooms_client::RoomApi;

// ── Recorded calls ──────────────────────────────────────────────────

/// Every API call the client makes, captured with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Create { name: String, rules: Rules },
    Join { code: String, name: String },
    Fetch { code: String },
    Start { code: String, player_id: PlayerId },
    Play { code: String, request: PlayRequest },
    Draw { code: String, player_id: PlayerId },
    SetRules { code: String, rules: Rules },
}

// ── MockRoomApi ─────────────────────────────────────────────────────

/// An in-memory mock of the room server.
///
/// The current "server" room lives behind a shared handle; tests overwrite
/// it to simulate server-side changes between calls. Every operation
/// records itself and returns a clone of the current room (bootstrap
/// payloads for create/join).
pub struct MockRoomApi {
    /// The room every operation returns.
    pub room: Arc<StdMutex<Room>>,
    /// Calls made by the client, in order.
    pub calls: Arc<StdMutex<Vec<RecordedCall>>>,
    /// When set, `fetch_room` fails with a scripted error.
    pub fail_fetch: Arc<AtomicBool>,
    /// Player id assigned on create/join.
    pub assigned_player_id: PlayerId,
}

impl MockRoomApi {
    /// Build a mock around the given initial room, assigning `player_id`
    /// on create/join. Returns the mock plus shared handles for scripting
    /// and inspection.
    pub fn new(
        room: Room,
        player_id: &str,
    ) -> (
        Self,
        Arc<StdMutex<Room>>,
        Arc<StdMutex<Vec<RecordedCall>>>,
        Arc<AtomicBool>,
    ) {
        let room = Arc::new(StdMutex::new(room));
        let calls = Arc::new(StdMutex::new(Vec::new()));
        let fail_fetch = Arc::new(AtomicBool::new(false));
        let api = Self {
            room: Arc::clone(&room),
            calls: Arc::clone(&calls),
            fail_fetch: Arc::clone(&fail_fetch),
            assigned_player_id: player_id.to_string(),
        };
        (api, room, calls, fail_fetch)
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn current_room(&self) -> Room {
        self.room.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomApi for MockRoomApi {
    async fn create_room(&self, name: &str, rules: &Rules) -> Result<RoomCreated> {
        self.record(RecordedCall::Create {
            name: name.to_string(),
            rules: rules.clone(),
        });
        let room = self.current_room();
        Ok(RoomCreated {
            code: room.code.clone(),
            player_id: self.assigned_player_id.clone(),
            room,
        })
    }

    async fn join_room(&self, code: &str, name: &str) -> Result<RoomJoined> {
        self.record(RecordedCall::Join {
            code: code.to_string(),
            name: name.to_string(),
        });
        Ok(RoomJoined {
            player_id: self.assigned_player_id.clone(),
            room: self.current_room(),
        })
    }

    async fn fetch_room(&self, code: &str) -> Result<Room> {
        self.record(RecordedCall::Fetch {
            code: code.to_string(),
        });
        if self.fail_fetch.load(Ordering::Relaxed) {
            return Err(UnoRoomsError::Api {
                status: 503,
                message: "scripted outage".into(),
            });
        }
        Ok(self.current_room())
    }

    async fn start_game(&self, code: &str, player_id: &PlayerId) -> Result<Room> {
        self.record(RecordedCall::Start {
            code: code.to_string(),
            player_id: player_id.clone(),
        });
        Ok(self.current_room())
    }

    async fn play_card(&self, code: &str, request: &PlayRequest) -> Result<Room> {
        self.record(RecordedCall::Play {
            code: code.to_string(),
            request: request.clone(),
        });
        Ok(self.current_room())
    }

    async fn draw_card(&self, code: &str, player_id: &PlayerId) -> Result<Room> {
        self.record(RecordedCall::Draw {
            code: code.to_string(),
            player_id: player_id.clone(),
        });
        Ok(self.current_room())
    }

    async fn set_rules(&self, code: &str, rules: &Rules) -> Result<Room> {
        self.record(RecordedCall::SetRules {
            code: code.to_string(),
            rules: rules.clone(),
        });
        Ok(self.current_room())
    }
}

// ── Fixture builders ────────────────────────────────────────────────

/// A card with the given color and value.
pub fn card(color: CardColor, value: &str) -> Card {
    Card::new(color, value)
}

/// A player fixture.
pub fn player(id: &str, name: &str, is_host: bool, hand: Vec<Card>) -> Player {
    Player {
        player_id: id.to_string(),
        name: name.to_string(),
        is_host,
        hand,
    }
}

/// A pre-game lobby room: two players, empty discard pile.
pub fn lobby_room(code: &str) -> Room {
    Room {
        code: code.to_string(),
        players: vec![
            player("P1", "Alice", true, vec![]),
            player("P2", "Bob", false, vec![]),
        ],
        discard_pile: vec![],
        current_player_index: 0,
        rules: Rules::default(),
        winner_id: None,
    }
}

/// An in-game room where `P1` (the host) holds `hand` and it is the turn
/// of the player at `current_player_index`.
pub fn game_room(code: &str, hand: Vec<Card>, current_player_index: usize) -> Room {
    Room {
        code: code.to_string(),
        players: vec![
            player("P1", "Alice", true, hand),
            player("P2", "Bob", false, vec![card(CardColor::Green, "3")]),
        ],
        discard_pile: vec![card(CardColor::Red, "7")],
        current_player_index,
        rules: Rules::default(),
        winner_id: None,
    }
}

/// Count the `Fetch` calls recorded so far.
pub fn fetch_count(calls: &Arc<StdMutex<Vec<RecordedCall>>>) -> usize {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| matches!(c, RecordedCall::Fetch { .. }))
        .count()
}

/// Let spawned tasks (the poll loop) run until they block again.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
