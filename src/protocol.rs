//! Wire types for the UNO with Friends room server HTTP API.
//!
//! Every type in this module produces JSON identical to what the server
//! emits and accepts. The server is the sole authority on game state; these
//! types are a read-only mirror plus the request bodies the client sends.
//!
//! Response shapes:
//!
//! - `POST /api/rooms/create` → [`RoomCreated`]
//! - `POST /api/rooms/{code}/join` → [`RoomJoined`]
//! - every other endpoint → a bare [`Room`] snapshot

use serde::{Deserialize, Serialize};

// ── Type aliases ────────────────────────────────────────────────────

/// Opaque server-issued player identifier.
pub type PlayerId = String;

/// Short alphanumeric room code (uppercase on the wire).
pub type RoomCode = String;

// ── Enums ───────────────────────────────────────────────────────────

/// Color of a card face.
///
/// Serialized lowercase on the wire (`"red"`, `"wild"`, …).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
    /// Color is chosen by the player at play time.
    Wild,
}

impl CardColor {
    /// The four standard colors in their fixed tie-break order.
    pub const STANDARD: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Yellow,
        CardColor::Green,
        CardColor::Blue,
    ];

    /// Lowercase wire name of the color.
    pub fn as_str(self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Yellow => "yellow",
            CardColor::Green => "green",
            CardColor::Blue => "blue",
            CardColor::Wild => "wild",
        }
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule set the room plays under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RulesVersion {
    #[default]
    Classic,
    Party,
}

impl RulesVersion {
    /// Lowercase wire name of the version.
    pub fn as_str(self) -> &'static str {
        match self {
            RulesVersion::Classic => "classic",
            RulesVersion::Party => "party",
        }
    }
}

impl std::fmt::Display for RulesVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Structs ─────────────────────────────────────────────────────────

/// A single card: color plus a numeral or action label.
///
/// Immutable from the client's perspective once dealt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub color: CardColor,
    /// Numeral (`"7"`) or action label (`"skip"`, `"draw_two"`, `"wild"`, …).
    /// Never interpreted client-side.
    pub value: String,
}

impl Card {
    /// Convenience constructor used heavily in tests and fixtures.
    pub fn new(color: CardColor, value: impl Into<String>) -> Self {
        Self {
            color,
            value: value.into(),
        }
    }
}

/// Rule configuration forwarded verbatim to the server.
///
/// The client never validates these values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Rules {
    #[serde(default)]
    pub version: RulesVersion,
    /// Allow stacking draw cards onto draw cards.
    #[serde(default)]
    pub stacking: bool,
    /// Enable the 7/0 hand-swap effect.
    #[serde(default)]
    pub seven_o: bool,
    /// Allow playing an identical card out of turn.
    #[serde(default)]
    pub jump_in: bool,
}

impl Rules {
    /// Set the rules version.
    #[must_use]
    pub fn with_version(mut self, version: RulesVersion) -> Self {
        self.version = version;
        self
    }

    /// Enable or disable stacking.
    #[must_use]
    pub fn with_stacking(mut self, stacking: bool) -> Self {
        self.stacking = stacking;
        self
    }

    /// Enable or disable the 7/0 hand-swap effect.
    #[must_use]
    pub fn with_seven_o(mut self, seven_o: bool) -> Self {
        self.seven_o = seven_o;
        self
    }

    /// Enable or disable jump-in.
    #[must_use]
    pub fn with_jump_in(mut self, jump_in: bool) -> Self {
        self.jump_in = jump_in;
        self
    }
}

/// A player as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    /// Exactly one player per room is host.
    #[serde(default)]
    pub is_host: bool,
    /// Ordered hand; card order is stable across refreshes, so plays are
    /// submitted by index into this sequence.
    #[serde(default)]
    pub hand: Vec<Card>,
}

/// Full room snapshot. Owned by the server; the client holds a read-only
/// cached copy refreshed by polling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    #[serde(default)]
    pub code: RoomCode,
    pub players: Vec<Player>,
    /// Ordered discard sequence; the last element is the active top card.
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    /// Always a valid index into `players`.
    #[serde(default)]
    pub current_player_index: usize,
    #[serde(default)]
    pub rules: Rules,
    /// Set once a player has emptied their hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<PlayerId>,
}

impl Room {
    /// The player whose turn it currently is, if the snapshot is coherent.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Look up a player by identifier.
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// The room's host, if present in the roster.
    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    /// Top of the discard pile. `None` until the game has started.
    pub fn top_of_discard(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Whether the game has started (the discard pile is non-empty once it
    /// has).
    pub fn started(&self) -> bool {
        !self.discard_pile.is_empty()
    }

    /// The winning player, once `winner_id` is set.
    pub fn winner(&self) -> Option<&Player> {
        self.winner_id.as_deref().and_then(|id| self.player(id))
    }
}

// ── Request bodies ──────────────────────────────────────────────────

/// Body for `POST /api/rooms/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub rules: Rules,
}

/// Body for `POST /api/rooms/{code}/join`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub name: String,
}

/// Body for `POST /api/rooms/{code}/play`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayRequest {
    pub player_id: PlayerId,
    /// Index into the acting player's hand at the time the request is made.
    /// The server rejects stale indices; the client does not guard the race.
    pub card_index: usize,
    /// Replacement color, required by the server when the played card is
    /// wild. Omitted from the JSON body otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_color: Option<CardColor>,
}

/// Body for `POST /api/rooms/{code}/draw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRequest {
    pub player_id: PlayerId,
}

// ── Response payloads ───────────────────────────────────────────────

/// Bootstrap payload returned by `POST /api/rooms/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreated {
    pub code: RoomCode,
    /// The caller's assigned identifier (the room's host).
    pub player_id: PlayerId,
    pub room: Room,
}

/// Bootstrap payload returned by `POST /api/rooms/{code}/join`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomJoined {
    /// The caller's assigned identifier.
    pub player_id: PlayerId,
    pub room: Room,
}
