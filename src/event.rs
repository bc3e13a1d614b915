//! Typed events emitted by the client to drive the UI.

use crate::client::Screen;
use crate::protocol::{PlayerId, Room};

/// Events emitted on the channel returned by
/// [`UnoRoomsClient::start`](crate::client::UnoRoomsClient::start).
///
/// Every event carries enough state for the consumer to re-render without
/// querying the client, keeping the renderer a pure function of its input.
#[derive(Debug, Clone)]
pub enum UnoRoomsEvent {
    /// The active screen changed (landing → lobby → game).
    ScreenChanged { screen: Screen },

    /// A new room snapshot replaced the local mirror, whether from a poll
    /// tick or a mutating call's response.
    RoomUpdated { room: Room },

    /// A polled snapshot revealed that another player started the game
    /// while this client sat in the lobby.
    GameStarted { room: Room },

    /// The first snapshot carrying a winner arrived.
    GameOver { winner_id: PlayerId },

    /// A poll tick failed; the previous snapshot remains in place. Non-fatal
    /// by design — surface it as a banner, not a crash.
    SyncFailed { reason: String },
}
