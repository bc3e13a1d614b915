//! API gateway seam for the room server.
//!
//! The [`RoomApi`] trait maps one method onto each server endpoint. Every
//! method is a single request/response exchange with no intermediate state:
//! no retries, no caching, no backoff. A network failure or non-success
//! response surfaces as an `Err` so callers can branch without relying on
//! panics or ad-hoc control flow.
//!
//! Only [`fetch_room`](RoomApi::fetch_room) is idempotent from the client's
//! perspective; every other operation mutates server state.
//!
//! The default `http-api` feature provides [`HttpRoomApi`](crate::apis::http::HttpRoomApi).
//! Tests implement this trait with a scripted mock.
//!
//! # Object Safety
//!
//! The trait is object-safe, so `Arc<dyn RoomApi>` works for dynamic
//! dispatch; [`UnoRoomsClient`](crate::client::UnoRoomsClient) accepts
//! `impl RoomApi` (monomorphized) for the common case.

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{PlayRequest, PlayerId, Room, RoomCreated, RoomJoined, Rules};

/// One async operation per room server endpoint.
///
/// Every method returns the server's authoritative snapshot (or a bootstrap
/// payload carrying the snapshot plus the caller's assigned player id).
#[async_trait]
pub trait RoomApi: Send + Sync + 'static {
    /// `POST /api/rooms/create` — create a room; the caller becomes host.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn create_room(&self, name: &str, rules: &Rules) -> Result<RoomCreated>;

    /// `POST /api/rooms/{code}/join` — join an existing room by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status (e.g. unknown code).
    async fn join_room(&self, code: &str, name: &str) -> Result<RoomJoined>;

    /// `GET /api/rooms/{code}` — fetch the current room snapshot.
    ///
    /// The only idempotent operation; used by the polling loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn fetch_room(&self, code: &str) -> Result<Room>;

    /// `POST /api/rooms/{code}/start?player_id=…` — start the game.
    ///
    /// The server only honors this for the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn start_game(&self, code: &str, player_id: &PlayerId) -> Result<Room>;

    /// `POST /api/rooms/{code}/play` — play a card by hand index.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the play
    /// (stale index, wrong turn, illegal card).
    async fn play_card(&self, code: &str, request: &PlayRequest) -> Result<Room>;

    /// `POST /api/rooms/{code}/draw` — draw a card from the deck.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn draw_card(&self, code: &str, player_id: &PlayerId) -> Result<Room>;

    /// `POST /api/rooms/{code}/rules` — replace the room's rule
    /// configuration before the game starts.
    ///
    /// The rules object is forwarded verbatim; the server validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn set_rules(&self, code: &str, rules: &Rules) -> Result<Room>;
}

/// Normalize a room code for the wire: trim surrounding whitespace and
/// uppercase. The server only knows uppercase codes.
pub fn normalize_room_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
mod tests {
    use super::normalize_room_code;

    #[test]
    fn room_code_is_trimmed_and_uppercased() {
        assert_eq!(normalize_room_code("  ab12 \n"), "AB12");
        assert_eq!(normalize_room_code("xYz9"), "XYZ9");
    }

    #[test]
    fn already_normal_code_is_unchanged() {
        assert_eq!(normalize_room_code("ROOM42"), "ROOM42");
    }
}
