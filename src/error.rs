//! Error types for the UNO rooms client.

use thiserror::Error;

/// Errors that can occur when using the UNO rooms client.
#[derive(Debug, Error)]
pub enum UnoRoomsError {
    /// The HTTP request itself failed (connection refused, DNS, timeout, …).
    #[cfg(feature = "http-api")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, where one was readable.
        message: String,
    },

    /// Failed to serialize or deserialize an API payload.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Attempted a room operation before creating or joining a room.
    #[error("not in a room")]
    NotInRoom,

    /// Attempted to play or draw outside the local player's turn.
    ///
    /// Advisory gating only; the server independently rejects illegal
    /// actions by players this client never sees.
    #[error("not your turn")]
    NotYourTurn,

    /// Attempted to play a card index that is not in the local hand.
    #[error("no card at index {0} in hand")]
    NoSuchCard(usize),

    /// The local player is missing from the latest room snapshot.
    #[error("local player not found in room")]
    PlayerNotInRoom,
}

/// A specialized [`Result`] type for UNO rooms client operations.
pub type Result<T> = std::result::Result<T, UnoRoomsError>;
