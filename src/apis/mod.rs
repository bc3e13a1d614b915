//! API gateway implementations for the room server.
//!
//! This module provides concrete [`RoomApi`](crate::RoomApi) implementations
//! behind feature gates. Enable the corresponding Cargo feature to pull in
//! a backend:
//!
//! | Feature    | Backend       |
//! |------------|---------------|
//! | `http-api` | [`HttpRoomApi`] |
//!
//! # Example
//!
//! ```rust,ignore
//! # async fn example() -> Result<(), uno_rooms_client::UnoRoomsError> {
//! use uno_rooms_client::{HttpRoomApi, RoomApi, Rules};
//!
//! let api = HttpRoomApi::from_env()?;
//! let created = api.create_room("Alice", &Rules::default()).await?;
//! println!("room code: {}", created.code);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http-api")]
pub mod http;

#[cfg(feature = "http-api")]
pub use http::{ApiConfig, HttpRoomApi};
