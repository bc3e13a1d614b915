//! # UNO Rooms Client
//!
//! Async Rust client for the UNO with Friends room server HTTP API.
//!
//! The server owns all game rules, turn logic, and state; this crate keeps
//! a local mirror of a room fresh through a fixed-interval polling loop and
//! exposes the handful of actions a player can take.
//!
//! ## Features
//!
//! - **Mockable API seam** — implement the [`RoomApi`] trait for any backend
//! - **HTTP built-in** — the default `http-api` feature provides [`HttpRoomApi`]
//! - **Event-driven** — receive typed [`UnoRoomsEvent`]s via a channel
//! - **Advisory turn gating** — actions are refused client-side off-turn;
//!   the server remains the sole authority
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use uno_rooms_client::{HttpRoomApi, Rules, UnoRoomsClient, UnoRoomsConfig, UnoRoomsEvent};
//!
//! let api = HttpRoomApi::from_env()?;
//! let (mut client, mut events) = UnoRoomsClient::start(api, UnoRoomsConfig::default());
//!
//! client.create_room("Alice", Rules::default()).await?;
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         UnoRoomsEvent::RoomUpdated { room } => { /* re-render */ }
//!         UnoRoomsEvent::GameOver { winner_id } => break,
//!         _ => {}
//!     }
//! }
//! ```

pub mod api;
pub mod apis;
pub mod client;
pub mod error;
pub mod event;
pub mod heuristic;
pub mod protocol;
pub mod render;

// Re-export primary types for ergonomic imports.
pub use api::RoomApi;
pub use client::{Screen, Session, UnoRoomsClient, UnoRoomsConfig, POLL_INTERVAL};
pub use error::UnoRoomsError;
pub use event::UnoRoomsEvent;
pub use heuristic::most_common_color;
pub use protocol::{Card, CardColor, Player, Room, Rules, RulesVersion};

#[cfg(feature = "http-api")]
pub use apis::http::{ApiConfig, HttpRoomApi};
