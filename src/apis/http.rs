//! HTTP implementation of [`RoomApi`] using `reqwest`.
//!
//! One request per operation, no retries, no client-side rate limiting.
//! JSON bodies are sent with `Content-Type: application/json`; non-success
//! responses map to [`UnoRoomsError::Api`] with the response body preserved
//! where it is readable.
//!
//! # Feature gate
//!
//! This module is only available when the `http-api` feature is enabled
//! (it is enabled by default).
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), uno_rooms_client::UnoRoomsError> {
//! use uno_rooms_client::{ApiConfig, HttpRoomApi, RoomApi};
//!
//! let api = HttpRoomApi::new(ApiConfig::new("http://localhost:8000"))?;
//! let room = api.fetch_room("AB12").await?;
//! println!("{} player(s)", room.players.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::{normalize_room_code, RoomApi};
use crate::error::{Result, UnoRoomsError};
use crate::protocol::{
    CreateRoomRequest, DrawRequest, JoinRoomRequest, PlayRequest, PlayerId, Room, RoomCreated,
    RoomJoined, Rules,
};

/// Environment variable overriding the server base URL.
pub const BACKEND_URL_ENV: &str = "UNO_BACKEND_URL";

/// Base URL used when [`BACKEND_URL_ENV`] is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

// ── Configuration ───────────────────────────────────────────────────

/// Configuration for an [`HttpRoomApi`].
///
/// # Example
///
/// ```
/// use uno_rooms_client::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new("http://localhost:8000/")
///     .with_request_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url, "http://localhost:8000");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout applied to every operation.
    pub request_timeout: std::time::Duration,
}

impl ApiConfig {
    /// Create a configuration for the given base URL.
    ///
    /// A trailing slash on the URL is stripped so endpoint paths can be
    /// appended uniformly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read the base URL from [`BACKEND_URL_ENV`], falling back to
    /// [`DEFAULT_BACKEND_URL`].
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to **10 seconds**.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ── HttpRoomApi ─────────────────────────────────────────────────────

/// A [`RoomApi`] implementation backed by `reqwest`.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpRoomApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoomApi {
    /// Build an HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UnoRoomsError::Http`] if the underlying client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Build an HTTP client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`UnoRoomsError::Http`] if the underlying client cannot be
    /// constructed.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env())
    }

    /// The configured server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn room_url(&self, code: &str, suffix: &str) -> String {
        format!(
            "{}/api/rooms/{}{}",
            self.base_url,
            normalize_room_code(code),
            suffix
        )
    }

    /// Check the response status and decode the JSON body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %message, "server rejected request");
            return Err(UnoRoomsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RoomApi for HttpRoomApi {
    async fn create_room(&self, name: &str, rules: &Rules) -> Result<RoomCreated> {
        let url = format!("{}/api/rooms/create", self.base_url);
        let body = CreateRoomRequest {
            name: name.to_string(),
            rules: rules.clone(),
        };
        let response = self.client.post(url).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn join_room(&self, code: &str, name: &str) -> Result<RoomJoined> {
        let url = self.room_url(code, "/join");
        let body = JoinRoomRequest {
            name: name.to_string(),
        };
        let response = self.client.post(url).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn fetch_room(&self, code: &str) -> Result<Room> {
        let url = self.room_url(code, "");
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn start_game(&self, code: &str, player_id: &PlayerId) -> Result<Room> {
        let url = self.room_url(code, "/start");
        let response = self
            .client
            .post(url)
            .query(&[("player_id", player_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn play_card(&self, code: &str, request: &PlayRequest) -> Result<Room> {
        let url = self.room_url(code, "/play");
        let response = self.client.post(url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn draw_card(&self, code: &str, player_id: &PlayerId) -> Result<Room> {
        let url = self.room_url(code, "/draw");
        let body = DrawRequest {
            player_id: player_id.clone(),
        };
        let response = self.client.post(url).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn set_rules(&self, code: &str, rules: &Rules) -> Result<Room> {
        let url = self.room_url(code, "/rules");
        let response = self.client.post(url).json(rules).send().await?;
        Self::decode(response).await
    }
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
    use super::*;

    #[test]
    fn config_strips_trailing_slash() {
        let config = ApiConfig::new("http://example.com:8000/");
        assert_eq!(config.base_url, "http://example.com:8000");
    }

    #[test]
    fn room_urls_normalize_the_code() {
        let api = HttpRoomApi::new(ApiConfig::new("http://localhost:8000")).unwrap();
        assert_eq!(
            api.room_url(" ab12 ", "/play"),
            "http://localhost:8000/api/rooms/AB12/play"
        );
        assert_eq!(api.room_url("XY99", ""), "http://localhost:8000/api/rooms/XY99");
    }
}
