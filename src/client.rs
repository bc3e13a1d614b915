//! Async client that mirrors server room state.
//!
//! [`UnoRoomsClient`] owns the local session (screen, identity, room code,
//! last snapshot), the polling lifecycle, and turn gating. The server is the
//! sole authority on game legality; everything here is a view-sync layer.
//!
//! # Example
//!
//! ```rust,ignore
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

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, warn};

use crate::api::{normalize_room_code, RoomApi};
use crate::error::{Result, UnoRoomsError};
use crate::event::UnoRoomsEvent;
use crate::heuristic::most_common_color;
use crate::protocol::{CardColor, PlayRequest, PlayerId, Room, RoomCode, Rules};

/// Interval between room state fetches while a room code is held.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1200);

/// Default capacity of the bounded event channel.
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;

/// Timeout for the poll loop to exit after being told to stop.
const POLL_STOP_TIMEOUT: Duration = Duration::from_secs(1);

// ── Screen & session state ──────────────────────────────────────────

/// The three mutually exclusive screens of the client.
///
/// Transitions are driven exclusively by successful API responses
/// (create/join → [`Lobby`](Screen::Lobby), start → [`Screen::Game`]) plus
/// the polled discovery of a start triggered by another player. There is no
/// server-push transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Name entry, rule configuration, create/join actions.
    #[default]
    Landing,
    /// Player roster, rule summary, host-only start action.
    Lobby,
    /// Discard, hand, draw/play actions, turn indicator, winner banner.
    Game,
}

/// The client-owned session record: everything local to this instance.
///
/// Discarded on process exit; there is no local persistence. The room
/// snapshot inside is a read-only mirror of server truth.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Which screen the UI should show.
    pub screen: Screen,
    /// Local player's display name.
    pub name: String,
    /// Local player's server-assigned identifier, once in a room.
    pub player_id: Option<PlayerId>,
    /// Current room code; polling runs for as long as this is set.
    pub room_code: Option<RoomCode>,
    /// Last-fetched room snapshot. A failed poll leaves the previous
    /// snapshot in place.
    pub room: Option<Room>,
}

impl Session {
    /// Advisory turn gate: true iff a snapshot is loaded, a local player id
    /// is present, and the player at `current_player_index` is us.
    pub fn my_turn(&self) -> bool {
        match (&self.room, &self.player_id) {
            (Some(room), Some(me)) => is_my_turn(room, me),
            _ => false,
        }
    }
}

/// Whether `player_id` is the player whose turn it currently is.
///
/// False when `current_player_index` is out of range, which only happens on
/// an incoherent snapshot.
pub fn is_my_turn(room: &Room, player_id: &str) -> bool {
    room.current_player()
        .is_some_and(|p| p.player_id == player_id)
}

// ── Configuration ───────────────────────────────────────────────────

/// Configuration for a [`UnoRoomsClient`].
///
/// # Example
///
/// ```
/// use uno_rooms_client::UnoRoomsConfig;
/// use std::time::Duration;
///
/// let config = UnoRoomsConfig::new()
///     .with_poll_interval(Duration::from_millis(500))
///     .with_event_channel_capacity(64);
/// ```
#[derive(Debug, Clone)]
pub struct UnoRoomsConfig {
    /// Interval between poll fetches. Defaults to **1.2 seconds**.
    pub poll_interval: Duration,
    /// Capacity of the bounded event channel.
    ///
    /// When the consumer cannot keep up, events are dropped (with a warning
    /// logged) to avoid blocking the poll loop. Defaults to **256**; values
    /// below 1 are clamped to 1.
    pub event_channel_capacity: usize,
}

impl UnoRoomsConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }

    /// Set the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the capacity of the bounded event channel.
    #[must_use]
    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity.max(1);
        self
    }
}

impl Default for UnoRoomsConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ── Poll handle ─────────────────────────────────────────────────────

/// Owned handle to the running poll loop: stop signal plus the task itself.
///
/// The timer lives inside the task, so releasing the task on every exit
/// path releases the timer.
struct PollHandle {
    stop_tx: oneshot::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

// ── Client ──────────────────────────────────────────────────────────

/// Async handle that keeps a local mirror of server room state.
///
/// Created via [`UnoRoomsClient::start`], which returns the handle together
/// with the event receiver the UI consumes. The polling loop is started on
/// a successful create/join and stopped when the room code is cleared or
/// the client is dropped.
pub struct UnoRoomsClient<A: RoomApi> {
    api: Arc<A>,
    session: Arc<Mutex<Session>>,
    event_tx: mpsc::Sender<UnoRoomsEvent>,
    poll: Option<PollHandle>,
    poll_interval: Duration,
}

impl<A: RoomApi> UnoRoomsClient<A> {
    /// Create a client around the given API gateway.
    ///
    /// Returns the handle plus the event receiver. No network traffic
    /// happens until a room is created or joined.
    #[must_use = "the event receiver must be consumed to observe state changes"]
    pub fn start(api: A, config: UnoRoomsConfig) -> (Self, mpsc::Receiver<UnoRoomsEvent>) {
        // Clamp capacity to at least 1 (tokio panics on 0).
        let capacity = config.event_channel_capacity.max(1);
        let (event_tx, event_rx) = mpsc::channel::<UnoRoomsEvent>(capacity);

        let client = Self {
            api: Arc::new(api),
            session: Arc::new(Mutex::new(Session::default())),
            event_tx,
            poll: None,
            poll_interval: config.poll_interval,
        };

        (client, event_rx)
    }

    // ── Room lifecycle ──────────────────────────────────────────────

    /// Create a room with the given display name and rule configuration.
    ///
    /// On success the session moves to the lobby screen and polling begins.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; local state is untouched on failure
    /// so the action can simply be retried.
    pub async fn create_room(&mut self, name: &str, rules: Rules) -> Result<()> {
        let created = self.api.create_room(name, &rules).await?;
        debug!(code = %created.code, "room created");

        {
            let mut session = self.session.lock().await;
            session.name = name.to_string();
            session.player_id = Some(created.player_id);
            session.room_code = Some(created.code.clone());
            session.room = Some(created.room.clone());
            session.screen = Screen::Lobby;
        }
        emit_event(&self.event_tx, UnoRoomsEvent::ScreenChanged { screen: Screen::Lobby });
        emit_event(&self.event_tx, UnoRoomsEvent::RoomUpdated { room: created.room });

        self.start_polling(created.code);
        Ok(())
    }

    /// Join an existing room by code.
    ///
    /// The code is trimmed and uppercased before transmission. On success
    /// the session moves to the lobby screen and polling begins.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged (e.g. unknown code); local state is
    /// untouched on failure.
    pub async fn join_room(&mut self, code: &str, name: &str) -> Result<()> {
        let code = normalize_room_code(code);
        let joined = self.api.join_room(&code, name).await?;
        debug!(code = %code, "room joined");

        {
            let mut session = self.session.lock().await;
            session.name = name.to_string();
            session.player_id = Some(joined.player_id);
            session.room_code = Some(code.clone());
            session.room = Some(joined.room.clone());
            session.screen = Screen::Lobby;
        }
        emit_event(&self.event_tx, UnoRoomsEvent::ScreenChanged { screen: Screen::Lobby });
        emit_event(&self.event_tx, UnoRoomsEvent::RoomUpdated { room: joined.room });

        self.start_polling(code);
        Ok(())
    }

    /// Leave the current room locally: stop polling, clear the session, and
    /// return to the landing screen.
    ///
    /// Purely local — the server has no leave endpoint; the room simply
    /// stops being polled.
    pub async fn leave_room(&mut self) {
        self.stop_polling().await;

        let mut session = self.session.lock().await;
        session.player_id = None;
        session.room_code = None;
        session.room = None;
        session.screen = Screen::Landing;
        drop(session);

        emit_event(
            &self.event_tx,
            UnoRoomsEvent::ScreenChanged { screen: Screen::Landing },
        );
    }

    // ── Game actions ────────────────────────────────────────────────

    /// Start the game. The server only honors this for the host.
    ///
    /// On success the returned snapshot immediately replaces local state
    /// and the session moves to the game screen.
    ///
    /// # Errors
    ///
    /// Returns [`UnoRoomsError::NotInRoom`] when no room is held, or the
    /// API error unchanged.
    pub async fn start_game(&self) -> Result<()> {
        let (code, me) = self.room_identity().await?;
        let room = self.api.start_game(&code, &me).await?;

        self.apply_snapshot(room, Some(Screen::Game)).await;
        Ok(())
    }

    /// Play the card at `card_index` in the local hand.
    ///
    /// When the card is wild, a replacement color is chosen automatically
    /// via [`most_common_color`] and submitted with the request. The
    /// returned snapshot immediately replaces local state.
    ///
    /// # Errors
    ///
    /// - [`UnoRoomsError::NotInRoom`] when no room is held
    /// - [`UnoRoomsError::NotYourTurn`] when the advisory turn gate is closed
    /// - [`UnoRoomsError::NoSuchCard`] when `card_index` is out of range
    /// - the API error unchanged when the server rejects the play
    pub async fn play_card(&self, card_index: usize) -> Result<()> {
        let (code, me) = self.room_identity().await?;

        // Read the gating snapshot, then release the lock before the network
        // call. The hand may change server-side in between; the server
        // rejects stale indices.
        let chosen_color: Option<CardColor> = {
            let session = self.session.lock().await;
            if !session.my_turn() {
                return Err(UnoRoomsError::NotYourTurn);
            }
            let room = session.room.as_ref().ok_or(UnoRoomsError::NotInRoom)?;
            let hand = &room.player(&me).ok_or(UnoRoomsError::PlayerNotInRoom)?.hand;
            let card = hand
                .get(card_index)
                .ok_or(UnoRoomsError::NoSuchCard(card_index))?;
            (card.color == CardColor::Wild).then(|| most_common_color(hand))
        };

        let request = PlayRequest {
            player_id: me,
            card_index,
            chosen_color,
        };
        let room = self.api.play_card(&code, &request).await?;

        self.apply_snapshot(room, None).await;
        Ok(())
    }

    /// Draw a card from the deck.
    ///
    /// The returned snapshot immediately replaces local state.
    ///
    /// # Errors
    ///
    /// Returns [`UnoRoomsError::NotInRoom`] when no room is held,
    /// [`UnoRoomsError::NotYourTurn`] when the advisory turn gate is
    /// closed, or the API error unchanged.
    pub async fn draw_card(&self) -> Result<()> {
        let (code, me) = self.room_identity().await?;
        {
            let session = self.session.lock().await;
            if !session.my_turn() {
                return Err(UnoRoomsError::NotYourTurn);
            }
        }

        let room = self.api.draw_card(&code, &me).await?;
        self.apply_snapshot(room, None).await;
        Ok(())
    }

    /// Replace the room's rule configuration before the game starts.
    ///
    /// The rules are forwarded verbatim; the server validates them.
    ///
    /// # Errors
    ///
    /// Returns [`UnoRoomsError::NotInRoom`] when no room is held, or the
    /// API error unchanged.
    pub async fn set_rules(&self, rules: Rules) -> Result<()> {
        let code = {
            let session = self.session.lock().await;
            session.room_code.clone().ok_or(UnoRoomsError::NotInRoom)?
        };

        let room = self.api.set_rules(&code, &rules).await?;
        self.apply_snapshot(room, None).await;
        Ok(())
    }

    // ── State accessors ─────────────────────────────────────────────

    /// A clone of the full session record, for rendering.
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// The last-fetched room snapshot, if any.
    pub async fn current_room(&self) -> Option<Room> {
        self.session.lock().await.room.clone()
    }

    /// The current room code, if in a room.
    pub async fn room_code(&self) -> Option<RoomCode> {
        self.session.lock().await.room_code.clone()
    }

    /// The local player's identifier, once assigned by the server.
    pub async fn player_id(&self) -> Option<PlayerId> {
        self.session.lock().await.player_id.clone()
    }

    /// The active screen.
    pub async fn screen(&self) -> Screen {
        self.session.lock().await.screen
    }

    /// Advisory turn gate; see [`is_my_turn`].
    pub async fn my_turn(&self) -> bool {
        self.session.lock().await.my_turn()
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// Room code and local player id, or `NotInRoom`.
    async fn room_identity(&self) -> Result<(RoomCode, PlayerId)> {
        let session = self.session.lock().await;
        match (&session.room_code, &session.player_id) {
            (Some(code), Some(me)) => Ok((code.clone(), me.clone())),
            _ => Err(UnoRoomsError::NotInRoom),
        }
    }

    /// Replace the local snapshot with server truth from a mutating call.
    async fn apply_snapshot(&self, room: Room, screen: Option<Screen>) {
        let mut session = self.session.lock().await;
        let screen_changed = match screen {
            Some(next) if session.screen != next => {
                session.screen = next;
                Some(next)
            }
            _ => None,
        };
        let game_over = apply_room(&mut session, room.clone());
        drop(session);

        if let Some(screen) = screen_changed {
            emit_event(&self.event_tx, UnoRoomsEvent::ScreenChanged { screen });
        }
        emit_event(&self.event_tx, UnoRoomsEvent::RoomUpdated { room });
        if let Some(winner_id) = game_over {
            emit_event(&self.event_tx, UnoRoomsEvent::GameOver { winner_id });
        }
    }

    /// Start the poll loop for `code`, replacing any previous loop.
    fn start_polling(&mut self, code: RoomCode) {
        // A room change tears down the old loop first.
        if let Some(handle) = self.poll.take() {
            let _ = handle.stop_tx.send(());
            handle.task.abort();
        }

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(poll_loop(
            Arc::clone(&self.api),
            code,
            Arc::clone(&self.session),
            self.event_tx.clone(),
            self.poll_interval,
            stop_rx,
        ));
        self.poll = Some(PollHandle { stop_tx, task });
    }

    /// Stop the poll loop gracefully, aborting it if it does not exit in
    /// time. In-flight fetches are allowed to finish; only the timer is
    /// released eagerly.
    async fn stop_polling(&mut self) {
        let Some(handle) = self.poll.take() else {
            return;
        };
        let _ = handle.stop_tx.send(());

        let mut task = handle.task;
        match tokio::time::timeout(POLL_STOP_TIMEOUT, &mut task).await {
            Ok(Ok(())) => {}
            Ok(Err(join_err)) => {
                warn!("poll loop terminated with join error: {join_err}");
            }
            Err(_) => {
                warn!("poll loop did not exit within timeout; aborting task");
                task.abort();
            }
        }
    }
}

impl<A: RoomApi> std::fmt::Debug for UnoRoomsClient<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnoRoomsClient")
            .field("polling", &self.poll.is_some())
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl<A: RoomApi> Drop for UnoRoomsClient<A> {
    fn drop(&mut self) {
        // `Drop` is synchronous, so the graceful stop path is unavailable.
        // Aborting the task drops the loop future, which releases the timer.
        if let Some(handle) = self.poll.take() {
            handle.task.abort();
        }
    }
}

// ── Poll loop ───────────────────────────────────────────────────────

/// Background loop that re-fetches the room on a fixed interval.
///
/// The first tick fires immediately, so entering a room fetches at once and
/// then every `interval` thereafter. Exits when the stop signal arrives or
/// its sender is dropped.
async fn poll_loop<A: RoomApi>(
    api: Arc<A>,
    code: RoomCode,
    session: Arc<Mutex<Session>>,
    event_tx: mpsc::Sender<UnoRoomsEvent>,
    interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    debug!(code = %code, "poll loop started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stop_rx => {
                debug!("poll stop signal received");
                break;
            }
            _ = ticker.tick() => {
                match api.fetch_room(&code).await {
                    Ok(room) => {
                        // A fetch that was in flight when a mutating call
                        // landed can overwrite it with older data here; an
                        // accepted race given the short interval.
                        apply_polled_snapshot(&session, &event_tx, room).await;
                    }
                    Err(e) => {
                        // Keep the previous snapshot; staleness over crash.
                        warn!("poll fetch failed: {e}");
                        emit_event(
                            &event_tx,
                            UnoRoomsEvent::SyncFailed { reason: e.to_string() },
                        );
                    }
                }
            }
        }
    }

    debug!("poll loop exited");
}

/// Apply a polled snapshot: replace the mirror, discover a remotely
/// started game, and report a winner once.
async fn apply_polled_snapshot(
    session: &Arc<Mutex<Session>>,
    event_tx: &mpsc::Sender<UnoRoomsEvent>,
    room: Room,
) {
    let mut session = session.lock().await;

    // A player moved to the game by another player's start action only
    // discovers this on a poll tick.
    let started_remotely = session.screen == Screen::Lobby && room.started();
    if started_remotely {
        session.screen = Screen::Game;
    }
    let game_over = apply_room(&mut session, room.clone());
    drop(session);

    if started_remotely {
        emit_event(event_tx, UnoRoomsEvent::ScreenChanged { screen: Screen::Game });
        emit_event(event_tx, UnoRoomsEvent::GameStarted { room: room.clone() });
    }
    emit_event(event_tx, UnoRoomsEvent::RoomUpdated { room });
    if let Some(winner_id) = game_over {
        emit_event(event_tx, UnoRoomsEvent::GameOver { winner_id });
    }
}

/// Overwrite the session's room mirror. Returns the winner id when this
/// snapshot is the first to carry one.
fn apply_room(session: &mut Session, room: Room) -> Option<PlayerId> {
    let had_winner = session
        .room
        .as_ref()
        .is_some_and(|r| r.winner_id.is_some());
    let winner = room.winner_id.clone();
    session.room = Some(room);
    match winner {
        Some(id) if !had_winner => Some(id),
        _ => None,
    }
}

/// Emit an event to the event channel. If the channel is full, log a
/// warning and drop the event to avoid blocking the poll loop.
fn emit_event(event_tx: &mpsc::Sender<UnoRoomsEvent>, event: UnoRoomsEvent) {
    match event_tx.try_send(event) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(dropped)) => {
            warn!(
                "event channel full, dropping event: {:?}",
                std::mem::discriminant(&dropped)
            );
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            debug!("event channel closed, receiver dropped");
        }
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
    use crate::protocol::Player;

    fn player(id: &str, is_host: bool) -> Player {
        Player {
            player_id: id.to_string(),
            name: id.to_string(),
            is_host,
            hand: vec![],
        }
    }

    fn two_player_room(current_player_index: usize) -> Room {
        Room {
            code: "AB12".into(),
            players: vec![player("A", true), player("B", false)],
            discard_pile: vec![],
            current_player_index,
            rules: Rules::default(),
            winner_id: None,
        }
    }

    #[test]
    fn my_turn_matches_current_player_id() {
        let room = two_player_room(1);
        assert!(is_my_turn(&room, "B"));
        assert!(!is_my_turn(&room, "A"));
    }

    #[test]
    fn my_turn_is_false_on_incoherent_index() {
        let room = two_player_room(5);
        assert!(!is_my_turn(&room, "A"));
        assert!(!is_my_turn(&room, "B"));
    }

    #[test]
    fn session_gate_requires_room_and_identity() {
        let mut session = Session::default();
        assert!(!session.my_turn());

        session.room = Some(two_player_room(0));
        assert!(!session.my_turn());

        session.player_id = Some("A".into());
        assert!(session.my_turn());

        session.player_id = Some("B".into());
        assert!(!session.my_turn());
    }

    #[test]
    fn first_winner_snapshot_is_reported_once() {
        let mut session = Session::default();
        let mut room = two_player_room(0);

        assert_eq!(apply_room(&mut session, room.clone()), None);

        room.winner_id = Some("A".into());
        assert_eq!(apply_room(&mut session, room.clone()), Some("A".into()));

        // Subsequent snapshots with the same winner stay quiet.
        assert_eq!(apply_room(&mut session, room), None);
    }

    #[test]
    fn config_clamps_channel_capacity() {
        let config = UnoRoomsConfig::new().with_event_channel_capacity(0);
        assert_eq!(config.event_channel_capacity, 1);
    }
}
