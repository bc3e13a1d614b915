//! Pure text renderers for the three client screens.
//!
//! [`render`] maps `(session, draft rules)` to a `String` with no I/O and
//! no interior state, so the same inputs always produce the same output.
//! The three screens are mutually exclusive; which one renders is decided
//! solely by [`Session::screen`].
//!
//! The draft rules are the landing screen's rule configuration before a
//! room exists; once in a room the server's rules render instead.

use crate::client::{Screen, Session};
use crate::protocol::{Card, Player, Rules};

/// Render the active screen to text.
pub fn render(session: &Session, draft_rules: &Rules) -> String {
    match session.screen {
        Screen::Landing => render_landing(&session.name, draft_rules),
        Screen::Lobby => render_lobby(session),
        Screen::Game => render_game(session),
    }
}

/// Card label: lowercase color plus uppercased value, e.g. `[red 5]`,
/// `[wild WILD_DRAW_FOUR]`.
pub fn card_label(card: &Card) -> String {
    format!("[{} {}]", card.color, card.value.to_uppercase())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}

fn rules_summary(rules: &Rules) -> String {
    format!(
        "Version: {}\nStacking: {}\n7-0: {}\nJump-in: {}",
        rules.version,
        on_off(rules.stacking),
        on_off(rules.seven_o),
        on_off(rules.jump_in),
    )
}

// ── Landing ─────────────────────────────────────────────────────────

/// Name entry, rule configuration, create/join actions.
pub fn render_landing(name: &str, draft_rules: &Rules) -> String {
    let mut out = String::new();
    out.push_str("== UNO with Friends ==\n");
    out.push_str("Create a room, share the code, and play.\n\n");
    if name.is_empty() {
        out.push_str("Name: <enter your name>\n");
    } else {
        out.push_str(&format!("Name: {name}\n"));
    }
    out.push('\n');
    out.push_str(&rules_summary(draft_rules));
    out.push_str("\n\n[create]  or  [join <CODE>]\n");
    out
}

// ── Lobby ───────────────────────────────────────────────────────────

fn roster_line(player: &Player, me: Option<&str>) -> String {
    let mut line = format!("  - {}", player.name);
    if player.is_host {
        line.push_str(" (Host)");
    }
    if Some(player.player_id.as_str()) == me {
        line.push_str(" (you)");
    }
    line
}

/// Player roster, rule summary, host-only start action.
pub fn render_lobby(session: &Session) -> String {
    let Some(room) = &session.room else {
        return "Waiting for room state…\n".to_string();
    };
    let code = session.room_code.as_deref().unwrap_or(&room.code);
    let me = session.player_id.as_deref();

    let mut out = String::new();
    out.push_str(&format!("== Room {code} ==\n"));
    out.push_str("Share this code with your friends.\n\n");

    out.push_str(&format!("Players ({}):\n", room.players.len()));
    for player in &room.players {
        out.push_str(&roster_line(player, me));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&rules_summary(&room.rules));
    out.push('\n');

    let i_am_host = room.host().map(|h| h.player_id.as_str()) == me && me.is_some();
    if i_am_host {
        out.push_str("\n[start] to begin the game\n");
    } else {
        out.push_str("\nWaiting for the host to start…\n");
    }
    out
}

// ── Game ────────────────────────────────────────────────────────────

/// Top-of-discard, hand, draw/play actions, turn indicator, winner banner.
pub fn render_game(session: &Session) -> String {
    let Some(room) = &session.room else {
        return "Waiting for room state…\n".to_string();
    };
    let code = session.room_code.as_deref().unwrap_or(&room.code);
    let my_turn = session.my_turn();

    let mut out = String::new();
    let turn_name = room
        .current_player()
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    out.push_str(&format!(
        "Room {code} • {} • Turn: {turn_name}\n",
        room.rules.version.as_str().to_uppercase()
    ));

    if let Some(winner_id) = &room.winner_id {
        let winner_name = room
            .winner()
            .map(|p| p.name.as_str())
            .unwrap_or(winner_id.as_str());
        out.push_str(&format!("*** Winner: {winner_name} ***\n"));
    }

    out.push('\n');
    match room.top_of_discard() {
        Some(top) => out.push_str(&format!("Discard: {}\n", card_label(top))),
        None => out.push_str("Discard: (empty)\n"),
    }
    if my_turn {
        out.push_str("[draw] available\n");
    } else {
        out.push_str("[draw] unavailable (not your turn)\n");
    }

    out.push('\n');
    let hand = session
        .player_id
        .as_deref()
        .and_then(|me| room.player(me))
        .map(|p| p.hand.as_slice())
        .unwrap_or(&[]);
    out.push_str(&format!("Your hand ({}):\n", hand.len()));
    for (i, card) in hand.iter().enumerate() {
        out.push_str(&format!("  {i}: {}\n", card_label(card)));
    }
    if my_turn {
        out.push_str("\n[play <index>] to play a card\n");
    }
    out
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
    use crate::protocol::{CardColor, Room};

    fn player(id: &str, name: &str, is_host: bool, hand: Vec<Card>) -> Player {
        Player {
            player_id: id.to_string(),
            name: name.to_string(),
            is_host,
            hand,
        }
    }

    fn game_session(me: &str, current_player_index: usize) -> Session {
        let room = Room {
            code: "AB12".into(),
            players: vec![
                player(
                    "A",
                    "Alice",
                    true,
                    vec![
                        Card::new(CardColor::Red, "5"),
                        Card::new(CardColor::Wild, "wild"),
                    ],
                ),
                player("B", "Bob", false, vec![Card::new(CardColor::Blue, "2")]),
            ],
            discard_pile: vec![Card::new(CardColor::Green, "7")],
            current_player_index,
            rules: Rules::default(),
            winner_id: None,
        };
        Session {
            screen: Screen::Game,
            name: "Alice".into(),
            player_id: Some(me.to_string()),
            room_code: Some("AB12".into()),
            room: Some(room),
        }
    }

    #[test]
    fn landing_shows_name_and_draft_rules() {
        let out = render_landing("Alice", &Rules::default().with_stacking(true));
        assert!(out.contains("Name: Alice"));
        assert!(out.contains("Version: classic"));
        assert!(out.contains("Stacking: On"));
        assert!(out.contains("7-0: Off"));
    }

    #[test]
    fn lobby_marks_host_and_self() {
        let mut session = game_session("B", 0);
        session.screen = Screen::Lobby;
        let out = render_lobby(&session);
        assert!(out.contains("== Room AB12 =="));
        assert!(out.contains("- Alice (Host)"));
        assert!(out.contains("- Bob (you)"));
        assert!(out.contains("Waiting for the host to start"));
        assert!(!out.contains("[start]"));
    }

    #[test]
    fn lobby_offers_start_to_host_only() {
        let mut session = game_session("A", 0);
        session.screen = Screen::Lobby;
        let out = render_lobby(&session);
        assert!(out.contains("[start]"));
    }

    #[test]
    fn game_shows_discard_hand_and_turn() {
        let session = game_session("A", 0);
        let out = render_game(&session);
        assert!(out.contains("Turn: Alice"));
        assert!(out.contains("Discard: [green 7]"));
        assert!(out.contains("Your hand (2):"));
        assert!(out.contains("0: [red 5]"));
        assert!(out.contains("1: [wild WILD]"));
        assert!(out.contains("[draw] available"));
        assert!(out.contains("[play <index>]"));
    }

    #[test]
    fn game_disables_actions_off_turn() {
        let session = game_session("A", 1);
        let out = render_game(&session);
        assert!(out.contains("Turn: Bob"));
        assert!(out.contains("[draw] unavailable"));
        assert!(!out.contains("[play <index>]"));
    }

    #[test]
    fn game_shows_winner_banner() {
        let mut session = game_session("A", 0);
        if let Some(room) = session.room.as_mut() {
            room.winner_id = Some("B".into());
        }
        let out = render_game(&session);
        assert!(out.contains("*** Winner: Bob ***"));
    }

    #[test]
    fn render_dispatches_on_screen() {
        let mut session = game_session("A", 0);
        let rules = Rules::default();

        session.screen = Screen::Landing;
        assert!(render(&session, &rules).contains("UNO with Friends"));

        session.screen = Screen::Lobby;
        assert!(render(&session, &rules).contains("Share this code"));

        session.screen = Screen::Game;
        assert!(render(&session, &rules).contains("Your hand"));
    }
}
