#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
//! Wire-shape tests for the room server protocol types.
//!
//! Verifies that serialized requests match what the server expects (lowercase
//! color/version names, `chosen_color` omitted when absent) and that JSON
//! fixtures shaped like real server responses decode correctly.

use uno_rooms_client::protocol::{
    Card, CardColor, DrawRequest, PlayRequest, Room, RoomCreated, RoomJoined, Rules, RulesVersion,
};

// ── Enum casing ─────────────────────────────────────────────────────

#[test]
fn card_colors_serialize_lowercase() {
    for (color, expected) in [
        (CardColor::Red, "\"red\""),
        (CardColor::Yellow, "\"yellow\""),
        (CardColor::Green, "\"green\""),
        (CardColor::Blue, "\"blue\""),
        (CardColor::Wild, "\"wild\""),
    ] {
        assert_eq!(serde_json::to_string(&color).unwrap(), expected);
    }
}

#[test]
fn rules_version_serializes_lowercase_and_defaults_to_classic() {
    assert_eq!(
        serde_json::to_string(&RulesVersion::Party).unwrap(),
        "\"party\""
    );
    assert_eq!(RulesVersion::default(), RulesVersion::Classic);
}

// ── Request bodies ──────────────────────────────────────────────────

#[test]
fn play_request_omits_chosen_color_when_absent() {
    let request = PlayRequest {
        player_id: "P1".into(),
        card_index: 2,
        chosen_color: None,
    };
    let value = serde_json::to_value(&request).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object["player_id"], "P1");
    assert_eq!(object["card_index"], 2);
    assert!(!object.contains_key("chosen_color"));
}

#[test]
fn play_request_carries_chosen_color_for_wilds() {
    let request = PlayRequest {
        player_id: "P1".into(),
        card_index: 3,
        chosen_color: Some(CardColor::Red),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["chosen_color"], "red");
}

#[test]
fn draw_request_is_a_bare_player_id() {
    let request = DrawRequest {
        player_id: "P2".into(),
    };
    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"player_id":"P2"}"#
    );
}

#[test]
fn rules_serialize_with_every_flag() {
    let rules = Rules::default()
        .with_version(RulesVersion::Party)
        .with_stacking(true)
        .with_seven_o(true)
        .with_jump_in(false);
    let value = serde_json::to_value(&rules).unwrap();
    assert_eq!(value["version"], "party");
    assert_eq!(value["stacking"], true);
    assert_eq!(value["seven_o"], true);
    assert_eq!(value["jump_in"], false);
}

#[test]
fn rules_decode_tolerantly_from_an_empty_object() {
    let rules: Rules = serde_json::from_str("{}").unwrap();
    assert_eq!(rules, Rules::default());
}

// ── Response fixtures ───────────────────────────────────────────────

/// A room snapshot shaped exactly like the server emits mid-game.
const ROOM_FIXTURE: &str = r#"{
    "code": "AB12",
    "players": [
        {
            "player_id": "p-host",
            "name": "Alice",
            "is_host": true,
            "hand": [
                {"color": "red", "value": "5"},
                {"color": "wild", "value": "wild_draw_four"}
            ]
        },
        {
            "player_id": "p-guest",
            "name": "Bob",
            "is_host": false,
            "hand": [{"color": "blue", "value": "skip"}]
        }
    ],
    "discard_pile": [
        {"color": "green", "value": "7"},
        {"color": "yellow", "value": "reverse"}
    ],
    "current_player_index": 1,
    "rules": {"version": "party", "stacking": true, "seven_o": false, "jump_in": true}
}"#;

#[test]
fn room_fixture_decodes() {
    let room: Room = serde_json::from_str(ROOM_FIXTURE).unwrap();

    assert_eq!(room.code, "AB12");
    assert_eq!(room.players.len(), 2);
    assert_eq!(room.host().unwrap().name, "Alice");
    assert_eq!(room.current_player().unwrap().player_id, "p-guest");
    assert_eq!(
        room.top_of_discard(),
        Some(&Card::new(CardColor::Yellow, "reverse"))
    );
    assert!(room.started());
    assert_eq!(room.rules.version, RulesVersion::Party);
    assert!(room.rules.jump_in);
    assert!(room.winner_id.is_none());
}

#[test]
fn room_with_winner_decodes_and_resolves_the_player() {
    let mut value: serde_json::Value = serde_json::from_str(ROOM_FIXTURE).unwrap();
    value["winner_id"] = "p-guest".into();
    let room: Room = serde_json::from_value(value).unwrap();
    assert_eq!(room.winner().unwrap().name, "Bob");
}

#[test]
fn pre_game_room_tolerates_missing_fields() {
    // Lobby snapshots may omit the discard pile and hands entirely.
    let json = r#"{
        "code": "XY99",
        "players": [{"player_id": "p1", "name": "Alice", "is_host": true}]
    }"#;
    let room: Room = serde_json::from_str(json).unwrap();
    assert!(!room.started());
    assert!(room.top_of_discard().is_none());
    assert!(room.players[0].hand.is_empty());
    assert_eq!(room.current_player_index, 0);
    assert_eq!(room.rules, Rules::default());
}

#[test]
fn create_bootstrap_fixture_decodes() {
    let json = format!(
        r#"{{"code": "AB12", "player_id": "p-host", "room": {ROOM_FIXTURE}}}"#
    );
    let created: RoomCreated = serde_json::from_str(&json).unwrap();
    assert_eq!(created.code, "AB12");
    assert_eq!(created.player_id, "p-host");
    assert_eq!(created.room.players.len(), 2);
}

#[test]
fn join_bootstrap_fixture_decodes() {
    let json = format!(r#"{{"player_id": "p-guest", "room": {ROOM_FIXTURE}}}"#);
    let joined: RoomJoined = serde_json::from_str(&json).unwrap();
    assert_eq!(joined.player_id, "p-guest");
    assert_eq!(joined.room.code, "AB12");
}

#[test]
fn winner_id_is_omitted_when_unset() {
    let room: Room = serde_json::from_str(ROOM_FIXTURE).unwrap();
    let value = serde_json::to_value(&room).unwrap();
    assert!(!value.as_object().unwrap().contains_key("winner_id"));
}
