//! # Table Demo
//!
//! Interactive terminal client for a running room server:
//!
//! 1. Configure your name and rules on the landing screen
//! 2. Create a room (or join one by code) — polling starts automatically
//! 3. Start the game as host, then play and draw on your turn
//! 4. Quit with `quit` or Ctrl+C
//!
//! ## Running
//!
//! ```sh
//! # Start the room server on localhost:8000, then:
//! cargo run --example table_demo
//!
//! # Override the server URL:
//! UNO_BACKEND_URL=http://my-server:8000 cargo run --example table_demo
//! ```
//!
//! ## Commands
//!
//! ```text
//! create <name>        create a room as <name>
//! join <code> <name>   join room <code> as <name>
//! rules <classic|party> [stacking] [seven_o] [jump_in]
//! start                start the game (host only)
//! play <index>         play the card at <index>
//! draw                 draw a card
//! leave                back to the landing screen
//! quit                 exit
//! ```

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use uno_rooms_client::render;
use uno_rooms_client::{
    Card, CardColor, HttpRoomApi, Rules, RulesVersion, UnoRoomsClient, UnoRoomsConfig,
    UnoRoomsEvent,
};

fn colored_card(card: &Card) -> String {
    let label = render::card_label(card);
    match card.color {
        CardColor::Red => label.red().to_string(),
        CardColor::Yellow => label.yellow().to_string(),
        CardColor::Green => label.green().to_string(),
        CardColor::Blue => label.blue().to_string(),
        CardColor::Wild => label.bold().to_string(),
    }
}

fn parse_rules(words: &[&str]) -> Rules {
    let version = match words.first() {
        Some(&"party") => RulesVersion::Party,
        _ => RulesVersion::Classic,
    };
    Rules::default()
        .with_version(version)
        .with_stacking(words.contains(&"stacking"))
        .with_seven_o(words.contains(&"seven_o"))
        .with_jump_in(words.contains(&"jump_in"))
}

async fn redraw<A: uno_rooms_client::RoomApi>(client: &UnoRoomsClient<A>, draft_rules: &Rules) {
    let session = client.session().await;
    println!("\n{}", render::render(&session, draft_rules));
    if let Some(top) = session.room.as_ref().and_then(|r| r.top_of_discard()) {
        println!("top card: {}", colored_card(top));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Logging ─────────────────────────────────────────────────────
    // Initialize tracing. Set `RUST_LOG=debug` for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // ── Connect ─────────────────────────────────────────────────────
    let api = HttpRoomApi::from_env()?;
    tracing::info!("Using room server at {}", api.base_url());

    let (mut client, mut events) = UnoRoomsClient::start(api, UnoRoomsConfig::default());
    let mut draft_rules = Rules::default();

    redraw(&client, &draft_rules).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // ── Event loop ──────────────────────────────────────────────────
    loop {
        tokio::select! {
            // Branch 1: state change from the client (poll tick or action).
            event = events.recv() => {
                let Some(event) = event else {
                    tracing::info!("Event channel closed, exiting");
                    break;
                };
                match event {
                    UnoRoomsEvent::GameStarted { .. } => {
                        println!("{}", "The game has started!".bold());
                        redraw(&client, &draft_rules).await;
                    }
                    UnoRoomsEvent::GameOver { winner_id } => {
                        let name = client
                            .current_room()
                            .await
                            .and_then(|r| r.player(&winner_id).map(|p| p.name.clone()))
                            .unwrap_or(winner_id);
                        println!("{}", format!("Winner: {name}").bold().green());
                    }
                    UnoRoomsEvent::SyncFailed { reason } => {
                        // Non-fatal: the last good snapshot is still shown.
                        println!("{}", format!("(sync failed: {reason})").dimmed());
                    }
                    UnoRoomsEvent::ScreenChanged { .. } | UnoRoomsEvent::RoomUpdated { .. } => {
                        redraw(&client, &draft_rules).await;
                    }
                }
            }

            // Branch 2: a command typed by the player.
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let words: Vec<&str> = line.split_whitespace().collect();
                let outcome = match words.as_slice() {
                    ["create", name] => client.create_room(name, draft_rules.clone()).await,
                    ["join", code, name] => client.join_room(code, name).await,
                    ["rules", rest @ ..] => {
                        draft_rules = parse_rules(rest);
                        if client.room_code().await.is_some() {
                            client.set_rules(draft_rules.clone()).await
                        } else {
                            redraw(&client, &draft_rules).await;
                            Ok(())
                        }
                    }
                    ["start"] => client.start_game().await,
                    ["play", index] => match index.parse::<usize>() {
                        Ok(index) => client.play_card(index).await,
                        Err(_) => {
                            println!("usage: play <index>");
                            Ok(())
                        }
                    },
                    ["draw"] => client.draw_card().await,
                    ["leave"] => {
                        client.leave_room().await;
                        Ok(())
                    }
                    ["quit"] | ["exit"] => break,
                    [] => Ok(()),
                    _ => {
                        println!("commands: create, join, rules, start, play, draw, leave, quit");
                        Ok(())
                    }
                };
                if let Err(e) = outcome {
                    // Action failures are retryable; state is untouched.
                    println!("{}", format!("error: {e}").red());
                }
            }

            // Branch 3: Ctrl+C — exit.
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, exiting");
                break;
            }
        }
    }

    client.leave_room().await;
    println!("Goodbye!");
    Ok(())
}
