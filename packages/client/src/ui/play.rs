//! Interactive game session (`play` / `watch`).
//!
//! The rustyline thread feeds input lines over a channel; the realtime pump
//! and the input channel are driven together under `tokio::select!`.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::{
    domain::{GameId, GameSnapshot, GameStatus, UserId},
    error::ClientError,
    usecase::{ConnectionChange, ConnectionManager, GameView},
};

use super::{
    formatter::Formatter,
    prompt::{redisplay_prompt, spawn_readline},
    runner::App,
};

const PENDING_POLL_INTERVAL: Duration = Duration::from_secs(5);

const HELP: &str = "\
Commands:
  <move>    play a move in SAN (Nf3, exd5, O-O, e8=Q) or coordinates (g1f3, e7e8q)
  moves     list your legal moves
  board     redraw the board
  status    show the connection status
  resign    resign the game
  draw      offer a draw
  accept    accept the pending draw offer
  decline   decline the pending draw offer
  quit      leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Play,
    Watch,
}

enum Flow {
    Continue,
    Quit,
}

/// Load the game and track it with the right role.
///
/// The REST API only shows games to their participants; a 403 while
/// watching starts from a placeholder that the first `game_update` fills.
async fn track_game(
    app: &App,
    manager: &mut ConnectionManager,
    game_id: &GameId,
    me: &UserId,
    mode: SessionMode,
) -> Result<(), ClientError> {
    match app.games.get(game_id).await {
        Ok(snapshot) if mode == SessionMode::Play && snapshot.is_participant(me) => {
            let snapshot = wait_for_opponent(app, snapshot).await?;
            manager.set_active_game(snapshot);
        }
        Ok(snapshot) => {
            if mode == SessionMode::Play {
                println!("You are not playing in this game, spectating instead");
            }
            manager.set_spectated_game(snapshot);
        }
        Err(ClientError::Api { status: 403, .. }) => {
            if mode == SessionMode::Play {
                println!("You are not playing in this game, spectating instead");
            }
            tracing::info!("Game {} is not visible over REST, waiting for updates", game_id);
            manager.set_spectated_game(GameSnapshot::placeholder(game_id.clone()));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// The server only routes a player's events once the game is active, so a
/// pending game is polled until someone joins.
async fn wait_for_opponent(app: &App, mut snapshot: GameSnapshot) -> Result<GameSnapshot, ClientError> {
    if snapshot.status != GameStatus::Pending {
        return Ok(snapshot);
    }
    println!("Waiting for an opponent to join game {} (Ctrl+C to stop)...", snapshot.id);
    while snapshot.status == GameStatus::Pending {
        tokio::select! {
            _ = tokio::time::sleep(PENDING_POLL_INTERVAL) => {}
            _ = tokio::signal::ctrl_c() => {
                return Err(ClientError::InvalidInput("stopped waiting for an opponent".to_string()));
            }
        }
        snapshot = app.games.get(&snapshot.id).await?;
    }
    Ok(snapshot)
}

fn render(manager: &ConnectionManager, me: &UserId) {
    if let Some(tracked) = manager.tracked() {
        print!("{}", Formatter::game_screen(&GameView::new(tracked, Some(me))));
    }
}

async fn handle_input(manager: &ConnectionManager, me: &UserId, line: &str) -> Flow {
    let Some(tracked) = manager.tracked() else {
        return Flow::Quit;
    };
    let game_id = tracked.id().clone();
    let view = GameView::new(tracked, Some(me));
    let (can_act, can_offer, can_respond) = (
        view.can_act(),
        view.can_offer_draw(),
        view.can_respond_to_draw(),
    );

    match line.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Flow::Quit,
        "help" | "?" => println!("{}", HELP),
        "board" => render(manager, me),
        "status" => println!("{}", Formatter::connection(manager.status(), manager.last_error())),
        "moves" => {
            let moves = view.legal_moves();
            if moves.is_empty() {
                println!("No moves available right now");
            } else {
                println!("{}", moves.join(" "));
            }
        }
        "resign" if can_act => {
            if manager.resign(&game_id) {
                println!("You resigned");
            } else {
                println!("Not connected");
            }
        }
        "draw" if can_offer => {
            if manager.offer_draw(&game_id) {
                println!("Draw offered");
            } else {
                println!("Not connected");
            }
        }
        "accept" if can_respond => {
            if manager.accept_draw(&game_id) {
                println!("Draw accepted");
            } else {
                println!("Not connected");
            }
        }
        "decline" if can_respond => {
            if manager.decline_draw(&game_id) {
                println!("Draw declined");
            } else {
                println!("Not connected");
            }
        }
        "resign" | "draw" | "accept" | "decline" => {
            println!("'{}' is not available right now", line);
        }
        _ => match manager.submit_move(line).await {
            Ok(san) => println!("Sent {}", san),
            Err(e) => println!("{}", e),
        },
    }
    Flow::Continue
}

/// Run a live session for `game_id` until the user quits or the connection drops.
pub async fn run_game(app: &App, game_id: GameId, mode: SessionMode) -> Result<(), ClientError> {
    let me = app.require_login().await?;
    let mut manager = app.connection_manager();

    track_game(app, &mut manager, &game_id, &me.id, mode).await?;
    manager.connect().await?;
    render(&manager, &me.id);

    let prompt = format!("{}> ", me.username);
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let _readline_handle = spawn_readline(prompt.clone(), input_tx);

    let result = loop {
        tokio::select! {
            change = manager.next_change() => {
                if let Some(message) = Formatter::change(&change, Some(&me.id)) {
                    println!("\n{}", message);
                }
                match change {
                    ConnectionChange::ConnectionLost => {
                        break Err(ClientError::Transport("connection to game server lost".to_string()));
                    }
                    ConnectionChange::ServerError(_) => manager.clear_error(),
                    ConnectionChange::Ignored => {}
                    ConnectionChange::GameUpdated
                    | ConnectionChange::GameEnded(_)
                    | ConnectionChange::DrawOffered(_)
                    | ConnectionChange::DrawDeclined => render(&manager, &me.id),
                }
                redisplay_prompt(&prompt);
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    break Ok(());
                };
                if let Flow::Quit = handle_input(&manager, &me.id, &line).await {
                    break Ok(());
                }
            }
        }
    };

    manager.disconnect();
    manager.clear_game();
    result
}
