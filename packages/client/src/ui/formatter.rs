//! Display formatting for the terminal client.

use chess::{Board, Color, File, Piece, Rank, Square};
use chessearn_shared::time::{format_clock, format_server_timestamp};

use crate::{
    domain::{GameSnapshot, GameStatus, Side, UserId, UserProfile},
    usecase::{ConnectionChange, ConnectionStatus, GameView},
};

const RULE: &str = "============================================================";
const WAITING: &str = "Waiting";

/// Message formatter for client display
pub struct Formatter;

impl Formatter {
    /// ASCII board; white pieces upper case, black lower case.
    ///
    /// `orientation` is the side shown at the bottom.
    pub fn board(board: &Board, orientation: Side) -> String {
        let ranks: Vec<usize> = match orientation {
            Side::White => (0..8).rev().collect(),
            Side::Black => (0..8).collect(),
        };
        let files: Vec<usize> = match orientation {
            Side::White => (0..8).collect(),
            Side::Black => (0..8).rev().collect(),
        };

        let mut output = String::new();
        for &rank in &ranks {
            output.push_str(&format!("{} ", rank + 1));
            for &file in &files {
                let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
                output.push(' ');
                output.push(Self::piece_char(board, square));
            }
            output.push('\n');
        }
        output.push_str("  ");
        for &file in &files {
            output.push(' ');
            output.push((b'a' + file as u8) as char);
        }
        output.push('\n');
        output
    }

    fn piece_char(board: &Board, square: Square) -> char {
        let Some(piece) = board.piece_on(square) else {
            return '.';
        };
        let c = match piece {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match board.color_on(square) {
            Some(Color::White) => c.to_ascii_uppercase(),
            _ => c,
        }
    }

    fn player(snapshot: &GameSnapshot, side: Side) -> String {
        snapshot
            .player_name(side)
            .map(str::to_string)
            .or_else(|| snapshot.player_id(side).map(UserId::to_string))
            .unwrap_or_else(|| WAITING.to_string())
    }

    /// `White: alice (5:00)  Black: Waiting (N/A)`
    pub fn clocks(snapshot: &GameSnapshot) -> String {
        format!(
            "White: {} ({})  Black: {} ({})",
            Self::player(snapshot, Side::White),
            format_clock(snapshot.time_remaining(Side::White)),
            Self::player(snapshot, Side::Black),
            format_clock(snapshot.time_remaining(Side::Black)),
        )
    }

    /// `5+0` style time control (minutes + increment seconds).
    pub fn time_control(base_time: u32, increment: u32) -> String {
        if base_time % 60 == 0 {
            format!("{}+{}", base_time / 60, increment)
        } else {
            format!("{:.1}+{}", base_time as f64 / 60.0, increment)
        }
    }

    /// Full game screen: header, board, clocks, status and available actions.
    pub fn game_screen(view: &GameView<'_>) -> String {
        let snapshot = view.snapshot();
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("Game: {}\n", snapshot.id));
        match view.board() {
            Ok(board) => output.push_str(&Self::board(&board, view.orientation())),
            Err(e) => output.push_str(&format!("(board unavailable: {})\n", e)),
        }
        output.push_str(&Self::clocks(snapshot));
        output.push('\n');
        output.push_str(&format!("Status: {}", snapshot.status));
        if snapshot.status == GameStatus::Completed {
            output.push_str(&format!(" ({})", snapshot.outcome));
        }
        output.push('\n');
        if !snapshot.moves.is_empty() {
            output.push_str(&format!("Moves: {}\n", snapshot.moves));
        }
        if let Some(offerer) = view.draw_offered_by() {
            output.push_str(&format!("Draw offered by: {}\n", offerer));
        }
        match view.local_side() {
            Some(side) if view.can_act() => {
                let turn = if view.is_my_turn() {
                    "your move".to_string()
                } else {
                    "waiting for opponent".to_string()
                };
                output.push_str(&format!("You play {} ({})\n", side, turn));
                let mut actions = vec!["<move>", "moves", "resign"];
                if view.can_offer_draw() {
                    actions.push("draw");
                }
                if view.can_respond_to_draw() {
                    actions.push("accept");
                    actions.push("decline");
                }
                actions.push("quit");
                output.push_str(&format!("Commands: {}\n", actions.join(", ")));
            }
            Some(side) => output.push_str(&format!("You played {}\n", side)),
            None => output.push_str("Spectating (board, quit)\n"),
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Connection status line, with the last connection error if any.
    pub fn connection(status: ConnectionStatus, last_error: Option<&str>) -> String {
        match last_error {
            Some(error) => format!("Connection: {} (last error: {})", status, error),
            None => format!("Connection: {}", status),
        }
    }

    /// One-line notice for a realtime change; `None` when nothing is worth showing.
    pub fn change(change: &ConnectionChange, local_user: Option<&UserId>) -> Option<String> {
        match change {
            ConnectionChange::GameUpdated | ConnectionChange::Ignored => None,
            ConnectionChange::GameEnded(outcome) => Some(format!("Game over: {}", outcome)),
            ConnectionChange::DrawOffered(by) if Some(by) == local_user => {
                Some("Draw offer sent".to_string())
            }
            ConnectionChange::DrawOffered(by) => Some(format!("{} offers a draw", by)),
            ConnectionChange::DrawDeclined => Some("Draw offer declined".to_string()),
            ConnectionChange::ServerError(message) => Some(format!("Server: {}", message)),
            ConnectionChange::ConnectionLost => Some("Connection to game server lost".to_string()),
        }
    }

    /// Multi-line summary for `create`, `join` and `show`.
    pub fn game_summary(snapshot: &GameSnapshot) -> String {
        let mut output = String::new();
        output.push_str(&format!("Game:    {}\n", snapshot.id));
        output.push_str(&format!("White:   {}\n", Self::player(snapshot, Side::White)));
        output.push_str(&format!("Black:   {}\n", Self::player(snapshot, Side::Black)));
        output.push_str(&format!(
            "Time:    {} ({})\n",
            Self::time_control(snapshot.base_time, snapshot.increment),
            if snapshot.is_rated { "rated" } else { "casual" }
        ));
        output.push_str(&format!("Status:  {}\n", snapshot.status));
        if snapshot.status == GameStatus::Completed {
            output.push_str(&format!("Result:  {}\n", snapshot.outcome));
        }
        output.push_str(&format!("Clocks:  {}\n", Self::clocks(snapshot)));
        if let Some(created_at) = &snapshot.created_at {
            output.push_str(&format!("Created: {}\n", format_server_timestamp(created_at)));
        }
        if !snapshot.moves.is_empty() {
            output.push_str(&format!("Moves:   {}\n", snapshot.moves));
        }
        output
    }

    /// Open games: id, creator, time control, rated flag.
    pub fn open_games(games: &[GameSnapshot]) -> String {
        if games.is_empty() {
            return "(No open games)\n".to_string();
        }
        let mut output = format!("{:<38} {:<16} {:<8} {}\n", "ID", "CREATOR", "TIME", "RATED");
        for game in games {
            output.push_str(&format!(
                "{:<38} {:<16} {:<8} {}\n",
                game.id.as_str(),
                Self::player(game, Side::White),
                Self::time_control(game.base_time, game.increment),
                if game.is_rated { "yes" } else { "no" }
            ));
        }
        output
    }

    /// Game history, newest first as returned by the server.
    pub fn history(games: &[GameSnapshot], me: Option<&UserId>) -> String {
        if games.is_empty() {
            return "(No games yet)\n".to_string();
        }
        let mut output = format!(
            "{:<38} {:<16} {:<8} {:<10} {}\n",
            "ID", "OPPONENT", "TIME", "STATUS", "RESULT"
        );
        for game in games {
            let opponent = match me.and_then(|me| game.side_of(me)) {
                Some(side) => Self::player(game, side.opposite()),
                None => format!(
                    "{} vs {}",
                    Self::player(game, Side::White),
                    Self::player(game, Side::Black)
                ),
            };
            let result = if game.status == GameStatus::Completed {
                game.outcome.to_string()
            } else {
                "-".to_string()
            };
            output.push_str(&format!(
                "{:<38} {:<16} {:<8} {:<10} {}\n",
                game.id.as_str(),
                opponent,
                Self::time_control(game.base_time, game.increment),
                game.status.as_str(),
                result
            ));
        }
        output
    }

    pub fn profile(user: &UserProfile, photo_url: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", RULE));
        output.push_str(&format!("Username: {}\n", user.username));
        output.push_str(&format!(
            "Name:     {} {}\n",
            user.first_name, user.last_name
        ));
        output.push_str(&format!("Email:    {}\n", user.email));
        if !user.phone_number.is_empty() {
            output.push_str(&format!("Phone:    {}\n", user.phone_number));
        }
        if let Some(ranking) = user.ranking {
            output.push_str(&format!("Ranking:  {}\n", ranking));
        }
        if let Some(balance) = user.wallet_balance {
            output.push_str(&format!("Wallet:   {:.2}\n", balance));
        }
        output.push_str(&format!(
            "Account:  {}{}\n",
            if user.is_active { "active" } else { "inactive" },
            if user.is_verified { ", verified" } else { "" }
        ));
        output.push_str(&format!("Photo:    {}\n", photo_url));
        output.push_str(RULE);
        output.push('\n');
        output
    }
}
