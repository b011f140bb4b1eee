//! Chess notation helpers on top of the `chess` crate.
//!
//! The server speaks Standard Algebraic Notation (SAN). Users may type either
//! SAN (`Nf3`, `exd5`, `O-O`, `e8=Q`) or coordinates (`g1f3`, `e7e8q`); both
//! are resolved against the legal move list of the position, so anything
//! returned here is legal locally.

use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, File, MoveGen, Piece, Rank, Square};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid FEN '{0}'")]
    InvalidFen(String),

    #[error("'{0}' is not a legal move in this position")]
    Illegal(String),

    #[error("empty move")]
    Empty,
}

/// Parse a server board string; `None` means the initial position.
pub fn parse_board(fen: Option<&str>) -> Result<Board, NotationError> {
    match fen {
        None => Ok(Board::default()),
        Some(fen) if fen.trim().is_empty() || fen.trim() == "start" => Ok(Board::default()),
        Some(fen) => Board::from_str(fen.trim())
            .map_err(|_| NotationError::InvalidFen(fen.to_string())),
    }
}

fn file_char(file: File) -> char {
    (b'a' + file.to_index() as u8) as char
}

fn rank_char(rank: Rank) -> char {
    (b'1' + rank.to_index() as u8) as char
}

fn piece_letter(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "",
        Piece::Knight => "N",
        Piece::Bishop => "B",
        Piece::Rook => "R",
        Piece::Queen => "Q",
        Piece::King => "K",
    }
}

fn square_name(square: Square) -> String {
    format!("{}{}", file_char(square.get_file()), rank_char(square.get_rank()))
}

/// SAN without the check/mate suffix.
fn san_body(board: &Board, mv: ChessMove) -> String {
    let source = mv.get_source();
    let dest = mv.get_dest();
    let piece = board.piece_on(source).unwrap_or(Piece::Pawn);

    if piece == Piece::King {
        let from = source.get_file().to_index() as i32;
        let to = dest.get_file().to_index() as i32;
        if to - from == 2 {
            return "O-O".to_string();
        }
        if from - to == 2 {
            return "O-O-O".to_string();
        }
    }

    let is_capture = board.piece_on(dest).is_some()
        || (piece == Piece::Pawn && source.get_file() != dest.get_file());

    let mut san = String::new();
    if piece == Piece::Pawn {
        if is_capture {
            san.push(file_char(source.get_file()));
            san.push('x');
        }
        san.push_str(&square_name(dest));
        if let Some(promotion) = mv.get_promotion() {
            san.push('=');
            san.push_str(piece_letter(promotion));
        }
        return san;
    }

    san.push_str(piece_letter(piece));

    // Disambiguate between identical pieces that can reach the same square
    let rivals: Vec<Square> = MoveGen::new_legal(board)
        .filter(|other| {
            other.get_dest() == dest
                && other.get_source() != source
                && board.piece_on(other.get_source()) == Some(piece)
        })
        .map(|other| other.get_source())
        .collect();
    if !rivals.is_empty() {
        let shares_file = rivals.iter().any(|sq| sq.get_file() == source.get_file());
        let shares_rank = rivals.iter().any(|sq| sq.get_rank() == source.get_rank());
        if !shares_file {
            san.push(file_char(source.get_file()));
        } else if !shares_rank {
            san.push(rank_char(source.get_rank()));
        } else {
            san.push_str(&square_name(source));
        }
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&square_name(dest));
    san
}

/// Render a legal move in SAN, including `+`/`#`.
pub fn to_san(board: &Board, mv: ChessMove) -> String {
    let mut san = san_body(board, mv);
    let next = board.make_move_new(mv);
    if next.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if next.checkers().popcnt() > 0 {
        san.push('+');
    }
    san
}

/// All legal moves of the position in SAN.
pub fn legal_moves_san(board: &Board) -> Vec<String> {
    MoveGen::new_legal(board).map(|mv| to_san(board, mv)).collect()
}

fn normalize_san(input: &str) -> String {
    input
        .trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .replace("0-0-0", "O-O-O")
        .replace("0-0", "O-O")
        .replace('=', "")
}

fn parse_square(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    ))
}

fn parse_promotion(c: u8) -> Option<Piece> {
    match c {
        b'q' => Some(Piece::Queen),
        b'r' => Some(Piece::Rook),
        b'b' => Some(Piece::Bishop),
        b'n' => Some(Piece::Knight),
        _ => None,
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`. A missing promotion piece means queen.
fn parse_coordinate(board: &Board, input: &str) -> Option<ChessMove> {
    let bytes = input.trim().to_ascii_lowercase().into_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return None;
    }
    let source = parse_square(bytes[0], bytes[1])?;
    let dest = parse_square(bytes[2], bytes[3])?;
    let promotion = match bytes.get(4) {
        Some(c) => Some(parse_promotion(*c)?),
        None => None,
    };

    MoveGen::new_legal(board).find(|mv| {
        mv.get_source() == source
            && mv.get_dest() == dest
            && match (mv.get_promotion(), promotion) {
                (None, None) => true,
                (Some(actual), Some(wanted)) => actual == wanted,
                (Some(actual), None) => actual == Piece::Queen,
                (None, Some(_)) => false,
            }
    })
}

/// Resolve user input (SAN or coordinates) to a legal move.
pub fn parse_move(board: &Board, input: &str) -> Result<ChessMove, NotationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NotationError::Empty);
    }

    let wanted = normalize_san(trimmed);
    if let Some(mv) =
        MoveGen::new_legal(board).find(|mv| normalize_san(&san_body(board, *mv)) == wanted)
    {
        return Ok(mv);
    }

    parse_coordinate(board, trimmed).ok_or_else(|| NotationError::Illegal(trimmed.to_string()))
}

/// Rebuild a position by replaying a space separated SAN move list from the
/// initial position. Move numbers (`1.`, `12...`) are skipped.
pub fn replay(moves: &str) -> Result<Board, NotationError> {
    let mut board = Board::default();
    for token in moves.split_whitespace() {
        if token.ends_with('.') || token.chars().all(|c| c.is_ascii_digit() || c == '.') {
            continue;
        }
        let mv = parse_move(&board, token)?;
        board = board.make_move_new(mv);
    }
    Ok(board)
}
