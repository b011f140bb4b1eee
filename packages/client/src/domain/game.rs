//! Game snapshot: the locally held copy of one game's state as pushed by the server.

use std::fmt;

use super::{
    event::{GameEnd, GameUpdate},
    value_object::{GameId, Side, UserId},
};

/// Lifecycle status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Pending,
    Active,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Pending => "pending",
            GameStatus::Active => "active",
            GameStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    WhiteWin,
    BlackWin,
    Draw,
    Incomplete,
}

impl GameOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOutcome::WhiteWin => "white_win",
            GameOutcome::BlackWin => "black_win",
            GameOutcome::Draw => "draw",
            GameOutcome::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub id: GameId,
    pub white_player_id: Option<UserId>,
    pub black_player_id: Option<UserId>,
    pub white_player: Option<String>,
    pub black_player: Option<String>,
    pub status: GameStatus,
    pub outcome: GameOutcome,
    pub is_rated: bool,
    /// Space separated SAN move list
    pub moves: String,
    /// Base time in seconds
    pub base_time: u32,
    /// Increment in seconds
    pub increment: u32,
    pub white_time_remaining: Option<f64>,
    pub black_time_remaining: Option<f64>,
    pub draw_offered_by: Option<UserId>,
    /// Serialized board (FEN); `None` until the server sends one
    pub fen: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: Option<String>,
}

impl GameSnapshot {
    /// Empty snapshot for a game whose state is not known yet.
    ///
    /// Used when spectating a game the REST API does not expose to
    /// non-participants; the first `game_update` fills it in.
    pub fn placeholder(id: GameId) -> Self {
        Self {
            id,
            white_player_id: None,
            black_player_id: None,
            white_player: None,
            black_player: None,
            status: GameStatus::Pending,
            outcome: GameOutcome::Incomplete,
            is_rated: false,
            moves: String::new(),
            base_time: 0,
            increment: 0,
            white_time_remaining: None,
            black_time_remaining: None,
            draw_offered_by: None,
            fen: None,
            start_time: None,
            end_time: None,
            created_at: None,
        }
    }

    /// Which side `user` plays, if any.
    pub fn side_of(&self, user: &UserId) -> Option<Side> {
        if self.white_player_id.as_ref() == Some(user) {
            Some(Side::White)
        } else if self.black_player_id.as_ref() == Some(user) {
            Some(Side::Black)
        } else {
            None
        }
    }

    pub fn is_participant(&self, user: &UserId) -> bool {
        self.side_of(user).is_some()
    }

    pub fn player_id(&self, side: Side) -> Option<&UserId> {
        match side {
            Side::White => self.white_player_id.as_ref(),
            Side::Black => self.black_player_id.as_ref(),
        }
    }

    pub fn player_name(&self, side: Side) -> Option<&str> {
        match side {
            Side::White => self.white_player.as_deref(),
            Side::Black => self.black_player.as_deref(),
        }
    }

    pub fn time_remaining(&self, side: Side) -> Option<f64> {
        match side {
            Side::White => self.white_time_remaining,
            Side::Black => self.black_time_remaining,
        }
    }

    /// Replace every field with the pushed values.
    ///
    /// `fen` is kept when the push does not carry one: the server omits it
    /// on resign and draw-accept updates.
    pub fn apply_update(&mut self, update: GameUpdate) {
        let GameUpdate(mut pushed) = update;
        if pushed.fen.is_none() {
            pushed.fen = self.fen.take();
        }
        *self = pushed;
    }

    /// Merge the terminal fields and mark the game completed. A pending draw
    /// offer is resolved by the end of the game.
    pub fn apply_end(&mut self, end: GameEnd) {
        self.outcome = end.outcome;
        if end.white_time_remaining.is_some() {
            self.white_time_remaining = end.white_time_remaining;
        }
        if end.black_time_remaining.is_some() {
            self.black_time_remaining = end.black_time_remaining;
        }
        self.status = GameStatus::Completed;
        self.draw_offered_by = None;
    }

    pub fn record_draw_offer(&mut self, offered_by: UserId) {
        self.draw_offered_by = Some(offered_by);
    }

    pub fn clear_draw_offer(&mut self) {
        self.draw_offered_by = None;
    }
}

/// The one game the client tracks, tagged by the local user's role in it.
///
/// Held as `Option<TrackedGame>`, so an active game and a spectated game can
/// never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedGame {
    /// The local user is a participant and can act
    Active(GameSnapshot),
    /// The local user is an observer
    Spectated(GameSnapshot),
}

impl TrackedGame {
    pub fn snapshot(&self) -> &GameSnapshot {
        match self {
            TrackedGame::Active(snapshot) | TrackedGame::Spectated(snapshot) => snapshot,
        }
    }

    pub fn snapshot_mut(&mut self) -> &mut GameSnapshot {
        match self {
            TrackedGame::Active(snapshot) | TrackedGame::Spectated(snapshot) => snapshot,
        }
    }

    pub fn id(&self) -> &GameId {
        &self.snapshot().id
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TrackedGame::Active(_))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

    #[test]
    fn test_apply_update_replaces_fields() {
        // テスト項目: game_update で全フィールドが置き換えられる
        // given (前提条件):
        let mut snapshot = fixtures::active_game("g1", "w", "b");
        let mut pushed = snapshot.clone();
        pushed.moves = "e4".to_string();
        pushed.fen = Some(AFTER_E4.to_string());
        pushed.white_time_remaining = Some(297.5);

        // when (操作):
        snapshot.apply_update(GameUpdate(pushed.clone()));

        // then (期待する結果):
        assert_eq!(snapshot, pushed);
    }

    #[test]
    fn test_apply_update_without_fen_keeps_board() {
        // テスト項目: FEN を含まない game_update では盤面が保持される
        // given (前提条件):
        let mut snapshot = fixtures::active_game("g1", "w", "b");
        snapshot.fen = Some(AFTER_E4.to_string());
        let mut pushed = fixtures::active_game("g1", "w", "b");
        pushed.status = GameStatus::Completed;
        pushed.outcome = GameOutcome::BlackWin;

        // when (操作):
        snapshot.apply_update(GameUpdate(pushed));

        // then (期待する結果):
        assert_eq!(snapshot.fen.as_deref(), Some(AFTER_E4));
        assert_eq!(snapshot.status, GameStatus::Completed);
        assert_eq!(snapshot.outcome, GameOutcome::BlackWin);
    }

    #[test]
    fn test_apply_end_marks_completed() {
        // テスト項目: game_end で終局フィールドがマージされ completed になる
        // given (前提条件):
        let mut snapshot = fixtures::active_game("g1", "w", "b");
        snapshot.record_draw_offer(UserId::new("b").unwrap());
        let end = GameEnd {
            game_id: GameId::new("g1").unwrap(),
            outcome: GameOutcome::Draw,
            white_time_remaining: Some(12.0),
            black_time_remaining: None,
        };

        // when (操作):
        snapshot.apply_end(end);

        // then (期待する結果):
        assert_eq!(snapshot.status, GameStatus::Completed);
        assert_eq!(snapshot.outcome, GameOutcome::Draw);
        assert_eq!(snapshot.white_time_remaining, Some(12.0));
        assert_eq!(snapshot.black_time_remaining, Some(300.0));
        assert_eq!(snapshot.draw_offered_by, None);
    }

    #[test]
    fn test_side_of_participants() {
        // テスト項目: ユーザーの担当する色が判定される
        // given (前提条件):
        let snapshot = fixtures::active_game("g1", "w", "b");

        // when (操作):
        // then (期待する結果):
        assert_eq!(snapshot.side_of(&UserId::new("w").unwrap()), Some(Side::White));
        assert_eq!(snapshot.side_of(&UserId::new("b").unwrap()), Some(Side::Black));
        assert_eq!(snapshot.side_of(&UserId::new("x").unwrap()), None);
    }

    #[test]
    fn test_placeholder_has_no_participants() {
        // テスト項目: プレースホルダーには参加者がいない
        let snapshot = GameSnapshot::placeholder(GameId::new("g9").unwrap());
        assert!(!snapshot.is_participant(&UserId::new("w").unwrap()));
        assert_eq!(snapshot.status, GameStatus::Pending);
    }

    #[test]
    fn test_tracked_game_role() {
        // テスト項目: TrackedGame が役割とスナップショットを保持する
        let active = TrackedGame::Active(fixtures::active_game("g1", "w", "b"));
        let spectated = TrackedGame::Spectated(fixtures::active_game("g2", "w", "b"));
        assert!(active.is_active());
        assert!(!spectated.is_active());
        assert_eq!(spectated.id().as_str(), "g2");
    }
}
