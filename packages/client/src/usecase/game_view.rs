//! UseCase: ゲームビュー
//!
//! Derives what the board shows from the tracked snapshot and validates move
//! attempts locally. Legal-move feedback only serves responsiveness; the
//! server stays authoritative.

use chess::Board;

use crate::{
    domain::{
        GameSnapshot, GameStatus, Side, TrackedGame, UserId,
        notation::{self, NotationError},
    },
    error::MoveRejection,
};

pub struct GameView<'a> {
    tracked: &'a TrackedGame,
    local_user: Option<&'a UserId>,
}

impl<'a> GameView<'a> {
    pub fn new(tracked: &'a TrackedGame, local_user: Option<&'a UserId>) -> Self {
        Self { tracked, local_user }
    }

    pub fn snapshot(&self) -> &'a GameSnapshot {
        self.tracked.snapshot()
    }

    /// Side played by the local user; `None` for spectators.
    pub fn local_side(&self) -> Option<Side> {
        match self.tracked {
            TrackedGame::Active(snapshot) => self.local_user.and_then(|user| snapshot.side_of(user)),
            TrackedGame::Spectated(_) => None,
        }
    }

    pub fn is_player(&self) -> bool {
        self.local_side().is_some()
    }

    /// Black players see the board from black's side; everyone else from white's.
    pub fn orientation(&self) -> Side {
        self.local_side().unwrap_or(Side::White)
    }

    /// Current position: the pushed FEN when present, otherwise the move list
    /// replayed from the initial position.
    pub fn board(&self) -> Result<Board, NotationError> {
        let snapshot = self.snapshot();
        match snapshot.fen.as_deref() {
            Some(fen) => notation::parse_board(Some(fen)),
            None => notation::replay(&snapshot.moves),
        }
    }

    pub fn side_to_move(&self) -> Option<Side> {
        self.board().ok().map(|board| board.side_to_move().into())
    }

    /// The local user may act: a participant in an active game.
    pub fn can_act(&self) -> bool {
        self.is_player() && self.snapshot().status == GameStatus::Active
    }

    pub fn is_my_turn(&self) -> bool {
        match (self.local_side(), self.side_to_move()) {
            (Some(mine), Some(to_move)) => self.can_act() && mine == to_move,
            _ => false,
        }
    }

    /// Legal moves in SAN; empty unless it is the local user's turn.
    pub fn legal_moves(&self) -> Vec<String> {
        if !self.is_my_turn() {
            return Vec::new();
        }
        self.board()
            .map(|board| notation::legal_moves_san(&board))
            .unwrap_or_default()
    }

    /// Validate a move locally and return it in SAN, ready to submit.
    pub fn attempt_move(&self, input: &str) -> Result<String, MoveRejection> {
        let side = self.local_side().ok_or(MoveRejection::NotParticipant)?;
        let snapshot = self.snapshot();
        if snapshot.status != GameStatus::Active {
            return Err(MoveRejection::GameNotActive(snapshot.status));
        }

        let board = self
            .board()
            .map_err(|e| MoveRejection::BoardUnavailable(e.to_string()))?;
        if Side::from(board.side_to_move()) != side {
            return Err(MoveRejection::NotYourTurn);
        }

        let mv = notation::parse_move(&board, input)
            .map_err(|e| MoveRejection::InvalidMove(e.to_string()))?;
        Ok(notation::to_san(&board, mv))
    }

    pub fn draw_offered_by(&self) -> Option<&'a UserId> {
        self.snapshot().draw_offered_by.as_ref()
    }

    /// A draw can be offered while none is pending.
    pub fn can_offer_draw(&self) -> bool {
        self.can_act() && self.draw_offered_by().is_none()
    }

    /// Accept/decline is only offered to the player who did not make the offer.
    pub fn can_respond_to_draw(&self) -> bool {
        match (self.draw_offered_by(), self.local_user) {
            (Some(offerer), Some(me)) => self.can_act() && offerer != me,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameId, game::fixtures::active_game};

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_white_moves_first() {
        // テスト項目: 初期局面では白番のみ指せる
        // given (前提条件):
        let tracked = TrackedGame::Active(active_game("g1", "alice", "bob"));
        let alice = uid("alice");
        let bob = uid("bob");

        // when (操作):
        let white_view = GameView::new(&tracked, Some(&alice));
        let black_view = GameView::new(&tracked, Some(&bob));

        // then (期待する結果):
        assert_eq!(white_view.attempt_move("e4"), Ok("e4".to_string()));
        assert_eq!(black_view.attempt_move("e5"), Err(MoveRejection::NotYourTurn));
        assert_eq!(white_view.legal_moves().len(), 20);
        assert!(black_view.legal_moves().is_empty());
    }

    #[test]
    fn test_board_replays_moves_without_fen() {
        // テスト項目: FEN がない場合は棋譜から局面を再構築し手番を判定する
        // given (前提条件):
        let mut snapshot = active_game("g1", "alice", "bob");
        snapshot.moves = "e4".to_string();
        let tracked = TrackedGame::Active(snapshot);
        let bob = uid("bob");

        // when (操作):
        let view = GameView::new(&tracked, Some(&bob));

        // then (期待する結果):
        assert_eq!(view.side_to_move(), Some(Side::Black));
        assert_eq!(view.attempt_move("e7e5"), Ok("e5".to_string()));
    }

    #[test]
    fn test_rejects_moves_when_not_active() {
        // テスト項目: アクティブでないゲームでは手が拒否される
        // given (前提条件):
        let mut snapshot = active_game("g1", "alice", "bob");
        snapshot.status = GameStatus::Completed;
        let tracked = TrackedGame::Active(snapshot);
        let alice = uid("alice");

        // when (操作):
        let result = GameView::new(&tracked, Some(&alice)).attempt_move("e4");

        // then (期待する結果):
        assert_eq!(result, Err(MoveRejection::GameNotActive(GameStatus::Completed)));
    }

    #[test]
    fn test_spectator_cannot_move() {
        // テスト項目: 観戦者は手を指せず、盤面は白側から表示される
        // given (前提条件):
        let tracked = TrackedGame::Spectated(active_game("g1", "alice", "bob"));
        let alice = uid("alice");

        // when (操作):
        let view = GameView::new(&tracked, Some(&alice));

        // then (期待する結果):
        assert_eq!(view.attempt_move("e4"), Err(MoveRejection::NotParticipant));
        assert_eq!(view.orientation(), Side::White);
        assert!(!view.can_act());
    }

    #[test]
    fn test_illegal_move_is_invalid() {
        // テスト項目: 非合法手は InvalidMove として拒否される
        let tracked = TrackedGame::Active(active_game("g1", "alice", "bob"));
        let alice = uid("alice");
        let result = GameView::new(&tracked, Some(&alice)).attempt_move("Ke2");
        assert!(matches!(result, Err(MoveRejection::InvalidMove(_))));
    }

    #[test]
    fn test_black_orientation() {
        // テスト項目: 黒番プレイヤーの盤面は黒側から表示される
        let tracked = TrackedGame::Active(active_game("g1", "alice", "bob"));
        let bob = uid("bob");
        assert_eq!(GameView::new(&tracked, Some(&bob)).orientation(), Side::Black);
    }

    #[test]
    fn test_draw_response_only_for_other_player() {
        // テスト項目: 引き分け提案への応答は提案者以外のプレイヤーにのみ表示される
        // given (前提条件):
        let mut snapshot = active_game("g1", "alice", "bob");
        snapshot.record_draw_offer(uid("alice"));
        let tracked = TrackedGame::Active(snapshot);
        let alice = uid("alice");
        let bob = uid("bob");

        // when (操作):
        let offerer = GameView::new(&tracked, Some(&alice));
        let opponent = GameView::new(&tracked, Some(&bob));

        // then (期待する結果):
        assert!(!offerer.can_respond_to_draw());
        assert!(opponent.can_respond_to_draw());
        assert!(!opponent.can_offer_draw());
    }

    #[test]
    fn test_placeholder_board_is_initial_position() {
        // テスト項目: 空のスナップショットでは初期局面が表示される
        let tracked = TrackedGame::Spectated(GameSnapshot::placeholder(GameId::new("g9").unwrap()));
        let view = GameView::new(&tracked, None);
        assert_eq!(view.board().unwrap(), Board::default());
        assert_eq!(view.side_to_move(), Some(Side::White));
    }
}
