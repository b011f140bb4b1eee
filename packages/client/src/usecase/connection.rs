//! UseCase: リアルタイム接続管理
//!
//! ## Responsibilities
//!
//! - Own the single live connection of the session and its status
//!   (`disconnected | connecting | connected`)
//! - Keep exactly one tracked snapshot (active or spectated) in sync with the
//!   events the server pushes; events for other games are dropped
//! - Expose the outbound emitters, which are no-ops without a connection
//!
//! Status changes only on connection lifecycle events, never on game events.
//! There is no retry timer: reconnection is driven by credential changes
//! ([`ConnectionManager::on_credentials_changed`]).

use std::{fmt, sync::Arc};

use chessearn_shared::time::Clock;

use crate::{
    domain::{
        GameId, GameOutcome, GameSnapshot, InboundEvent, OutboundAction, RealtimeConnector,
        RealtimeLink, TrackedGame, UserId,
    },
    error::{ClientError, MoveRejection},
};

use super::{game_view::GameView, session::SharedSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        })
    }
}

/// Effect of one inbound event or lifecycle transition on local state.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionChange {
    /// The tracked snapshot was replaced by a `game_update`
    GameUpdated,
    GameEnded(GameOutcome),
    DrawOffered(UserId),
    DrawDeclined,
    /// Transient server error; the snapshot is untouched
    ServerError(String),
    /// Event for a game that is not tracked
    Ignored,
    ConnectionLost,
}

pub struct ConnectionManager {
    connector: Arc<dyn RealtimeConnector>,
    session: SharedSession,
    clock: Arc<dyn Clock>,
    status: ConnectionStatus,
    link: Option<RealtimeLink>,
    /// Access token the current link was opened with
    link_token: Option<String>,
    tracked: Option<TrackedGame>,
    last_error: Option<String>,
}

impl ConnectionManager {
    pub fn new(
        connector: Arc<dyn RealtimeConnector>,
        session: SharedSession,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connector,
            session,
            clock,
            status: ConnectionStatus::Disconnected,
            link: None,
            link_token: None,
            tracked: None,
            last_error: None,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn tracked(&self) -> Option<&TrackedGame> {
        self.tracked.as_ref()
    }

    pub fn active_game(&self) -> Option<&GameSnapshot> {
        match &self.tracked {
            Some(TrackedGame::Active(snapshot)) => Some(snapshot),
            _ => None,
        }
    }

    pub fn spectated_game(&self) -> Option<&GameSnapshot> {
        match &self.tracked {
            Some(TrackedGame::Spectated(snapshot)) => Some(snapshot),
            _ => None,
        }
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Open a connection with the session's access token.
    ///
    /// An authorization-class failure clears the session: the token is known
    /// to be bad.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        let token = self.session.lock().await.access_token().map(str::to_string);
        let Some(token) = token else {
            self.disconnect();
            return Err(ClientError::NotAuthenticated);
        };

        self.link = None;
        self.link_token = None;
        self.status = ConnectionStatus::Connecting;

        match self.connector.connect(&token).await {
            Ok(link) => {
                self.link = Some(link);
                self.link_token = Some(token);
                self.status = ConnectionStatus::Connected;
                self.last_error = None;

                if let Some(TrackedGame::Spectated(snapshot)) = &self.tracked {
                    let game_id = snapshot.id.clone();
                    self.spectate(&game_id);
                }
                Ok(())
            }
            Err(e) => {
                self.status = ConnectionStatus::Disconnected;
                self.last_error = Some(e.to_string());
                if e.is_authorization() {
                    tracing::warn!("Game server rejected the access token, logging out");
                    if let Err(store_err) = self.session.lock().await.logout().await {
                        tracing::error!("Failed to clear credentials: {}", store_err);
                    }
                } else {
                    tracing::warn!("Failed to connect to game server: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Tear down the live connection; no event is delivered afterwards.
    pub fn disconnect(&mut self) {
        if self.link.take().is_some() {
            tracing::info!("Disconnected from game server");
        }
        self.link_token = None;
        self.status = ConnectionStatus::Disconnected;
    }

    /// Follow a login, logout or token refresh: disconnect when the token is
    /// gone, reconnect when it changed, otherwise keep the connection.
    pub async fn on_credentials_changed(&mut self) -> Result<(), ClientError> {
        let token = self.session.lock().await.access_token().map(str::to_string);
        match token {
            None => {
                self.disconnect();
                Ok(())
            }
            Some(token)
                if self.link.is_some() && self.link_token.as_deref() == Some(token.as_str()) =>
            {
                Ok(())
            }
            Some(_) => self.connect().await,
        }
    }

    // ========================================
    // Inbound
    // ========================================

    /// Apply one inbound event to the tracked snapshot.
    pub fn apply(&mut self, event: InboundEvent) -> ConnectionChange {
        if let Some(game_id) = event.game_id() {
            if self.tracked.as_ref().map(TrackedGame::id) != Some(game_id) {
                tracing::debug!("Ignoring '{}' for untracked game {}", event.name(), game_id);
                return ConnectionChange::Ignored;
            }
        }
        tracing::debug!("Applying '{}'", event.name());

        let snapshot = self.tracked.as_mut().map(TrackedGame::snapshot_mut);
        match (event, snapshot) {
            (InboundEvent::Error(error), _) => {
                tracing::warn!("Game server error: {}", error.message);
                self.last_error = Some(error.message.clone());
                ConnectionChange::ServerError(error.message)
            }
            (InboundEvent::GameUpdate(update), Some(snapshot)) => {
                snapshot.apply_update(update);
                ConnectionChange::GameUpdated
            }
            (InboundEvent::GameEnd(end), Some(snapshot)) => {
                let outcome = end.outcome;
                snapshot.apply_end(end);
                ConnectionChange::GameEnded(outcome)
            }
            (InboundEvent::DrawOffered(offer), Some(snapshot)) => {
                snapshot.record_draw_offer(offer.offered_by.clone());
                ConnectionChange::DrawOffered(offer.offered_by)
            }
            (InboundEvent::DrawDeclined(_), Some(snapshot)) => {
                snapshot.clear_draw_offer();
                ConnectionChange::DrawDeclined
            }
            (_, None) => ConnectionChange::Ignored,
        }
    }

    /// Wait for the next inbound event and apply it.
    ///
    /// Stays pending while there is no connection; reports
    /// [`ConnectionChange::ConnectionLost`] once when the link closes.
    pub async fn next_change(&mut self) -> ConnectionChange {
        let event = match self.link.as_mut() {
            Some(link) => link.inbound.recv().await,
            None => std::future::pending().await,
        };

        match event {
            Some(event) => self.apply(event),
            None => {
                tracing::warn!("Lost connection to game server");
                self.link = None;
                self.link_token = None;
                self.status = ConnectionStatus::Disconnected;
                self.last_error = Some("Connection to game server lost".to_string());
                ConnectionChange::ConnectionLost
            }
        }
    }

    // ========================================
    // Outbound
    // ========================================

    /// Fire and forget; dropped when there is no connection.
    fn emit(&self, action: OutboundAction) -> bool {
        match &self.link {
            Some(link) => {
                let name = action.name();
                if link.outbound.send(action).is_err() {
                    tracing::debug!("Connection closing, dropping '{}'", name);
                    return false;
                }
                true
            }
            None => {
                tracing::debug!("Not connected, dropping '{}'", action.name());
                false
            }
        }
    }

    pub fn make_move(&self, game_id: &GameId, move_san: &str) -> bool {
        self.emit(OutboundAction::MakeMove {
            game_id: game_id.clone(),
            move_san: move_san.to_string(),
            move_time: self.clock.now_unix_secs(),
        })
    }

    pub fn resign(&self, game_id: &GameId) -> bool {
        self.emit(OutboundAction::Resign {
            game_id: game_id.clone(),
        })
    }

    pub fn offer_draw(&self, game_id: &GameId) -> bool {
        self.emit(OutboundAction::OfferDraw {
            game_id: game_id.clone(),
        })
    }

    pub fn accept_draw(&self, game_id: &GameId) -> bool {
        self.emit(OutboundAction::AcceptDraw {
            game_id: game_id.clone(),
        })
    }

    pub fn decline_draw(&self, game_id: &GameId) -> bool {
        self.emit(OutboundAction::DeclineDraw {
            game_id: game_id.clone(),
        })
    }

    pub fn spectate(&self, game_id: &GameId) -> bool {
        self.emit(OutboundAction::Spectate {
            game_id: game_id.clone(),
        })
    }

    // ========================================
    // Role assignment
    // ========================================

    /// Track a game the local user plays; any spectated game is dropped.
    pub fn set_active_game(&mut self, snapshot: GameSnapshot) {
        self.tracked = Some(TrackedGame::Active(snapshot));
    }

    /// Track a game as an observer; any active game is dropped.
    pub fn set_spectated_game(&mut self, snapshot: GameSnapshot) {
        self.tracked = Some(TrackedGame::Spectated(snapshot));
    }

    pub fn clear_game(&mut self) {
        self.tracked = None;
    }

    /// Validate `input` against the tracked game and emit it as `make_move`.
    ///
    /// Nothing is emitted when the move is refused locally. Returns the move
    /// in SAN.
    pub async fn submit_move(&self, input: &str) -> Result<String, ClientError> {
        let user_id = self
            .session
            .lock()
            .await
            .user_id()
            .cloned()
            .ok_or(ClientError::NotAuthenticated)?;
        let tracked = self.tracked.as_ref().ok_or_else(|| {
            MoveRejection::BoardUnavailable("no game is being tracked".to_string())
        })?;

        let san = GameView::new(tracked, Some(&user_id)).attempt_move(input)?;
        if !self.make_move(tracked.id(), &san) {
            return Err(ClientError::Transport(
                "not connected to the game server".to_string(),
            ));
        }
        Ok(san)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Credentials, DrawDeclined, DrawOffered, GameEnd, GameStatus, GameUpdate, ServerError,
            credentials::fixtures::user, game::fixtures::active_game,
        },
        infrastructure::store::InMemoryCredentialStore,
        usecase::session::Session,
    };
    use async_trait::async_trait;
    use chessearn_shared::time::FixedClock;
    use tokio::sync::{Mutex, mpsc};

    /// Connector handing out in-process channels instead of a socket.
    #[derive(Default)]
    struct FakeConnector {
        reject: Option<fn() -> ClientError>,
        peers: Mutex<Vec<FakePeer>>,
        tokens: Mutex<Vec<String>>,
    }

    struct FakePeer {
        to_client: mpsc::UnboundedSender<InboundEvent>,
        from_client: mpsc::UnboundedReceiver<OutboundAction>,
    }

    #[async_trait]
    impl RealtimeConnector for FakeConnector {
        async fn connect(&self, access_token: &str) -> Result<RealtimeLink, ClientError> {
            self.tokens.lock().await.push(access_token.to_string());
            if let Some(reject) = self.reject {
                return Err(reject());
            }
            let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
            let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
            self.peers.lock().await.push(FakePeer {
                to_client: inbound_tx,
                from_client: outbound_rx,
            });
            Ok(RealtimeLink::new(outbound_tx, inbound_rx, Vec::new()))
        }
    }

    async fn manager_with(connector: Arc<FakeConnector>, me: &str) -> (ConnectionManager, SharedSession) {
        let credentials = Credentials::new("a1".to_string(), "r1".to_string(), user(me, me));
        let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials));
        let session = Session::hydrate(store).await.unwrap().into_shared();
        let manager = ConnectionManager::new(connector, session.clone(), Arc::new(FixedClock::new(1_700_000_000_500)));
        (manager, session)
    }

    fn gid(id: &str) -> GameId {
        GameId::new(id).unwrap()
    }

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_connect_success_sets_connected() {
        // テスト項目: 接続成功でステータスが connected になりエラーが消える
        // given (前提条件):
        let connector = Arc::new(FakeConnector::default());
        let (mut manager, _) = manager_with(connector.clone(), "alice").await;
        manager.last_error = Some("old".to_string());

        // when (操作):
        manager.connect().await.unwrap();

        // then (期待する結果):
        assert_eq!(manager.status(), ConnectionStatus::Connected);
        assert!(manager.last_error().is_none());
        assert_eq!(*connector.tokens.lock().await, vec!["a1".to_string()]);
    }

    #[tokio::test]
    async fn test_authorization_rejection_forces_logout() {
        // テスト項目: 認可エラーで接続に失敗するとログアウトされる
        // given (前提条件):
        let connector = Arc::new(FakeConnector {
            reject: Some(|| ClientError::Unauthorized("Connection rejected by server".to_string())),
            ..Default::default()
        });
        let (mut manager, session) = manager_with(connector, "alice").await;

        // when (操作):
        let result = manager.connect().await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert!(manager.last_error().is_some());
        assert!(!session.lock().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_session() {
        // テスト項目: ネットワークエラーでの接続失敗ではセッションは保持される
        // given (前提条件):
        let connector = Arc::new(FakeConnector {
            reject: Some(|| ClientError::Transport("connection refused".to_string())),
            ..Default::default()
        });
        let (mut manager, session) = manager_with(connector, "alice").await;

        // when (操作):
        let result = manager.connect().await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert!(session.lock().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_role_assignment_is_mutually_exclusive() {
        // テスト項目: アクティブゲームと観戦ゲームは同時に保持されない
        // given (前提条件):
        let (mut manager, _) = manager_with(Arc::new(FakeConnector::default()), "alice").await;

        // when (操作):
        manager.set_spectated_game(active_game("g1", "bob", "carol"));
        manager.set_active_game(active_game("g2", "alice", "bob"));

        // then (期待する結果):
        assert!(manager.spectated_game().is_none());
        assert_eq!(manager.active_game().map(|g| g.id.as_str()), Some("g2"));

        manager.set_spectated_game(active_game("g1", "bob", "carol"));
        assert!(manager.active_game().is_none());
        assert_eq!(manager.spectated_game().map(|g| g.id.as_str()), Some("g1"));
    }

    #[tokio::test]
    async fn test_draw_offer_then_decline_and_foreign_game_ignored() {
        // テスト項目: 追跡中のゲームの引き分け提案が記録・解除され、他ゲームのイベントは無視される
        // given (前提条件):
        let (mut manager, _) = manager_with(Arc::new(FakeConnector::default()), "alice").await;
        manager.set_active_game(active_game("g1", "alice", "bob"));

        // when (操作):
        let offered = manager.apply(InboundEvent::DrawOffered(DrawOffered {
            game_id: gid("g1"),
            offered_by: uid("bob"),
        }));
        let after_offer = manager.active_game().unwrap().draw_offered_by.clone();
        let foreign = manager.apply(InboundEvent::DrawDeclined(DrawDeclined {
            game_id: gid("other"),
            declined_by: None,
        }));
        let after_foreign = manager.active_game().unwrap().draw_offered_by.clone();
        let declined = manager.apply(InboundEvent::DrawDeclined(DrawDeclined {
            game_id: gid("g1"),
            declined_by: Some(uid("alice")),
        }));

        // then (期待する結果):
        assert_eq!(offered, ConnectionChange::DrawOffered(uid("bob")));
        assert_eq!(after_offer, Some(uid("bob")));
        assert_eq!(foreign, ConnectionChange::Ignored);
        assert_eq!(after_foreign, Some(uid("bob")));
        assert_eq!(declined, ConnectionChange::DrawDeclined);
        assert!(manager.active_game().unwrap().draw_offered_by.is_none());
    }

    #[tokio::test]
    async fn test_last_update_wins() {
        // テスト項目: 連続した game_update の最終結果が最後のイベントの内容になる
        // given (前提条件):
        let (mut manager, _) = manager_with(Arc::new(FakeConnector::default()), "alice").await;
        manager.set_spectated_game(active_game("g1", "bob", "carol"));
        let mut first = active_game("g1", "bob", "carol");
        first.moves = "e4".to_string();
        first.fen = Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_string());
        let mut second = first.clone();
        second.moves = "e4 e5".to_string();
        second.fen = None;
        second.black_time_remaining = Some(290.0);

        // when (操作):
        manager.apply(InboundEvent::GameUpdate(GameUpdate(first.clone())));
        manager.apply(InboundEvent::GameUpdate(GameUpdate(second.clone())));

        // then (期待する結果):
        let snapshot = manager.spectated_game().unwrap();
        assert_eq!(snapshot.moves, "e4 e5");
        assert_eq!(snapshot.black_time_remaining, Some(290.0));
        assert_eq!(snapshot.fen, first.fen);
    }

    #[tokio::test]
    async fn test_game_end_completes_and_error_keeps_snapshot() {
        // テスト項目: game_end で completed になり、error イベントはスナップショットを変えない
        // given (前提条件):
        let (mut manager, _) = manager_with(Arc::new(FakeConnector::default()), "alice").await;
        manager.set_active_game(active_game("g1", "alice", "bob"));

        // when (操作):
        let error = manager.apply(InboundEvent::Error(ServerError {
            message: "Not your turn".to_string(),
        }));
        let before_end = manager.active_game().cloned();
        let ended = manager.apply(InboundEvent::GameEnd(GameEnd {
            game_id: gid("g1"),
            outcome: GameOutcome::BlackWin,
            white_time_remaining: Some(0.0),
            black_time_remaining: Some(120.0),
        }));

        // then (期待する結果):
        assert_eq!(error, ConnectionChange::ServerError("Not your turn".to_string()));
        assert_eq!(before_end, Some(active_game("g1", "alice", "bob")));
        assert_eq!(manager.last_error(), Some("Not your turn"));
        assert_eq!(ended, ConnectionChange::GameEnded(GameOutcome::BlackWin));
        let snapshot = manager.active_game().unwrap();
        assert_eq!(snapshot.status, GameStatus::Completed);
        assert_eq!(snapshot.white_time_remaining, Some(0.0));
    }

    #[tokio::test]
    async fn test_cleared_game_ignores_events() {
        // テスト項目: 追跡を解除した後はゲームイベントが無視され、解除したエラーは残らない
        // given (前提条件):
        let (mut manager, _) = manager_with(Arc::new(FakeConnector::default()), "alice").await;
        manager.set_active_game(active_game("g1", "alice", "bob"));
        manager.apply(InboundEvent::Error(ServerError {
            message: "Not your turn".to_string(),
        }));

        // when (操作):
        manager.clear_error();
        manager.clear_game();
        let change = manager.apply(InboundEvent::DrawOffered(DrawOffered {
            game_id: gid("g1"),
            offered_by: uid("bob"),
        }));

        // then (期待する結果):
        assert_eq!(change, ConnectionChange::Ignored);
        assert!(manager.tracked().is_none());
        assert!(manager.last_error().is_none());
    }

    #[tokio::test]
    async fn test_emitters_are_noops_without_connection() {
        // テスト項目: 未接続時の送信は何もしない
        let (manager, _) = manager_with(Arc::new(FakeConnector::default()), "alice").await;
        assert!(!manager.resign(&gid("g1")));
        assert!(!manager.spectate(&gid("g1")));
    }

    #[tokio::test]
    async fn test_submit_move_emits_make_move() {
        // テスト項目: 自分の手番の合法手は SAN とクライアント時刻付きで送信される
        // given (前提条件):
        let connector = Arc::new(FakeConnector::default());
        let (mut manager, _) = manager_with(connector.clone(), "alice").await;
        manager.set_active_game(active_game("g1", "alice", "bob"));
        manager.connect().await.unwrap();

        // when (操作):
        let san = manager.submit_move("g1f3").await.unwrap();

        // then (期待する結果):
        assert_eq!(san, "Nf3");
        let mut peers = connector.peers.lock().await;
        let action = peers[0].from_client.try_recv().unwrap();
        assert_eq!(
            action,
            OutboundAction::MakeMove {
                game_id: gid("g1"),
                move_san: "Nf3".to_string(),
                move_time: 1_700_000_000.5,
            }
        );
    }

    #[tokio::test]
    async fn test_move_out_of_turn_is_not_emitted() {
        // テスト項目: 手番でないプレイヤーの手は送信されずに拒否される
        // given (前提条件):
        let connector = Arc::new(FakeConnector::default());
        let (mut manager, _) = manager_with(connector.clone(), "bob").await;
        manager.set_active_game(active_game("g1", "alice", "bob"));
        manager.connect().await.unwrap();

        // when (操作):
        let result = manager.submit_move("e5").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ClientError::MoveRejected(MoveRejection::NotYourTurn))
        ));
        let mut peers = connector.peers.lock().await;
        assert!(peers[0].from_client.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_next_change_applies_pushed_events_and_detects_loss() {
        // テスト項目: 受信したイベントが適用され、切断時は ConnectionLost になる
        // given (前提条件):
        let connector = Arc::new(FakeConnector::default());
        let (mut manager, _) = manager_with(connector.clone(), "alice").await;
        manager.set_active_game(active_game("g1", "alice", "bob"));
        manager.connect().await.unwrap();
        let peer = connector.peers.lock().await.pop().unwrap();
        peer.to_client
            .send(InboundEvent::DrawOffered(DrawOffered {
                game_id: gid("g1"),
                offered_by: uid("bob"),
            }))
            .unwrap();

        // when (操作):
        let first = manager.next_change().await;
        drop(peer);
        let second = manager.next_change().await;

        // then (期待する結果):
        assert_eq!(first, ConnectionChange::DrawOffered(uid("bob")));
        assert_eq!(second, ConnectionChange::ConnectionLost);
        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
    }

    #[tokio::test]
    async fn test_credentials_change_drives_connection() {
        // テスト項目: トークン変更で再接続し、ログアウトで切断される
        // given (前提条件):
        let connector = Arc::new(FakeConnector::default());
        let (mut manager, session) = manager_with(connector.clone(), "alice").await;
        manager.connect().await.unwrap();

        // when (操作):
        manager.on_credentials_changed().await.unwrap();
        session
            .lock()
            .await
            .replace_access_token("a2".to_string())
            .await
            .unwrap();
        manager.on_credentials_changed().await.unwrap();
        let reconnected = manager.status();
        session.lock().await.logout().await.unwrap();
        manager.on_credentials_changed().await.unwrap();

        // then (期待する結果):
        assert_eq!(
            *connector.tokens.lock().await,
            vec!["a1".to_string(), "a2".to_string()]
        );
        assert_eq!(reconnected, ConnectionStatus::Connected);
        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert!(!manager.is_connected());
    }

    #[tokio::test]
    async fn test_reconnect_resends_spectate() {
        // テスト項目: 観戦中に接続すると spectate が送信される
        // given (前提条件):
        let connector = Arc::new(FakeConnector::default());
        let (mut manager, _) = manager_with(connector.clone(), "carol").await;
        manager.set_spectated_game(GameSnapshot::placeholder(gid("g1")));

        // when (操作):
        manager.connect().await.unwrap();

        // then (期待する結果):
        let mut peers = connector.peers.lock().await;
        assert_eq!(
            peers[0].from_client.try_recv().unwrap(),
            OutboundAction::Spectate { game_id: gid("g1") }
        );
    }
}
