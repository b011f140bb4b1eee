//! UseCase: ゲーム (create / join / get / open / history)

use crate::{
    domain::{ApiRequest, ApiResponse, GameId, GameSnapshot, UserId},
    error::ClientError,
    infrastructure::dto::http::{CreateGameRequest, GameEnvelope, GameListEnvelope},
};

use super::authenticated_request::{AuthenticatedClient, ensure_success};

/// `GET /game/history` paging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub page: u32,
    pub per_page: u32,
    pub user_id: Option<UserId>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            user_id: None,
        }
    }
}

pub struct GameUseCase {
    client: AuthenticatedClient,
}

impl GameUseCase {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    /// `POST /game/create`; the creator takes the white side.
    pub async fn create(&self, request: CreateGameRequest) -> Result<GameSnapshot, ClientError> {
        let body = serde_json::to_value(&request)
            .map_err(|e| ClientError::Protocol(e.to_string()))?;
        let response = self
            .client
            .send(ApiRequest::post("/game/create").with_json(body))
            .await?;
        let game = Self::game_from(ensure_success(response, "Failed to create game")?)?;
        tracing::info!(
            "Created game {} ({}+{})",
            game.id,
            game.base_time,
            game.increment
        );
        Ok(game)
    }

    /// `POST /game/join/{id}`
    ///
    /// Joining a game you created is refused locally when the game is found in
    /// the open list.
    pub async fn join(&self, game_id: &GameId) -> Result<GameSnapshot, ClientError> {
        let me = self.client.session().lock().await.user_id().cloned();
        if let Some(me) = me {
            let open = self.open_games().await?;
            if open
                .iter()
                .any(|game| &game.id == game_id && game.is_participant(&me))
            {
                return Err(ClientError::InvalidInput(
                    "Cannot join your own game".to_string(),
                ));
            }
        }

        let response = self
            .client
            .send(ApiRequest::post(format!("/game/join/{}", game_id)))
            .await?;
        let game = Self::game_from(ensure_success(response, "Failed to join game")?)?;
        tracing::info!("Joined game {}", game.id);
        Ok(game)
    }

    /// `GET /game/{id}`; participants only.
    pub async fn get(&self, game_id: &GameId) -> Result<GameSnapshot, ClientError> {
        let response = self
            .client
            .send(ApiRequest::get(format!("/game/{}", game_id)))
            .await?;
        Self::game_from(ensure_success(response, "Failed to fetch game")?)
    }

    /// `GET /game/open`: pending games still waiting for an opponent.
    pub async fn open_games(&self) -> Result<Vec<GameSnapshot>, ClientError> {
        let response = self.client.send(ApiRequest::get("/game/open")).await?;
        Self::games_from(ensure_success(response, "Failed to fetch open games")?)
    }

    /// `GET /game/history`
    pub async fn history(&self, query: &HistoryQuery) -> Result<Vec<GameSnapshot>, ClientError> {
        let mut request = ApiRequest::get("/game/history")
            .with_query("page", query.page)
            .with_query("per_page", query.per_page);
        if let Some(user_id) = &query.user_id {
            request = request.with_query("user_id", user_id);
        }
        let response = self.client.send(request).await?;
        Self::games_from(ensure_success(response, "Failed to fetch game history")?)
    }

    fn game_from(response: ApiResponse) -> Result<GameSnapshot, ClientError> {
        let envelope: GameEnvelope = response.json()?;
        Ok(GameSnapshot::try_from(envelope.game)?)
    }

    fn games_from(response: ApiResponse) -> Result<Vec<GameSnapshot>, ClientError> {
        let envelope: GameListEnvelope = response.json()?;
        envelope
            .games
            .into_iter()
            .map(|dto| GameSnapshot::try_from(dto).map_err(ClientError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::{
            Credentials, GameStatus, HttpMethod, credentials::fixtures::user,
            transport::MockHttpTransport,
        },
        infrastructure::store::InMemoryCredentialStore,
        usecase::session::Session,
    };

    async fn use_case(transport: MockHttpTransport, me: &str) -> GameUseCase {
        let credentials = Credentials::new("a1".to_string(), "r1".to_string(), user(me, me));
        let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials));
        let session = Session::hydrate(store).await.unwrap().into_shared();
        GameUseCase::new(AuthenticatedClient::new(Arc::new(transport), session))
    }

    fn game_body(id: &str, status: &str, white: &str, black: Option<&str>) -> String {
        serde_json::json!({
            "message": "ok",
            "game": {
                "id": id,
                "white_player_id": white,
                "black_player_id": black,
                "white_player": white,
                "black_player": black,
                "status": status,
                "outcome": "incomplete",
                "is_rated": true,
                "moves": "",
                "base_time": 300,
                "increment": 0,
                "white_time_remaining": 300.0,
                "black_time_remaining": black.map(|_| 300.0),
                "draw_offered_by": null
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_create_sends_time_control() {
        // テスト項目: 持ち時間 300+0 でゲームを作成すると pending のゲームが返る
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|r| {
                r.method == HttpMethod::Post
                    && r.path == "/game/create"
                    && r.body
                        == Some(serde_json::json!({"is_rated": true, "base_time": 300, "increment": 0}))
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(201, game_body("g1", "pending", "alice", None))));
        let games = use_case(transport, "alice").await;

        // when (操作):
        let game = games.create(CreateGameRequest::default()).await.unwrap();

        // then (期待する結果):
        assert_eq!(game.status, GameStatus::Pending);
        assert_eq!(game.white_player_id.as_ref().map(UserId::as_str), Some("alice"));
        assert!(game.black_player_id.is_none());
    }

    #[tokio::test]
    async fn test_join_own_game_is_refused_locally() {
        // テスト項目: 自分が作成したゲームへの参加はサーバーに送らずに拒否される
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|r| r.path == "/game/open")
            .times(1)
            .returning(|_| {
                let game: serde_json::Value =
                    serde_json::from_str(&game_body("g1", "pending", "alice", None)).unwrap();
                Ok(ApiResponse::new(
                    200,
                    serde_json::json!({"message": "1 open game(s) found", "games": [game["game"]]})
                        .to_string(),
                ))
            });
        let games = use_case(transport, "alice").await;

        // when (操作):
        let result = games.join(&GameId::new("g1").unwrap()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_join_activates_game() {
        // テスト項目: 他人のゲームに参加すると両プレイヤーが揃い active になる
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|r| r.path == "/game/open")
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, r#"{"message": "No open games found", "games": []}"#)));
        transport
            .expect_send()
            .withf(|r| r.method == HttpMethod::Post && r.path == "/game/join/g1")
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, game_body("g1", "active", "alice", Some("bob")))));
        let games = use_case(transport, "bob").await;

        // when (操作):
        let game = games.join(&GameId::new("g1").unwrap()).await.unwrap();

        // then (期待する結果):
        assert_eq!(game.status, GameStatus::Active);
        assert!(game.white_player_id.is_some());
        assert!(game.black_player_id.is_some());
    }

    #[tokio::test]
    async fn test_get_forbidden_is_api_error() {
        // テスト項目: 参加者以外のゲーム取得は 403 の API エラーになる
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(403, r#"{"message": "Unauthorized to view this game"}"#)));
        let games = use_case(transport, "carol").await;

        // when (操作):
        let result = games.get(&GameId::new("g1").unwrap()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::Api { status: 403, .. })));
    }

    #[tokio::test]
    async fn test_history_sends_paging() {
        // テスト項目: 履歴取得でページングとユーザー ID がクエリに含まれる
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|r| {
                r.path == "/game/history"
                    && r.query
                        == vec![
                            ("page".to_string(), "2".to_string()),
                            ("per_page".to_string(), "10".to_string()),
                            ("user_id".to_string(), "bob".to_string()),
                        ]
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, r#"{"message": "Game history retrieved", "games": []}"#)));
        let games = use_case(transport, "alice").await;
        let query = HistoryQuery {
            page: 2,
            per_page: 10,
            user_id: Some(UserId::new("bob").unwrap()),
        };

        // when (操作):
        let result = games.history(&query).await.unwrap();

        // then (期待する結果):
        assert!(result.is_empty());
    }
}
