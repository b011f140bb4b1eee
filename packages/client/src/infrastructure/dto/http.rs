//! REST request/response contracts.

use serde::{Deserialize, Serialize};

use crate::domain::UserProfile;

/// `POST /auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub phone_number: String,
    pub password: String,
}

/// Responses carrying only a message (signup, errors)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /auth/login`; `identifier` is an email, username or phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

/// `POST /auth/refresh` (bearer refresh token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub access_token: String,
}

/// `GET /profile/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
}

/// `POST /game/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub is_rated: bool,
    /// Seconds
    pub base_time: u32,
    /// Seconds
    pub increment: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_amount: Option<f64>,
}

impl Default for CreateGameRequest {
    fn default() -> Self {
        Self {
            is_rated: true,
            base_time: 300,
            increment: 0,
            opponent_id: None,
            bet_amount: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatusDto {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcomeDto {
    WhiteWin,
    BlackWin,
    Draw,
    Incomplete,
}

/// Game record as serialized by the server (also the `game_update` payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDto {
    pub id: String,
    #[serde(default)]
    pub white_player_id: Option<String>,
    #[serde(default)]
    pub black_player_id: Option<String>,
    #[serde(default)]
    pub white_player: Option<String>,
    #[serde(default)]
    pub black_player: Option<String>,
    pub status: GameStatusDto,
    #[serde(default)]
    pub outcome: Option<GameOutcomeDto>,
    #[serde(default)]
    pub is_rated: bool,
    #[serde(default)]
    pub moves: Option<String>,
    #[serde(default)]
    pub base_time: u32,
    #[serde(default)]
    pub increment: u32,
    #[serde(default)]
    pub white_time_remaining: Option<f64>,
    #[serde(default)]
    pub black_time_remaining: Option<f64>,
    #[serde(default)]
    pub draw_offered_by: Option<String>,
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `{"message": ..., "game": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub game: GameDto,
}

/// `{"message": ..., "games": [...]}` (`/game/open`, `/game/history`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameListEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub games: Vec<GameDto>,
}
