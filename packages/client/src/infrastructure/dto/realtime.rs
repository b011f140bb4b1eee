//! Socket.IO event payloads.

use serde::{Deserialize, Serialize};

use super::http::{GameDto, GameOutcomeDto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEndPayload {
    pub game_id: String,
    pub outcome: GameOutcomeDto,
    #[serde(default)]
    pub white_time_remaining: Option<f64>,
    #[serde(default)]
    pub black_time_remaining: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOfferedPayload {
    pub game_id: String,
    pub offered_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawDeclinedPayload {
    pub game_id: String,
    #[serde(default)]
    pub declined_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// Inbound event, adjacently tagged as `{"event": name, "data": payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum InboundEventDto {
    GameUpdate(GameDto),
    GameEnd(GameEndPayload),
    DrawOffered(DrawOfferedPayload),
    DrawDeclined(DrawDeclinedPayload),
    Error(ErrorPayload),
}

/// `make_move`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeMovePayload {
    pub game_id: String,
    pub move_san: String,
    pub move_time: f64,
}

/// `resign`, `offer_draw`, `accept_draw`, `decline_draw`, `spectate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRefPayload {
    pub game_id: String,
}
