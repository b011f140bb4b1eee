//! Conversion logic between DTOs and domain types.
//!
//! Inbound conversions validate ids and enums, so nothing downstream trusts
//! field presence.

use crate::{
    domain::{
        DrawDeclined, DrawOffered, GameEnd, GameId, GameOutcome, GameSnapshot, GameStatus,
        GameUpdate, InboundEvent, OutboundAction, ServerError, UserId, ValidationError,
    },
    error::ClientError,
};

use super::{
    http::{GameDto, GameOutcomeDto, GameStatusDto},
    realtime::{GameRefPayload, InboundEventDto, MakeMovePayload},
};

const DEFAULT_SERVER_ERROR: &str = "Game error occurred";

fn optional_user(value: Option<String>) -> Result<Option<UserId>, ValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => UserId::new(raw).map(Some),
        _ => Ok(None),
    }
}

// ========================================
// DTO → Domain
// ========================================

impl From<GameStatusDto> for GameStatus {
    fn from(dto: GameStatusDto) -> Self {
        match dto {
            GameStatusDto::Pending => GameStatus::Pending,
            GameStatusDto::Active => GameStatus::Active,
            GameStatusDto::Completed => GameStatus::Completed,
        }
    }
}

impl From<GameOutcomeDto> for GameOutcome {
    fn from(dto: GameOutcomeDto) -> Self {
        match dto {
            GameOutcomeDto::WhiteWin => GameOutcome::WhiteWin,
            GameOutcomeDto::BlackWin => GameOutcome::BlackWin,
            GameOutcomeDto::Draw => GameOutcome::Draw,
            GameOutcomeDto::Incomplete => GameOutcome::Incomplete,
        }
    }
}

impl TryFrom<GameDto> for GameSnapshot {
    type Error = ValidationError;

    fn try_from(dto: GameDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: GameId::new(dto.id)?,
            white_player_id: optional_user(dto.white_player_id)?,
            black_player_id: optional_user(dto.black_player_id)?,
            white_player: dto.white_player,
            black_player: dto.black_player,
            status: dto.status.into(),
            outcome: dto.outcome.map(Into::into).unwrap_or(GameOutcome::Incomplete),
            is_rated: dto.is_rated,
            moves: dto.moves.unwrap_or_default(),
            base_time: dto.base_time,
            increment: dto.increment,
            white_time_remaining: dto.white_time_remaining,
            black_time_remaining: dto.black_time_remaining,
            draw_offered_by: optional_user(dto.draw_offered_by)?,
            fen: dto.fen.filter(|fen| !fen.trim().is_empty()),
            start_time: dto.start_time,
            end_time: dto.end_time,
            created_at: dto.created_at,
        })
    }
}

impl TryFrom<InboundEventDto> for InboundEvent {
    type Error = ValidationError;

    fn try_from(dto: InboundEventDto) -> Result<Self, ValidationError> {
        Ok(match dto {
            InboundEventDto::GameUpdate(game) => {
                InboundEvent::GameUpdate(GameUpdate(GameSnapshot::try_from(game)?))
            }
            InboundEventDto::GameEnd(end) => InboundEvent::GameEnd(GameEnd {
                game_id: GameId::new(end.game_id)?,
                outcome: end.outcome.into(),
                white_time_remaining: end.white_time_remaining,
                black_time_remaining: end.black_time_remaining,
            }),
            InboundEventDto::DrawOffered(offer) => InboundEvent::DrawOffered(DrawOffered {
                game_id: GameId::new(offer.game_id)?,
                offered_by: UserId::new(offer.offered_by)?,
            }),
            InboundEventDto::DrawDeclined(decline) => InboundEvent::DrawDeclined(DrawDeclined {
                game_id: GameId::new(decline.game_id)?,
                declined_by: optional_user(decline.declined_by)?,
            }),
            InboundEventDto::Error(error) => InboundEvent::Error(ServerError {
                message: error
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string()),
            }),
        })
    }
}

/// Decode one named realtime event.
///
/// Returns `Ok(None)` for event names outside the known set so the caller
/// can log and drop them; known names with a malformed payload are errors.
pub fn decode_inbound(
    name: &str,
    data: serde_json::Value,
) -> Result<Option<InboundEvent>, ClientError> {
    const KNOWN: [&str; 5] = [
        InboundEvent::GAME_UPDATE,
        InboundEvent::GAME_END,
        InboundEvent::DRAW_OFFERED,
        InboundEvent::DRAW_DECLINED,
        InboundEvent::ERROR,
    ];
    if !KNOWN.contains(&name) {
        return Ok(None);
    }

    let envelope = serde_json::json!({ "event": name, "data": data });
    let dto: InboundEventDto = serde_json::from_value(envelope)
        .map_err(|e| ClientError::Protocol(format!("malformed '{}' event: {}", name, e)))?;
    Ok(Some(InboundEvent::try_from(dto)?))
}

// ========================================
// Domain → DTO
// ========================================

/// Event name and JSON payload for an outbound action.
pub fn encode_outbound(action: &OutboundAction) -> (&'static str, serde_json::Value) {
    let payload = match action {
        OutboundAction::MakeMove {
            game_id,
            move_san,
            move_time,
        } => serde_json::to_value(MakeMovePayload {
            game_id: game_id.as_str().to_string(),
            move_san: move_san.clone(),
            move_time: *move_time,
        }),
        other => serde_json::to_value(GameRefPayload {
            game_id: other.game_id().as_str().to_string(),
        }),
    };
    // Serializing plain structs of strings and floats cannot fail
    (action.name(), payload.unwrap_or(serde_json::Value::Null))
}
