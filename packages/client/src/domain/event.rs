//! Realtime events exchanged with the game server.
//!
//! Both directions are closed sets: every inbound event is one of
//! [`InboundEvent`]'s variants and is dispatched through one exhaustive
//! handler; every outbound action is one of [`OutboundAction`]'s variants.

use super::{
    game::{GameOutcome, GameSnapshot},
    value_object::{GameId, UserId},
};

/// Full game state pushed by the server (`game_update`).
#[derive(Debug, Clone, PartialEq)]
pub struct GameUpdate(pub GameSnapshot);

/// Terminal fields pushed when a game finishes (`game_end`).
#[derive(Debug, Clone, PartialEq)]
pub struct GameEnd {
    pub game_id: GameId,
    pub outcome: GameOutcome,
    pub white_time_remaining: Option<f64>,
    pub black_time_remaining: Option<f64>,
}

/// `draw_offered`
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOffered {
    pub game_id: GameId,
    pub offered_by: UserId,
}

/// `draw_declined`
#[derive(Debug, Clone, PartialEq)]
pub struct DrawDeclined {
    pub game_id: GameId,
    pub declined_by: Option<UserId>,
}

/// Generic `error` event; transient and never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerError {
    pub message: String,
}

/// Server → client events
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    GameUpdate(GameUpdate),
    GameEnd(GameEnd),
    DrawOffered(DrawOffered),
    DrawDeclined(DrawDeclined),
    Error(ServerError),
}

impl InboundEvent {
    pub const GAME_UPDATE: &'static str = "game_update";
    pub const GAME_END: &'static str = "game_end";
    pub const DRAW_OFFERED: &'static str = "draw_offered";
    pub const DRAW_DECLINED: &'static str = "draw_declined";
    pub const ERROR: &'static str = "error";

    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::GameUpdate(_) => Self::GAME_UPDATE,
            InboundEvent::GameEnd(_) => Self::GAME_END,
            InboundEvent::DrawOffered(_) => Self::DRAW_OFFERED,
            InboundEvent::DrawDeclined(_) => Self::DRAW_DECLINED,
            InboundEvent::Error(_) => Self::ERROR,
        }
    }

    /// Game the event refers to; `None` for events not bound to a game.
    pub fn game_id(&self) -> Option<&GameId> {
        match self {
            InboundEvent::GameUpdate(GameUpdate(snapshot)) => Some(&snapshot.id),
            InboundEvent::GameEnd(end) => Some(&end.game_id),
            InboundEvent::DrawOffered(offer) => Some(&offer.game_id),
            InboundEvent::DrawDeclined(decline) => Some(&decline.game_id),
            InboundEvent::Error(_) => None,
        }
    }
}

/// Client → server actions
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    MakeMove {
        game_id: GameId,
        move_san: String,
        /// Client timestamp, Unix seconds
        move_time: f64,
    },
    Resign {
        game_id: GameId,
    },
    OfferDraw {
        game_id: GameId,
    },
    AcceptDraw {
        game_id: GameId,
    },
    DeclineDraw {
        game_id: GameId,
    },
    Spectate {
        game_id: GameId,
    },
}

impl OutboundAction {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundAction::MakeMove { .. } => "make_move",
            OutboundAction::Resign { .. } => "resign",
            OutboundAction::OfferDraw { .. } => "offer_draw",
            OutboundAction::AcceptDraw { .. } => "accept_draw",
            OutboundAction::DeclineDraw { .. } => "decline_draw",
            OutboundAction::Spectate { .. } => "spectate",
        }
    }

    pub fn game_id(&self) -> &GameId {
        match self {
            OutboundAction::MakeMove { game_id, .. }
            | OutboundAction::Resign { game_id }
            | OutboundAction::OfferDraw { game_id }
            | OutboundAction::AcceptDraw { game_id }
            | OutboundAction::DeclineDraw { game_id }
            | OutboundAction::Spectate { game_id } => game_id,
        }
    }
}
