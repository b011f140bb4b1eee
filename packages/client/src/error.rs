//! Error types for the ChessEarn client.

use thiserror::Error;

use crate::domain::{GameStatus, StoreError, ValidationError};

/// Client-specific errors
///
/// Every variant renders to a message fit for display; nothing here is meant to
/// terminate the application.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Bad identifier/password or rejected signup
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Access token expired or invalid and could not be recovered
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No credentials available for an operation that requires them
    #[error("Not logged in")]
    NotAuthenticated,

    /// Network or connection error
    #[error("Connection error: {0}")]
    Transport(String),

    /// Non-success response from the REST API
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// Payload that does not match the expected contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Move refused locally, never sent to the server
    #[error(transparent)]
    MoveRejected(#[from] MoveRejection),

    /// Credential persistence failure
    #[error("Credential store error: {0}")]
    Store(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request refused locally before reaching the server
    #[error("{0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Authorization-class failures are the only ones with an automated
    /// recovery action (refresh, then logout).
    pub fn is_authorization(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Protocol(err.to_string())
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        ClientError::Store(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Reasons a move attempt is refused before reaching the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("You are not playing in this game")]
    NotParticipant,

    #[error("Game is not active (status: {0})")]
    GameNotActive(GameStatus),

    #[error("Not your turn!")]
    NotYourTurn,

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Board position unavailable: {0}")]
    BoardUnavailable(String),
}
