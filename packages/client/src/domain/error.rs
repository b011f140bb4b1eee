//! Domain-level error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Game ID cannot be empty")]
    EmptyGameId,

    #[error("User ID cannot be empty")]
    EmptyUserId,
}

/// Credential persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted credential file: {0}")]
    Corrupted(#[from] serde_json::Error),
}
