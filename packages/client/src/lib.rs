//! ChessEarn client library.
//!
//! Session handling, an authenticated REST client with transparent token
//! refresh, a Socket.IO connection manager that keeps one local game snapshot
//! in sync with the game server, and the terminal front-end built on top.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::{ClientError, MoveRejection};
