//! Utilities shared by the ChessEarn client library and binary.

pub mod logger;
pub mod time;
