//! Data Transfer Objects (DTOs) for the ChessEarn API.
//!
//! DTOs are organized by protocol:
//! - `http`: REST request/response contracts, one per endpoint
//! - `realtime`: Socket.IO event payloads
//!
//! `conversion` validates DTOs into domain types at the boundary.

pub mod conversion;
pub mod http;
pub mod realtime;
