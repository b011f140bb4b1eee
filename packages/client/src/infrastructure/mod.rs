//! Infrastructure layer: wire contracts and the concrete implementations of
//! the domain traits (REST transport, credential stores, Socket.IO connector).

pub mod dto;
pub mod http;
pub mod realtime;
pub mod store;
