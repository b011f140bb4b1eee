//! Realtime channel: Socket.IO framing and the WebSocket connector.

pub mod protocol;
pub mod socketio;

pub use socketio::SocketIoConnector;
