//! Engine.IO v4 / Socket.IO v4 text framing.
//!
//! Only what the game server uses over a WebSocket transport is supported:
//! the default namespace, JSON (non-binary) events and no acknowledgements.
//!
//! ```text
//! 0{"sid":..,"pingInterval":..}   engine open
//! 2 / 3                           ping / pong
//! 40{"token":..}                  socket connect (client auth / server ack)
//! 42["game_update",{..}]          event
//! 44{"message":..}                connect error
//! ```

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty frame")]
    Empty,

    #[error("unsupported packet type '{0}'")]
    Unsupported(String),

    #[error("malformed frame: {0}")]
    Malformed(String),
}

/// Engine.IO handshake data sent with the open packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInfo {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(OpenInfo),
    Close,
    Ping,
    Pong,
    /// Socket connect; carries the auth payload (client) or `{"sid"}` (server)
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, data: Value },
    ConnectError(String),
}

impl Packet {
    pub fn event(name: impl Into<String>, data: Value) -> Self {
        Packet::Event {
            name: name.into(),
            data,
        }
    }
}

pub fn encode(packet: &Packet) -> String {
    match packet {
        Packet::Open(info) => format!(
            "0{}",
            serde_json::json!({
                "sid": info.sid,
                "pingInterval": info.ping_interval,
                "pingTimeout": info.ping_timeout,
            })
        ),
        Packet::Close => "1".to_string(),
        Packet::Ping => "2".to_string(),
        Packet::Pong => "3".to_string(),
        Packet::Connect(None) => "40".to_string(),
        Packet::Connect(Some(payload)) => format!("40{}", payload),
        Packet::Disconnect => "41".to_string(),
        Packet::Event { name, data } => {
            let array = if data.is_null() {
                serde_json::json!([name])
            } else {
                serde_json::json!([name, data])
            };
            format!("42{}", array)
        }
        Packet::ConnectError(message) => {
            format!("44{}", serde_json::json!({ "message": message }))
        }
    }
}

/// Strip an optional `/namespace,` prefix and ack id before the JSON body.
fn socket_body(rest: &str) -> &str {
    let rest = if rest.starts_with('/') {
        rest.find(',').map(|i| &rest[i + 1..]).unwrap_or("")
    } else {
        rest
    };
    rest.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn parse_json(body: &str) -> Result<Value, ProtocolError> {
    serde_json::from_str(body).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

fn decode_socket(text: &str) -> Result<Packet, ProtocolError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let body = socket_body(chars.as_str());

    match kind {
        '0' => {
            if body.is_empty() {
                Ok(Packet::Connect(None))
            } else {
                Ok(Packet::Connect(Some(parse_json(body)?)))
            }
        }
        '1' => Ok(Packet::Disconnect),
        '2' => {
            let value = parse_json(body)?;
            let mut items = match value {
                Value::Array(items) => items.into_iter(),
                other => {
                    return Err(ProtocolError::Malformed(format!(
                        "event body is not an array: {}",
                        other
                    )));
                }
            };
            let name = match items.next() {
                Some(Value::String(name)) => name,
                _ => return Err(ProtocolError::Malformed("event without a name".to_string())),
            };
            let data = items.next().unwrap_or(Value::Null);
            Ok(Packet::Event { name, data })
        }
        '4' => {
            let message = if body.is_empty() {
                String::new()
            } else {
                match parse_json(body)? {
                    Value::String(message) => message,
                    value => value
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| value.to_string()),
                }
            };
            Ok(Packet::ConnectError(message))
        }
        other => Err(ProtocolError::Unsupported(format!("4{}", other))),
    }
}

pub fn decode(text: &str) -> Result<Packet, ProtocolError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let rest = chars.as_str();

    match kind {
        '0' => {
            let info: OpenInfo =
                serde_json::from_str(rest).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
            Ok(Packet::Open(info))
        }
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket(rest),
        other => Err(ProtocolError::Unsupported(other.to_string())),
    }
}
