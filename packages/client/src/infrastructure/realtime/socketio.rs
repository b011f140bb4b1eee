//! Socket.IO connector on top of `tokio-tungstenite`.
//!
//! ## Responsibilities
//!
//! - Open the WebSocket and run the Engine.IO / Socket.IO handshake, sending
//!   the access token as the connect auth payload
//! - Classify failures: an HTTP 401/403 on the upgrade or a Socket.IO
//!   connect error is authorization-class, everything else is transport
//! - Run one reader task (answers pings, decodes events) and one writer task
//!   (serializes outbound actions)
//! - Treat the connection as lost when no frame arrives within the server's
//!   announced ping interval plus ping timeout

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::{
    domain::{InboundEvent, OutboundAction, RealtimeConnector, RealtimeLink},
    error::ClientError,
    infrastructure::dto::conversion::{decode_inbound, encode_outbound},
};

use super::protocol::{self, OpenInfo, Packet};

const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWrite = SplitSink<WsStream, Message>;
type WsRead = SplitStream<WsStream>;

/// Connects to the game server's Socket.IO endpoint.
///
/// `url` is the full WebSocket endpoint, e.g.
/// `wss://api.chessearn.com/socket.io/?EIO=4&transport=websocket`.
#[derive(Debug, Clone)]
pub struct SocketIoConnector {
    url: String,
    handshake_timeout: Duration,
}

impl SocketIoConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

}

/// How long the reader waits for any frame before giving up on the server.
///
/// `None` when the server announced no heartbeat.
fn liveness_window(info: &OpenInfo) -> Option<Duration> {
    let millis = info.ping_interval.saturating_add(info.ping_timeout);
    (millis > 0).then(|| Duration::from_millis(millis))
}

fn classify_ws_error(error: WsError) -> ClientError {
    match &error {
        WsError::Http(response) => {
            let status = response.status().as_u16();
            if status == 401 || status == 403 {
                ClientError::Unauthorized(format!("game server refused the token (HTTP {})", status))
            } else {
                ClientError::Transport(format!("game server answered HTTP {}", status))
            }
        }
        _ => ClientError::Transport(error.to_string()),
    }
}

async fn send_packet(write: &mut WsWrite, packet: &Packet) -> Result<(), WsError> {
    write.send(Message::Text(protocol::encode(packet).into())).await
}

async fn next_packet(read: &mut WsRead) -> Result<Packet, ClientError> {
    loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                return protocol::decode(text.as_str())
                    .map_err(|e| ClientError::Protocol(e.to_string()));
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(ClientError::Transport(
                    "connection closed during handshake".to_string(),
                ));
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(classify_ws_error(e)),
        }
    }
}

async fn handshake(
    write: &mut WsWrite,
    read: &mut WsRead,
    access_token: &str,
) -> Result<OpenInfo, ClientError> {
    let info = match next_packet(read).await? {
        Packet::Open(info) => {
            tracing::debug!(
                "Engine.IO session '{}' opened (ping interval {} ms, timeout {} ms)",
                info.sid,
                info.ping_interval,
                info.ping_timeout
            );
            info
        }
        other => {
            return Err(ClientError::Protocol(format!(
                "expected engine open packet, got {:?}",
                other
            )));
        }
    };

    let auth = Packet::Connect(Some(serde_json::json!({ "token": access_token })));
    send_packet(write, &auth).await.map_err(classify_ws_error)?;

    loop {
        match next_packet(read).await? {
            Packet::Connect(_) => return Ok(info),
            Packet::ConnectError(message) => {
                let message = if message.is_empty() {
                    "connection rejected by game server".to_string()
                } else {
                    message
                };
                return Err(ClientError::Unauthorized(message));
            }
            Packet::Ping => {
                send_packet(write, &Packet::Pong)
                    .await
                    .map_err(classify_ws_error)?;
            }
            Packet::Close | Packet::Disconnect => {
                return Err(ClientError::Transport(
                    "game server closed the session during handshake".to_string(),
                ));
            }
            other => tracing::debug!("Ignoring {:?} before connect acknowledgement", other),
        }
    }
}

/// Forward decoded events until the connection ends or the server goes quiet
/// for longer than `liveness`.
async fn read_loop(
    mut read: WsRead,
    liveness: Option<Duration>,
    inbound: mpsc::UnboundedSender<InboundEvent>,
    control: mpsc::UnboundedSender<Packet>,
) {
    loop {
        let next = match liveness {
            Some(window) => match tokio::time::timeout(window, read.next()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::warn!("No frame from game server within {:?}, closing", window);
                    break;
                }
            },
            None => read.next().await,
        };
        let Some(message) = next else {
            tracing::info!("Game server stream ended");
            break;
        };

        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                tracing::info!("Game server closed the connection");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
        };

        let packet = match protocol::decode(text.as_str()) {
            Ok(packet) => packet,
            Err(e) => {
                tracing::warn!("Dropping undecodable frame: {}", e);
                continue;
            }
        };

        match packet {
            Packet::Ping => {
                if control.send(Packet::Pong).is_err() {
                    break;
                }
            }
            Packet::Event { name, data } => match decode_inbound(&name, data) {
                Ok(Some(event)) => {
                    tracing::debug!("Received '{}'", name);
                    if inbound.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => tracing::warn!("Dropping unknown event '{}'", name),
                Err(e) => tracing::warn!("Dropping event '{}': {}", name, e),
            },
            Packet::Disconnect | Packet::Close => {
                tracing::info!("Game server ended the session");
                break;
            }
            Packet::ConnectError(message) => {
                tracing::warn!("Game server reported a connect error: {}", message);
                break;
            }
            Packet::Open(_) | Packet::Connect(_) | Packet::Pong => {}
        }
    }
}

/// Serialize outbound actions and control packets until either side is gone.
async fn write_loop(
    mut write: WsWrite,
    mut outbound: mpsc::UnboundedReceiver<OutboundAction>,
    mut control: mpsc::UnboundedReceiver<Packet>,
) {
    loop {
        let packet = tokio::select! {
            Some(packet) = control.recv() => packet,
            action = outbound.recv() => match action {
                Some(action) => {
                    let (name, data) = encode_outbound(&action);
                    tracing::debug!("Emitting '{}' for game {}", name, action.game_id());
                    Packet::event(name, data)
                }
                None => break,
            },
        };

        if let Err(e) = send_packet(&mut write, &packet).await {
            tracing::warn!("Failed to send frame: {}", e);
            break;
        }
    }

    let _ = send_packet(&mut write, &Packet::Disconnect).await;
    let _ = write.close().await;
}

#[async_trait]
impl RealtimeConnector for SocketIoConnector {
    async fn connect(&self, access_token: &str) -> Result<RealtimeLink, ClientError> {
        tracing::info!("Connecting to game server at {}", self.url);

        let (ws_stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(classify_ws_error)?;
        let (mut write, mut read) = ws_stream.split();

        let info = tokio::time::timeout(
            self.handshake_timeout,
            handshake(&mut write, &mut read, access_token),
        )
        .await
        .map_err(|_| ClientError::Transport("handshake timed out".to_string()))??;
        let liveness = liveness_window(&info);

        tracing::info!("Connected to game server");

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (control_tx, control_rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_loop(read, liveness, inbound_tx, control_tx));
        let writer = tokio::spawn(write_loop(write, outbound_rx, control_rx));

        Ok(RealtimeLink::new(
            outbound_tx,
            inbound_rx,
            vec![reader, writer],
        ))
    }
}
