//! Realtime connection interface.

use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::error::ClientError;

use super::{InboundEvent, OutboundAction};

/// One open realtime connection.
///
/// Dropping the link aborts its background tasks, so no event is delivered
/// after the link is gone.
pub struct RealtimeLink {
    pub outbound: mpsc::UnboundedSender<OutboundAction>,
    pub inbound: mpsc::UnboundedReceiver<InboundEvent>,
    pub tasks: Vec<JoinHandle<()>>,
}

impl RealtimeLink {
    pub fn new(
        outbound: mpsc::UnboundedSender<OutboundAction>,
        inbound: mpsc::UnboundedReceiver<InboundEvent>,
        tasks: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            outbound,
            inbound,
            tasks,
        }
    }
}

impl Drop for RealtimeLink {
    fn drop(&mut self) {
        self.inbound.close();
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Opens realtime connections authenticated with an access token.
#[async_trait]
pub trait RealtimeConnector: Send + Sync {
    /// Open a connection.
    ///
    /// Authorization rejections must be reported as
    /// [`ClientError::Unauthorized`]; other failures as
    /// [`ClientError::Transport`] or [`ClientError::Protocol`].
    async fn connect(&self, access_token: &str) -> Result<RealtimeLink, ClientError>;
}
