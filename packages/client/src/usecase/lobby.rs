//! UseCase: オープンゲーム一覧のポーリング

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{domain::GameSnapshot, error::ClientError};

use super::game::GameUseCase;

pub type OpenGamesResult = Result<Vec<GameSnapshot>, ClientError>;

/// Fetches `GET /game/open` at a fixed interval, starting immediately.
///
/// Results arrive on the receiver returned by [`OpenGamesPoller::spawn`].
/// Dropping the poller cancels the polling task.
pub struct OpenGamesPoller {
    task: JoinHandle<()>,
}

impl OpenGamesPoller {
    pub fn spawn(
        games: Arc<GameUseCase>,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<OpenGamesResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = games.open_games().await;
                if let Err(e) = &result {
                    tracing::warn!("Failed to refresh open games: {}", e);
                }
                if tx.send(result).is_err() {
                    break;
                }
            }
        });

        (Self { task }, rx)
    }
}

impl Drop for OpenGamesPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
