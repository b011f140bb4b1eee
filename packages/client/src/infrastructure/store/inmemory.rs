//! InMemory credential store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CredentialStore, Credentials, StoreError};

/// Keeps credentials for the lifetime of the process only.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: Mutex<Option<Credentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with previously persisted credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
        }
    }

    /// What is currently persisted.
    pub async fn snapshot(&self) -> Option<Credentials> {
        self.credentials.lock().await.clone()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, StoreError> {
        Ok(self.credentials.lock().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        *self.credentials.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.credentials.lock().await = None;
        Ok(())
    }
}
