//! Credential persistence interface.
//!
//! The session layer depends on this trait only; the concrete stores live in
//! `infrastructure::store`.

use async_trait::async_trait;

use super::{Credentials, StoreError};

/// Keyed storage for the access token, refresh token and user record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load persisted credentials; `None` if nothing was stored.
    async fn load(&self) -> Result<Option<Credentials>, StoreError>;

    /// Persist all three fields, replacing what was stored before.
    async fn save(&self, credentials: &Credentials) -> Result<(), StoreError>;

    /// Remove every stored field at once.
    async fn clear(&self) -> Result<(), StoreError>;
}
