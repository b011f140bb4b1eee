//! UseCase: セッション (token store)
//!
//! Owns the credentials of the current process and keeps the persisted copy in
//! step with them. Init is [`Session::hydrate`], teardown is
//! [`Session::logout`] (clear + persist).

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{CredentialStore, Credentials, StoreError, UserId, UserProfile},
    error::ClientError,
};

/// Session shared between the REST client and the connection manager.
pub type SharedSession = Arc<Mutex<Session>>;

pub struct Session {
    credentials: Credentials,
    store: Arc<dyn CredentialStore>,
}

impl Session {
    /// Load persisted credentials.
    ///
    /// A corrupted credential file is discarded and the session starts empty.
    pub async fn hydrate(store: Arc<dyn CredentialStore>) -> Result<Self, ClientError> {
        let credentials = match store.load().await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => Credentials::default(),
            Err(StoreError::Corrupted(e)) => {
                tracing::warn!("Discarding unreadable credentials: {}", e);
                store.clear().await?;
                Credentials::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { credentials, store })
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn access_token(&self) -> Option<&str> {
        self.credentials.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.credentials.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.credentials.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user().map(|user| &user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Start a session from a successful login.
    pub async fn establish(&mut self, credentials: Credentials) -> Result<(), ClientError> {
        self.credentials = credentials;
        self.persist().await
    }

    /// Swap in a refreshed access token.
    pub async fn replace_access_token(&mut self, access_token: String) -> Result<(), ClientError> {
        self.credentials.access_token = Some(access_token);
        self.persist().await
    }

    /// Replace the cached user record (e.g. after `GET /profile/`).
    pub async fn update_user(&mut self, user: UserProfile) -> Result<(), ClientError> {
        self.credentials.user = Some(user);
        self.persist().await
    }

    /// Drop every credential, on disk and in memory.
    ///
    /// The store is cleared first and retried once. The in-memory copy is
    /// dropped even when the store keeps failing, and that failure is
    /// returned.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let cleared = match self.store.clear().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("Failed to clear stored credentials, retrying: {}", e);
                self.store.clear().await
            }
        };
        self.credentials = Credentials::default();
        cleared?;
        tracing::info!("Session cleared");
        Ok(())
    }

    async fn persist(&self) -> Result<(), ClientError> {
        self.store.save(&self.credentials).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{credentials::fixtures::user, repository::MockCredentialStore},
        infrastructure::store::InMemoryCredentialStore,
    };
    use mockall::Sequence;

    fn io_error() -> StoreError {
        StoreError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn stored_credentials() -> Credentials {
        Credentials::new("a1".to_string(), "r1".to_string(), user("u1", "alice"))
    }

    #[tokio::test]
    async fn test_hydrate_from_empty_store() {
        // テスト項目: 永続化された資格情報がない場合は未認証で開始する
        // given (前提条件):
        let store = Arc::new(InMemoryCredentialStore::new());

        // when (操作):
        let session = Session::hydrate(store).await.unwrap();

        // then (期待する結果):
        assert!(!session.is_authenticated());
        assert!(session.credentials().is_empty());
    }

    #[tokio::test]
    async fn test_establish_persists_credentials() {
        // テスト項目: ログインで確立したセッションが永続化される
        // given (前提条件):
        let store = Arc::new(InMemoryCredentialStore::new());
        let mut session = Session::hydrate(store.clone()).await.unwrap();
        let credentials = Credentials::new("a1".to_string(), "r1".to_string(), user("u1", "alice"));

        // when (操作):
        session.establish(credentials.clone()).await.unwrap();

        // then (期待する結果):
        assert!(session.is_authenticated());
        assert_eq!(session.user_id().map(UserId::as_str), Some("u1"));
        assert_eq!(store.snapshot().await, Some(credentials));
    }

    #[tokio::test]
    async fn test_replace_access_token_keeps_refresh_token() {
        // テスト項目: アクセストークンの更新でリフレッシュトークンとユーザーが保持される
        // given (前提条件):
        let credentials = Credentials::new("a1".to_string(), "r1".to_string(), user("u1", "alice"));
        let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials));
        let mut session = Session::hydrate(store.clone()).await.unwrap();

        // when (操作):
        session.replace_access_token("a2".to_string()).await.unwrap();

        // then (期待する結果):
        let persisted = store.snapshot().await.unwrap();
        assert_eq!(persisted.access_token.as_deref(), Some("a2"));
        assert_eq!(persisted.refresh_token.as_deref(), Some("r1"));
        assert!(persisted.user.is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_store() {
        // テスト項目: ログアウトでメモリと永続化先の両方から資格情報が消える
        // given (前提条件):
        let credentials = Credentials::new("a1".to_string(), "r1".to_string(), user("u1", "alice"));
        let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials));
        let mut session = Session::hydrate(store.clone()).await.unwrap();

        // when (操作):
        session.logout().await.unwrap();

        // then (期待する結果):
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
        assert_eq!(store.snapshot().await, None);
    }

    #[tokio::test]
    async fn test_logout_retries_failed_store_clear() {
        // テスト項目: 永続化先の削除が一度失敗しても再試行で消去できればログアウトは成功する
        // given (前提条件):
        let mut store = MockCredentialStore::new();
        let mut seq = Sequence::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(stored_credentials())));
        store
            .expect_clear()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(io_error()));
        store
            .expect_clear()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        let mut session = Session::hydrate(Arc::new(store)).await.unwrap();

        // when (操作):
        let result = session.logout().await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(session.credentials().is_empty());
    }

    #[tokio::test]
    async fn test_logout_reports_store_failure_after_dropping_memory() {
        // テスト項目: 永続化先を消去できない場合はエラーを返すが、メモリ上の資格情報は破棄される
        // given (前提条件):
        let mut store = MockCredentialStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(stored_credentials())));
        store.expect_clear().times(2).returning(|| Err(io_error()));
        let mut session = Session::hydrate(Arc::new(store)).await.unwrap();

        // when (操作):
        let result = session.logout().await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::Store(_))));
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
    }
}
