//! UseCase: プロフィール

use crate::{
    domain::{ApiRequest, UserProfile},
    error::ClientError,
    infrastructure::dto::http::ProfileResponse,
};

use super::authenticated_request::{AuthenticatedClient, ensure_success};

const DEFAULT_PHOTO: &str = "default.jpg";

pub struct ProfileUseCase {
    client: AuthenticatedClient,
    api_base_url: String,
}

impl ProfileUseCase {
    pub fn new(client: AuthenticatedClient, api_base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET /profile/`; the cached user record is replaced with the result.
    pub async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        let response = self.client.send(ApiRequest::get("/profile/")).await?;
        let profile: ProfileResponse = ensure_success(response, "Failed to fetch profile")?.json()?;
        self.client
            .session()
            .lock()
            .await
            .update_user(profile.user.clone())
            .await?;
        Ok(profile.user)
    }

    /// Public URL of a profile photo (`GET /profile/photo/{filename}`).
    pub fn photo_url(&self, filename: Option<&str>) -> String {
        let filename = filename
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_PHOTO);
        format!("{}/profile/photo/{}", self.api_base_url, filename)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::{ApiResponse, Credentials, credentials::fixtures::user, transport::MockHttpTransport},
        infrastructure::store::InMemoryCredentialStore,
        usecase::session::Session,
    };

    async fn use_case(transport: MockHttpTransport) -> (ProfileUseCase, Arc<InMemoryCredentialStore>) {
        let credentials = Credentials::new("a1".to_string(), "r1".to_string(), user("u1", "alice"));
        let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials));
        let session = Session::hydrate(store.clone()).await.unwrap().into_shared();
        let client = AuthenticatedClient::new(Arc::new(transport), session);
        (ProfileUseCase::new(client, "https://api.chessearn.com/"), store)
    }

    #[tokio::test]
    async fn test_get_profile_updates_cached_user() {
        // テスト項目: プロフィール取得でキャッシュ済みのユーザー情報が更新される
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|r| r.path == "/profile/" && r.bearer.as_deref() == Some("a1"))
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::new(
                    200,
                    r#"{"message": "Profile retrieved", "user": {"id": "u1", "username": "alice", "ranking": 1234}}"#,
                ))
            });
        let (profile, store) = use_case(transport).await;

        // when (操作):
        let user = profile.get_profile().await.unwrap();

        // then (期待する結果):
        assert_eq!(user.ranking, Some(1234));
        let persisted = store.snapshot().await.unwrap();
        assert_eq!(persisted.user.and_then(|u| u.ranking), Some(1234));
    }

    #[tokio::test]
    async fn test_photo_url_defaults() {
        // テスト項目: 写真ファイル名がない場合は default.jpg の URL になる
        // given (前提条件):
        let (profile, _) = use_case(MockHttpTransport::new()).await;

        // when (操作):
        // then (期待する結果):
        assert_eq!(
            profile.photo_url(None),
            "https://api.chessearn.com/profile/photo/default.jpg"
        );
        assert_eq!(
            profile.photo_url(Some("u1.png")),
            "https://api.chessearn.com/profile/photo/u1.png"
        );
    }
}
