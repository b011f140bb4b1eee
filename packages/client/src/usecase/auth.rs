//! UseCase: 認証 (signup / login / logout / refresh / restore)

use crate::{
    domain::{ApiRequest, Credentials, UserProfile},
    error::ClientError,
    infrastructure::dto::http::{LoginRequest, LoginResponse, MessageResponse, ProfileResponse, SignupRequest},
};

use super::authenticated_request::{AuthenticatedClient, ensure_success};

pub struct AuthUseCase {
    client: AuthenticatedClient,
}

impl AuthUseCase {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Register a new account. Returns the server's confirmation message.
    pub async fn signup(&self, request: SignupRequest) -> Result<String, ClientError> {
        let body = serde_json::to_value(&request)
            .map_err(|e| ClientError::Protocol(e.to_string()))?;
        let response = self
            .client
            .transport()
            .send(ApiRequest::post("/auth/signup").with_json(body))
            .await?;

        if !response.is_success() {
            return Err(ClientError::Authentication(response.message_or("Signup failed")));
        }
        let body: MessageResponse = response.json()?;
        tracing::info!("Signed up '{}'", request.username);
        Ok(body.message)
    }

    /// Log in with an email, username or phone number and start a session.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<UserProfile, ClientError> {
        let request = LoginRequest {
            identifier: identifier.trim().to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| ClientError::Protocol(e.to_string()))?;
        let response = self
            .client
            .transport()
            .send(ApiRequest::post("/auth/login").with_json(body))
            .await?;

        if !response.is_success() {
            return Err(ClientError::Authentication(response.message_or("Login failed")));
        }
        let login: LoginResponse = response.json()?;
        let user = login.user.clone();
        self.client
            .session()
            .lock()
            .await
            .establish(Credentials::new(login.access_token, login.refresh_token, login.user))
            .await?;
        tracing::info!("Logged in as '{}'", user.username);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.client.session().lock().await.logout().await
    }

    /// Exchange the refresh token for a new access token.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        self.client.refresh().await
    }

    /// Bring a persisted session back to an authenticated state.
    ///
    /// When only the refresh token survived, a new access token is fetched;
    /// when the user record is missing, it is re-read from `GET /profile/`.
    /// Returns `None` when there is nothing to restore or the refresh token
    /// was rejected. Any failed refresh clears the session; failures other
    /// than a rejection are still returned as errors.
    pub async fn restore(&self) -> Result<Option<UserProfile>, ClientError> {
        let (has_access, has_refresh, user) = {
            let session = self.client.session().lock().await;
            (
                session.access_token().is_some(),
                session.refresh_token().is_some(),
                session.user().cloned(),
            )
        };

        if !has_access {
            if !has_refresh {
                return Ok(None);
            }
            if let Err(e) = self.client.refresh().await {
                tracing::warn!("Startup refresh failed, logging out: {}", e);
                self.logout().await?;
                if e.is_authorization() {
                    return Ok(None);
                }
                return Err(e);
            }
        }

        if let Some(user) = user {
            return Ok(Some(user));
        }

        let response = self.client.send(ApiRequest::get("/profile/")).await?;
        let profile: ProfileResponse = ensure_success(response, "Failed to fetch profile")?.json()?;
        self.client
            .session()
            .lock()
            .await
            .update_user(profile.user.clone())
            .await?;
        Ok(Some(profile.user))
    }
}
