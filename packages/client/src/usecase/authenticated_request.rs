//! UseCase: 認証付きリクエスト
//!
//! Attaches the current access token to every request. On a 401 it performs
//! at most one refresh through `POST /auth/refresh`, persists the new token and
//! replays the request once. A failed refresh or a second 401 forces logout.
//! Every other response is handed back unchanged.

use std::sync::Arc;

use crate::{
    domain::{ApiRequest, ApiResponse, HttpTransport},
    error::ClientError,
    infrastructure::dto::http::RefreshResponse,
};

use super::session::SharedSession;

const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Clone)]
pub struct AuthenticatedClient {
    transport: Arc<dyn HttpTransport>,
    session: SharedSession,
}

impl AuthenticatedClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: SharedSession) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Raw transport for endpoints that take no access token.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Send `request` with the access token, refreshing it once on 401.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let token = self
            .session
            .lock()
            .await
            .access_token()
            .map(str::to_string)
            .ok_or(ClientError::NotAuthenticated)?;

        let response = self
            .transport
            .send(request.clone().with_bearer(Some(token)))
            .await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        tracing::info!("Access token rejected on {}, refreshing", request.path);
        let token = match self.refresh().await {
            Ok(token) => token,
            Err(e) => {
                self.force_logout().await;
                return Err(ClientError::Unauthorized(format!(
                    "session expired, please log in again ({})",
                    e
                )));
            }
        };

        let response = self.transport.send(request.with_bearer(Some(token))).await?;
        if response.is_unauthorized() {
            self.force_logout().await;
            return Err(ClientError::Unauthorized(
                response.message_or("session expired, please log in again"),
            ));
        }
        Ok(response)
    }

    /// Exchange the refresh token for a new access token and persist it.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        let refresh_token = self
            .session
            .lock()
            .await
            .refresh_token()
            .map(str::to_string)
            .ok_or_else(|| ClientError::Unauthorized("no refresh token".to_string()))?;

        let response = self
            .transport
            .send(ApiRequest::post(REFRESH_PATH).with_bearer(Some(refresh_token)))
            .await?;
        if !response.is_success() {
            return Err(ClientError::Unauthorized(
                response.message_or("Token refresh failed"),
            ));
        }

        let body: RefreshResponse = response.json()?;
        self.session
            .lock()
            .await
            .replace_access_token(body.access_token.clone())
            .await?;
        tracing::info!("Access token refreshed");
        Ok(body.access_token)
    }

    async fn force_logout(&self) {
        tracing::warn!("Unrecoverable authorization failure, logging out");
        if let Err(e) = self.session.lock().await.logout().await {
            tracing::error!("Failed to clear credentials: {}", e);
        }
    }
}

/// Turn a non-2xx response into [`ClientError::Api`].
pub(crate) fn ensure_success(response: ApiResponse, fallback: &str) -> Result<ApiResponse, ClientError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Api {
            status: response.status,
            message: response.message_or(fallback),
        })
    }
}
