use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::models::Role;
use crate::session::{Session, SessionStore};

use super::error::ApiError;

/// Transport-level timeout. The dialog layer has no timer of its own;
/// this bounds how long a request can hold a control in its busy state.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Session store shared between the client and the dashboard shells.
pub type SharedSessions = Arc<RwLock<SessionStore>>;

/// HTTP client for the Caredesk backend.
///
/// Attaches the bearer token for the requesting role on every call,
/// speaks JSON both ways, and maps transport and status failures into
/// [`ApiError`]. One instance is shared by every dashboard section.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    sessions: SharedSessions,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(base_url: &str, sessions: SharedSessions) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            sessions,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }

    /// Client pointed at the configured backend URL.
    pub fn from_env(sessions: SharedSessions) -> Self {
        Self::new(&config::api_base_url(), sessions)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sessions(&self) -> &SharedSessions {
        &self.sessions
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer token for a role, cloned out of the shared store.
    pub(crate) fn bearer(&self, role: Role) -> Result<String, ApiError> {
        let guard = self.sessions.read().map_err(|_| ApiError::LockPoisoned)?;
        Ok(guard.token(role)?.to_string())
    }

    pub(crate) fn store_session(&self, session: Session) -> Result<(), ApiError> {
        let mut guard = self.sessions.write().map_err(|_| ApiError::LockPoisoned)?;
        guard.login(session);
        Ok(())
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Http(e.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        role: Role,
        path: &str,
    ) -> Result<T, ApiError> {
        let token = self.bearer(role)?;
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(path, response).await
    }

    pub(crate) async fn post_json<B, T>(&self, role: Role, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer(role)?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(path, response).await
    }

    pub(crate) async fn patch_json<B, T>(&self, role: Role, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer(role)?;
        let response = self
            .http
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(path, response).await
    }

    /// POST without a bearer token, for the login endpoints.
    pub(crate) async fn post_json_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(path, response).await
    }
}
