//! Login, identity, and doctor-account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CurrentUser, Doctor, NewDoctor, Role};
use crate::session::Session;

use super::client::ApiClient;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub display_name: String,
    #[serde(default)]
    pub tenant_id: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The admin and superadmin dashboards log in through their own paths.
pub(crate) fn login_path(role: Role) -> &'static str {
    match role {
        Role::Superadmin => "/api/admin/superadmin/login",
        Role::Admin => "/api/auth/admin/login/",
        Role::Patient | Role::Doctor | Role::Staff => "/api/auth/login/",
    }
}

impl ApiClient {
    /// Log in as `role` and store the resulting session so subsequent
    /// calls for that role carry the bearer token.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<Session, ApiError> {
        let resp: LoginResponse = self.post_json_public(login_path(role), credentials).await?;
        let session = Session::new(
            role,
            resp.token,
            resp.user_id,
            resp.display_name,
            resp.tenant_id,
            resp.expires_at,
        );
        self.store_session(session.clone())?;
        tracing::info!(role = %role, user_id = session.user_id(), "logged in");
        Ok(session)
    }

    /// Resolve the identity behind the current token, for header/avatar.
    pub async fn me(&self, role: Role) -> Result<CurrentUser, ApiError> {
        self.get_json(role, "/api/auth/me").await
    }

    pub async fn list_doctors(&self, role: Role) -> Result<Vec<Doctor>, ApiError> {
        self.get_json(role, "/api/auth/doctors/").await
    }

    pub async fn create_doctor(&self, role: Role, new_doctor: &NewDoctor) -> Result<Doctor, ApiError> {
        self.post_json(role, "/api/auth/users/create/", new_doctor).await
    }
}
