//! Tenant user directory. The backend returns every role in one list;
//! the patient directory is a client-side filter over it.

use crate::models::{Role, UserAccount};

use super::client::ApiClient;
use super::error::ApiError;

/// Keep only accounts with the given role. Pure; order preserved.
pub fn with_role(users: Vec<UserAccount>, role: Role) -> Vec<UserAccount> {
    users.into_iter().filter(|u| u.role == role).collect()
}

impl ApiClient {
    pub async fn list_users(&self, role: Role) -> Result<Vec<UserAccount>, ApiError> {
        self.get_json(role, "/api/tenants/users/").await
    }

    /// The patient directory shown to doctors and staff.
    pub async fn list_patient_accounts(&self, role: Role) -> Result<Vec<UserAccount>, ApiError> {
        let users = self.list_users(role).await?;
        Ok(with_role(users, Role::Patient))
    }
}
