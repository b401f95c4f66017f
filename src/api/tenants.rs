//! Tenant directory endpoints.

use crate::models::{Role, Tenant};

use super::client::ApiClient;
use super::error::ApiError;

/// The superadmin console and the hospital-admin dashboard read the
/// tenant directory from different namespaces.
pub(crate) fn tenants_path(role: Role) -> &'static str {
    match role {
        Role::Superadmin => "/api/superadmin/tenants",
        _ => "/api/admin/tenants",
    }
}

impl ApiClient {
    pub async fn list_tenants(&self, role: Role) -> Result<Vec<Tenant>, ApiError> {
        self.get_json(role, tenants_path(role)).await
    }
}
