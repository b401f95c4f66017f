//! Prescription endpoints.

use crate::models::{NewPrescription, Prescription, Role};

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    /// The requesting patient's prescriptions, scoped server-side by
    /// the bearer token.
    pub async fn list_prescriptions(&self, role: Role) -> Result<Vec<Prescription>, ApiError> {
        self.get_json(role, "/api/prescriptions").await
    }

    pub async fn create_prescription(
        &self,
        role: Role,
        new_prescription: &NewPrescription,
    ) -> Result<Prescription, ApiError> {
        self.post_json(role, "/api/prescriptions", new_prescription).await
    }
}
