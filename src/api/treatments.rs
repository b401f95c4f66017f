//! Treatment creation endpoint.

use crate::models::{NewTreatment, Role, Treatment};

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    pub async fn create_treatment(
        &self,
        role: Role,
        new_treatment: &NewTreatment,
    ) -> Result<Treatment, ApiError> {
        self.post_json(role, "/api/treatments/", new_treatment).await
    }
}
