//! Medical records endpoint, for the patient's records section.

use crate::models::{MedicalRecord, Role};

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    pub async fn list_medical_records(&self, role: Role) -> Result<Vec<MedicalRecord>, ApiError> {
        self.get_json(role, "/api/medical-records/").await
    }
}
