use serde::{Deserialize, Serialize};

/// A medical record with file attachments, owned by one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Authoring doctor, when the record came from a consultation.
    #[serde(default)]
    pub doctor_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
    pub url: String,
}
