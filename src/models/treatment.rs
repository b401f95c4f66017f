use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The clinical record a doctor writes when concluding a consultation.
/// Created from exactly one appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: i64,
    pub appointment_id: i64,
    pub doctor_id: i64,
    pub diagnosis: String,
    pub prescription: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
}

/// Payload for recording a treatment against an in-progress appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTreatment {
    pub appointment_id: i64,
    pub diagnosis: String,
    pub prescription: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
}
