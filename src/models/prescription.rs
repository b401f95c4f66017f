use serde::{Deserialize, Serialize};

use super::enums::Frequency;

/// A standalone prescription. Independent of any treatment: it can be
/// issued without a linked appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub patient_id: i64,
    pub medication: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub duration: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<i64>,
}

/// Payload for issuing a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrescription {
    pub patient_id: i64,
    pub medication: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub duration: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<i64>,
}
