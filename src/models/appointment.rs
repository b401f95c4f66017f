use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// An appointment as the backend returns it. Names are denormalized by
/// the server so list views render without extra lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Set by the backend once a treatment has been recorded for this
    /// appointment.
    #[serde(default)]
    pub treatment_id: Option<i64>,
}

/// Payload for booking a new appointment. Always lands as `scheduled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub reason: String,
}
