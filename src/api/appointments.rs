//! Appointment list and status endpoints.

use serde::Serialize;

use crate::models::{Appointment, AppointmentStatus, NewAppointment, Role};

use super::client::ApiClient;
use super::error::ApiError;

#[derive(Serialize)]
struct StatusPatch {
    status: AppointmentStatus,
}

impl ApiClient {
    pub async fn list_appointments(&self, role: Role) -> Result<Vec<Appointment>, ApiError> {
        self.get_json(role, "/api/appointments/appointments/").await
    }

    /// Today's schedule, filtered server-side.
    pub async fn today_appointments(&self, role: Role) -> Result<Vec<Appointment>, ApiError> {
        self.get_json(role, "/api/appointments/appointments/today").await
    }

    pub async fn create_appointment(
        &self,
        role: Role,
        new_appointment: &NewAppointment,
    ) -> Result<Appointment, ApiError> {
        self.post_json(role, "/api/appointments/appointments/", new_appointment)
            .await
    }

    /// PATCH only the status field. Callers must have already passed
    /// the transition through [`crate::lifecycle::check_transition`];
    /// this method does not re-check it.
    pub async fn set_appointment_status(
        &self,
        role: Role,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        let path = format!("/api/appointments/appointments/{appointment_id}/");
        self.patch_json(role, &path, &StatusPatch { status }).await
    }
}
