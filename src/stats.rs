//! Derived dashboard statistics.
//!
//! Pure projections over an in-memory list snapshot, recomputed on
//! every refetch. Nothing here is cached independently of its source
//! list, so staleness is bounded by the list's own cache lifetime.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use crate::models::{Appointment, AppointmentStatus, Tenant};

/// Count of appointments on a given calendar date.
pub fn appointments_on(appointments: &[Appointment], date: NaiveDate) -> usize {
    appointments.iter().filter(|a| a.date == date).count()
}

/// Count of appointments on the current local calendar date.
pub fn appointments_today(appointments: &[Appointment]) -> usize {
    appointments_on(appointments, Local::now().date_naive())
}

/// Count of appointments still `scheduled`.
pub fn pending_appointments(appointments: &[Appointment]) -> usize {
    with_status(appointments, AppointmentStatus::Scheduled)
}

pub fn completed_appointments(appointments: &[Appointment]) -> usize {
    with_status(appointments, AppointmentStatus::Completed)
}

pub fn with_status(appointments: &[Appointment], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.status == status).count()
}

/// Distinct patients across an appointment list, for the doctor's
/// "total patients" card.
pub fn distinct_patient_count(appointments: &[Appointment]) -> usize {
    appointments
        .iter()
        .map(|a| a.patient_id)
        .collect::<HashSet<_>>()
        .len()
}

/// One segment of the status progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlice {
    pub status: AppointmentStatus,
    pub count: usize,
    /// Rounded integer percent of the whole list. 0 when the list is
    /// empty — never NaN, never a division error.
    pub percent: u8,
}

/// Per-status counts and percentages, one slice per status in
/// lifecycle order.
pub fn status_breakdown(appointments: &[Appointment]) -> Vec<StatusSlice> {
    let total = appointments.len();
    AppointmentStatus::ALL
        .into_iter()
        .map(|status| {
            let count = with_status(appointments, status);
            let percent = if total == 0 {
                0
            } else {
                ((count * 100 + total / 2) / total) as u8
            };
            StatusSlice {
                status,
                count,
                percent,
            }
        })
        .collect()
}

/// Platform-wide monthly revenue, for the superadmin overview card.
pub fn revenue_total_cents(tenants: &[Tenant]) -> i64 {
    tenants.iter().map(|t| t.monthly_revenue_cents).sum()
}

/// Platform-wide user count across tenants.
pub fn total_platform_users(tenants: &[Tenant]) -> u64 {
    tenants.iter().map(|t| u64::from(t.user_count)).sum()
}
