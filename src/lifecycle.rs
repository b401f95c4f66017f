//! Appointment lifecycle rules.
//!
//! The one cross-cutting state machine in the product:
//!
//! ```text
//! scheduled ──▶ in_progress ──▶ completed
//!     │
//!     ├──▶ cancelled
//!     └──▶ no_show        (backend-driven, never client-triggered)
//! ```
//!
//! Which actor may trigger which edge is enforced here, client-side,
//! before any request goes out — even where the backend would accept a
//! shortcut like `scheduled → completed`. Completion is a compound
//! action: a treatment must be recorded first, and a failure between
//! the two steps leaves the appointment `in_progress` with the saga in
//! a resumable state.

use crate::api::{ApiClient, ApiError};
use crate::cache::QueryCache;
use crate::models::{Appointment, AppointmentStatus, NewAppointment, NewTreatment, Role, Treatment};

// ═══════════════════════════════════════════════════════════
// Actors and the transition graph
// ═══════════════════════════════════════════════════════════

/// Who is clicking. Staff and hospital admins share the same
/// appointment powers; the superadmin dashboard has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Patient,
    Doctor,
    Staff,
}

impl Actor {
    pub fn from_role(role: Role) -> Option<Actor> {
        match role {
            Role::Patient => Some(Actor::Patient),
            Role::Doctor => Some(Actor::Doctor),
            Role::Staff | Role::Admin => Some(Actor::Staff),
            Role::Superadmin => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("appointment is already {0}, a terminal state")]
    Terminal(AppointmentStatus),
    #[error("an appointment cannot move from {from} to {to}")]
    NotAdjacent {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    #[error("{actor:?} may not move an appointment from {from} to {to}")]
    NotPermitted {
        actor: Actor,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

/// Whether `from → to` is an edge of the lifecycle graph at all,
/// regardless of actor.
pub fn is_lifecycle_edge(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    matches!(
        (from, to),
        (Scheduled, InProgress) | (Scheduled, Cancelled) | (Scheduled, NoShow) | (InProgress, Completed)
    )
}

/// Check one client-triggered transition. Rejects terminal sources,
/// non-adjacent jumps, and edges the actor does not own. `no_show` is
/// a real edge but backend-driven, so it is rejected for every actor.
pub fn check_transition(
    actor: Actor,
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), TransitionError> {
    use AppointmentStatus::*;

    if from.is_terminal() {
        return Err(TransitionError::Terminal(from));
    }
    if !is_lifecycle_edge(from, to) {
        return Err(TransitionError::NotAdjacent { from, to });
    }

    let permitted = match (actor, from, to) {
        (Actor::Patient, Scheduled, Cancelled) => true,
        (Actor::Doctor, Scheduled, InProgress) => true,
        (Actor::Doctor, InProgress, Completed) => true,
        (Actor::Doctor, Scheduled, Cancelled) => true,
        (Actor::Staff, Scheduled, Cancelled) => true,
        _ => false,
    };

    if permitted {
        Ok(())
    } else {
        Err(TransitionError::NotPermitted { actor, from, to })
    }
}

/// The statuses an actor may move an appointment to from `from`.
/// Dashboards render exactly these as controls, so anything not listed
/// here is unreachable from the UI.
pub fn allowed_transitions(actor: Actor, from: AppointmentStatus) -> Vec<AppointmentStatus> {
    AppointmentStatus::ALL
        .into_iter()
        .filter(|to| check_transition(actor, from, *to).is_ok())
        .collect()
}

// ═══════════════════════════════════════════════════════════
// CompletionSaga — treatment-then-complete, two phases
// ═══════════════════════════════════════════════════════════

/// The two-phase completion of an in-progress appointment.
///
/// `AwaitingCompletion` is the explicit intermediate state: the
/// treatment exists but the appointment is still `in_progress`. A
/// failure of the second step parks the saga there, recoverable, and
/// the appointment is never left `completed` without a treatment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSaga {
    TreatmentPending {
        appointment_id: i64,
    },
    AwaitingCompletion {
        appointment_id: i64,
        treatment_id: i64,
    },
    Complete {
        appointment_id: i64,
        treatment_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SagaError {
    #[error("appointment must be in progress to complete, was {0}")]
    NotInProgress(AppointmentStatus),
    #[error("completion step out of order")]
    OutOfOrder,
}

impl CompletionSaga {
    /// Begin completing an appointment. Only valid while it is
    /// `in_progress`.
    pub fn begin(appointment: &Appointment) -> Result<Self, SagaError> {
        if appointment.status != AppointmentStatus::InProgress {
            return Err(SagaError::NotInProgress(appointment.status));
        }
        Ok(CompletionSaga::TreatmentPending {
            appointment_id: appointment.id,
        })
    }

    /// Step one succeeded: the treatment exists server-side.
    pub fn treatment_recorded(&mut self, treatment_id: i64) -> Result<(), SagaError> {
        match *self {
            CompletionSaga::TreatmentPending { appointment_id } => {
                *self = CompletionSaga::AwaitingCompletion {
                    appointment_id,
                    treatment_id,
                };
                Ok(())
            }
            _ => Err(SagaError::OutOfOrder),
        }
    }

    /// Step two succeeded: the status mutation was confirmed.
    pub fn completion_confirmed(&mut self) -> Result<(), SagaError> {
        match *self {
            CompletionSaga::AwaitingCompletion {
                appointment_id,
                treatment_id,
            } => {
                *self = CompletionSaga::Complete {
                    appointment_id,
                    treatment_id,
                };
                Ok(())
            }
            _ => Err(SagaError::OutOfOrder),
        }
    }

    pub fn appointment_id(&self) -> i64 {
        match *self {
            CompletionSaga::TreatmentPending { appointment_id }
            | CompletionSaga::AwaitingCompletion { appointment_id, .. }
            | CompletionSaga::Complete { appointment_id, .. } => appointment_id,
        }
    }

    pub fn treatment_id(&self) -> Option<i64> {
        match *self {
            CompletionSaga::TreatmentPending { .. } => None,
            CompletionSaga::AwaitingCompletion { treatment_id, .. }
            | CompletionSaga::Complete { treatment_id, .. } => Some(treatment_id),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, CompletionSaga::Complete { .. })
    }
}

// ═══════════════════════════════════════════════════════════
// Drivers — transition checks wired to the API and cache
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("role {0} does not act on appointments")]
    NoActor(Role),
    #[error("{0} may not book appointments")]
    BookingNotPermitted(Role),
}

/// Errors from the compound complete-with-treatment action. The two
/// network phases fail distinctly: `TreatmentCreate` means nothing
/// changed server-side, `StatusUpdate` means the treatment exists and
/// only the status PATCH must be retried.
#[derive(Debug, thiserror::Error)]
pub enum CompleteError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Saga(#[from] SagaError),
    #[error("role {0} does not act on appointments")]
    NoActor(Role),
    #[error("treatment could not be recorded: {source}")]
    TreatmentCreate {
        #[source]
        source: ApiError,
    },
    #[error("treatment recorded but completion failed: {source}")]
    StatusUpdate {
        treatment: Treatment,
        #[source]
        source: ApiError,
    },
}

/// A successfully completed visit: the treatment and the appointment
/// as the backend confirmed them.
#[derive(Debug, Clone)]
pub struct CompletedVisit {
    pub appointment: Appointment,
    pub treatment: Treatment,
}

fn actor_for(role: Role) -> Result<Actor, LifecycleError> {
    Actor::from_role(role).ok_or(LifecycleError::NoActor(role))
}

/// Doctor's "Start" button: `scheduled → in_progress`.
pub async fn start_appointment(
    client: &ApiClient,
    cache: &QueryCache,
    role: Role,
    appointment: &Appointment,
) -> Result<Appointment, LifecycleError> {
    let actor = actor_for(role)?;
    check_transition(actor, appointment.status, AppointmentStatus::InProgress)?;
    let updated = client
        .set_appointment_status(role, appointment.id, AppointmentStatus::InProgress)
        .await?;
    cache.invalidate_appointments().await;
    Ok(updated)
}

/// Cancel a scheduled appointment. Never requires a secondary record.
pub async fn cancel_appointment(
    client: &ApiClient,
    cache: &QueryCache,
    role: Role,
    appointment: &Appointment,
) -> Result<Appointment, LifecycleError> {
    let actor = actor_for(role)?;
    check_transition(actor, appointment.status, AppointmentStatus::Cancelled)?;
    let updated = client
        .set_appointment_status(role, appointment.id, AppointmentStatus::Cancelled)
        .await?;
    cache.invalidate_appointments().await;
    Ok(updated)
}

/// Book a new appointment. Staff/admin only; always lands `scheduled`.
pub async fn book_appointment(
    client: &ApiClient,
    cache: &QueryCache,
    role: Role,
    new_appointment: &NewAppointment,
) -> Result<Appointment, LifecycleError> {
    match Actor::from_role(role) {
        Some(Actor::Staff) => {}
        _ => return Err(LifecycleError::BookingNotPermitted(role)),
    }
    let appointment = client.create_appointment(role, new_appointment).await?;
    cache.invalidate_appointments().await;
    Ok(appointment)
}

/// Complete an in-progress appointment: record the treatment, then
/// PATCH the status, in that causal order. If the treatment POST
/// fails, the status mutation is never attempted and the appointment
/// stays `in_progress`. There is no rollback of a recorded treatment
/// when the second step fails; the error carries the treatment so the
/// caller can retry just the status update.
pub async fn complete_with_treatment(
    client: &ApiClient,
    cache: &QueryCache,
    role: Role,
    appointment: &Appointment,
    new_treatment: &NewTreatment,
) -> Result<CompletedVisit, CompleteError> {
    let actor = Actor::from_role(role).ok_or(CompleteError::NoActor(role))?;
    check_transition(actor, appointment.status, AppointmentStatus::Completed)?;

    let mut saga = CompletionSaga::begin(appointment)?;

    let treatment = match client.create_treatment(role, new_treatment).await {
        Ok(treatment) => treatment,
        Err(source) => {
            tracing::warn!(
                appointment_id = appointment.id,
                error = %source,
                "treatment creation failed, appointment left in progress"
            );
            return Err(CompleteError::TreatmentCreate { source });
        }
    };
    saga.treatment_recorded(treatment.id)?;

    let updated = match client
        .set_appointment_status(role, appointment.id, AppointmentStatus::Completed)
        .await
    {
        Ok(updated) => updated,
        Err(source) => {
            // The treatment landed, so appointment lists are stale
            // even though completion failed.
            cache.invalidate_appointments().await;
            tracing::warn!(
                appointment_id = appointment.id,
                treatment_id = treatment.id,
                error = %source,
                "completion PATCH failed after treatment was recorded"
            );
            return Err(CompleteError::StatusUpdate { treatment, source });
        }
    };
    saga.completion_confirmed()?;

    cache.invalidate_appointments().await;
    Ok(CompletedVisit {
        appointment: updated,
        treatment,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
