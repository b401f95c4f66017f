//! Form/dialog controllers.
//!
//! Every create/edit dialog in the product is the same three-state
//! machine: closed, editing a local draft, or submitting it. Required
//! fields gate the `editing → submitting` transition before any
//! network call; a failed submit returns to editing with the draft
//! preserved so nothing has to be retyped.

pub mod appointment;
pub mod doctor;
pub mod prescription;
pub mod signup;
pub mod treatment;

pub use appointment::AppointmentDraft;
pub use doctor::DoctorDraft;
pub use prescription::PrescriptionDraft;
pub use signup::{SignupStep, SignupWizard};
pub use treatment::TreatmentDraft;

use crate::cache::QueryKey;

// ═══════════════════════════════════════════════════════════
// Validation errors
// ═══════════════════════════════════════════════════════════

/// Client-local validation failures. Caught before any network call
/// and never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// A dialog's local draft: validation plus which shared lists a
/// successful submit stales.
pub trait Draft {
    fn validate(&self) -> Result<(), FormError>;

    /// Cache keys to invalidate after this draft submits successfully.
    fn invalidates(&self) -> &'static [QueryKey];
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Dialog<D> — closed / editing / submitting
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("no draft is open")]
    NotOpen,
    #[error("a submit is already in flight")]
    AlreadySubmitting,
}

/// One dialog's lifecycle. While submitting, inputs are disabled and
/// the draft is frozen; there is no client-side timeout, so a request
/// that never resolves leaves the dialog busy (known limitation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog<D> {
    Closed,
    Editing { draft: D },
    Submitting { draft: D },
}

impl<D> Default for Dialog<D> {
    fn default() -> Self {
        Dialog::Closed
    }
}

impl<D: Draft + Clone> Dialog<D> {
    pub fn closed() -> Self {
        Dialog::Closed
    }

    /// Open with an empty draft for create.
    pub fn open_create(&mut self)
    where
        D: Default,
    {
        *self = Dialog::Editing { draft: D::default() };
    }

    /// Open prefilled from an existing entity for edit.
    pub fn open_edit(&mut self, draft: D) {
        *self = Dialog::Editing { draft };
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Dialog::Submitting { .. })
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            Dialog::Closed => None,
            Dialog::Editing { draft } | Dialog::Submitting { draft } => Some(draft),
        }
    }

    /// Mutable access to the draft, only while editing. Submitting
    /// freezes the fields.
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Dialog::Editing { draft } => Some(draft),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self, Dialog::Editing { draft } if draft.validate().is_ok())
    }

    /// Validation-gated move to `Submitting`. Returns the payload
    /// draft to send; on validation failure the dialog stays in
    /// `Editing` and nothing goes over the wire.
    pub fn begin_submit(&mut self) -> Result<D, DialogError> {
        match std::mem::replace(self, Dialog::Closed) {
            Dialog::Editing { draft } => {
                if let Err(e) = draft.validate() {
                    *self = Dialog::Editing { draft };
                    return Err(DialogError::Invalid(e));
                }
                let payload = draft.clone();
                *self = Dialog::Submitting { draft };
                Ok(payload)
            }
            state @ Dialog::Submitting { .. } => {
                *self = state;
                Err(DialogError::AlreadySubmitting)
            }
            Dialog::Closed => Err(DialogError::NotOpen),
        }
    }

    /// Success: close, discard the draft, and report which lists to
    /// invalidate. Only meaningful with a submit in flight; in any
    /// other state this is a no-op reporting nothing, so a misordered
    /// caller cannot discard a draft still being edited.
    pub fn submit_succeeded(&mut self) -> &'static [QueryKey] {
        match self {
            Dialog::Submitting { draft } => {
                let keys = draft.invalidates();
                *self = Dialog::Closed;
                keys
            }
            _ => &[],
        }
    }

    /// Failure: back to editing with the draft preserved for retry.
    pub fn submit_failed(&mut self) {
        if let Dialog::Submitting { draft } = std::mem::replace(self, Dialog::Closed) {
            *self = Dialog::Editing { draft };
        }
    }

    /// Cancel discards the draft. A submit already in flight is not
    /// interruptible.
    pub fn cancel(&mut self) {
        if matches!(self, Dialog::Editing { .. }) {
            *self = Dialog::Closed;
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
