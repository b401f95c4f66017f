use crate::cache::QueryKey;
use crate::models::{Frequency, NewPrescription};

use super::{require, Draft, FormError};

/// Draft for the standalone prescription dialog. Frequency is a select
/// control, so it is `None` until the user picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub patient_id: Option<i64>,
    pub medication: String,
    pub dosage: String,
    pub frequency: Option<Frequency>,
    pub duration: String,
    pub instructions: String,
    pub appointment_id: Option<i64>,
}

impl PrescriptionDraft {
    pub fn for_patient(patient_id: i64) -> Self {
        PrescriptionDraft {
            patient_id: Some(patient_id),
            ..Default::default()
        }
    }

    /// Valid drafts only; call after `validate`.
    pub fn build_payload(&self) -> Result<NewPrescription, FormError> {
        self.validate()?;
        Ok(NewPrescription {
            patient_id: self.patient_id.ok_or(FormError::MissingField("patient"))?,
            medication: self.medication.trim().to_owned(),
            dosage: self.dosage.trim().to_owned(),
            frequency: self.frequency.ok_or(FormError::MissingField("frequency"))?,
            duration: self.duration.trim().to_owned(),
            instructions: match self.instructions.trim() {
                "" => None,
                s => Some(s.to_owned()),
            },
            appointment_id: self.appointment_id,
        })
    }
}

impl Draft for PrescriptionDraft {
    fn validate(&self) -> Result<(), FormError> {
        if self.patient_id.is_none() {
            return Err(FormError::MissingField("patient"));
        }
        require("medication", &self.medication)?;
        require("dosage", &self.dosage)?;
        if self.frequency.is_none() {
            return Err(FormError::MissingField("frequency"));
        }
        require("duration", &self.duration)?;
        Ok(())
    }

    fn invalidates(&self) -> &'static [QueryKey] {
        &[QueryKey::Patients]
    }
}
