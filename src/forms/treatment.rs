use crate::cache::QueryKey;
use crate::models::{NewTreatment, Treatment};

use super::{require, Draft, FormError};

/// Draft for the treatment dialog a doctor fills while concluding a
/// consultation. Diagnosis and prescription are the mandatory clinical
/// fields; notes and follow-up are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentDraft {
    pub appointment_id: i64,
    pub diagnosis: String,
    pub prescription: String,
    pub notes: String,
    pub follow_up_date: String,
}

impl TreatmentDraft {
    pub fn for_appointment(appointment_id: i64) -> Self {
        TreatmentDraft {
            appointment_id,
            ..Default::default()
        }
    }

    /// Prefill from an existing record so editing starts from what was
    /// saved, not from blank fields.
    pub fn from_treatment(treatment: &Treatment) -> Self {
        TreatmentDraft {
            appointment_id: treatment.appointment_id,
            diagnosis: treatment.diagnosis.clone(),
            prescription: treatment.prescription.clone(),
            notes: treatment.notes.clone().unwrap_or_default(),
            follow_up_date: treatment
                .follow_up_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn build_payload(&self) -> NewTreatment {
        NewTreatment {
            appointment_id: self.appointment_id,
            diagnosis: self.diagnosis.trim().to_owned(),
            prescription: self.prescription.trim().to_owned(),
            notes: match self.notes.trim() {
                "" => None,
                s => Some(s.to_owned()),
            },
            follow_up_date: self.follow_up_date.trim().parse().ok(),
        }
    }
}

impl Draft for TreatmentDraft {
    fn validate(&self) -> Result<(), FormError> {
        require("diagnosis", &self.diagnosis)?;
        require("prescription", &self.prescription)?;
        Ok(())
    }

    fn invalidates(&self) -> &'static [QueryKey] {
        &[QueryKey::Appointments, QueryKey::TodayAppointments]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn requires_diagnosis_then_prescription() {
        let mut draft = TreatmentDraft::for_appointment(12);
        assert_eq!(draft.validate(), Err(FormError::MissingField("diagnosis")));

        draft.diagnosis = "Acute sinusitis".into();
        assert_eq!(
            draft.validate(),
            Err(FormError::MissingField("prescription"))
        );

        draft.prescription = "Amoxicillin 500mg".into();
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn whitespace_only_fields_do_not_pass() {
        let mut draft = TreatmentDraft::for_appointment(12);
        draft.diagnosis = "   ".into();
        draft.prescription = "Amoxicillin".into();
        assert_eq!(draft.validate(), Err(FormError::MissingField("diagnosis")));
    }

    #[test]
    fn payload_trims_and_drops_empty_optionals() {
        let mut draft = TreatmentDraft::for_appointment(12);
        draft.diagnosis = "  Acute sinusitis ".into();
        draft.prescription = "Amoxicillin 500mg".into();
        draft.notes = "  ".into();
        draft.follow_up_date = "2025-04-01".into();

        let payload = draft.build_payload();
        assert_eq!(payload.appointment_id, 12);
        assert_eq!(payload.diagnosis, "Acute sinusitis");
        assert_eq!(payload.notes, None);
        assert_eq!(
            payload.follow_up_date,
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
    }

    #[test]
    fn prefill_from_existing_record() {
        let treatment = Treatment {
            id: 3,
            appointment_id: 12,
            doctor_id: 2,
            diagnosis: "Acute sinusitis".into(),
            prescription: "Amoxicillin 500mg".into(),
            notes: Some("Re-check in two weeks".into()),
            follow_up_date: NaiveDate::from_ymd_opt(2025, 4, 1),
        };

        let draft = TreatmentDraft::from_treatment(&treatment);
        assert_eq!(draft.diagnosis, "Acute sinusitis");
        assert_eq!(draft.notes, "Re-check in two weeks");
        assert_eq!(draft.follow_up_date, "2025-04-01");
        assert_eq!(draft.validate(), Ok(()));
    }
}
