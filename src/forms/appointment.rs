use chrono::{NaiveDate, NaiveTime};

use crate::cache::QueryKey;
use crate::config;
use crate::models::NewAppointment;

use super::{Draft, FormError};

/// Draft for the booking dialog. Patient, doctor, date and time are
/// required; a blank reason books as the default consultation reason
/// rather than blocking the submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub reason: String,
}

impl AppointmentDraft {
    pub fn build_payload(&self) -> Result<NewAppointment, FormError> {
        self.validate()?;
        let reason = match self.reason.trim() {
            "" => config::DEFAULT_APPOINTMENT_REASON.to_owned(),
            s => s.to_owned(),
        };
        Ok(NewAppointment {
            patient_id: self.patient_id.ok_or(FormError::MissingField("patient"))?,
            doctor_id: self.doctor_id.ok_or(FormError::MissingField("doctor"))?,
            date: self.date.ok_or(FormError::MissingField("date"))?,
            time: self.time.ok_or(FormError::MissingField("time"))?,
            reason,
        })
    }
}

impl Draft for AppointmentDraft {
    fn validate(&self) -> Result<(), FormError> {
        if self.patient_id.is_none() {
            return Err(FormError::MissingField("patient"));
        }
        if self.doctor_id.is_none() {
            return Err(FormError::MissingField("doctor"));
        }
        if self.date.is_none() {
            return Err(FormError::MissingField("date"));
        }
        if self.time.is_none() {
            return Err(FormError::MissingField("time"));
        }
        Ok(())
    }

    fn invalidates(&self) -> &'static [QueryKey] {
        &[QueryKey::Appointments, QueryKey::TodayAppointments]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AppointmentDraft {
        AppointmentDraft {
            patient_id: Some(7),
            doctor_id: Some(2),
            date: NaiveDate::from_ymd_opt(2025, 3, 14),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            reason: "Annual physical".into(),
        }
    }

    #[test]
    fn requires_selections_but_not_reason() {
        let mut draft = AppointmentDraft::default();
        assert_eq!(draft.validate(), Err(FormError::MissingField("patient")));

        draft.patient_id = Some(7);
        draft.doctor_id = Some(2);
        assert_eq!(draft.validate(), Err(FormError::MissingField("date")));

        draft.date = NaiveDate::from_ymd_opt(2025, 3, 14);
        draft.time = NaiveTime::from_hms_opt(9, 30, 0);
        assert_eq!(draft.validate(), Ok(()), "reason stays optional");
    }

    #[test]
    fn blank_reason_defaults_to_general_consultation() {
        let mut draft = filled();
        draft.reason = "   ".into();
        let payload = draft.build_payload().unwrap();
        assert_eq!(payload.reason, "General Consultation");
    }

    #[test]
    fn provided_reason_is_kept_verbatim() {
        let payload = filled().build_payload().unwrap();
        assert_eq!(payload.reason, "Annual physical");
        assert_eq!(payload.patient_id, 7);
        assert_eq!(payload.doctor_id, 2);
    }
}
