use crate::cache::QueryKey;
use crate::config;
use crate::models::NewDoctor;

use super::{require, Draft, FormError};

/// Draft for the staff dialog that onboards a doctor account. Password
/// rules are enforced locally so the first feedback is immediate: a
/// blank password reads as a missing field, a short one as too short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorDraft {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: Option<u32>,
    pub consultation_fee_cents: Option<i64>,
}

impl DoctorDraft {
    pub fn build_payload(&self) -> Result<NewDoctor, FormError> {
        self.validate()?;
        Ok(NewDoctor {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            specialization: self.specialization.trim().to_owned(),
            license_number: match self.license_number.trim() {
                "" => None,
                s => Some(s.to_owned()),
            },
            years_of_experience: self.years_of_experience,
            consultation_fee_cents: self.consultation_fee_cents,
        })
    }
}

impl Draft for DoctorDraft {
    fn validate(&self) -> Result<(), FormError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        if self.password.chars().count() < config::MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort {
                min: config::MIN_PASSWORD_LEN,
            });
        }
        require("first name", &self.first_name)?;
        require("last name", &self.last_name)?;
        require("specialization", &self.specialization)?;
        Ok(())
    }

    fn invalidates(&self) -> &'static [QueryKey] {
        &[QueryKey::Doctors]
    }
}
