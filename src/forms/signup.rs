use serde::Serialize;

use crate::config;

use super::{require, FormError};

/// Steps of the patient signup wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    Account,
    Profile,
    Review,
}

impl SignupStep {
    pub const ALL: [SignupStep; 3] = [
        SignupStep::Account,
        SignupStep::Profile,
        SignupStep::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SignupStep::Account => "Create your account",
            SignupStep::Profile => "Tell us about yourself",
            SignupStep::Review => "Review and confirm",
        }
    }

    fn next(&self) -> Option<SignupStep> {
        match self {
            SignupStep::Account => Some(SignupStep::Profile),
            SignupStep::Profile => Some(SignupStep::Review),
            SignupStep::Review => None,
        }
    }

    fn prev(&self) -> Option<SignupStep> {
        match self {
            SignupStep::Account => None,
            SignupStep::Profile => Some(SignupStep::Account),
            SignupStep::Review => Some(SignupStep::Profile),
        }
    }
}

/// Assembled payload for the registration endpoint, built only once
/// every step has validated.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPayload {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
}

/// The multi-step signup wizard. Forward movement is gated on the
/// current step's validation; going back never loses entered data.
#[derive(Debug, Clone, Default)]
pub struct SignupWizard {
    step: SignupStep,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: String,
}

impl Default for SignupStep {
    fn default() -> Self {
        SignupStep::Account
    }
}

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    fn validate_account(&self) -> Result<(), FormError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        if self.password.chars().count() < config::MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort {
                min: config::MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }

    fn validate_profile(&self) -> Result<(), FormError> {
        require("first name", &self.first_name)?;
        require("last name", &self.last_name)?;
        Ok(())
    }

    /// Validation for the step currently on screen.
    pub fn validate_current(&self) -> Result<(), FormError> {
        match self.step {
            SignupStep::Account => self.validate_account(),
            SignupStep::Profile => self.validate_profile(),
            SignupStep::Review => {
                self.validate_account()?;
                self.validate_profile()
            }
        }
    }

    /// Advance one step. Blocked by the current step's validation;
    /// a no-op on the final step.
    pub fn next(&mut self) -> Result<SignupStep, FormError> {
        self.validate_current()?;
        if let Some(step) = self.step.next() {
            self.step = step;
        }
        Ok(self.step)
    }

    /// Go back one step. Never validates and never discards input.
    pub fn back(&mut self) -> SignupStep {
        if let Some(step) = self.step.prev() {
            self.step = step;
        }
        self.step
    }

    /// Assemble the registration payload from the review step.
    pub fn finish(&self) -> Result<RegistrationPayload, FormError> {
        self.validate_account()?;
        self.validate_profile()?;
        Ok(RegistrationPayload {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: match self.phone.trim() {
                "" => None,
                s => Some(s.to_owned()),
            },
            date_of_birth: match self.date_of_birth.trim() {
                "" => None,
                s => Some(s.to_owned()),
            },
        })
    }
}
