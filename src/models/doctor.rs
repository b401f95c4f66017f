use serde::{Deserialize, Serialize};

/// A doctor in a tenant's directory. Money is carried in integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialization: String,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default)]
    pub consultation_fee_cents: i64,
    #[serde(default)]
    pub is_available: bool,
    pub tenant_id: i64,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for onboarding a new doctor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDoctor {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub consultation_fee_cents: Option<i64>,
}
