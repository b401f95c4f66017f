use crate::models::{Appointment, Doctor, Patient, Tenant, UserAccount};

/// Case-insensitive substring search over an entity's visible text.
/// An empty or whitespace-only query matches everything.
pub trait Searchable {
    /// The strings the search box looks through for this entity.
    fn haystacks(&self) -> Vec<&str>;

    fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.haystacks()
            .iter()
            .any(|hay| hay.to_lowercase().contains(&query))
    }
}

impl Searchable for Patient {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email]
    }
}

impl Searchable for Doctor {
    fn haystacks(&self) -> Vec<&str> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.specialization,
        ]
    }
}

impl Searchable for Appointment {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.doctor_name, &self.reason]
    }
}

impl Searchable for Tenant {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.name, &self.domain]
    }
}

impl Searchable for UserAccount {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email]
    }
}
