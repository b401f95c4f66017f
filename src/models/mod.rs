//! Typed entities as consumed from the backend REST API. The server
//! owns storage and identity; the client holds cache-lifetime copies.

pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod medical_record;
pub mod patient;
pub mod prescription;
pub mod tenant;
pub mod treatment;
pub mod user;

pub use appointment::{Appointment, NewAppointment};
pub use doctor::{Doctor, NewDoctor};
pub use enums::{
    AppointmentStatus, Frequency, InvalidEnumValue, Role, SubscriptionPlan, SubscriptionStatus,
};
pub use medical_record::{Attachment, MedicalRecord};
pub use patient::Patient;
pub use prescription::{NewPrescription, Prescription};
pub use tenant::Tenant;
pub use treatment::{NewTreatment, Treatment};
pub use user::{CurrentUser, UserAccount};
