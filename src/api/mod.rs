//! REST client for the Caredesk backend.
//!
//! One [`ApiClient`] is shared by every dashboard section. Endpoint
//! groups live in their own modules and extend the client with the
//! resource calls they own; all of them go through the same JSON and
//! error-mapping plumbing in `client`.

pub mod appointments;
pub mod auth;
mod client;
pub mod error;
pub mod prescriptions;
pub mod records;
pub mod tenants;
pub mod treatments;
pub mod users;

pub use auth::{Credentials, LoginResponse};
pub use client::{ApiClient, SharedSessions};
pub use error::ApiError;
