use crate::models::Role;

/// Application-level constants
pub const APP_NAME: &str = "Caredesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fallback API base URL when `CAREDESK_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "https://api.caredesk.health";

/// Reason recorded when staff leave the booking reason blank.
pub const DEFAULT_APPOINTMENT_REASON: &str = "General Consultation";

/// Minimum password length enforced client-side on account forms.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Resolve the API base URL, preferring the environment override.
pub fn api_base_url() -> String {
    std::env::var("CAREDESK_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "caredesk=info"
}

/// Storage key the web dashboards historically used for each role's
/// bearer token. The patient/doctor/staff dashboards shared one key;
/// admin and superadmin each had their own namespace. Kept so sessions
/// persisted by older dashboard builds keep working.
pub fn token_storage_key(role: Role) -> &'static str {
    match role {
        Role::Patient | Role::Doctor | Role::Staff => "token",
        Role::Admin => "admin_token",
        Role::Superadmin => "superadmin_token",
    }
}

/// Login route a dashboard redirects to after logout.
pub fn login_route(role: Role) -> &'static str {
    match role {
        Role::Patient | Role::Doctor | Role::Staff => "/login",
        Role::Admin => "/admin/login",
        Role::Superadmin => "/superadmin/login",
    }
}
