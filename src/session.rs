//! Role-keyed session store.
//!
//! Replaces the dashboards' three ad hoc token namespaces with one
//! normalized store keyed by [`Role`]. Sessions exist only in memory:
//! set on login, cleared on logout, and refused locally once expired
//! instead of round-tripping a dead token to the server.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::Role;

// ═══════════════════════════════════════════════════════════
// Session — one logged-in identity
// ═══════════════════════════════════════════════════════════

/// A logged-in identity for one role: bearer token plus the minimal
/// profile the header/avatar needs.
#[derive(Debug, Clone)]
pub struct Session {
    role: Role,
    token: String,
    user_id: i64,
    display_name: String,
    tenant_id: Option<i64>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(
        role: Role,
        token: String,
        user_id: i64,
        display_name: String,
        tenant_id: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            role,
            token,
            user_id,
            display_name,
            tenant_id,
            expires_at,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn tenant_id(&self) -> Option<i64> {
        self.tenant_id
    }

    /// A session with no expiry never expires locally; the server is
    /// then the only authority on token validity.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

// ═══════════════════════════════════════════════════════════
// SessionStore — all roles, one active
// ═══════════════════════════════════════════════════════════

/// All logged-in sessions, keyed by role. A browser tab can hold a
/// staff session and a superadmin session at once; `active` tracks
/// which dashboard is currently driving requests.
pub struct SessionStore {
    active: Option<Role>,
    sessions: HashMap<Role, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            active: None,
            sessions: HashMap::new(),
        }
    }

    /// Store a session and make its role the active one.
    pub fn login(&mut self, session: Session) {
        tracing::debug!(role = %session.role(), "session stored");
        self.active = Some(session.role());
        self.sessions.insert(session.role(), session);
    }

    pub fn session(&self, role: Role) -> Option<&Session> {
        self.sessions.get(&role)
    }

    pub fn is_logged_in(&self, role: Role) -> bool {
        self.sessions.contains_key(&role)
    }

    pub fn active(&self) -> Option<Role> {
        self.active
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active.and_then(|role| self.sessions.get(&role))
    }

    /// Bearer token for a role, refusing expired sessions.
    pub fn token(&self, role: Role) -> Result<&str, SessionError> {
        let session = self
            .sessions
            .get(&role)
            .ok_or(SessionError::NotLoggedIn(role))?;
        if session.is_expired(Utc::now()) {
            return Err(SessionError::Expired(role));
        }
        Ok(session.token())
    }

    /// Clear exactly one role's session. Other roles stay logged in.
    pub fn logout(&mut self, role: Role) {
        self.sessions.remove(&role);
        if self.active == Some(role) {
            self.active = None;
        }
        tracing::debug!(role = %role, "session cleared");
    }

    /// Wipe every session.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.active = None;
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no session for role {0}")]
    NotLoggedIn(Role),
    #[error("session for role {0} has expired")]
    Expired(Role),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
