//! Client-side error taxonomy for the REST boundary.
//!
//! Every failure is caught at the mutation/fetch boundary and surfaced
//! to the view layer as one of these variants; nothing escalates to a
//! crash and nothing retries automatically.

use crate::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
    #[error("cannot reach {0}")]
    Connection(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("http error: {0}")]
    Http(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("session store lock poisoned")]
    LockPoisoned,
}

impl ApiError {
    /// Whether retrying the same request could plausibly succeed
    /// without the user changing anything first.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Connection(_) | ApiError::Timeout(_) | ApiError::Server { status: 500..=599, .. }
        )
    }
}
