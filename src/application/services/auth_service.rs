//! Panel authentication: credential check and session issuance.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// Service authenticating the admin panel.
///
/// Credentials are a single configured login/password pair, matched
/// exactly. A successful login issues a UUIDv4 session id which the
/// login handler sets as the `uuid` cookie; every hit on a protected
/// panel route checks that cookie against the session store.
pub struct AuthService {
    sessions: Arc<dyn SessionRepository>,
    admin_login: String,
    admin_password: String,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        admin_login: String,
        admin_password: String,
    ) -> Self {
        Self {
            sessions,
            admin_login,
            admin_password,
        }
    }

    /// Checks credentials and, when they match, issues a new session.
    ///
    /// Returns `Some(session_id)` on success, `None` on a credential
    /// mismatch (the handler answers with the literal failure text).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, login: &str, password: &str) -> Result<Option<String>, AppError> {
        if login != self.admin_login || password != self.admin_password {
            return Ok(None);
        }

        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(&session_id).await?;

        Ok(Some(session_id))
    }

    /// Returns true if the session id was issued by this service.
    pub async fn verify(&self, session_id: &str) -> Result<bool, AppError> {
        self.sessions.exists(session_id).await
    }
}
