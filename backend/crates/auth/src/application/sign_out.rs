//! Sign Out Use Case
//!
//! Invalidates a user session. Idempotent: a missing or unknown token is
//! not an error.

use crate::application::session::SessionManager;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    sessions: SessionManager<U, S>,
}

impl<U, S> SignOutUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(sessions: SessionManager<U, S>) -> Self {
        Self { sessions }
    }

    /// Sign out from current session
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        let Some(token) = session_token else {
            return Ok(());
        };

        if self.sessions.destroy(token).await? {
            tracing::info!("User signed out");
        }
        Ok(())
    }
}
