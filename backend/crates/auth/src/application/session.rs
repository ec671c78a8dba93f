//! Session Manager
//!
//! Issues, resolves and destroys server-side sessions. The client holds an
//! opaque random token; the store only ever sees its keyed digest.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::AuthSession, principal::Principal};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::AuthResult;

pub struct SessionManager<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> Clone for SessionManager<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_repo: self.user_repo.clone(),
            session_repo: self.session_repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<U, S> SessionManager<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Start a session for `user_id` and return the token for the cookie.
    pub async fn create(&self, user_id: UserId) -> AuthResult<SessionToken> {
        let token = SessionToken::generate();
        let session = AuthSession::new(
            user_id,
            token.digest(&self.config.session_secret),
            self.config.session_ttl_chrono(),
        );

        self.session_repo.create(&session).await?;

        tracing::debug!(session_id = %session.session_id, user_id = %user_id, "Session created");
        Ok(token)
    }

    /// Map a presented token to its principal.
    ///
    /// `Ok(None)` covers every "not logged in" case: malformed, unknown,
    /// expired, or pointing at a user that no longer exists. Expired and
    /// orphaned records are deleted on the way out. Store failures are
    /// returned as errors.
    pub async fn resolve(&self, raw_token: &str) -> AuthResult<Option<Principal>> {
        let Some(token) = SessionToken::parse(raw_token) else {
            return Ok(None);
        };
        let digest = token.digest(&self.config.session_secret);

        let Some(mut session) = self.session_repo.find_by_token_digest(&digest).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let idle_timeout = self.config.idle_timeout_chrono();
        if session.is_expired_at(now, idle_timeout) {
            self.session_repo.delete(&session.session_id).await?;
            tracing::debug!(session_id = %session.session_id, "Expired session removed");
            return Ok(None);
        }

        let Some(user) = self.user_repo.find_by_id(&session.user_id).await? else {
            self.session_repo.delete(&session.session_id).await?;
            tracing::warn!(session_id = %session.session_id, "Session pointed at a missing user");
            return Ok(None);
        };

        if idle_timeout.is_some() {
            session.touch(now);
            self.session_repo
                .touch(&session.session_id, session.last_activity_at)
                .await?;
        }

        Ok(Some(user.to_principal()))
    }

    /// Delete the session behind `raw_token`, if any. Returns `true` when a
    /// record was removed.
    pub async fn destroy(&self, raw_token: &str) -> AuthResult<bool> {
        let Some(token) = SessionToken::parse(raw_token) else {
            return Ok(false);
        };
        let digest = token.digest(&self.config.session_secret);
        self.session_repo.delete_by_token_digest(&digest).await
    }

    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let removed = self.session_repo.cleanup_expired().await?;
        if removed > 0 {
            tracing::info!(removed, "Expired sessions cleaned up");
        }
        Ok(removed)
    }
}
