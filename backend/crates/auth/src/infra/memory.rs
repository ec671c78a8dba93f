//! In-memory Repository Implementation
//!
//! Process-local store with the same semantics as [`PgAuthRepository`],
//! used by tests and by the API's integration suite.
//!
//! [`PgAuthRepository`]: super::postgres::PgAuthRepository

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use kernel::id::AuthSessionId;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{UserId, email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    sessions: HashMap<AuthSessionId, AuthSession>,
}

/// Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<RwLock<State>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`AuthError::Store`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Remove a user without touching their sessions.
    pub fn remove_user(&self, user_id: &UserId) -> bool {
        self.state
            .write()
            .map(|mut s| s.users.remove(user_id).is_some())
            .unwrap_or(false)
    }

    /// Number of stored sessions, expired ones included.
    pub fn session_count(&self) -> usize {
        self.state.read().map(|s| s.sessions.len()).unwrap_or(0)
    }

    /// Apply `f` to every stored session.
    pub fn update_sessions(&self, mut f: impl FnMut(&mut AuthSession)) {
        if let Ok(mut state) = self.state.write() {
            state.sessions.values_mut().for_each(&mut f);
        }
    }

    fn read(&self) -> AuthResult<RwLockReadGuard<'_, State>> {
        self.check_available()?;
        self.state
            .read()
            .map_err(|_| AuthError::Store("lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<RwLockWriteGuard<'_, State>> {
        self.check_available()?;
        self.state
            .write()
            .map_err(|_| AuthError::Store("lock poisoned".to_string()))
    }

    fn check_available(&self) -> AuthResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::Store("store unavailable".to_string()));
        }
        Ok(())
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut state = self.write()?;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.read()?.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.read()?.users.values().any(|u| &u.email == email))
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut state = self.write()?;
        let Some(user) = state.users.get_mut(user_id) else {
            return Ok(false);
        };
        user.password_hash = password_hash.clone();
        user.updated_at = at;
        Ok(true)
    }

    async fn delete_user(&self, user_id: &UserId) -> AuthResult<bool> {
        let mut state = self.write()?;
        state.sessions.retain(|_, s| &s.user_id != user_id);
        Ok(state.users.remove(user_id).is_some())
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.write()?
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_token_digest(&self, digest: &[u8]) -> AuthResult<Option<AuthSession>> {
        Ok(self
            .read()?
            .sessions
            .values()
            .find(|s| s.token_digest == digest)
            .cloned())
    }

    async fn touch(&self, session_id: &AuthSessionId, at: DateTime<Utc>) -> AuthResult<()> {
        if let Some(session) = self.write()?.sessions.get_mut(session_id) {
            session.touch(at);
        }
        Ok(())
    }

    async fn delete(&self, session_id: &AuthSessionId) -> AuthResult<()> {
        self.write()?.sessions.remove(session_id);
        Ok(())
    }

    async fn delete_by_token_digest(&self, digest: &[u8]) -> AuthResult<bool> {
        let mut state = self.write()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.token_digest != digest);
        Ok(state.sessions.len() < before)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut state = self.write()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - state.sessions.len()) as u64)
    }
}
