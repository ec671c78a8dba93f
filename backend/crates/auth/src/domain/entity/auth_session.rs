//! Auth Session Entity
//!
//! Server-side record binding a token digest to a user. Looked up by
//! digest; the raw token only ever lives in the client's cookie.

use chrono::{DateTime, Duration, Utc};

use kernel::id::AuthSessionId;

use crate::domain::value_object::UserId;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: AuthSessionId,
    /// HMAC-SHA256(session_secret, token)
    pub token_digest: Vec<u8>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    /// Absolute lifetime; never extended
    pub expires_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(user_id: UserId, token_digest: Vec<u8>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: AuthSessionId::new(),
            token_digest,
            user_id,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            last_activity_at: now,
        }
    }

    /// Past its absolute expiry, or idle for longer than `idle_timeout`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, idle_timeout: Option<Duration>) -> bool {
        if now >= self.expires_at {
            return true;
        }
        match idle_timeout {
            Some(idle) => now - self.last_activity_at >= idle,
            None => false,
        }
    }

    /// Update last activity timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity_at = now;
    }
}
