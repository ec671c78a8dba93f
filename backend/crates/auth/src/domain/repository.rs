//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer (`PgAuthRepository`, `InMemoryAuthRepository`).

use chrono::{DateTime, Utc};
use kernel::id::AuthSessionId;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::{UserId, email::Email, user_password::UserPassword};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A duplicate email fails with
    /// [`AuthError::EmailTaken`](crate::error::AuthError::EmailTaken).
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the stored hash. Returns `false` if the user is gone.
    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<bool>;

    /// Remove a user and, through the foreign key, their sessions.
    async fn delete_user(&self, user_id: &UserId) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Look up by token digest, expired or not. Expiry is decided by the
    /// caller so it can delete the record.
    async fn find_by_token_digest(&self, digest: &[u8]) -> AuthResult<Option<AuthSession>>;

    async fn touch(&self, session_id: &AuthSessionId, at: DateTime<Utc>) -> AuthResult<()>;

    async fn delete(&self, session_id: &AuthSessionId) -> AuthResult<()>;

    /// Returns `true` if a record was removed.
    async fn delete_by_token_digest(&self, digest: &[u8]) -> AuthResult<bool>;

    /// Remove every session past its absolute expiry.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
