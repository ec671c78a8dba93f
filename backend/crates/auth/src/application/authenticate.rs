//! Authentication Strategy
//!
//! Email + password verification. Unknown email and wrong password fail
//! identically, in both response and timing.

use std::sync::Arc;

use chrono::Utc;
use platform::password::PasswordHasher;

use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Hash on the blocking pool; Argon2 is deliberately slow.
pub async fn hash_password(raw: RawPassword, hasher: PasswordHasher) -> AuthResult<UserPassword> {
    tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, &hasher))
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(AuthError::from)
}

/// Outcome of a password check.
#[derive(Debug)]
pub struct Verification {
    pub valid: bool,
    /// Fresh hash under the current work factor, when the stored one was
    /// weaker and the password matched.
    pub upgraded: Option<UserPassword>,
}

/// Verify on the blocking pool. With no stored hash a dummy hash is computed
/// so the caller spends the same time either way.
pub async fn verify_password(
    raw: RawPassword,
    stored: Option<UserPassword>,
    hasher: PasswordHasher,
) -> AuthResult<Verification> {
    tokio::task::spawn_blocking(move || {
        let Some(stored) = stored else {
            return Verification {
                valid: hasher.verify_dummy(raw.inner()),
                upgraded: None,
            };
        };

        let valid = stored.verify(&raw, &hasher);
        let upgraded = if valid && stored.needs_rehash(&hasher) {
            match UserPassword::from_raw(&raw, &hasher) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::warn!(error = %e, "Password rehash failed");
                    None
                }
            }
        } else {
            None
        };

        Verification { valid, upgraded }
    })
    .await
    .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: PasswordHasher,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: PasswordHasher) -> Self {
        Self { user_repo, hasher }
    }

    /// Resolve `email` + `password` to a principal.
    ///
    /// Every credential mismatch is [`AuthError::InvalidCredentials`]; only
    /// store failures surface as anything else.
    pub async fn execute(&self, email: &str, password: String) -> AuthResult<Principal> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw = RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_by_email(&email).await?;

        let verification = verify_password(
            raw,
            user.as_ref().map(|u| u.password_hash.clone()),
            self.hasher.clone(),
        )
        .await?;

        match user {
            Some(user) if verification.valid => {
                if let Some(hash) = verification.upgraded {
                    self.upgrade_hash(&user, &hash).await;
                }
                Ok(user.to_principal())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Persist a rehashed password. Failure keeps the old hash and does not
    /// fail the login.
    async fn upgrade_hash(&self, user: &User, hash: &UserPassword) {
        match self
            .user_repo
            .update_password_hash(&user.user_id, hash, Utc::now())
            .await
        {
            Ok(_) => {
                tracing::info!(user_id = %user.user_id, "Password hash upgraded to current work factor");
            }
            Err(e) => {
                tracing::warn!(user_id = %user.user_id, error = %e, "Password hash upgrade failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashParams;

    use crate::infra::memory::InMemoryAuthRepository;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    async fn use_case() -> (AuthenticateUseCase<InMemoryAuthRepository>, User) {
        let repo = InMemoryAuthRepository::new();
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hash = hash_password(raw, hasher()).await.unwrap();
        let user = User::new(Email::new("a@x.com").unwrap(), hash, None);
        UserRepository::create(&repo, &user).await.unwrap();

        (AuthenticateUseCase::new(Arc::new(repo), hasher()), user)
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let (auth, user) = use_case().await;
        let principal = auth.execute("  A@X.com ", "secret1".to_string()).await.unwrap();
        assert_eq!(principal.user_id, user.user_id);
        assert_eq!(principal.display_name, "");
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let (auth, _) = use_case().await;

        let wrong_password = auth.execute("a@x.com", "secret2".to_string()).await.unwrap_err();
        let unknown_user = auth.execute("b@x.com", "secret1".to_string()).await.unwrap_err();
        let bad_email = auth.execute("not-an-email", "secret1".to_string()).await.unwrap_err();

        for err in [wrong_password, unknown_user, bad_email] {
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    async fn weak_user(repo: &InMemoryAuthRepository) -> User {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let weak = hash_password(raw, hasher()).await.unwrap();
        let user = User::new(Email::new("a@x.com").unwrap(), weak, None);
        UserRepository::create(repo, &user).await.unwrap();
        user
    }

    fn stronger_hasher() -> PasswordHasher {
        PasswordHasher::new(HashParams {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_weak_hash_is_upgraded_on_login() {
        let repo = InMemoryAuthRepository::new();
        let user = weak_user(&repo).await;
        let auth = AuthenticateUseCase::new(Arc::new(repo.clone()), stronger_hasher());

        auth.execute("a@x.com", "secret1".to_string()).await.unwrap();

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, user.password_hash);
        assert!(!stored.password_hash.needs_rehash(&stronger_hasher()));

        // The upgraded hash still accepts the same password
        auth.execute("a@x.com", "secret1".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn test_wrong_password_does_not_upgrade() {
        let repo = InMemoryAuthRepository::new();
        let user = weak_user(&repo).await;
        let auth = AuthenticateUseCase::new(Arc::new(repo.clone()), stronger_hasher());

        auth.execute("a@x.com", "nope".to_string()).await.unwrap_err();

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, user.password_hash);
    }
}
