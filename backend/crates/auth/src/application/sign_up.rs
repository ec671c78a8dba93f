//! Sign Up Use Case
//!
//! Creates a new user account and opens its first session.

use std::sync::Arc;

use crate::application::authenticate::hash_password;
use crate::application::session::SessionManager;
use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, session_token::SessionToken, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub principal: Principal,
    pub session_token: SessionToken,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    sessions: SessionManager<U, S>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: SessionManager<U, S>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(&input.email)?;

        // The UNIQUE(email) constraint still backs this up under races
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = hash_password(
            raw_password,
            self.sessions.config().password_hasher.clone(),
        )
        .await?;

        let user = User::new(email, password_hash, input.name);
        self.user_repo.create(&user).await?;

        let session_token = match self.sessions.create(user.user_id).await {
            Ok(token) => token,
            Err(e) => {
                self.roll_back(&user).await;
                return Err(e);
            }
        };

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            principal: user.to_principal(),
            session_token,
        })
    }

    /// Undo the user insert so a failed registration can be retried.
    async fn roll_back(&self, user: &User) {
        match self.user_repo.delete_user(&user.user_id).await {
            Ok(_) => {
                tracing::warn!(user_id = %user.user_id, "Session creation failed, registration rolled back");
            }
            Err(e) => {
                tracing::error!(user_id = %user.user_id, error = %e, "Failed to roll back registration");
            }
        }
    }
}
