//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use crate::application::authenticate::AuthenticateUseCase;
use crate::application::session::SessionManager;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub principal: Principal,
    /// Session token for cookie
    pub session_token: SessionToken,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    authenticate: AuthenticateUseCase<U>,
    sessions: SessionManager<U, S>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: SessionManager<U, S>) -> Self {
        Self {
            authenticate: AuthenticateUseCase::new(
                user_repo,
                sessions.config().password_hasher.clone(),
            ),
            sessions,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let principal = self.authenticate.execute(&input.email, input.password).await?;
        let session_token = self.sessions.create(principal.user_id).await?;

        tracing::info!(user_id = %principal.user_id, "User signed in");

        Ok(SignInOutput {
            principal,
            session_token,
        })
    }
}
