//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Resolve the session cookie to a [`Principal`] and attach it to the
/// request, or reject with 401 before the route runs.
///
/// Install with `axum::middleware::from_fn_with_state(state, require_auth_session::<R>)`.
///
/// [`Principal`]: crate::domain::entity::principal::Principal
pub async fn require_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = state.session_cookie(req.headers()) else {
        return Err(AuthError::SessionInvalid);
    };

    let principal = state
        .sessions()
        .resolve(&token)
        .await?
        .ok_or(AuthError::SessionInvalid)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
