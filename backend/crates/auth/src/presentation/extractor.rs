//! Request Extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::entity::principal::Principal;
use crate::error::AuthError;

/// The principal attached by [`require_auth_session`].
///
/// Only usable on routes behind that middleware; elsewhere it rejects
/// with 401.
///
/// [`require_auth_session`]: super::middleware::require_auth_session
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::SessionInvalid)
    }
}
