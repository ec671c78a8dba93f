//! Authorization
//!
//! Per-resource ownership and role checks that run after the session
//! middleware has attached a [`Principal`].

use std::future::Future;

use thiserror::Error;

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// A record that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> &UserId;
}

/// Why an ownership check refused access.
#[derive(Debug, Error)]
pub enum OwnershipError<E> {
    #[error("Resource not found")]
    NotFound,

    #[error("Forbidden: You don't own this resource")]
    Forbidden,

    /// The loader itself failed
    #[error(transparent)]
    Load(E),
}

impl From<OwnershipError<AuthError>> for AuthError {
    fn from(err: OwnershipError<AuthError>) -> Self {
        match err {
            OwnershipError::NotFound => AuthError::ResourceNotFound,
            OwnershipError::Forbidden => AuthError::NotOwner,
            OwnershipError::Load(e) => e,
        }
    }
}

/// Load a record and confirm `principal` owns it.
///
/// The loaded record is handed back so callers do not read it twice.
pub async fn require_ownership<T, E, F, Fut>(
    principal: &Principal,
    load: F,
) -> Result<T, OwnershipError<E>>
where
    T: Owned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let record = load()
        .await
        .map_err(OwnershipError::Load)?
        .ok_or(OwnershipError::NotFound)?;

    if !principal.owns(record.owner_id()) {
        tracing::warn!(
            user_id = %principal.user_id,
            owner_id = %record.owner_id(),
            "Ownership check failed"
        );
        return Err(OwnershipError::Forbidden);
    }

    Ok(record)
}

/// Reject principals whose role is not in `allowed`.
pub fn require_role(principal: &Principal, allowed: &[UserRole]) -> AuthResult<()> {
    if allowed.contains(&principal.user_role) {
        return Ok(());
    }

    let roles = allowed
        .iter()
        .map(UserRole::code)
        .collect::<Vec<_>>()
        .join(", ");
    Err(AuthError::InsufficientRole(roles))
}
