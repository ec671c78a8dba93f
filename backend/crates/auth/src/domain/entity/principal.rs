//! Principal
//!
//! The authenticated identity attached to a request. Rebuilt from the user
//! record on every request, so name and role edits take effect immediately.

use crate::domain::value_object::{UserId, email::Email, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: Email,
    pub display_name: String,
    pub user_role: UserRole,
}

impl Principal {
    /// `true` when this principal is the owner identified by `owner_id`.
    #[inline]
    pub fn owns(&self, owner_id: &UserId) -> bool {
        &self.user_id == owner_id
    }
}
