//! User Entity
//!
//! Identity record: login email, password hash, display name, role.

use chrono::{DateTime, Utc};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{
    UserId, email::Email, user_password::UserPassword, user_role::UserRole,
};

/// User entity
///
/// The password hash never leaves this type except toward the store; use
/// [`User::to_principal`] for anything request-facing.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Normalized, unique
    pub email: Email,
    pub password_hash: UserPassword,
    /// Empty when not supplied at registration
    pub display_name: String,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Email, password_hash: UserPassword, display_name: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            display_name: display_name.map(|n| n.trim().to_string()).unwrap_or_default(),
            user_role: UserRole::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            user_role: self.user_role,
        }
    }
}
