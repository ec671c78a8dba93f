//! Value Object Module

pub mod email;
pub mod session_token;
pub mod user_password;
pub mod user_role;

pub use kernel::id::UserId;
