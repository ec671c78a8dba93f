//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Server-side sessions behind an opaque cookie token
//! - `require_auth_session` middleware and the `CurrentUser` extractor
//! - Ownership and role checks for resource routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Only a keyed digest of each session token is stored
//! - Unknown email and wrong password are indistinguishable to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::authorization::{Owned, OwnershipError, require_ownership, require_role};
pub use application::config::AuthConfig;
pub use application::session::SessionManager;
pub use domain::entity::principal::Principal;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::{AuthAppState, CurrentUser, auth_router, require_auth_session};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
