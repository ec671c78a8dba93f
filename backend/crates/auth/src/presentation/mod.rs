//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extractor::CurrentUser;
pub use handlers::AuthAppState;
pub use middleware::require_auth_session;
pub use router::auth_router;
