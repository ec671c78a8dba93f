//! Planner Backend Module
//!
//! The three-tier planning hierarchy: quarterly goals, weekly plans and the
//! daily task lists of each plan.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Per-resource services with ownership checks
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::PlannerStore;
pub use error::{PlannerError, PlannerResult};
pub use infra::{memory::InMemoryPlannerRepository, postgres::PgPlannerRepository};
pub use presentation::{PlannerState, planner_router};
