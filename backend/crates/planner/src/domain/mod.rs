//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{daily_tasks::DailyTasks, goal::Goal, weekly_plan::WeeklyPlan};
pub use repository::{DailyTasksRepository, GoalRepository, PlannerStore, WeeklyPlanRepository};
