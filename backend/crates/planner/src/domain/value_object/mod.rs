//! Value Object Module

pub mod day_name;
pub mod plan_date;
pub mod progress;

pub use kernel::id::{DailyTasksId, GoalId, UserId, WeeklyPlanId};
