//! Application Layer
//!
//! One service per resource. Every operation takes the session principal,
//! checks ownership where a record is addressed, then performs a single
//! store write.

pub mod daily_tasks;
pub mod goals;
pub mod weekly_plans;

pub use daily_tasks::DailyTaskService;
pub use goals::GoalService;
pub use weekly_plans::WeeklyPlanService;
