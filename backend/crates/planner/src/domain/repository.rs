//! Repository Traits
//!
//! Method names are prefixed per resource so a single store type can
//! implement all three traits without call-site ambiguity.

use crate::domain::entity::{
    daily_tasks::{DailyTasks, TaskItem},
    goal::Goal,
    weekly_plan::WeeklyPlan,
};
use crate::domain::value_object::{
    DailyTasksId, GoalId, UserId, WeeklyPlanId, day_name::DayName,
};
use crate::error::PlannerResult;

/// Quarterly goal repository trait
#[trait_variant::make(GoalRepository: Send)]
pub trait LocalGoalRepository {
    /// Newest first
    async fn list_goals(&self, user_id: &UserId) -> PlannerResult<Vec<Goal>>;

    async fn find_goal(&self, goal_id: &GoalId) -> PlannerResult<Option<Goal>>;

    async fn create_goal(&self, goal: &Goal) -> PlannerResult<()>;

    /// Overwrite every mutable field. `false` if the goal no longer exists.
    async fn update_goal(&self, goal: &Goal) -> PlannerResult<bool>;

    async fn delete_goal(&self, goal_id: &GoalId) -> PlannerResult<bool>;
}

/// Weekly plan repository trait
#[trait_variant::make(WeeklyPlanRepository: Send)]
pub trait LocalWeeklyPlanRepository {
    /// Latest week first
    async fn list_plans(&self, user_id: &UserId) -> PlannerResult<Vec<WeeklyPlan>>;

    async fn find_plan(&self, plan_id: &WeeklyPlanId) -> PlannerResult<Option<WeeklyPlan>>;

    async fn create_plan(&self, plan: &WeeklyPlan) -> PlannerResult<()>;

    async fn update_plan(&self, plan: &WeeklyPlan) -> PlannerResult<bool>;

    /// Also removes the plan's daily task records.
    async fn delete_plan(&self, plan_id: &WeeklyPlanId) -> PlannerResult<bool>;
}

/// Daily tasks repository trait
#[trait_variant::make(DailyTasksRepository: Send)]
pub trait LocalDailyTasksRepository {
    /// Monday through Friday order
    async fn list_days(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
    ) -> PlannerResult<Vec<DailyTasks>>;

    async fn find_day(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
        day_name: DayName,
    ) -> PlannerResult<Option<DailyTasks>>;

    async fn find_day_by_id(&self, day_id: &DailyTasksId) -> PlannerResult<Option<DailyTasks>>;

    /// Append `item` to the day's list, creating the day record on first
    /// use. A single atomic write.
    async fn append_task(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
        day_name: DayName,
        item: &TaskItem,
    ) -> PlannerResult<()>;

    /// Replace the day's task list. `false` if the day no longer exists.
    async fn save_task_items(&self, day: &DailyTasks) -> PlannerResult<bool>;
}

/// Everything the planner routes need from one store.
pub trait PlannerStore:
    GoalRepository + WeeklyPlanRepository + DailyTasksRepository + Clone + Send + Sync + 'static
{
}

impl<T> PlannerStore for T where
    T: GoalRepository + WeeklyPlanRepository + DailyTasksRepository + Clone + Send + Sync + 'static
{
}
