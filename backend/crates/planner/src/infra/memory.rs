//! In-memory Repository Implementation
//!
//! Mirrors [`PgPlannerRepository`](super::postgres::PgPlannerRepository),
//! including the cascade from a weekly plan to its days.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::entity::{
    daily_tasks::{DailyTasks, TaskItem},
    goal::Goal,
    weekly_plan::WeeklyPlan,
};
use crate::domain::repository::{DailyTasksRepository, GoalRepository, WeeklyPlanRepository};
use crate::domain::value_object::{
    DailyTasksId, GoalId, UserId, WeeklyPlanId, day_name::DayName,
};
use crate::error::{PlannerError, PlannerResult};

#[derive(Default)]
struct State {
    goals: HashMap<GoalId, Goal>,
    plans: HashMap<WeeklyPlanId, WeeklyPlan>,
    days: HashMap<DailyTasksId, DailyTasks>,
}

/// Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct InMemoryPlannerRepository {
    state: Arc<RwLock<State>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryPlannerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`PlannerError::Store`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn read(&self) -> PlannerResult<RwLockReadGuard<'_, State>> {
        self.check_available()?;
        self.state
            .read()
            .map_err(|_| PlannerError::Store("lock poisoned".to_string()))
    }

    fn write(&self) -> PlannerResult<RwLockWriteGuard<'_, State>> {
        self.check_available()?;
        self.state
            .write()
            .map_err(|_| PlannerError::Store("lock poisoned".to_string()))
    }

    fn check_available(&self) -> PlannerResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PlannerError::Store("store unavailable".to_string()));
        }
        Ok(())
    }
}

impl GoalRepository for InMemoryPlannerRepository {
    async fn list_goals(&self, user_id: &UserId) -> PlannerResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .read()?
            .goals
            .values()
            .filter(|g| &g.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    async fn find_goal(&self, goal_id: &GoalId) -> PlannerResult<Option<Goal>> {
        Ok(self.read()?.goals.get(goal_id).cloned())
    }

    async fn create_goal(&self, goal: &Goal) -> PlannerResult<()> {
        self.write()?.goals.insert(goal.goal_id, goal.clone());
        Ok(())
    }

    async fn update_goal(&self, goal: &Goal) -> PlannerResult<bool> {
        Ok(match self.write()?.goals.get_mut(&goal.goal_id) {
            Some(stored) => {
                *stored = goal.clone();
                true
            }
            None => false,
        })
    }

    async fn delete_goal(&self, goal_id: &GoalId) -> PlannerResult<bool> {
        Ok(self.write()?.goals.remove(goal_id).is_some())
    }
}

impl WeeklyPlanRepository for InMemoryPlannerRepository {
    async fn list_plans(&self, user_id: &UserId) -> PlannerResult<Vec<WeeklyPlan>> {
        let mut plans: Vec<WeeklyPlan> = self
            .read()?
            .plans
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.week_start_date.cmp(&a.week_start_date));
        Ok(plans)
    }

    async fn find_plan(&self, plan_id: &WeeklyPlanId) -> PlannerResult<Option<WeeklyPlan>> {
        Ok(self.read()?.plans.get(plan_id).cloned())
    }

    async fn create_plan(&self, plan: &WeeklyPlan) -> PlannerResult<()> {
        self.write()?.plans.insert(plan.plan_id, plan.clone());
        Ok(())
    }

    async fn update_plan(&self, plan: &WeeklyPlan) -> PlannerResult<bool> {
        Ok(match self.write()?.plans.get_mut(&plan.plan_id) {
            Some(stored) => {
                *stored = plan.clone();
                true
            }
            None => false,
        })
    }

    async fn delete_plan(&self, plan_id: &WeeklyPlanId) -> PlannerResult<bool> {
        let mut state = self.write()?;
        let removed = state.plans.remove(plan_id).is_some();
        state.days.retain(|_, d| &d.weekly_plan_id != plan_id);
        Ok(removed)
    }
}

impl DailyTasksRepository for InMemoryPlannerRepository {
    async fn list_days(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
    ) -> PlannerResult<Vec<DailyTasks>> {
        let mut days: Vec<DailyTasks> = self
            .read()?
            .days
            .values()
            .filter(|d| &d.user_id == user_id && &d.weekly_plan_id == plan_id)
            .cloned()
            .collect();
        days.sort_by_key(|d| d.day_name as u8);
        Ok(days)
    }

    async fn find_day(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
        day_name: DayName,
    ) -> PlannerResult<Option<DailyTasks>> {
        Ok(self
            .read()?
            .days
            .values()
            .find(|d| {
                &d.user_id == user_id && &d.weekly_plan_id == plan_id && d.day_name == day_name
            })
            .cloned())
    }

    async fn find_day_by_id(&self, day_id: &DailyTasksId) -> PlannerResult<Option<DailyTasks>> {
        Ok(self.read()?.days.get(day_id).cloned())
    }

    async fn append_task(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
        day_name: DayName,
        item: &TaskItem,
    ) -> PlannerResult<()> {
        let mut state = self.write()?;
        let existing = state.days.values_mut().find(|d| {
            &d.user_id == user_id && &d.weekly_plan_id == plan_id && d.day_name == day_name
        });

        match existing {
            Some(day) => {
                day.task_items.push(item.clone());
                day.updated_at = Utc::now();
            }
            None => {
                let day = DailyTasks::new(*user_id, *plan_id, day_name, item.clone());
                state.days.insert(day.day_id, day);
            }
        }
        Ok(())
    }

    async fn save_task_items(&self, day: &DailyTasks) -> PlannerResult<bool> {
        Ok(match self.write()?.days.get_mut(&day.day_id) {
            Some(stored) => {
                stored.task_items = day.task_items.clone();
                stored.updated_at = day.updated_at;
                true
            }
            None => false,
        })
    }
}
