//! Daily Task Service
//!
//! Tasks hang off a weekly plan; the plan's owner is checked before any
//! day is read or written.

use std::sync::Arc;

use auth::{OwnershipError, Principal, require_ownership};

use crate::application::weekly_plans::owned_plan;
use crate::domain::entity::daily_tasks::{DailyTasks, TaskItem};
use crate::domain::repository::{DailyTasksRepository, WeeklyPlanRepository};
use crate::domain::value_object::{DailyTasksId, WeeklyPlanId, day_name::DayName};
use crate::error::{PlannerError, PlannerResult};

pub struct DailyTaskService<R>
where
    R: WeeklyPlanRepository + DailyTasksRepository,
{
    repo: Arc<R>,
}

impl<R> DailyTaskService<R>
where
    R: WeeklyPlanRepository + DailyTasksRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        principal: &Principal,
        plan_id: WeeklyPlanId,
    ) -> PlannerResult<Vec<DailyTasks>> {
        owned_plan(self.repo.as_ref(), principal, plan_id).await?;
        self.repo.list_days(&principal.user_id, &plan_id).await
    }

    /// Append a task and return every day of the plan.
    pub async fn add(
        &self,
        principal: &Principal,
        plan_id: WeeklyPlanId,
        day_name: &str,
        text: String,
    ) -> PlannerResult<Vec<DailyTasks>> {
        owned_plan(self.repo.as_ref(), principal, plan_id).await?;
        let day_name: DayName = day_name.parse()?;

        self.repo
            .append_task(&principal.user_id, &plan_id, day_name, &TaskItem::new(text))
            .await?;

        self.repo.list_days(&principal.user_id, &plan_id).await
    }

    pub async fn toggle(
        &self,
        principal: &Principal,
        plan_id: WeeklyPlanId,
        day_name: &str,
        index: usize,
    ) -> PlannerResult<()> {
        owned_plan(self.repo.as_ref(), principal, plan_id).await?;
        let day_name: DayName = day_name.parse()?;

        let mut day = self
            .repo
            .find_day(&principal.user_id, &plan_id, day_name)
            .await?
            .ok_or(PlannerError::DayNotFound)?;

        day.toggle(index)?;
        self.save(&day).await
    }

    /// Negative indexes address nothing.
    pub async fn delete_task(
        &self,
        principal: &Principal,
        day_id: DailyTasksId,
        index: i64,
    ) -> PlannerResult<()> {
        let mut day = require_ownership(principal, || self.repo.find_day_by_id(&day_id))
            .await
            .map_err(|e| match e {
                OwnershipError::NotFound => PlannerError::DayNotFound,
                OwnershipError::Forbidden => PlannerError::TaskForbidden,
                OwnershipError::Load(e) => e,
            })?;

        let index = usize::try_from(index).map_err(|_| PlannerError::TaskNotFound)?;
        day.remove(index)?;
        self.save(&day).await?;

        tracing::info!(day_id = %day_id, index, "Task deleted");
        Ok(())
    }

    async fn save(&self, day: &DailyTasks) -> PlannerResult<()> {
        if !self.repo.save_task_items(day).await? {
            return Err(PlannerError::DayNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::domain::value_object::{email::Email, user_role::UserRole};
    use chrono::Utc;

    use crate::application::weekly_plans::WeeklyPlanService;
    use crate::domain::entity::weekly_plan::NewWeeklyPlan;
    use crate::domain::value_object::UserId;
    use crate::infra::memory::InMemoryPlannerRepository;

    fn principal(email: &str) -> Principal {
        Principal {
            user_id: UserId::new(),
            email: Email::new(email).unwrap(),
            display_name: String::new(),
            user_role: UserRole::User,
        }
    }

    async fn setup() -> (DailyTaskService<InMemoryPlannerRepository>, Principal, WeeklyPlanId) {
        let repo = Arc::new(InMemoryPlannerRepository::new());
        let alice = principal("alice@example.com");
        let plan = WeeklyPlanService::new(repo.clone())
            .create(
                &alice,
                NewWeeklyPlan {
                    week_start_date: Utc::now(),
                    goal_ids: vec![],
                    priorities: vec![],
                    reflection_notes: String::new(),
                },
            )
            .await
            .unwrap();
        (DailyTaskService::new(repo), alice, plan.plan_id)
    }

    #[tokio::test]
    async fn test_add_groups_by_day() {
        let (service, alice, plan_id) = setup().await;

        service.add(&alice, plan_id, "Tuesday", "b".into()).await.unwrap();
        service.add(&alice, plan_id, "Monday", "a".into()).await.unwrap();
        let days = service.add(&alice, plan_id, "Monday", "c".into()).await.unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_name, DayName::Monday);
        assert_eq!(
            days[0].task_items,
            vec![TaskItem::new("a"), TaskItem::new("c")]
        );
        assert_eq!(days[1].day_name, DayName::Tuesday);
    }

    #[tokio::test]
    async fn test_invalid_day_name() {
        let (service, alice, plan_id) = setup().await;
        assert!(matches!(
            service.add(&alice, plan_id, "Sunday", "x".into()).await,
            Err(PlannerError::InvalidDayName)
        ));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_done() {
        let (service, alice, plan_id) = setup().await;
        service.add(&alice, plan_id, "Monday", "a".into()).await.unwrap();

        service.toggle(&alice, plan_id, "Monday", 0).await.unwrap();
        assert!(service.list(&alice, plan_id).await.unwrap()[0].task_items[0].done);

        service.toggle(&alice, plan_id, "Monday", 0).await.unwrap();
        assert!(!service.list(&alice, plan_id).await.unwrap()[0].task_items[0].done);

        assert!(matches!(
            service.toggle(&alice, plan_id, "Monday", 5).await,
            Err(PlannerError::TaskNotFound)
        ));
        assert!(matches!(
            service.toggle(&alice, plan_id, "Friday", 0).await,
            Err(PlannerError::DayNotFound)
        ));
    }

    #[tokio::test]
    async fn test_other_user_cannot_reach_plan_or_day() {
        let (service, alice, plan_id) = setup().await;
        let days = service.add(&alice, plan_id, "Monday", "a".into()).await.unwrap();
        let bob = principal("bob@example.com");

        assert!(matches!(
            service.list(&bob, plan_id).await,
            Err(PlannerError::PlanForbidden)
        ));
        assert!(matches!(
            service.delete_task(&bob, days[0].day_id, 0).await,
            Err(PlannerError::TaskForbidden)
        ));
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (service, alice, plan_id) = setup().await;
        service.add(&alice, plan_id, "Monday", "a".into()).await.unwrap();
        let days = service.add(&alice, plan_id, "Monday", "b".into()).await.unwrap();
        let day_id = days[0].day_id;

        assert!(matches!(
            service.delete_task(&alice, day_id, -1).await,
            Err(PlannerError::TaskNotFound)
        ));
        assert!(matches!(
            service.delete_task(&alice, day_id, 2).await,
            Err(PlannerError::TaskNotFound)
        ));

        service.delete_task(&alice, day_id, 0).await.unwrap();
        let days = service.list(&alice, plan_id).await.unwrap();
        assert_eq!(days[0].task_items, vec![TaskItem::new("b")]);

        assert!(matches!(
            service.delete_task(&alice, DailyTasksId::new(), 0).await,
            Err(PlannerError::DayNotFound)
        ));
    }
}
