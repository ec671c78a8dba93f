//! Weekly Plan Service

use std::sync::Arc;

use auth::{OwnershipError, Principal, require_ownership};

use crate::domain::entity::weekly_plan::{NewWeeklyPlan, WeeklyPlan, WeeklyPlanPatch};
use crate::domain::repository::WeeklyPlanRepository;
use crate::domain::value_object::WeeklyPlanId;
use crate::error::{PlannerError, PlannerResult};

pub struct WeeklyPlanService<R>
where
    R: WeeklyPlanRepository,
{
    repo: Arc<R>,
}

impl<R> WeeklyPlanService<R>
where
    R: WeeklyPlanRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, principal: &Principal) -> PlannerResult<Vec<WeeklyPlan>> {
        self.repo.list_plans(&principal.user_id).await
    }

    pub async fn get(
        &self,
        principal: &Principal,
        plan_id: WeeklyPlanId,
    ) -> PlannerResult<WeeklyPlan> {
        owned_plan(self.repo.as_ref(), principal, plan_id).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        input: NewWeeklyPlan,
    ) -> PlannerResult<WeeklyPlan> {
        let plan = WeeklyPlan::new(principal.user_id, input);
        self.repo.create_plan(&plan).await?;

        tracing::info!(plan_id = %plan.plan_id, user_id = %plan.user_id, "Weekly plan created");
        Ok(plan)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        plan_id: WeeklyPlanId,
        patch: WeeklyPlanPatch,
    ) -> PlannerResult<()> {
        let mut plan = owned_plan(self.repo.as_ref(), principal, plan_id).await?;
        plan.apply(patch);

        if !self.repo.update_plan(&plan).await? {
            return Err(PlannerError::PlanNotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, plan_id: WeeklyPlanId) -> PlannerResult<()> {
        owned_plan(self.repo.as_ref(), principal, plan_id).await?;

        if !self.repo.delete_plan(&plan_id).await? {
            return Err(PlannerError::PlanNotFound);
        }

        tracing::info!(plan_id = %plan_id, "Weekly plan deleted");
        Ok(())
    }
}

/// Load a plan the principal owns. Shared with the daily task service,
/// which checks the parent plan before touching its days.
pub(crate) async fn owned_plan<R>(
    repo: &R,
    principal: &Principal,
    plan_id: WeeklyPlanId,
) -> PlannerResult<WeeklyPlan>
where
    R: WeeklyPlanRepository,
{
    require_ownership(principal, || repo.find_plan(&plan_id))
        .await
        .map_err(|e| match e {
            OwnershipError::NotFound => PlannerError::PlanNotFound,
            OwnershipError::Forbidden => PlannerError::PlanForbidden,
            OwnershipError::Load(e) => e,
        })
}
