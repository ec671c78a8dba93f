//! Goal Service

use std::sync::Arc;

use auth::{OwnershipError, Principal, require_ownership};

use crate::domain::entity::goal::{Goal, GoalPatch, NewGoal};
use crate::domain::repository::GoalRepository;
use crate::domain::value_object::GoalId;
use crate::error::{PlannerError, PlannerResult};

pub struct GoalService<R>
where
    R: GoalRepository,
{
    repo: Arc<R>,
}

impl<R> GoalService<R>
where
    R: GoalRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, principal: &Principal) -> PlannerResult<Vec<Goal>> {
        self.repo.list_goals(&principal.user_id).await
    }

    pub async fn get(&self, principal: &Principal, goal_id: GoalId) -> PlannerResult<Goal> {
        self.owned(principal, goal_id).await
    }

    pub async fn create(&self, principal: &Principal, input: NewGoal) -> PlannerResult<Goal> {
        let goal = Goal::new(principal.user_id, input);
        self.repo.create_goal(&goal).await?;

        tracing::info!(goal_id = %goal.goal_id, user_id = %goal.user_id, "Goal created");
        Ok(goal)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        goal_id: GoalId,
        patch: GoalPatch,
    ) -> PlannerResult<()> {
        let mut goal = self.owned(principal, goal_id).await?;
        goal.apply(patch);

        if !self.repo.update_goal(&goal).await? {
            return Err(PlannerError::GoalNotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, goal_id: GoalId) -> PlannerResult<()> {
        self.owned(principal, goal_id).await?;

        if !self.repo.delete_goal(&goal_id).await? {
            return Err(PlannerError::GoalNotFound);
        }

        tracing::info!(goal_id = %goal_id, "Goal deleted");
        Ok(())
    }

    async fn owned(&self, principal: &Principal, goal_id: GoalId) -> PlannerResult<Goal> {
        require_ownership(principal, || self.repo.find_goal(&goal_id))
            .await
            .map_err(|e| match e {
                OwnershipError::NotFound => PlannerError::GoalNotFound,
                OwnershipError::Forbidden => PlannerError::GoalForbidden,
                OwnershipError::Load(e) => e,
            })
    }
}
