//! HTTP Handlers
//!
//! Every route sits behind `auth::require_auth_session`; the owner of new
//! records is always the session principal, never a request field.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::{AppJson, AppPath, AppQuery};
use std::sync::Arc;

use auth::CurrentUser;

use crate::application::{DailyTaskService, GoalService, WeeklyPlanService};
use crate::domain::repository::PlannerStore;
use crate::domain::value_object::{DailyTasksId, GoalId, WeeklyPlanId, progress::parse_leading_int};
use crate::error::{PlannerError, PlannerResult};
use crate::presentation::dto::{
    AddTaskRequest, CreateGoalRequest, CreateWeeklyPlanRequest, DailyTasksQuery,
    DailyTasksResponse, GoalResponse, MessageResponse, ToggleTaskRequest, UpdateGoalRequest,
    UpdateWeeklyPlanRequest, WeeklyPlanResponse,
};

/// Shared state for planner handlers
pub struct PlannerState<R>
where
    R: PlannerStore,
{
    pub repo: Arc<R>,
}

impl<R> Clone for PlannerState<R>
where
    R: PlannerStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> PlannerState<R>
where
    R: PlannerStore,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    fn goals(&self) -> GoalService<R> {
        GoalService::new(self.repo.clone())
    }

    fn plans(&self) -> WeeklyPlanService<R> {
        WeeklyPlanService::new(self.repo.clone())
    }

    fn days(&self) -> DailyTaskService<R> {
        DailyTaskService::new(self.repo.clone())
    }
}

// ============================================================================
// Goals
// ============================================================================

/// GET /goals
pub async fn list_goals<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
) -> PlannerResult<Json<Vec<GoalResponse>>> {
    let goals = state.goals().list(&principal).await?;
    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

/// POST /goals
pub async fn create_goal<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppJson(req): AppJson<CreateGoalRequest>,
) -> PlannerResult<impl IntoResponse> {
    let input = req.into_new_goal()?;
    let goal = state.goals().create(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(GoalResponse::from(goal))))
}

/// GET /goals/{id}
pub async fn get_goal<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath(goal_id): AppPath<GoalId>,
) -> PlannerResult<Json<GoalResponse>> {
    let goal = state.goals().get(&principal, goal_id).await?;
    Ok(Json(goal.into()))
}

/// PUT /goals/{id}
pub async fn update_goal<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath(goal_id): AppPath<GoalId>,
    AppJson(req): AppJson<UpdateGoalRequest>,
) -> PlannerResult<Json<MessageResponse>> {
    let patch = req.into_patch()?;
    state.goals().update(&principal, goal_id, patch).await?;
    Ok(Json(MessageResponse::new("Goal updated successfully")))
}

/// DELETE /goals/{id}
pub async fn delete_goal<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath(goal_id): AppPath<GoalId>,
) -> PlannerResult<Json<MessageResponse>> {
    state.goals().delete(&principal, goal_id).await?;
    Ok(Json(MessageResponse::new("Goal deleted successfully")))
}

// ============================================================================
// Weekly Plans
// ============================================================================

/// GET /weekly
pub async fn list_plans<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
) -> PlannerResult<Json<Vec<WeeklyPlanResponse>>> {
    let plans = state.plans().list(&principal).await?;
    Ok(Json(plans.into_iter().map(WeeklyPlanResponse::from).collect()))
}

/// POST /weekly
pub async fn create_plan<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppJson(req): AppJson<CreateWeeklyPlanRequest>,
) -> PlannerResult<impl IntoResponse> {
    let input = req.into_new_plan()?;
    let plan = state.plans().create(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(WeeklyPlanResponse::from(plan))))
}

/// GET /weekly/{id}
pub async fn get_plan<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath(plan_id): AppPath<WeeklyPlanId>,
) -> PlannerResult<Json<WeeklyPlanResponse>> {
    let plan = state.plans().get(&principal, plan_id).await?;
    Ok(Json(plan.into()))
}

/// PUT /weekly/{id}
pub async fn update_plan<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath(plan_id): AppPath<WeeklyPlanId>,
    AppJson(req): AppJson<UpdateWeeklyPlanRequest>,
) -> PlannerResult<Json<MessageResponse>> {
    let patch = req.into_patch()?;
    state.plans().update(&principal, plan_id, patch).await?;
    Ok(Json(MessageResponse::new("Weekly plan updated successfully")))
}

/// DELETE /weekly/{id}
pub async fn delete_plan<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath(plan_id): AppPath<WeeklyPlanId>,
) -> PlannerResult<Json<MessageResponse>> {
    state.plans().delete(&principal, plan_id).await?;
    Ok(Json(MessageResponse::new("Weekly plan deleted successfully")))
}

// ============================================================================
// Daily Tasks
// ============================================================================

/// GET /daily?weeklyPlanId=
pub async fn list_days<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppQuery(query): AppQuery<DailyTasksQuery>,
) -> PlannerResult<Json<Vec<DailyTasksResponse>>> {
    let plan_id = query.plan_id()?;
    let days = state.days().list(&principal, plan_id).await?;
    Ok(Json(days.into_iter().map(DailyTasksResponse::from).collect()))
}

/// POST /daily/add
pub async fn add_task<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppJson(req): AppJson<AddTaskRequest>,
) -> PlannerResult<Json<Vec<DailyTasksResponse>>> {
    let req = req.validate()?;
    let days = state
        .days()
        .add(&principal, req.plan_id, &req.day_name, req.text)
        .await?;
    Ok(Json(days.into_iter().map(DailyTasksResponse::from).collect()))
}

/// PUT /daily/toggle
pub async fn toggle_task<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppJson(req): AppJson<ToggleTaskRequest>,
) -> PlannerResult<Json<MessageResponse>> {
    let req = req.validate()?;
    // A negative index still goes through the ownership and day lookups
    let index = req.index.unwrap_or(usize::MAX);
    state
        .days()
        .toggle(&principal, req.plan_id, &req.day_name, index)
        .await?;
    Ok(Json(MessageResponse::new("Task toggled successfully")))
}

/// DELETE /daily/{day_id}/task/{task_index}
pub async fn delete_task<R: PlannerStore>(
    State(state): State<PlannerState<R>>,
    CurrentUser(principal): CurrentUser,
    AppPath((day_id, task_index)): AppPath<(DailyTasksId, String)>,
) -> PlannerResult<Json<MessageResponse>> {
    let index = parse_leading_int(&task_index).ok_or(PlannerError::InvalidTaskIndex)?;
    state.days().delete_task(&principal, day_id, index).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
