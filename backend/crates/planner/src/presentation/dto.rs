//! API DTOs (Data Transfer Objects)
//!
//! Request bodies keep every field optional so absence is reported with
//! the route's own message instead of a generic body rejection. Responses
//! use the document shape the frontend reads (`_id`, camelCase).

use chrono::{DateTime, Utc};
use kernel::id::Id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entity::{
    daily_tasks::{DailyTasks, TaskItem},
    goal::{Goal, GoalPatch, NewGoal},
    weekly_plan::{NewWeeklyPlan, WeeklyPlan, WeeklyPlanPatch},
};
use crate::domain::value_object::{
    DailyTasksId, GoalId, UserId, WeeklyPlanId, day_name::DayName, plan_date::parse_date,
    progress::Progress,
};
use crate::error::{PlannerError, PlannerResult};

// ============================================================================
// Helpers
// ============================================================================

/// Names of fields that are absent or blank, in the order given.
fn missing(fields: &[(&'static str, Option<&str>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, v)| v.is_none_or(|s| s.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

fn require(fields: &[(&'static str, Option<&str>)]) -> PlannerResult<()> {
    let missing = missing(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PlannerError::MissingFields(missing))
    }
}

/// Parse an id supplied in a body or query string.
pub fn parse_id<T>(raw: &str) -> PlannerResult<Id<T>> {
    raw.trim()
        .parse()
        .map_err(|_| PlannerError::InvalidField("id"))
}

/// Blank date strings are treated as "not supplied".
fn optional_date(
    raw: Option<String>,
    field: &'static str,
) -> PlannerResult<Option<DateTime<Utc>>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| parse_date(&s, field))
        .transpose()
}

fn goal_ids(raw: Vec<String>) -> PlannerResult<Vec<GoalId>> {
    raw.iter()
        .map(|id| id.trim().parse().map_err(|_| PlannerError::InvalidField("goalIds")))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub horizon: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl CreateGoalRequest {
    pub fn into_new_goal(self) -> PlannerResult<NewGoal> {
        require(&[
            ("title", self.title.as_deref()),
            ("description", self.description.as_deref()),
            ("startDate", self.start_date.as_deref()),
            ("endDate", self.end_date.as_deref()),
        ])?;

        let start_date = parse_date(self.start_date.as_deref().unwrap_or_default(), "startDate")?;
        let end_date = parse_date(self.end_date.as_deref().unwrap_or_default(), "endDate")?;

        Ok(NewGoal {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            horizon: self.horizon,
            start_date,
            end_date,
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub horizon: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Number or numeric string; coerced and clamped
    pub progress: Option<Value>,
}

impl UpdateGoalRequest {
    pub fn into_patch(self) -> PlannerResult<GoalPatch> {
        Ok(GoalPatch {
            title: self.title,
            description: self.description,
            horizon: self.horizon,
            status: self.status,
            start_date: optional_date(self.start_date, "startDate")?,
            end_date: optional_date(self.end_date, "endDate")?,
            progress: self.progress.as_ref().map(Progress::coerce),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    #[serde(rename = "_id")]
    pub id: GoalId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub horizon: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub progress: Progress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Goal> for GoalResponse {
    fn from(g: Goal) -> Self {
        Self {
            id: g.goal_id,
            user_id: g.user_id,
            title: g.title,
            description: g.description,
            horizon: g.horizon,
            start_date: g.start_date,
            end_date: g.end_date,
            status: g.status,
            progress: g.progress,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

// ============================================================================
// Weekly Plans
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWeeklyPlanRequest {
    pub week_start_date: Option<String>,
    pub goal_ids: Option<Vec<String>>,
    pub priorities: Option<Vec<String>>,
    pub reflection_notes: Option<String>,
}

impl CreateWeeklyPlanRequest {
    pub fn into_new_plan(self) -> PlannerResult<NewWeeklyPlan> {
        let week_start_date = self
            .week_start_date
            .filter(|s| !s.trim().is_empty())
            .ok_or(PlannerError::WeekStartRequired)?;

        Ok(NewWeeklyPlan {
            week_start_date: parse_date(&week_start_date, "weekStartDate")?,
            goal_ids: goal_ids(self.goal_ids.unwrap_or_default())?,
            priorities: self.priorities.unwrap_or_default(),
            reflection_notes: self.reflection_notes.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWeeklyPlanRequest {
    pub week_start_date: Option<String>,
    pub goal_ids: Option<Vec<String>>,
    pub priorities: Option<Vec<String>>,
    pub reflection_notes: Option<String>,
}

impl UpdateWeeklyPlanRequest {
    pub fn into_patch(self) -> PlannerResult<WeeklyPlanPatch> {
        Ok(WeeklyPlanPatch {
            week_start_date: optional_date(self.week_start_date, "weekStartDate")?,
            goal_ids: self.goal_ids.map(goal_ids).transpose()?,
            priorities: self.priorities,
            reflection_notes: self.reflection_notes,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanResponse {
    #[serde(rename = "_id")]
    pub id: WeeklyPlanId,
    pub user_id: UserId,
    pub week_start_date: DateTime<Utc>,
    pub goal_ids: Vec<GoalId>,
    pub priorities: Vec<String>,
    pub reflection_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeeklyPlan> for WeeklyPlanResponse {
    fn from(p: WeeklyPlan) -> Self {
        Self {
            id: p.plan_id,
            user_id: p.user_id,
            week_start_date: p.week_start_date,
            goal_ids: p.goal_ids,
            priorities: p.priorities,
            reflection_notes: p.reflection_notes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ============================================================================
// Daily Tasks
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTasksQuery {
    pub weekly_plan_id: Option<String>,
}

impl DailyTasksQuery {
    pub fn plan_id(&self) -> PlannerResult<WeeklyPlanId> {
        let raw = self
            .weekly_plan_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(PlannerError::MissingWeeklyPlanId)?;
        parse_id(raw)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub weekly_plan_id: Option<String>,
    pub day_name: Option<String>,
    pub text: Option<String>,
}

/// Validated `POST /daily/add` body
pub struct AddTask {
    pub plan_id: WeeklyPlanId,
    pub day_name: String,
    pub text: String,
}

impl AddTaskRequest {
    pub fn validate(self) -> PlannerResult<AddTask> {
        require(&[
            ("weeklyPlanId", self.weekly_plan_id.as_deref()),
            ("dayName", self.day_name.as_deref()),
            ("text", self.text.as_deref()),
        ])?;

        Ok(AddTask {
            plan_id: parse_id(self.weekly_plan_id.as_deref().unwrap_or_default())?,
            day_name: self.day_name.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTaskRequest {
    pub weekly_plan_id: Option<String>,
    pub day_name: Option<String>,
    pub task_index: Option<Value>,
}

/// Validated `PUT /daily/toggle` body
pub struct ToggleTask {
    pub plan_id: WeeklyPlanId,
    pub day_name: String,
    /// `None` when the index was a negative integer and so addresses no task
    pub index: Option<usize>,
}

impl ToggleTaskRequest {
    pub fn validate(self) -> PlannerResult<ToggleTask> {
        let mut missing = missing(&[
            ("weeklyPlanId", self.weekly_plan_id.as_deref()),
            ("dayName", self.day_name.as_deref()),
        ]);
        if self.task_index.is_none() {
            missing.push("taskIndex");
        }
        if !missing.is_empty() {
            return Err(PlannerError::MissingFields(missing));
        }

        let index = match self.task_index {
            Some(Value::Number(n)) if n.is_u64() => {
                n.as_u64().and_then(|i| usize::try_from(i).ok())
            }
            Some(Value::Number(n)) if n.is_i64() => None,
            _ => return Err(PlannerError::InvalidField("taskIndex")),
        };

        Ok(ToggleTask {
            plan_id: parse_id(self.weekly_plan_id.as_deref().unwrap_or_default())?,
            day_name: self.day_name.unwrap_or_default(),
            index,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTasksResponse {
    #[serde(rename = "_id")]
    pub id: DailyTasksId,
    pub user_id: UserId,
    pub weekly_plan_id: WeeklyPlanId,
    pub day_name: DayName,
    pub task_items: Vec<TaskItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DailyTasks> for DailyTasksResponse {
    fn from(d: DailyTasks) -> Self {
        Self {
            id: d.day_id,
            user_id: d.user_id,
            weekly_plan_id: d.weekly_plan_id,
            day_name: d.day_name,
            task_items: d.task_items,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_goal_lists_missing_fields() {
        let req: CreateGoalRequest =
            serde_json::from_value(json!({"title": "T", "startDate": ""})).unwrap();
        let err = req.into_new_goal().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: description, startDate, endDate"
        );
    }

    #[test]
    fn test_create_goal_rejects_bad_date() {
        let req: CreateGoalRequest = serde_json::from_value(json!({
            "title": "T", "description": "D", "startDate": "soon", "endDate": "2024-03-31"
        }))
        .unwrap();
        assert!(matches!(
            req.into_new_goal(),
            Err(PlannerError::InvalidDate("startDate"))
        ));
    }

    #[test]
    fn test_update_goal_clamps_progress() {
        let req: UpdateGoalRequest = serde_json::from_value(json!({"progress": 150})).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.progress, Some(Progress::clamped(100)));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_weekly_plan_requires_start() {
        let req: CreateWeeklyPlanRequest = serde_json::from_value(json!({})).unwrap();
        let err = req.into_new_plan().unwrap_err();
        assert_eq!(err.to_string(), "Week start date is required");
    }

    #[test]
    fn test_toggle_index_validation() {
        let plan = WeeklyPlanId::new().to_string();

        let ok: ToggleTaskRequest = serde_json::from_value(
            json!({"weeklyPlanId": plan, "dayName": "Monday", "taskIndex": 2}),
        )
        .unwrap();
        assert_eq!(ok.validate().unwrap().index, Some(2));

        let negative: ToggleTaskRequest = serde_json::from_value(
            json!({"weeklyPlanId": plan, "dayName": "Monday", "taskIndex": -1}),
        )
        .unwrap();
        assert_eq!(negative.validate().unwrap().index, None);

        let text: ToggleTaskRequest = serde_json::from_value(
            json!({"weeklyPlanId": plan, "dayName": "Monday", "taskIndex": "2"}),
        )
        .unwrap();
        assert!(matches!(
            text.validate(),
            Err(PlannerError::InvalidField("taskIndex"))
        ));

        let missing: ToggleTaskRequest =
            serde_json::from_value(json!({"dayName": "Monday"})).unwrap();
        assert_eq!(
            missing.validate().err().unwrap().to_string(),
            "Missing required fields: weeklyPlanId, taskIndex"
        );
    }

    #[test]
    fn test_daily_query() {
        let q = DailyTasksQuery::default();
        assert!(matches!(q.plan_id(), Err(PlannerError::MissingWeeklyPlanId)));

        let q = DailyTasksQuery {
            weekly_plan_id: Some("not-a-uuid".into()),
        };
        assert_eq!(q.plan_id().unwrap_err().to_string(), "Invalid id");
    }
}
