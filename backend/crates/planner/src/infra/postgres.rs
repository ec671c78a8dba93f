//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{
    daily_tasks::{DailyTasks, TaskItem},
    goal::Goal,
    weekly_plan::WeeklyPlan,
};
use crate::domain::repository::{DailyTasksRepository, GoalRepository, WeeklyPlanRepository};
use crate::domain::value_object::{
    DailyTasksId, GoalId, UserId, WeeklyPlanId, day_name::DayName, progress::Progress,
};
use crate::error::{PlannerError, PlannerResult};

/// PostgreSQL-backed planner repository
#[derive(Clone)]
pub struct PgPlannerRepository {
    pool: PgPool,
}

impl PgPlannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Goal Repository Implementation
// ============================================================================

const GOAL_COLUMNS: &str = r#"
    goal_id,
    user_id,
    title,
    description,
    horizon,
    start_date,
    end_date,
    status,
    progress,
    created_at,
    updated_at
"#;

impl GoalRepository for PgPlannerRepository {
    async fn list_goals(&self, user_id: &UserId) -> PlannerResult<Vec<Goal>> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {GOAL_COLUMNS} FROM quarterly_goals WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GoalRow::into_goal).collect())
    }

    async fn find_goal(&self, goal_id: &GoalId) -> PlannerResult<Option<Goal>> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {GOAL_COLUMNS} FROM quarterly_goals WHERE goal_id = $1"
        ))
        .bind(goal_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GoalRow::into_goal))
    }

    async fn create_goal(&self, goal: &Goal) -> PlannerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO quarterly_goals (
                goal_id,
                user_id,
                title,
                description,
                horizon,
                start_date,
                end_date,
                status,
                progress,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(goal.goal_id.as_uuid())
        .bind(goal.user_id.as_uuid())
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(&goal.horizon)
        .bind(goal.start_date)
        .bind(goal.end_date)
        .bind(&goal.status)
        .bind(i16::from(goal.progress.value()))
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_goal(&self, goal: &Goal) -> PlannerResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE quarterly_goals SET
                title = $2,
                description = $3,
                horizon = $4,
                start_date = $5,
                end_date = $6,
                status = $7,
                progress = $8,
                updated_at = $9
            WHERE goal_id = $1
            "#,
        )
        .bind(goal.goal_id.as_uuid())
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(&goal.horizon)
        .bind(goal.start_date)
        .bind(goal.end_date)
        .bind(&goal.status)
        .bind(i16::from(goal.progress.value()))
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_goal(&self, goal_id: &GoalId) -> PlannerResult<bool> {
        let deleted = sqlx::query("DELETE FROM quarterly_goals WHERE goal_id = $1")
            .bind(goal_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Weekly Plan Repository Implementation
// ============================================================================

const PLAN_COLUMNS: &str = r#"
    plan_id,
    user_id,
    week_start_date,
    goal_ids,
    priorities,
    reflection_notes,
    created_at,
    updated_at
"#;

impl WeeklyPlanRepository for PgPlannerRepository {
    async fn list_plans(&self, user_id: &UserId) -> PlannerResult<Vec<WeeklyPlan>> {
        let rows = sqlx::query_as::<_, WeeklyPlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM weekly_plans WHERE user_id = $1 ORDER BY week_start_date DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WeeklyPlanRow::into_plan).collect())
    }

    async fn find_plan(&self, plan_id: &WeeklyPlanId) -> PlannerResult<Option<WeeklyPlan>> {
        let row = sqlx::query_as::<_, WeeklyPlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM weekly_plans WHERE plan_id = $1"
        ))
        .bind(plan_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WeeklyPlanRow::into_plan))
    }

    async fn create_plan(&self, plan: &WeeklyPlan) -> PlannerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO weekly_plans (
                plan_id,
                user_id,
                week_start_date,
                goal_ids,
                priorities,
                reflection_notes,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(plan.plan_id.as_uuid())
        .bind(plan.user_id.as_uuid())
        .bind(plan.week_start_date)
        .bind(goal_uuids(&plan.goal_ids))
        .bind(&plan.priorities)
        .bind(&plan.reflection_notes)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_plan(&self, plan: &WeeklyPlan) -> PlannerResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE weekly_plans SET
                week_start_date = $2,
                goal_ids = $3,
                priorities = $4,
                reflection_notes = $5,
                updated_at = $6
            WHERE plan_id = $1
            "#,
        )
        .bind(plan.plan_id.as_uuid())
        .bind(plan.week_start_date)
        .bind(goal_uuids(&plan.goal_ids))
        .bind(&plan.priorities)
        .bind(&plan.reflection_notes)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_plan(&self, plan_id: &WeeklyPlanId) -> PlannerResult<bool> {
        // daily_tasks rows go with it (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM weekly_plans WHERE plan_id = $1")
            .bind(plan_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

fn goal_uuids(ids: &[GoalId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

// ============================================================================
// Daily Tasks Repository Implementation
// ============================================================================

const DAY_COLUMNS: &str = r#"
    day_id,
    user_id,
    weekly_plan_id,
    day_name,
    task_items,
    created_at,
    updated_at
"#;

impl DailyTasksRepository for PgPlannerRepository {
    async fn list_days(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
    ) -> PlannerResult<Vec<DailyTasks>> {
        let rows = sqlx::query_as::<_, DailyTasksRow>(&format!(
            r#"
            SELECT {DAY_COLUMNS} FROM daily_tasks
            WHERE user_id = $1 AND weekly_plan_id = $2
            ORDER BY array_position(
                ARRAY['Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday'],
                day_name
            )
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(plan_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DailyTasksRow::into_day).collect()
    }

    async fn find_day(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
        day_name: DayName,
    ) -> PlannerResult<Option<DailyTasks>> {
        let row = sqlx::query_as::<_, DailyTasksRow>(&format!(
            r#"
            SELECT {DAY_COLUMNS} FROM daily_tasks
            WHERE user_id = $1 AND weekly_plan_id = $2 AND day_name = $3
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(plan_id.as_uuid())
        .bind(day_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(DailyTasksRow::into_day).transpose()
    }

    async fn find_day_by_id(&self, day_id: &DailyTasksId) -> PlannerResult<Option<DailyTasks>> {
        let row = sqlx::query_as::<_, DailyTasksRow>(&format!(
            "SELECT {DAY_COLUMNS} FROM daily_tasks WHERE day_id = $1"
        ))
        .bind(day_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(DailyTasksRow::into_day).transpose()
    }

    async fn append_task(
        &self,
        user_id: &UserId,
        plan_id: &WeeklyPlanId,
        day_name: DayName,
        item: &TaskItem,
    ) -> PlannerResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO daily_tasks (
                day_id,
                user_id,
                weekly_plan_id,
                day_name,
                task_items,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (user_id, weekly_plan_id, day_name) DO UPDATE SET
                task_items = daily_tasks.task_items || EXCLUDED.task_items,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(DailyTasksId::new().as_uuid())
        .bind(user_id.as_uuid())
        .bind(plan_id.as_uuid())
        .bind(day_name.as_str())
        .bind(Json(vec![item]))
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_task_items(&self, day: &DailyTasks) -> PlannerResult<bool> {
        let updated = sqlx::query(
            "UPDATE daily_tasks SET task_items = $2, updated_at = $3 WHERE day_id = $1",
        )
        .bind(day.day_id.as_uuid())
        .bind(Json(&day.task_items))
        .bind(day.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct GoalRow {
    goal_id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    horizon: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    progress: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GoalRow {
    fn into_goal(self) -> Goal {
        Goal {
            goal_id: GoalId::from_uuid(self.goal_id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            description: self.description,
            horizon: self.horizon,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            progress: Progress::clamped(i64::from(self.progress)),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WeeklyPlanRow {
    plan_id: Uuid,
    user_id: Uuid,
    week_start_date: DateTime<Utc>,
    goal_ids: Vec<Uuid>,
    priorities: Vec<String>,
    reflection_notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WeeklyPlanRow {
    fn into_plan(self) -> WeeklyPlan {
        WeeklyPlan {
            plan_id: WeeklyPlanId::from_uuid(self.plan_id),
            user_id: UserId::from_uuid(self.user_id),
            week_start_date: self.week_start_date,
            goal_ids: self.goal_ids.into_iter().map(GoalId::from_uuid).collect(),
            priorities: self.priorities,
            reflection_notes: self.reflection_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DailyTasksRow {
    day_id: Uuid,
    user_id: Uuid,
    weekly_plan_id: Uuid,
    day_name: String,
    task_items: Json<Vec<TaskItem>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DailyTasksRow {
    fn into_day(self) -> PlannerResult<DailyTasks> {
        let day_name = self
            .day_name
            .parse::<DayName>()
            .map_err(|_| PlannerError::Internal(format!("Unknown day_name: {}", self.day_name)))?;

        Ok(DailyTasks {
            day_id: DailyTasksId::from_uuid(self.day_id),
            user_id: UserId::from_uuid(self.user_id),
            weekly_plan_id: WeeklyPlanId::from_uuid(self.weekly_plan_id),
            day_name,
            task_items: self.task_items.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
