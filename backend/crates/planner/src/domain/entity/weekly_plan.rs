//! Weekly Plan Entity

use auth::Owned;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{GoalId, UserId, WeeklyPlanId};

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPlan {
    pub plan_id: WeeklyPlanId,
    pub user_id: UserId,
    pub week_start_date: DateTime<Utc>,
    pub goal_ids: Vec<GoalId>,
    pub priorities: Vec<String>,
    pub reflection_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewWeeklyPlan {
    pub week_start_date: DateTime<Utc>,
    pub goal_ids: Vec<GoalId>,
    pub priorities: Vec<String>,
    pub reflection_notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct WeeklyPlanPatch {
    pub week_start_date: Option<DateTime<Utc>>,
    pub goal_ids: Option<Vec<GoalId>>,
    pub priorities: Option<Vec<String>>,
    pub reflection_notes: Option<String>,
}

impl WeeklyPlan {
    pub fn new(user_id: UserId, input: NewWeeklyPlan) -> Self {
        let now = Utc::now();

        Self {
            plan_id: WeeklyPlanId::new(),
            user_id,
            week_start_date: input.week_start_date,
            goal_ids: input.goal_ids,
            priorities: input.priorities,
            reflection_notes: input.reflection_notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: WeeklyPlanPatch) {
        if let Some(week_start_date) = patch.week_start_date {
            self.week_start_date = week_start_date;
        }
        if let Some(goal_ids) = patch.goal_ids {
            self.goal_ids = goal_ids;
        }
        if let Some(priorities) = patch.priorities {
            self.priorities = priorities;
        }
        if let Some(reflection_notes) = patch.reflection_notes {
            self.reflection_notes = reflection_notes;
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for WeeklyPlan {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
