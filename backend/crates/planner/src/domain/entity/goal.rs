//! Quarterly Goal Entity

use auth::Owned;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{GoalId, UserId, progress::Progress};

pub const DEFAULT_HORIZON: &str = "quarter";
pub const DEFAULT_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub goal_id: GoalId,
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

/// Fields supplied when creating a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub horizon: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: Option<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub horizon: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub progress: Option<Progress>,
}

impl Goal {
    /// New goals always start at zero progress.
    pub fn new(user_id: UserId, input: NewGoal) -> Self {
        let now = Utc::now();

        Self {
            goal_id: GoalId::new(),
            user_id,
            title: input.title,
            description: input.description,
            horizon: non_empty_or(input.horizon, DEFAULT_HORIZON),
            start_date: input.start_date,
            end_date: input.end_date,
            status: non_empty_or(input.status, DEFAULT_STATUS),
            progress: Progress::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(horizon) = patch.horizon {
            self.horizon = horizon;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Goal {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
