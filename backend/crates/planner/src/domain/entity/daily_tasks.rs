//! Daily Tasks Entity
//!
//! One record per (user, weekly plan, weekday) holding that day's ordered
//! task list. Tasks are addressed by position.

use auth::Owned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{DailyTasksId, UserId, WeeklyPlanId, day_name::DayName};
use crate::error::{PlannerError, PlannerResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub text: String,
    pub done: bool,
}

impl TaskItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyTasks {
    pub day_id: DailyTasksId,
    pub user_id: UserId,
    pub weekly_plan_id: WeeklyPlanId,
    pub day_name: DayName,
    pub task_items: Vec<TaskItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyTasks {
    pub fn new(
        user_id: UserId,
        weekly_plan_id: WeeklyPlanId,
        day_name: DayName,
        first: TaskItem,
    ) -> Self {
        let now = Utc::now();

        Self {
            day_id: DailyTasksId::new(),
            user_id,
            weekly_plan_id,
            day_name,
            task_items: vec![first],
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip `done` on the task at `index`.
    pub fn toggle(&mut self, index: usize) -> PlannerResult<()> {
        let item = self
            .task_items
            .get_mut(index)
            .ok_or(PlannerError::TaskNotFound)?;
        item.done = !item.done;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove the task at `index`; later tasks shift down.
    pub fn remove(&mut self, index: usize) -> PlannerResult<TaskItem> {
        if index >= self.task_items.len() {
            return Err(PlannerError::TaskNotFound);
        }
        self.updated_at = Utc::now();
        Ok(self.task_items.remove(index))
    }
}

impl Owned for DailyTasks {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DailyTasks {
        let mut day = DailyTasks::new(
            UserId::new(),
            WeeklyPlanId::new(),
            DayName::Monday,
            TaskItem::new("a"),
        );
        day.task_items.push(TaskItem::new("b"));
        day
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut day = day();
        day.toggle(1).unwrap();
        assert!(day.task_items[1].done);
        day.toggle(1).unwrap();
        assert!(!day.task_items[1].done);
        assert!(matches!(day.toggle(2), Err(PlannerError::TaskNotFound)));
    }

    #[test]
    fn test_remove_shifts() {
        let mut day = day();
        assert_eq!(day.remove(0).unwrap().text, "a");
        assert_eq!(day.task_items, vec![TaskItem::new("b")]);
        assert!(matches!(day.remove(1), Err(PlannerError::TaskNotFound)));
    }
}
