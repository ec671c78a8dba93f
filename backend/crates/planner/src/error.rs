//! Planner Error Types
//!
//! Route-level failures for goals, weekly plans and daily tasks. Rendered
//! through `kernel::error::AppError` like every other crate's errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type PlannerResult<T> = Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Required body fields absent or empty, in request order
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Week start date is required")]
    WeekStartRequired,

    #[error("Missing weeklyPlanId")]
    MissingWeeklyPlanId,

    #[error("Invalid dayName")]
    InvalidDayName,

    #[error("Invalid task index")]
    InvalidTaskIndex,

    /// Unparseable date string for the named field
    #[error("Invalid date for {0}")]
    InvalidDate(&'static str),

    /// Present but of the wrong shape
    #[error("Invalid {0}")]
    InvalidField(&'static str),

    #[error("Goal not found")]
    GoalNotFound,

    #[error("Forbidden: You don't own this goal")]
    GoalForbidden,

    #[error("Weekly plan not found")]
    PlanNotFound,

    #[error("Forbidden: You don't own this plan")]
    PlanForbidden,

    #[error("Task day not found")]
    DayNotFound,

    #[error("Forbidden: You don't own this task")]
    TaskForbidden,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failure reported by a non-SQL store
    #[error("Planner store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlannerError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::MissingFields(_)
            | PlannerError::WeekStartRequired
            | PlannerError::MissingWeeklyPlanId
            | PlannerError::InvalidDayName
            | PlannerError::InvalidTaskIndex
            | PlannerError::InvalidDate(_)
            | PlannerError::InvalidField(_) => ErrorKind::BadRequest,
            PlannerError::GoalNotFound
            | PlannerError::PlanNotFound
            | PlannerError::DayNotFound
            | PlannerError::TaskNotFound => ErrorKind::NotFound,
            PlannerError::GoalForbidden
            | PlannerError::PlanForbidden
            | PlannerError::TaskForbidden => ErrorKind::Forbidden,
            PlannerError::Database(e) => classify_sqlx(e).0,
            PlannerError::Store(_) | PlannerError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            PlannerError::Database(e) => {
                tracing::error!(error = %e, "Planner database error");
            }
            PlannerError::Store(msg) | PlannerError::Internal(msg) => {
                tracing::error!(message = %msg, "Planner internal error");
            }
            PlannerError::GoalForbidden
            | PlannerError::PlanForbidden
            | PlannerError::TaskForbidden => {
                tracing::warn!(error = %self, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Planner request rejected");
            }
        }
    }
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            PlannerError::MissingFields(vec!["title", "endDate"]).to_string(),
            "Missing required fields: title, endDate"
        );
        assert_eq!(
            PlannerError::GoalForbidden.to_string(),
            "Forbidden: You don't own this goal"
        );
        assert_eq!(PlannerError::InvalidField("taskIndex").to_string(), "Invalid taskIndex");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (PlannerError::MissingFields(vec!["title"]), 400),
            (PlannerError::InvalidDayName, 400),
            (PlannerError::InvalidDate("startDate"), 400),
            (PlannerError::GoalNotFound, 404),
            (PlannerError::TaskNotFound, 404),
            (PlannerError::PlanForbidden, 403),
            (PlannerError::Store("down".into()), 500),
            (PlannerError::Database(sqlx::Error::PoolTimedOut), 503),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{err}");
        }
    }

    #[test]
    fn test_server_errors_are_not_leaked() {
        let app = PlannerError::Store("connection refused on 10.0.0.3".into()).to_app_error();
        assert_eq!(app.public_message(), "Internal server error");
    }
}
