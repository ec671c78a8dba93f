//! Planner Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::domain::repository::PlannerStore;
use crate::presentation::handlers::{self, PlannerState};

/// Goal, weekly plan and daily task routes.
///
/// The caller layers `auth::require_auth_session` over the result.
pub fn planner_router<R: PlannerStore>(state: PlannerState<R>) -> Router {
    Router::new()
        .route(
            "/goals",
            get(handlers::list_goals::<R>).post(handlers::create_goal::<R>),
        )
        .route(
            "/goals/{id}",
            get(handlers::get_goal::<R>)
                .put(handlers::update_goal::<R>)
                .delete(handlers::delete_goal::<R>),
        )
        .route(
            "/weekly",
            get(handlers::list_plans::<R>).post(handlers::create_plan::<R>),
        )
        .route(
            "/weekly/{id}",
            get(handlers::get_plan::<R>)
                .put(handlers::update_plan::<R>)
                .delete(handlers::delete_plan::<R>),
        )
        .route("/daily", get(handlers::list_days::<R>))
        .route("/daily/add", post(handlers::add_task::<R>))
        .route("/daily/toggle", put(handlers::toggle_task::<R>))
        .route(
            "/daily/{day_id}/task/{task_index}",
            delete(handlers::delete_task::<R>),
        )
        .with_state(state)
}
