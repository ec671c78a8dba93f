//! Alignify API
//!
//! Assembles the auth and planner routers into the HTTP application. The
//! binary in `main.rs` wires in PostgreSQL; tests wire in the in-memory
//! stores.

pub mod config;

use std::any::Any;

use auth::domain::repository::{AuthSessionRepository, UserRepository};
use auth::{AuthAppState, auth_router, require_auth_session};
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use planner::{PlannerState, PlannerStore, planner_router};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Build the full application router.
///
/// Planner routes sit behind `require_auth_session`; `/` and `/auth/*` do not.
pub fn build_app<R, P>(
    auth_state: AuthAppState<R>,
    planner_state: PlannerState<P>,
    frontend_origins: &[String],
) -> Router
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
    P: PlannerStore,
{
    let protected = planner_router(planner_state).route_layer(middleware::from_fn_with_state(
        auth_state.clone(),
        require_auth_session::<R>,
    ));

    Router::new()
        .route("/", get(banner))
        .nest("/auth", auth_router(auth_state))
        .merge(protected)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origins))
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// GET /
async fn banner() -> Json<Value> {
    Json(json!({
        "message": "Alignify API Server",
        "status": "running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::internal("Handler panicked").into_response()
}
