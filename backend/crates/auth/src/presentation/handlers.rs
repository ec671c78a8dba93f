//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::AppJson;
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    SessionManager, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, MessageResponse, RegisterRequest, SessionStatusResponse, UserResponse,
};

/// Shared state for auth handlers and the session middleware
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    pub fn sessions(&self) -> SessionManager<R, R> {
        SessionManager::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }

    /// Session cookie value presented by the client, if any.
    pub fn session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }
}

/// Both fields present and non-blank, or the shared 400.
fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> AuthResult<(String, String)> {
    match (email, password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => Ok((e, p)),
        _ => Err(AuthError::MissingFields(vec!["Email", "password"])),
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let (email, password) = require_credentials(req.email, req.password)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.sessions());
    let output = use_case
        .execute(SignUpInput {
            email,
            password,
            name: req.name,
        })
        .await?;

    let cookie = set_cookie_header(&state.config.cookie_config(), output.session_token.as_str());

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.principal)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let (email, password) = require_credentials(req.email, req.password)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.sessions());
    let output = use_case.execute(SignInInput { email, password }).await?;

    let cookie = set_cookie_header(&state.config.cookie_config(), output.session_token.as_str());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.principal)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
///
/// Always answers with a clearing cookie, session or not.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = state.session_cookie(&headers);

    SignOutUseCase::new(state.sessions())
        .execute(token.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            delete_cookie_header(&state.config.cookie_config()),
        )],
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let principal = match state.session_cookie(&headers) {
        Some(token) => state.sessions().resolve(&token).await?,
        None => None,
    };

    Ok(Json(SessionStatusResponse {
        authenticated: principal.is_some(),
        user: principal.as_ref().map(UserResponse::from),
    }))
}
