#![allow(dead_code)]

use alignify_api::build_app;
use auth::{AuthAppState, AuthConfig, InMemoryAuthRepository};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use planner::{InMemoryPlannerRepository, PlannerState};
use platform::password::{HashParams, PasswordHasher};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub auth_repo: InMemoryAuthRepository,
    pub planner_repo: InMemoryPlannerRepository,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` part of the Set-Cookie header
    pub fn cookie(&self) -> String {
        let raw = self.set_cookie.as_deref().expect("response set no cookie");
        raw.split(';').next().unwrap_or_default().to_string()
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        password_hasher: PasswordHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
        ..AuthConfig::development()
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: AuthConfig) -> TestApp {
    let auth_repo = InMemoryAuthRepository::new();
    let planner_repo = InMemoryPlannerRepository::new();
    let router = build_app(
        AuthAppState::new(auth_repo.clone(), config),
        PlannerState::new(planner_repo.clone()),
        &["http://localhost:5173".to_string()],
    );
    TestApp {
        router,
        auth_repo,
        planner_repo,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let res = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = res.status();
        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, cookie, None).await
    }

    /// Register a user and return the session cookie pair
    pub async fn register(&self, email: &str) -> String {
        let res = self
            .post(
                "/auth/register",
                None,
                serde_json::json!({ "email": email, "password": "secret123", "name": "Test" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.cookie()
    }

    pub async fn create_goal(&self, cookie: &str, title: &str) -> Value {
        let res = self
            .post(
                "/goals",
                Some(cookie),
                serde_json::json!({
                    "title": title,
                    "description": "D",
                    "startDate": "2025-01-01",
                    "endDate": "2025-03-31",
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body
    }

    pub async fn create_plan(&self, cookie: &str) -> String {
        let res = self
            .post(
                "/weekly",
                Some(cookie),
                serde_json::json!({ "weekStartDate": "2025-01-06" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["_id"].as_str().unwrap().to_string()
    }
}
