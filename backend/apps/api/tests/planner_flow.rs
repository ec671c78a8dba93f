mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::build_test_app;

#[tokio::test]
async fn test_goal_lifecycle() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;

    let goal = app.create_goal(&cookie, "Ship v1").await;
    assert_eq!(goal["progress"], 0);
    assert_eq!(goal["status"], "active");
    assert_eq!(goal["horizon"], "quarter");
    let uri = format!("/goals/{}", goal["_id"].as_str().unwrap());

    let res = app.put(&uri, Some(&cookie), json!({ "progress": 150 })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Goal updated successfully");

    let res = app.get(&uri, Some(&cookie)).await;
    assert_eq!(res.body["progress"], 100);
    assert_eq!(res.body["title"], "Ship v1");

    let res = app.put(&uri, Some(&cookie), json!({ "progress": "-5" })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&cookie)).await.body["progress"], 0);

    let res = app.delete(&uri, Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get(&uri, Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Goal not found");
}

#[tokio::test]
async fn test_goal_owner_isolation() {
    let app = build_test_app();
    let alice = app.register("alice@x.com").await;
    let bob = app.register("bob@x.com").await;

    let goal = app.create_goal(&alice, "Private").await;
    let uri = format!("/goals/{}", goal["_id"].as_str().unwrap());

    let res = app.get(&uri, Some(&bob)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Forbidden: You don't own this goal");

    let res = app.put(&uri, Some(&bob), json!({ "title": "Mine" })).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.delete(&uri, Some(&bob)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.get(&uri, Some(&alice)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "Private");

    assert_eq!(app.get("/goals", Some(&bob)).await.body, json!([]));
}

#[tokio::test]
async fn test_owner_comes_from_session_not_body() {
    let app = build_test_app();
    let alice = app.register("alice@x.com").await;
    let alice_id = app.get("/auth/status", Some(&alice)).await.body["user"]["id"].clone();

    let res = app
        .post(
            "/goals",
            Some(&alice),
            json!({
                "title": "T",
                "description": "D",
                "startDate": "2025-01-01",
                "endDate": "2025-02-01",
                "userId": "00000000-0000-0000-0000-000000000000",
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["userId"], alice_id);
}

#[tokio::test]
async fn test_goal_validation() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;

    let res = app.post("/goals", Some(&cookie), json!({ "title": "T" })).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["error"],
        "Missing required fields: description, startDate, endDate"
    );

    let res = app.get("/goals/not-a-uuid", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid id");
}

#[tokio::test]
async fn test_weekly_plan_crud() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;
    let goal = app.create_goal(&cookie, "G").await;

    let res = app.post("/weekly", Some(&cookie), json!({})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Week start date is required");

    let plan_id = app.create_plan(&cookie).await;
    let uri = format!("/weekly/{plan_id}");

    let res = app
        .put(
            &uri,
            Some(&cookie),
            json!({ "goalIds": [goal["_id"]], "priorities": ["focus"] }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get(&uri, Some(&cookie)).await;
    assert_eq!(res.body["goalIds"], json!([goal["_id"]]));
    assert_eq!(res.body["priorities"], json!(["focus"]));

    let res = app.get("/weekly", Some(&cookie)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);

    let bob = app.register("bob@x.com").await;
    assert_eq!(app.get(&uri, Some(&bob)).await.status, StatusCode::FORBIDDEN);

    assert_eq!(app.delete(&uri, Some(&cookie)).await.status, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&cookie)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_daily_tasks_flow() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;
    let plan_id = app.create_plan(&cookie).await;

    let res = app
        .post(
            "/daily/add",
            Some(&cookie),
            json!({ "weeklyPlanId": plan_id, "dayName": "Wednesday", "text": "later" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post(
            "/daily/add",
            Some(&cookie),
            json!({ "weeklyPlanId": plan_id, "dayName": "Monday", "text": "first" }),
        )
        .await;
    let days = res.body.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["dayName"], "Monday");
    assert_eq!(days[1]["dayName"], "Wednesday");

    let toggle = json!({ "weeklyPlanId": plan_id, "dayName": "Monday", "taskIndex": 0 });
    let res = app.put("/daily/toggle", Some(&cookie), toggle.clone()).await;
    assert_eq!(res.status, StatusCode::OK);

    let list_uri = format!("/daily?weeklyPlanId={plan_id}");
    let res = app.get(&list_uri, Some(&cookie)).await;
    assert_eq!(res.body[0]["taskItems"][0]["done"], true);

    app.put("/daily/toggle", Some(&cookie), toggle).await;
    let res = app.get(&list_uri, Some(&cookie)).await;
    assert_eq!(res.body[0]["taskItems"][0]["done"], false);

    let day_id = res.body[0]["_id"].as_str().unwrap().to_string();
    let res = app
        .delete(&format!("/daily/{day_id}/task/0"), Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Task deleted successfully");

    let res = app.get(&list_uri, Some(&cookie)).await;
    assert_eq!(res.body[0]["taskItems"], json!([]));
}

#[tokio::test]
async fn test_daily_task_errors() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;
    let plan_id = app.create_plan(&cookie).await;

    let res = app.get("/daily", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Missing weeklyPlanId");

    let res = app
        .post(
            "/daily/add",
            Some(&cookie),
            json!({ "weeklyPlanId": plan_id, "dayName": "Sunday", "text": "x" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid dayName");

    let res = app
        .put(
            "/daily/toggle",
            Some(&cookie),
            json!({ "weeklyPlanId": plan_id, "dayName": "Friday", "taskIndex": 0 }),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Task day not found");

    app.post(
        "/daily/add",
        Some(&cookie),
        json!({ "weeklyPlanId": plan_id, "dayName": "Friday", "text": "x" }),
    )
    .await;
    let res = app
        .put(
            "/daily/toggle",
            Some(&cookie),
            json!({ "weeklyPlanId": plan_id, "dayName": "Friday", "taskIndex": -1 }),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Task not found");

    let day_id = app.get(&format!("/daily?weeklyPlanId={plan_id}"), Some(&cookie)).await.body[0]
        ["_id"]
        .as_str()
        .unwrap()
        .to_string();
    let res = app
        .delete(&format!("/daily/{day_id}/task/abc"), Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid task index");

    let bob = app.register("bob@x.com").await;
    let res = app
        .delete(&format!("/daily/{day_id}/task/0"), Some(&bob))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Forbidden: You don't own this task");
}

#[tokio::test]
async fn test_deleting_plan_removes_its_days() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;
    let plan_id = app.create_plan(&cookie).await;

    let res = app
        .post(
            "/daily/add",
            Some(&cookie),
            json!({ "weeklyPlanId": plan_id, "dayName": "Monday", "text": "x" }),
        )
        .await;
    let day_id = res.body[0]["_id"].as_str().unwrap().to_string();

    app.delete(&format!("/weekly/{plan_id}"), Some(&cookie)).await;

    let res = app
        .delete(&format!("/daily/{day_id}/task/0"), Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_planner_store_failure_is_server_error() {
    let app = build_test_app();
    let cookie = app.register("a@x.com").await;

    app.planner_repo.set_unavailable(true);

    let res = app.get("/goals", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Internal server error");
}
