//! End-to-end tests for the task HTTP surface over the in-memory adapter.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use serde_json::{Value, json};
use std::sync::Arc;
use taskboard::rest::build_router;
use taskboard::task::adapters::memory::InMemoryTaskRepository;
use taskboard::task::services::TaskCollectionService;
use tower::ServiceExt;

fn app() -> Router {
    let service = TaskCollectionService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );
    build_router(Arc::new(service))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("valid request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be json")
    };
    (status, value)
}

fn task_example() -> Value {
    json!({
        "title": "Test1",
        "description": "testing",
        "status": "pending",
        "priority": "medium",
        "assigned_to": "omar"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_returns_201_with_defaults() {
    let app = app();
    let (status, body) = send(&app, "POST", "/tasks/", Some(json!({ "title": "Test1" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Test1");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["priority"], "medium");
    assert!(body["updated_at"].is_null());
    assert!(body["created_at"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_rejects_whitespace_title_with_field_detail() {
    let app = app();
    let (status, body) = send(&app, "POST", "/tasks/", Some(json!({ "title": "   " }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "title");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_all_tasks_returns_a_list() {
    let app = app();
    send(&app, "POST", "/tasks/", Some(task_example())).await;

    let (status, body) = send(&app, "GET", "/tasks/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_task_by_id_round_trips() {
    let app = app();
    let (_, created) = send(&app, "POST", "/tasks/", Some(task_example())).await;
    let id = created["id"].as_i64().expect("created id");

    let (status, body) = send(&app, "GET", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["title"], created["title"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_returns_404() {
    let app = app();
    let (status, body) = send(&app, "GET", "/tasks/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Task not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_then_delete_scenario() {
    let app = app();
    let (_, created) = send(
        &app,
        "POST",
        "/tasks/",
        Some(json!({ "title": "Test1", "assigned_to": "omar" })),
    )
    .await;
    let id = created["id"].as_i64().expect("created id");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/tasks/{id}"),
        Some(json!({ "title": "Updated Task" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Updated Task");
    assert_eq!(updated["assigned_to"], "omar");
    assert!(updated["updated_at"].is_string());

    let (status, deleted) = send(&app, "DELETE", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["detail"], "Task deleted");

    let (status, _) = send(&app, "GET", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_clears_nullable_field_on_explicit_null() {
    let app = app();
    let (_, created) = send(&app, "POST", "/tasks/", Some(task_example())).await;
    let id = created["id"].as_i64().expect("created id");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/tasks/{id}"),
        Some(json!({ "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["description"].is_null());
    assert_eq!(updated["title"], "Test1");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_honors_filters_sorting_and_pagination() {
    let app = app();
    for index in 1..=3 {
        send(
            &app,
            "POST",
            "/tasks/",
            Some(json!({ "title": format!("Task {index}") })),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/tasks/?sort_by=id&sort_order=asc&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .expect("list body")
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Task 1", "Task 2"]);

    let (status, body) = send(&app, "GET", "/tasks/?search=task%202", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_invalid_enum_filter() {
    let app = app();
    let (status, body) = send(&app, "GET", "/tasks/?status_filter=archived", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "status_filter");
}

#[tokio::test(flavor = "multi_thread")]
async fn filter_by_status_path_accepts_valid_and_rejects_invalid() {
    let app = app();
    send(&app, "POST", "/tasks/", Some(task_example())).await;

    let (status, body) = send(&app, "GET", "/tasks/status/pending", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, "GET", "/tasks/status/archived", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn filter_by_priority_returns_matching_list() {
    let app = app();
    send(&app, "POST", "/tasks/", Some(task_example())).await;

    let (status, body) = send(&app, "GET", "/tasks/priority/medium", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());

    let (status, _) = send(&app, "GET", "/tasks/priority/critical", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_reports_count_and_ignores_unmatched_ids() {
    let app = app();
    let (_, first) = send(&app, "POST", "/tasks/", Some(task_example())).await;
    let (_, second) = send(&app, "POST", "/tasks/", Some(task_example())).await;

    let ids = json!([first["id"], second["id"], 404]);
    let (status, body) = send(&app, "DELETE", "/tasks/bulk", Some(ids)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "Deleted 2 tasks");
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_of_unmatched_ids_returns_404() {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/tasks/bulk", Some(json!([404, 405]))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No matching tasks found");
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_patches_every_matched_task() {
    let app = app();
    let (_, first) = send(&app, "POST", "/tasks/", Some(task_example())).await;
    let (_, second) = send(&app, "POST", "/tasks/", Some(task_example())).await;

    let payload = json!({
        "task_ids": [first["id"], second["id"]],
        "update": { "status": "completed" }
    });
    let (status, body) = send(&app, "PUT", "/tasks/bulk", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<&str> = body
        .as_array()
        .expect("list body")
        .iter()
        .filter_map(|task| task["status"].as_str())
        .collect();
    assert_eq!(statuses, vec!["completed", "completed"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_of_unmatched_ids_returns_404() {
    let app = app();
    let payload = json!({ "task_ids": [404], "update": { "status": "completed" } });
    let (status, body) = send(&app, "PUT", "/tasks/bulk", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No matching tasks found");
}

#[tokio::test(flavor = "multi_thread")]
async fn info_lists_the_available_endpoints() {
    let app = app();
    let (status, body) = send(&app, "GET", "/tasks/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Task Management API");
    assert!(
        body["endpoints"]
            .as_array()
            .is_some_and(|endpoints| endpoints.len() == 11)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_success() {
    let app = app();
    let (status, body) = send(&app, "GET", "/tasks/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Success");
}
