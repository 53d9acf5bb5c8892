//! Integration tests for the undo/redo replay path.
//!
//! Run with `cargo test -- --ignored` against a PostgreSQL test database.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn record_status_change(
    app: &helpers::TestApp,
    token: &str,
    task: Uuid,
    before: &str,
    after: &str,
) -> String {
    let response = app
        .request(
            "POST",
            "/api/action-history",
            Some(json!({
                "action_type": "update",
                "action_description": "changed task status",
                "item_type": "task",
                "item_id": task,
                "before_data": {"status": before},
                "after_data": {"status": after},
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_undo_redo_round_trip() {
    let app = helpers::TestApp::new().await;
    let token = app.mint_token(Uuid::new_v4(), "alice");

    // The caller performs the mutation first, then records it.
    let task = app.seed_task("write report", "in_progress").await;
    let id = record_status_change(&app, &token, task, "todo", "in_progress").await;

    let response = app
        .request(
            "POST",
            &format!("/api/action-history/{id}/undo"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], json!("Action undone"));
    assert_eq!(app.task_status(task).await.as_deref(), Some("todo"));

    let response = app
        .request(
            "POST",
            &format!("/api/action-history/{id}/redo"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.task_status(task).await.as_deref(), Some("in_progress"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_sparse_patch_leaves_other_fields_untouched() {
    let app = helpers::TestApp::new().await;
    let token = app.mint_token(Uuid::new_v4(), "alice");

    let task = app.seed_task("original title", "in_progress").await;
    let id = record_status_change(&app, &token, task, "todo", "in_progress").await;

    app.request(
        "POST",
        &format!("/api/action-history/{id}/undo"),
        None,
        Some(&token),
    )
    .await;

    let title = sqlx::query_scalar::<_, String>("SELECT title FROM tasks WHERE id = $1")
        .bind(task)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(title, "original title");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_missing_before_snapshot_disables_undo_only() {
    let app = helpers::TestApp::new().await;
    let token = app.mint_token(Uuid::new_v4(), "alice");
    let task = app.seed_task("created task", "todo").await;

    // A create action has no before state.
    let response = app
        .request(
            "POST",
            "/api/action-history",
            Some(json!({
                "action_type": "create",
                "action_description": "created task",
                "item_type": "task",
                "item_id": task,
                "after_data": {"status": "todo"},
            })),
            Some(&token),
        )
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(response.body["data"]["can_undo"], json!(false));
    assert_eq!(response.body["data"]["can_redo"], json!(true));

    let response = app
        .request(
            "POST",
            &format!("/api/action-history/{id}/undo"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("SNAPSHOT_UNAVAILABLE"));

    let response = app
        .request(
            "POST",
            &format!("/api/action-history/{id}/redo"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_undo_on_deleted_target_fails_and_keeps_the_log() {
    let app = helpers::TestApp::new().await;
    let token = app.mint_token(Uuid::new_v4(), "alice");

    let task = app.seed_task("doomed task", "in_progress").await;
    let id = record_status_change(&app, &token, task, "todo", "in_progress").await;

    app.delete_task(task).await;

    let response = app
        .request(
            "POST",
            &format!("/api/action-history/{id}/undo"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("REPLAY_FAILED"));

    // The action log itself is unchanged and available for retry.
    let response = app
        .request("GET", &format!("/api/action-history/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["can_undo"], json!(true));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_unknown_action_id_is_not_found() {
    let app = helpers::TestApp::new().await;
    let token = app.mint_token(Uuid::new_v4(), "alice");

    let response = app
        .request(
            "POST",
            &format!("/api/action-history/{}/undo", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
