/// Integration tests for the Userboard API
///
/// These tests verify the full system end-to-end against a running MySQL
/// server configured through the DB_* environment variables. They are ignored
/// by default.
/// Run with: cargo test -p userboard-api --test integration_test -- --ignored

mod common;

use axum::http::StatusCode;
use common::{body_json, body_string, form_encode, TestContext};
use serde_json::json;
use userboard_shared::db::provision::{acquire_connection, release};
use userboard_shared::models::user::User;
use uuid::Uuid;

fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4().simple())
}

async fn user_count(ctx: &TestContext) -> i64 {
    let mut conn = acquire_connection(&ctx.config.database, &ctx.config.retry)
        .await
        .unwrap();
    let count = User::count(&mut conn).await.unwrap();
    release(conn).await;
    count
}

#[tokio::test]
#[ignore] // Requires running MySQL instance
async fn test_health_reports_connected() {
    let ctx = TestContext::live().await.unwrap();

    let response = ctx.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "healthy", "database": "connected" })
    );
}

#[tokio::test]
#[ignore] // Requires running MySQL instance
async fn test_homepage_loads() {
    let ctx = TestContext::live().await.unwrap();

    let response = ctx.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<form"));
}

#[tokio::test]
#[ignore] // Requires running MySQL instance
async fn test_added_user_appears_on_homepage() {
    let ctx = TestContext::live().await.unwrap();
    let email = unique_email();

    let response = ctx
        .post_form(
            "/add_user",
            &format!("name=Alice&email={}", form_encode(&email)),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "User added successfully" })
    );

    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&format!("<td>Alice</td><td>{}</td>", email)));
}

#[tokio::test]
#[ignore] // Requires running MySQL instance
async fn test_rejected_user_is_not_persisted() {
    let ctx = TestContext::live().await.unwrap();
    let marker = format!("Nobody {}", Uuid::new_v4().simple());

    let response = ctx
        .post_form("/add_user", &format!("name={}&email=", form_encode(&marker)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_string(ctx.get("/").await).await;
    assert!(!html.contains(&marker));
}

#[tokio::test]
#[ignore] // Requires running MySQL instance
async fn test_each_add_inserts_one_row() {
    let ctx = TestContext::live().await.unwrap();

    let before = user_count(&ctx).await;
    let response = ctx
        .post_form(
            "/add_user",
            &format!("name=Bob&email={}", form_encode(&unique_email())),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let after = user_count(&ctx).await;

    // Other tests may insert concurrently
    assert!(after >= before + 1);
}

#[tokio::test]
#[ignore] // Requires running MySQL instance
async fn test_special_characters_are_escaped_on_homepage() {
    let ctx = TestContext::live().await.unwrap();
    let email = unique_email();

    let response = ctx
        .post_form(
            "/add_user",
            &format!(
                "name={}&email={}",
                form_encode("<i>Eve</i>"),
                form_encode(&email)
            ),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let html = body_string(ctx.get("/").await).await;
    assert!(html.contains("&lt;i&gt;Eve&lt;/i&gt;"));
    assert!(!html.contains("<i>Eve</i>"));
}
