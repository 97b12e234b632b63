//! Integration tests for administrator account endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    audit_actions_for, create_admin, create_admin_api_key, create_privileged_admin_key,
    create_test_app, get_request_with_api_key, json_request_with_api_key, parse_response_body,
    request_with_api_key, setup, unique_test_email,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn new_admin_body(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": "Str0ngPassw0rd!",
        "phone_number": "+1 555 010 0199",
        "first_name": "Nora",
        "last_name": "Newadmin"
    })
}

async fn admin_exists(pool: &PgPool, admin_id: Uuid) -> bool {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM administrators WHERE admin_id = $1)")
        .bind(admin_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_administrator() {
    let pool = setup().await;
    let (caller_id, api_key) = create_privileged_admin_key(&pool).await;
    let app = create_test_app(pool.clone());
    let email = unique_test_email();

    let response = app
        .oneshot(json_request_with_api_key(
            Method::POST,
            "/api/admin/administrators",
            new_admin_body(&email.to_uppercase()),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Admin account created successfully");
    let data = &body["data"];
    assert_eq!(data["email"], email);
    assert_eq!(data["user_type"], "admin");
    assert_eq!(data["can_modify_system_config"], false);

    let new_id: Uuid = data["user_id"].as_str().unwrap().parse().unwrap();
    let (created_by, password_hash): (Option<Uuid>, String) = sqlx::query_as(
        r#"
        SELECT a.created_by_admin_id, u.password_hash
        FROM administrators a JOIN users u ON a.admin_id = u.user_id
        WHERE a.admin_id = $1
        "#,
    )
    .bind(new_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(created_by, Some(caller_id));
    assert!(shared::password::verify_password("Str0ngPassw0rd!", &password_hash).unwrap());
    assert_eq!(audit_actions_for(&pool, new_id).await, vec!["CREATE_ADMIN"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_administrator_missing_field() {
    let pool = setup().await;
    let (_, api_key) = create_privileged_admin_key(&pool).await;
    let app = create_test_app(pool);

    let response = app
        .oneshot(json_request_with_api_key(
            Method::POST,
            "/api/admin/administrators",
            json!({ "email": unique_test_email(), "password": "Str0ngPassw0rd!" }),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_administrator_duplicate_email() {
    let pool = setup().await;
    let (_, api_key) = create_privileged_admin_key(&pool).await;
    let app = create_test_app(pool);
    let email = unique_test_email();

    let response = app
        .clone()
        .oneshot(json_request_with_api_key(
            Method::POST,
            "/api/admin/administrators",
            new_admin_body(&email),
            &api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request_with_api_key(
            Method::POST,
            "/api/admin/administrators",
            new_admin_body(&email),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_cannot_delete_own_account() {
    let pool = setup().await;
    let (caller_id, api_key) = create_privileged_admin_key(&pool).await;
    let app = create_test_app(pool.clone());

    let response = app
        .oneshot(request_with_api_key(
            Method::DELETE,
            &format!("/api/admin/administrators/{}", caller_id),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(admin_exists(&pool, caller_id).await);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_unknown_admin_is_not_found() {
    let pool = setup().await;
    let (_, api_key) = create_privileged_admin_key(&pool).await;
    let app = create_test_app(pool);

    let response = app
        .oneshot(request_with_api_key(
            Method::DELETE,
            &format!("/api/admin/administrators/{}", Uuid::new_v4()),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Admin not found");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_privileged_admin_needs_privileged_caller() {
    let pool = setup().await;
    let caller_id = create_admin(&pool, false, None).await;
    let api_key = create_admin_api_key(&pool, Some(caller_id)).await;
    let target = create_admin(&pool, true, None).await;
    let app = create_test_app(pool.clone());

    let response = app
        .oneshot(request_with_api_key(
            Method::DELETE,
            &format!("/api/admin/administrators/{}", target),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(admin_exists(&pool, target).await);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_admin_with_created_accounts_is_kept() {
    let pool = setup().await;
    let (_, api_key) = create_privileged_admin_key(&pool).await;
    let target = create_admin(&pool, false, None).await;
    create_admin(&pool, false, Some(target)).await;
    let app = create_test_app(pool.clone());

    let response = app
        .oneshot(request_with_api_key(
            Method::DELETE,
            &format!("/api/admin/administrators/{}", target),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("has created 1 other admin account(s)"));
    assert!(admin_exists(&pool, target).await);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_administrator() {
    let pool = setup().await;
    let (_, api_key) = create_privileged_admin_key(&pool).await;
    let target = create_admin(&pool, true, None).await;
    let app = create_test_app(pool.clone());

    let response = app
        .oneshot(request_with_api_key(
            Method::DELETE,
            &format!("/api/admin/administrators/{}", target),
            &api_key,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Admin account removed successfully");
    assert!(!admin_exists(&pool, target).await);

    let user_left: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
        .bind(target)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!user_left);
    assert_eq!(audit_actions_for(&pool, target).await, vec!["DELETE_ADMIN"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_deleted_admin_key_stops_working() {
    let pool = setup().await;
    let (_, api_key) = create_privileged_admin_key(&pool).await;
    let (target, target_key) = create_privileged_admin_key(&pool).await;
    let app = create_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(get_request_with_api_key("/api/admin/houses", &target_key))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request_with_api_key(
            Method::DELETE,
            &format!("/api/admin/administrators/{}", target),
            &api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request_with_api_key("/api/admin/houses", &target_key))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let still_active: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM api_keys WHERE key_hash = $1 AND is_active)",
    )
    .bind(shared::crypto::sha256_hex(&target_key))
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(!still_active);
}
