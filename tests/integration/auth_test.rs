//! Registration, login and token enforcement.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{IT_SOLUTIONS_ID, PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_created() {
    let app = TestApp::new();

    let response = app.register("jdoe", PASSWORD, &["Manager"]).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.text.is_empty());
}

#[tokio::test]
async fn test_register_weak_password_is_unprocessable() {
    let app = TestApp::new();

    let response = app.register("jdoe", "short", &[]).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_register_duplicate_user_name_conflicts() {
    let app = TestApp::new();
    app.register("jdoe", PASSWORD, &[]).await;

    let body = json!({
        "userName": "JDoe",
        "password": PASSWORD,
        "email": "other@companyhub.test",
    });
    let response = app
        .request("POST", "/api/authentication", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_unknown_role_is_bad_request() {
    let app = TestApp::new();

    let response = app.register("jdoe", PASSWORD, &["Janitor"]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_null_body_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/authentication", Some(serde_json::Value::Null), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "UserForRegistrationDto object is null"
    );
}

#[tokio::test]
async fn test_login_returns_token() {
    let app = TestApp::new();
    app.register("jdoe", PASSWORD, &["Manager"]).await;

    let token = app.login("jdoe", PASSWORD).await;

    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register("jdoe", PASSWORD, &[]).await;

    let body = json!({ "userName": "jdoe", "password": "WrongPassword1" });
    let response = app
        .request("POST", "/api/authentication/login", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user_is_unauthorized() {
    let app = TestApp::new();

    let body = json!({ "userName": "nobody", "password": PASSWORD });
    let response = app
        .request("POST", "/api/authentication/login", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("GET", &format!("/api/companies/{IT_SOLUTIONS_ID}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            None,
            Some("not-a-jwt"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_company_list_requires_manager_role() {
    let app = TestApp::new();
    let plain = app.token_with_roles(&[]).await;
    let admin = app.token_with_roles(&["Administrator"]).await;
    let manager = app.manager_token().await;

    for token in [&plain, &admin] {
        let forbidden = app
            .request("GET", "/api/companies", None, Some(token))
            .await;
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    }

    let allowed = app
        .request("GET", "/api/companies", None, Some(&manager))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_without_roles_can_read_company() {
    let app = TestApp::new();
    let token = app.token_with_roles(&[]).await;

    let response = app
        .request(
            "GET",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "IT_Solutions Ltd");
}
