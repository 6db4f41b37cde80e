//! Cross-cutting behavior: caching, rate limiting, versioning, root and health.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{IT_SOLUTIONS_ID, TestApp, test_config};

#[tokio::test]
async fn test_get_sets_cache_validators() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("cache-control"), Some("public, max-age=60"));
    assert!(response.header("etag").is_some_and(|e| e.starts_with('"')));
    assert!(response.header("last-modified").is_some());
}

#[tokio::test]
async fn test_if_none_match_returns_not_modified() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = format!("/api/companies/{IT_SOLUTIONS_ID}");

    let first = app.request("GET", &path, None, Some(&token)).await;
    let etag = first.header("etag").expect("ETag").to_string();

    let second = app
        .request_with_headers("GET", &path, None, Some(&token), &[("if-none-match", &etag)])
        .await;

    assert_eq!(second.status, StatusCode::NOT_MODIFIED);
    assert!(second.text.is_empty());
    assert_eq!(second.header("etag"), Some(etag.as_str()));

    let weak = format!("W/{etag}");
    let third = app
        .request_with_headers("GET", &path, None, Some(&token), &[("if-none-match", &weak)])
        .await;
    assert_eq!(third.status, StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_stale_etag_returns_body() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request_with_headers(
            "GET",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            None,
            Some(&token),
            &[("if-none-match", "\"stale\"")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "IT_Solutions Ltd");
}

#[tokio::test]
async fn test_mutation_invalidates_cached_responses() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = format!("/api/companies/{IT_SOLUTIONS_ID}");

    let before = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(before.body["name"], "IT_Solutions Ltd");

    let patch = json!([{ "op": "replace", "path": "/name", "value": "Renamed Ltd" }]);
    let patched = app.request("PATCH", &path, Some(patch), Some(&token)).await;
    assert_eq!(patched.status, StatusCode::NO_CONTENT);

    let after = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(after.body["name"], "Renamed Ltd");
    assert_ne!(before.header("etag"), after.header("etag"));
}

#[tokio::test]
async fn test_cache_disabled_omits_validators() {
    let mut config = test_config();
    config.cache.response_cache_enabled = false;
    let app = TestApp::with_config(config);
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("etag").is_none());
}

#[tokio::test]
async fn test_rate_limit_rejects_over_budget_clients() {
    let mut config = test_config();
    config.rate_limit.enabled = true;
    config.rate_limit.requests = 2;
    config.rate_limit.period_seconds = 60;
    let app = TestApp::with_config(config);
    let client = [("x-forwarded-for", "198.51.100.23")];

    for _ in 0..2 {
        let ok = app
            .request_with_headers("GET", "/api/health", None, None, &client)
            .await;
        assert_eq!(ok.status, StatusCode::OK);
        assert_eq!(ok.header("x-rate-limit-limit"), Some("2/60s"));
    }

    let refused = app
        .request_with_headers("GET", "/api/health", None, None, &client)
        .await;
    assert_eq!(refused.status, StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = refused
        .header("retry-after")
        .expect("Retry-After")
        .parse()
        .expect("numeric Retry-After");
    assert!(retry_after >= 1);
    assert_eq!(
        refused.body["message"],
        "API calls quota exceeded! Maximum admitted 2/60s."
    );

    let other = app
        .request_with_headers(
            "GET",
            "/api/health",
            None,
            None,
            &[("x-forwarded-for", "198.51.100.99")],
        )
        .await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_version_headers_advertised() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.header("api-supported-versions"), Some("1.0"));
    assert_eq!(response.header("api-deprecated-versions"), Some("2.0"));
}

#[tokio::test]
async fn test_unknown_version_is_bad_request() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request_with_headers(
            "GET",
            "/api/companies",
            None,
            Some(&token),
            &[("api-version", "3.0")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "The HTTP resource that matches the request URI does not support the API version '3.0'."
    );
    assert_eq!(response.header("api-supported-versions"), Some("1.0"));
}

#[tokio::test]
async fn test_root_without_media_type_is_no_content() {
    let app = TestApp::new();

    let response = app.request("GET", "/api", None, None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_root_links() {
    let app = TestApp::new();

    let response = app
        .request_with_headers(
            "GET",
            "/api",
            None,
            None,
            &[
                ("accept", "application/vnd.companyhub.apiroot+json"),
                ("x-forwarded-proto", "https"),
                ("x-forwarded-host", "api.companyhub.test"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let links = response.items();
    assert_eq!(links.len(), 3);
    assert_eq!(links[0]["href"], "https://api.companyhub.test/api");
    assert_eq!(links[0]["rel"], "self");
    assert_eq!(links[2]["rel"], "create_company");
    assert_eq!(links[2]["method"], "POST");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_detailed_health_reports_backends() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["databaseProvider"], "memory");
    assert!(response.body["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/nowhere", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
