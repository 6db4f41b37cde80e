//! Company endpoints, versions one and two.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_SOLUTIONS_ID, IT_SOLUTIONS_ID, TestApp};

#[tokio::test]
async fn test_list_companies_with_pagination_header() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request("GET", "/api/companies", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Admin_Solutions Ltd");
    assert_eq!(
        items[1]["fullAddress"],
        "583 Wall Dr. Gwynn Oak, MD 21207 USA"
    );

    let meta = response.pagination();
    assert_eq!(meta["TotalCount"], 2);
    assert_eq!(meta["CurrentPage"], 1);
    assert_eq!(meta["HasNext"], false);
}

#[tokio::test]
async fn test_list_companies_paged_and_ordered() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            "/api/companies?pageNumber=1&pageSize=1&orderBy=name%20desc",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["name"], "IT_Solutions Ltd");

    let meta = response.pagination();
    assert_eq!(meta["TotalPages"], 2);
    assert_eq!(meta["HasNext"], true);
    assert_eq!(meta["HasPrevious"], false);
}

#[tokio::test]
async fn test_get_company() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("/api/companies/{ADMIN_SOLUTIONS_ID}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], ADMIN_SOLUTIONS_ID);
    assert_eq!(response.body["name"], "Admin_Solutions Ltd");
}

#[tokio::test]
async fn test_get_unknown_company_is_not_found() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let id = uuid::Uuid::new_v4();

    let response = app
        .request("GET", &format!("/api/companies/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        format!("Company with id: {id} doesn't exist in the database.")
    );
}

#[tokio::test]
async fn test_malformed_company_id_is_bad_request() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request("GET", "/api/companies/not-a-guid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_company_returns_location() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({
        "name": "Electronics Solutions Ltd",
        "address": "312 Deviot Avenue, RF 293",
        "country": "USA",
        "employees": [
            { "name": "Joan Dane", "age": 29, "position": "Manager" }
        ]
    });
    let created = app
        .request("POST", "/api/companies", Some(body), Some(&token))
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_str().expect("id").to_string();
    let location = created.header("location").expect("Location");
    assert_eq!(location, format!("/api/companies/{id}"));

    let fetched = app.request("GET", location, None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "Electronics Solutions Ltd");

    let employees = app
        .request("GET", &format!("{location}/employees"), None, Some(&token))
        .await;
    assert_eq!(employees.items().len(), 1);
    assert_eq!(employees.items()[0]["name"], "Joan Dane");
}

#[tokio::test]
async fn test_create_company_null_body_is_bad_request() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request("POST", "/api/companies", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_company_explicit_null_names_the_dto() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "POST",
            "/api/companies",
            Some(serde_json::Value::Null),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "CompanyForCreationDto object is null");
}

#[tokio::test]
async fn test_create_invalid_company_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({
        "address": "312 Deviot Avenue, RF 293",
        "country": "USA",
        "employees": [{ "name": "Too Young", "age": 12, "position": "Intern" }]
    });
    let response = app
        .request("POST", "/api/companies", Some(body), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = &response.body["details"];
    assert_eq!(details["name"][0], "Company name is a required field.");
    assert!(details["employees[0].age"].is_array());
}

#[tokio::test]
async fn test_create_company_with_empty_strings_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({ "name": "", "address": "", "country": "  " });
    let response = app
        .request("POST", "/api/companies", Some(body), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = &response.body["details"];
    assert_eq!(details["name"][0], "Company name is a required field.");
    assert_eq!(details["address"][0], "Company address is a required field.");
    assert_eq!(details["country"][0], "Country is a required field.");
}

#[tokio::test]
async fn test_company_collection_round_trip() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!([
        { "name": "Alpha Ltd", "address": "1 First St", "country": "UK" },
        { "name": "Beta Ltd", "address": "2 Second St", "country": "UK" }
    ]);
    let created = app
        .request("POST", "/api/companies/collection", Some(body), Some(&token))
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    let items = created.items();
    assert_eq!(items.len(), 2);
    let expected = format!(
        "/api/companies/collection/({},{})",
        items[0]["id"].as_str().expect("id"),
        items[1]["id"].as_str().expect("id")
    );
    assert_eq!(created.header("location"), Some(expected.as_str()));

    let fetched = app.request("GET", &expected, None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.items().len(), 2);
}

#[tokio::test]
async fn test_company_collection_null_body() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "POST",
            "/api/companies/collection",
            Some(serde_json::Value::Null),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Company collection is null");
}

#[tokio::test]
async fn test_empty_company_collection_is_bad_request() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request("POST", "/api/companies/collection", Some(json!([])), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Company collection is empty");
    assert!(response.header("location").is_none());
}

#[tokio::test]
async fn test_company_collection_with_unknown_id_is_not_found() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let unknown = uuid::Uuid::new_v4();

    let response = app
        .request(
            "GET",
            &format!("/api/companies/collection/({IT_SOLUTIONS_ID},{unknown})"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        "Some ids are not valid in a collection"
    );
}

#[tokio::test]
async fn test_update_company_adds_employees() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = format!("/api/companies/{ADMIN_SOLUTIONS_ID}");

    let body = json!({
        "name": "Admin_Solutions Ltd Upd",
        "address": "312 Forest Avenue, BF 923",
        "country": "USA",
        "employees": [{ "name": "Geoff Thomas", "age": 41, "position": "Accountant" }]
    });
    let response = app.request("PUT", &path, Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let company = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(company.body["name"], "Admin_Solutions Ltd Upd");

    let employees = app
        .request("GET", &format!("{path}/employees"), None, Some(&token))
        .await;
    assert_eq!(employees.items().len(), 2);
}

#[tokio::test]
async fn test_patch_company() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = format!("/api/companies/{IT_SOLUTIONS_ID}");

    let patch = json!([{ "op": "replace", "path": "/name", "value": "IT_Solutions Group" }]);
    let response = app.request("PATCH", &path, Some(patch), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let company = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(company.body["name"], "IT_Solutions Group");
}

#[tokio::test]
async fn test_patch_company_removing_name_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let patch = json!([{ "op": "remove", "path": "/name" }]);
    let response = app
        .request(
            "PATCH",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            Some(patch),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_blanking_company_fields_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = format!("/api/companies/{IT_SOLUTIONS_ID}");

    let put = json!({ "name": "", "address": "583 Wall Dr.", "country": "USA" });
    let response = app.request("PUT", &path, Some(put), Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["details"]["name"][0],
        "Company name is a required field."
    );

    let patch = json!([{ "op": "replace", "path": "/country", "value": "" }]);
    let response = app.request("PATCH", &path, Some(patch), Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let company = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(company.body["name"], "IT_Solutions Ltd");
    assert!(company.body["fullAddress"]
        .as_str()
        .unwrap_or_default()
        .ends_with("USA"));
}

#[tokio::test]
async fn test_patch_company_null_document() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            Some(serde_json::Value::Null),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "patchDoc object is null");
}

#[tokio::test]
async fn test_delete_company_removes_its_employees() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = format!("/api/companies/{IT_SOLUTIONS_ID}");

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let company = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(company.status, StatusCode::NOT_FOUND);

    let employees = app
        .request("GET", &format!("{path}/employees"), None, Some(&token))
        .await;
    assert_eq!(employees.status, StatusCode::NOT_FOUND);

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options_lists_allowed_methods() {
    let app = TestApp::new();

    let response = app.request("OPTIONS", "/api/companies", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("allow"), Some("GET, OPTIONS, POST"));
}

#[tokio::test]
async fn test_head_company_has_no_body() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "HEAD",
            &format!("/api/companies/{IT_SOLUTIONS_ID}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.is_empty());
}

#[tokio::test]
async fn test_companies_as_csv() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app.get_as("/api/companies", "text/csv", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .header("content-type")
            .is_some_and(|v| v.starts_with("text/csv"))
    );
    let lines: Vec<&str> = response.text.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"Admin_Solutions Ltd\""));
}

#[tokio::test]
async fn test_unsupported_accept_is_not_acceptable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .get_as("/api/companies", "application/xml", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_v2_path_returns_full_entities() {
    let app = TestApp::new();
    let token = app.token_with_roles(&[]).await;

    let response = app
        .request("GET", "/api/2.0/companies", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["country"], "USA");
    assert!(items[0].get("address").is_some());
    assert!(items[0].get("fullAddress").is_none());
}

#[tokio::test]
async fn test_v2_selected_by_header() {
    let app = TestApp::new();
    let token = app.token_with_roles(&[]).await;

    let response = app
        .request_with_headers(
            "GET",
            "/api/companies",
            None,
            Some(&token),
            &[("api-version", "2.0")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.items()[0].get("country").is_some());
}

#[tokio::test]
async fn test_v2_selected_by_query() {
    let app = TestApp::new();
    let token = app.token_with_roles(&[]).await;

    let response = app
        .request("GET", "/api/companies?api-version=2.0", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.items()[0].get("country").is_some());
}
