//! Employee endpoints nested under a company.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{
    ADMIN_SOLUTIONS_ID, IT_SOLUTIONS_ID, JANA_MCLEAF_ID, KANE_MILLER_ID, SAM_RAIDEN_ID, TestApp,
};

fn employees_path(company_id: &str) -> String {
    format!("/api/companies/{company_id}/employees")
}

fn employee_path(company_id: &str, id: &str) -> String {
    format!("/api/companies/{company_id}/employees/{id}")
}

#[tokio::test]
async fn test_list_employees_ordered_by_name() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request("GET", &employees_path(IT_SOLUTIONS_ID), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Jana McLeaf");
    assert_eq!(items[1]["name"], "Sam Raiden");
    assert_eq!(response.pagination()["TotalCount"], 2);
}

#[tokio::test]
async fn test_list_employees_paged() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("{}?pageNumber=2&pageSize=1", employees_path(IT_SOLUTIONS_ID)),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["id"], SAM_RAIDEN_ID);
    let meta = response.pagination();
    assert_eq!(meta["CurrentPage"], 2);
    assert_eq!(meta["HasPrevious"], true);
    assert_eq!(meta["HasNext"], false);
}

#[tokio::test]
async fn test_filter_employees_by_age() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("{}?minAge=27&maxAge=40", employees_path(IT_SOLUTIONS_ID)),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["id"], JANA_MCLEAF_ID);
}

#[tokio::test]
async fn test_inverted_age_range_is_bad_request() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("{}?minAge=40&maxAge=20", employees_path(IT_SOLUTIONS_ID)),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Max age can't be less than min age");
}

#[tokio::test]
async fn test_search_employees_by_name() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("{}?searchTerm=SAM", employees_path(IT_SOLUTIONS_ID)),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["name"], "Sam Raiden");
}

#[tokio::test]
async fn test_order_employees_by_age_descending() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("{}?orderBy=age%20desc", employees_path(IT_SOLUTIONS_ID)),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.items()[0]["age"], 30);
    assert_eq!(response.items()[1]["age"], 26);
}

#[tokio::test]
async fn test_shape_employee_fields() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!("{}?fields=name,age", employees_path(IT_SOLUTIONS_ID)),
            None,
            Some(&token),
        )
        .await;

    let first = response.items()[0].as_object().expect("object");
    assert_eq!(first.len(), 2);
    assert!(first.contains_key("name"));
    assert!(first.contains_key("age"));
}

#[tokio::test]
async fn test_hateoas_links_on_employee_list() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .get_as(
            &format!("{}?fields=name", employees_path(IT_SOLUTIONS_ID)),
            "application/vnd.companyhub.hateoas+json",
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let value = response.body["value"].as_array().expect("value");
    assert_eq!(value.len(), 2);

    let links = value[0]["links"].as_array().expect("links");
    assert_eq!(links.len(), 4);
    assert_eq!(links[0]["rel"], "self");
    assert_eq!(
        links[0]["href"],
        format!(
            "http://localhost{}?fields=name",
            employee_path(IT_SOLUTIONS_ID, JANA_MCLEAF_ID)
        )
    );
    assert_eq!(links[1]["method"], "DELETE");

    let collection = response.body["links"].as_array().expect("links");
    assert_eq!(collection[0]["rel"], "self");
}

#[tokio::test]
async fn test_hateoas_self_link_escapes_fields() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let resource = format!(
        "http://localhost{}",
        employee_path(IT_SOLUTIONS_ID, JANA_MCLEAF_ID)
    );

    let response = app
        .get_as(
            &format!("{}?fields=name%2C%20age%26x%3D1", employees_path(IT_SOLUTIONS_ID)),
            "application/vnd.companyhub.hateoas+json",
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["value"][0]["links"][0]["href"],
        format!("{resource}?fields=name,%20age%26x%3D1")
    );

    let response = app
        .get_as(
            &employees_path(IT_SOLUTIONS_ID),
            "application/vnd.companyhub.hateoas+json",
            Some(&token),
        )
        .await;
    assert_eq!(response.body["value"][0]["links"][0]["href"], resource);
}

#[tokio::test]
async fn test_employees_of_unknown_company_not_found() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &employees_path(&uuid::Uuid::new_v4().to_string()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employees_as_csv() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .get_as(&employees_path(IT_SOLUTIONS_ID), "text/csv", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text,
        format!(
            "{JANA_MCLEAF_ID},\"Jana McLeaf\",30,\"Software developer\"\r\n\
             {SAM_RAIDEN_ID},\"Sam Raiden\",26,\"Software developer\"\r\n"
        )
    );
}

#[tokio::test]
async fn test_get_single_employee_shaped() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &format!(
                "{}?fields=position",
                employee_path(ADMIN_SOLUTIONS_ID, KANE_MILLER_ID)
            ),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "position": "Administrator" }));
}

#[tokio::test]
async fn test_employee_of_another_company_not_found() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let response = app
        .request(
            "GET",
            &employee_path(ADMIN_SOLUTIONS_ID, SAM_RAIDEN_ID),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_employee_returns_location() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({ "name": "Mia Wong", "age": 33, "position": "Designer" });
    let response = app
        .request(
            "POST",
            &employees_path(ADMIN_SOLUTIONS_ID),
            Some(body),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().expect("id");
    assert_eq!(
        response.header("location"),
        Some(employee_path(ADMIN_SOLUTIONS_ID, id).as_str())
    );
    assert_eq!(response.body["position"], "Designer");
}

#[tokio::test]
async fn test_create_underage_employee_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({ "name": "Kid", "age": 15, "position": "Intern" });
    let response = app
        .request(
            "POST",
            &employees_path(ADMIN_SOLUTIONS_ID),
            Some(body),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["details"]["age"][0],
        "Age is required and it can't be lower than 18"
    );
}

#[tokio::test]
async fn test_create_employee_with_empty_strings_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({ "name": "", "age": 30, "position": "" });
    let response = app
        .request(
            "POST",
            &employees_path(ADMIN_SOLUTIONS_ID),
            Some(body),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = &response.body["details"];
    assert_eq!(details["name"][0], "Employee name is a required field.");
    assert_eq!(details["position"][0], "Position is a required field.");
}

#[tokio::test]
async fn test_blanking_employee_fields_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = employee_path(IT_SOLUTIONS_ID, SAM_RAIDEN_ID);

    let put = json!({ "name": "Sam Raiden", "age": 27, "position": " " });
    let response = app.request("PUT", &path, Some(put), Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let patch = json!([{ "op": "replace", "path": "/name", "value": "" }]);
    let response = app.request("PATCH", &path, Some(patch), Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["details"]["name"][0],
        "Employee name is a required field."
    );

    let employee = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(employee.body["name"], "Sam Raiden");
    assert_eq!(employee.body["position"], "Software developer");
}

#[tokio::test]
async fn test_create_employee_for_unknown_company() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let body = json!({ "name": "Mia Wong", "age": 33, "position": "Designer" });
    let response = app
        .request(
            "POST",
            &employees_path(&uuid::Uuid::new_v4().to_string()),
            Some(body),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_employee() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = employee_path(IT_SOLUTIONS_ID, SAM_RAIDEN_ID);

    let body = json!({ "name": "Sam Raiden", "age": 27, "position": "Lead developer" });
    let response = app.request("PUT", &path, Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let employee = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(employee.body["age"], 27);
    assert_eq!(employee.body["position"], "Lead developer");
}

#[tokio::test]
async fn test_patch_employee_age() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = employee_path(IT_SOLUTIONS_ID, JANA_MCLEAF_ID);

    let patch = json!([{ "op": "replace", "path": "/age", "value": 31 }]);
    let response = app.request("PATCH", &path, Some(patch), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let employee = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(employee.body["age"], 31);
}

#[tokio::test]
async fn test_patch_employee_invalid_age_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let patch = json!([{ "op": "replace", "path": "/age", "value": 10 }]);
    let response = app
        .request(
            "PATCH",
            &employee_path(IT_SOLUTIONS_ID, JANA_MCLEAF_ID),
            Some(patch),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_patch_employee_unknown_path_is_unprocessable() {
    let app = TestApp::new();
    let token = app.manager_token().await;

    let patch = json!([{ "op": "replace", "path": "/salary", "value": 10 }]);
    let response = app
        .request(
            "PATCH",
            &employee_path(IT_SOLUTIONS_ID, JANA_MCLEAF_ID),
            Some(patch),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_employee() {
    let app = TestApp::new();
    let token = app.manager_token().await;
    let path = employee_path(IT_SOLUTIONS_ID, SAM_RAIDEN_ID);

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let employee = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(employee.status, StatusCode::NOT_FOUND);

    let remaining = app
        .request("GET", &employees_path(IT_SOLUTIONS_ID), None, Some(&token))
        .await;
    assert_eq!(remaining.items().len(), 1);
}
