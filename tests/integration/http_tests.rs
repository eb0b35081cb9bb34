//! End-to-end tests over the HTTP surface

use crate::common::test_state;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use futures::future::join_all;
use rbac_gateway::auth::NewAccount;
use rbac_gateway::auth::rbac::codes;
use rbac_gateway::server::AppState;
use rbac_gateway::server::routes;
use serde_json::{Value, json};

const PASSWORD: &str = "password123";

macro_rules! app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

fn create_superuser(state: &AppState, email: &str) {
    let account = NewAccount {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        first_name: "Root".to_string(),
        last_name: String::new(),
        is_staff: true,
        is_superuser: true,
        role: None,
        branch: None,
    };
    state.auth.create_account(account, true).unwrap();
}

#[actix_web::test]
async fn test_admin_provisions_a_report_viewer() {
    let state = test_state(false);
    create_superuser(&state, "root@example.com");
    let app = app!(state);

    // Superuser logs in
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "root@example.com", "password": PASSWORD }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let admin = format!("Bearer {}", body["tokens"]["access_token"].as_str().unwrap());

    // Creates a role and a user holding it
    let req = actix_test::TestRequest::post()
        .uri("/api/roles")
        .insert_header(("Authorization", admin.as_str()))
        .set_json(json!({ "name": "Report Viewer", "permission_codes": [codes::REPORTS_VIEW] }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let role: Value = actix_test::read_body_json(resp).await;
    let role_id = role["id"].as_str().unwrap().to_string();

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("Authorization", admin.as_str()))
        .set_json(json!({
            "email": "Viewer@Example.com",
            "password": PASSWORD,
            "role": role_id,
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: Value = actix_test::read_body_json(resp).await;
    assert_eq!(user["email"], "viewer@example.com");
    assert_eq!(user["role"], role_id.as_str());
    assert_eq!(user["permissions"], json!([codes::REPORTS_VIEW]));

    // The viewer reads reports but cannot export
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "viewer@example.com", "password": PASSWORD }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let viewer = format!("Bearer {}", body["tokens"]["access_token"].as_str().unwrap());

    let req = actix_test::TestRequest::get()
        .uri("/api/reports/account-base/high_balance")
        .insert_header(("Authorization", viewer.as_str()))
        .to_request();
    let page: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["count"], 2);

    let req = actix_test::TestRequest::get()
        .uri("/api/reports/account-base/export")
        .insert_header(("Authorization", viewer.as_str()))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Granting export takes effect on the next request
    let req = actix_test::TestRequest::patch()
        .uri(&format!("/api/roles/{}", role_id))
        .insert_header(("Authorization", admin.as_str()))
        .set_json(json!({ "permission_codes": [codes::REPORTS_VIEW, codes::REPORTS_EXPORT] }))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = actix_test::TestRequest::get()
        .uri("/api/reports/account-base/export")
        .insert_header(("Authorization", viewer.as_str()))
        .to_request();
    let rows: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.as_array().unwrap().len(), 3);

    // The viewer still cannot manage roles
    let req = actix_test::TestRequest::get()
        .uri("/api/roles")
        .insert_header(("Authorization", viewer.as_str()))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "MISSING_PERMISSION");
}

#[actix_web::test]
async fn test_register_then_refresh() {
    let state = test_state(false);
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "new@example.com",
            "password": PASSWORD,
            "is_superuser": true,
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["user"]["is_superuser"], false);
    let refresh_token = body["tokens"]["refresh_token"].as_str().unwrap().to_string();

    let req = actix_test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh_token": refresh_token }))
        .to_request();
    let tokens: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert!(tokens["access_token"].is_string());

    // Refresh tokens are single-use
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh_token": refresh_token }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_org_hierarchy_over_http() {
    let state = test_state(false);
    create_superuser(&state, "org@example.com");
    let (_, tokens) = state.auth.login("org@example.com", PASSWORD).await.unwrap();
    let admin = format!("Bearer {}", tokens.access_token);
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/branches")
        .insert_header(("Authorization", admin.as_str()))
        .set_json(json!({ "branchCode": "003", "branchName": "Airport" }))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = actix_test::TestRequest::post()
        .uri("/api/departments")
        .insert_header(("Authorization", admin.as_str()))
        .set_json(json!({ "departmentCode": "CS", "departmentName": "Customer Service", "branch": "003" }))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = actix_test::TestRequest::delete()
        .uri("/api/branches/003")
        .insert_header(("Authorization", admin.as_str()))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "BRANCH_IN_USE");

    let req = actix_test::TestRequest::get()
        .uri("/api/departments?branch=003")
        .insert_header(("Authorization", admin.as_str()))
        .to_request();
    let page: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["count"], 1);
    assert_eq!(page["results"][0]["departmentCode"], "CS");
}

#[actix_web::test]
async fn test_development_mode_serves_anonymous_requests() {
    let state = test_state(true);
    let app = app!(state);

    let req = actix_test::TestRequest::get().uri("/api/reports/account-base/stats").to_request();
    let stats: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total_accounts"], 3);
}

#[actix_web::test]
async fn test_concurrent_requests_see_consistent_decisions() {
    let state = test_state(false);
    let role = state
        .directory
        .create_role("Readers", None, [codes::REPORTS_VIEW.to_string()].into())
        .unwrap();
    let account = NewAccount {
        email: "reader@example.com".to_string(),
        password: PASSWORD.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        is_staff: false,
        is_superuser: false,
        role: Some(role.id),
        branch: None,
    };
    state.auth.create_account(account, true).unwrap();
    let (_, tokens) = state.auth.login("reader@example.com", PASSWORD).await.unwrap();
    let bearer = format!("Bearer {}", tokens.access_token);
    let app = app!(state);

    let requests = (0..16).map(|i| {
        let uri = if i % 2 == 0 {
            "/api/reports/account-base/stats"
        } else {
            "/api/reports/account-base/export"
        };
        let req = actix_test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        actix_test::call_service(&app, req)
    });

    for (i, resp) in join_all(requests).await.into_iter().enumerate() {
        let expected = if i % 2 == 0 {
            StatusCode::OK
        } else {
            StatusCode::FORBIDDEN
        };
        assert_eq!(resp.status(), expected);
    }
}
