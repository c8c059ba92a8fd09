use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use chrono::Utc;
use serde_json::Value;

use warehouse_auth_types::bearer::bearer_value;
use warehouse_auth_types::token::{Claims, TokenKeys};
use warehouse_testing::auth::{MockAuth, roleless_header_value};

use crate::helpers::{FakeRepositories, auth, server, server_with};

#[tokio::test]
async fn should_reject_missing_header_with_401() {
    let response = server().get("/trucks").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], 401);
    assert_eq!(body["message"], "missing authorization header");
    assert_eq!(body["data"]["kind"], "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn should_reject_single_part_header() {
    let response = server()
        .get("/items")
        .add_header(AUTHORIZATION, HeaderValue::from_static("justatoken"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let token = TokenKeys::new("some-other-secret")
        .issue(1, "mallory", "SysAdmin")
        .unwrap();
    let response = server()
        .get("/users")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer_value(&token)).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["data"]["cause"], "signature mismatch");
}

#[tokio::test]
async fn should_reject_expired_token() {
    let now = Utc::now().timestamp();
    let token = MockAuth::keys()
        .sign(&Claims {
            exp: now - 10,
            iat: now - 100,
            sub: Some(3),
            user: Some("sysAdminTest".into()),
            role: Some("SysAdmin".into()),
        })
        .unwrap();
    let response = server()
        .get("/users")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer_value(&token)).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["data"]["cause"], "token expired");
}

#[tokio::test]
async fn should_reject_token_without_role_claim() {
    let response = server()
        .get("/items")
        .add_header(AUTHORIZATION, roleless_header_value())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "MISSING_ROLE_CLAIM");
}

#[tokio::test]
async fn should_forbid_admin_on_users() {
    let server = server();

    let (name, value) = auth(&MockAuth::admin());
    let response = server.get("/users/1").add_header(name, value).await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "FORBIDDEN");

    let (name, value) = auth(&MockAuth::sys_admin());
    let response = server.get("/users/1").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "sysAdminTest");
}

#[tokio::test]
async fn should_not_let_sys_admin_into_lower_groups() {
    let server = server();

    let (name, value) = auth(&MockAuth::sys_admin());
    let response = server.get("/orders").add_header(name, value).await;
    response.assert_status(StatusCode::FORBIDDEN);

    let (name, value) = auth(&MockAuth::sys_admin());
    let response = server.get("/trucks").add_header(name, value).await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_let_every_role_reach_items() {
    let server = server();
    for identity in [MockAuth::user(), MockAuth::admin(), MockAuth::sys_admin()] {
        let (name, value) = auth(&identity);
        server
            .get("/items")
            .add_header(name, value)
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn should_gate_before_parsing_id() {
    let response = server().get("/items/invalid").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_answer_health_without_auth() {
    let server = server();

    let response = server.get("/healthz").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "ok");

    let response = server.get("/readyz").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "ready");
}

#[tokio::test]
async fn should_report_unready_when_store_is_down() {
    let repos = FakeRepositories {
        healthy: false,
        ..FakeRepositories::seeded()
    };
    let response = server_with(repos).get("/readyz").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["code"], 503);
}

#[tokio::test]
async fn should_return_envelope_for_unknown_route() {
    let response = server().get("/warehouses").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], 404);
    assert_eq!(body["data"]["kind"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server().get("/healthz").await;
    assert!(response.headers().get("x-request-id").is_some());
}
