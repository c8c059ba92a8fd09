use axum::http::StatusCode;
use serde_json::{Value, json};

use warehouse_testing::auth::MockAuth;

use crate::helpers::{auth, server};

#[tokio::test]
async fn should_manage_trucks_as_admin() {
    let server = server();

    let (name, value) = auth(&MockAuth::admin());
    let response = server
        .post("/trucks")
        .add_header(name, value)
        .json(&json!({ "chassisNumber": "CH-001", "licensePlate": "AB-123-CD" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["chassisNumber"], "CH-001");

    let (name, value) = auth(&MockAuth::admin());
    let response = server
        .put("/trucks/1")
        .add_header(name, value)
        .json(&json!({ "licensePlate": "ZZ-999-ZZ" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["chassisNumber"], "CH-001");
    assert_eq!(body["data"]["licensePlate"], "ZZ-999-ZZ");

    let (name, value) = auth(&MockAuth::admin());
    let response = server.get("/trucks").add_header(name, value).await;
    assert_eq!(response.json::<Value>()["data"].as_array().unwrap().len(), 1);

    let (name, value) = auth(&MockAuth::admin());
    server
        .delete("/trucks/1")
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = auth(&MockAuth::admin());
    server
        .get("/trucks/1")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_forbid_user_role_on_trucks() {
    let (name, value) = auth(&MockAuth::user());
    let response = server().get("/trucks").add_header(name, value).await;

    response.assert_status(StatusCode::FORBIDDEN);
}
