use axum::http::StatusCode;
use serde_json::{Value, json};

use warehouse_testing::auth::MockAuth;

use crate::helpers::{FakeRepositories, auth, server_with};

fn new_order() -> Value {
    json!({
        "code": "ord1",
        "submittedDate": "2026-03-01T08:00:00Z",
        "deadlineDate": "2026-03-08T17:30:00.250Z",
        "user": 1,
        "orderItems": [
            { "item": 1, "quantity": 3 },
            { "itemId": 2, "quantity": 5 }
        ]
    })
}

#[tokio::test]
async fn should_create_order_with_lines() {
    let repos = FakeRepositories::seeded();
    let server = server_with(repos.clone());

    let (name, value) = auth(&MockAuth::user());
    let response = server.post("/orders").add_header(name, value).json(&new_order()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let data = &body["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["code"], "ord1");
    assert_eq!(data["submittedDate"], "2026-03-01T08:00:00.000Z");
    assert_eq!(data["deadlineDate"], "2026-03-08T17:30:00.250Z");
    assert_eq!(data["user"], 1);

    let lines = data["orderItems"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["item"], 1);
    assert_eq!(lines[1]["item"], 2);
    assert!(lines.iter().all(|l| l["order"] == 1));

    assert_eq!(repos.orders.rows()[0].order_items.len(), 2);
}

#[tokio::test]
async fn should_replace_lines_on_update() {
    let server = server_with(FakeRepositories::seeded());
    let (name, value) = auth(&MockAuth::user());
    server
        .post("/orders")
        .add_header(name, value)
        .json(&new_order())
        .await
        .assert_status_ok();

    let (name, value) = auth(&MockAuth::user());
    let response = server
        .put("/orders/1")
        .add_header(name, value)
        .json(&json!({ "orderItems": [{ "item": 7, "quantity": 1 }] }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["code"], "ord1");
    let lines = body["data"]["orderItems"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["item"], 7);
    assert_eq!(lines[0]["quantity"], 1);
}

#[tokio::test]
async fn should_keep_line_ids_on_repeated_update() {
    let server = server_with(FakeRepositories::seeded());
    let (name, value) = auth(&MockAuth::user());
    server
        .post("/orders")
        .add_header(name, value)
        .json(&new_order())
        .await
        .assert_status_ok();

    let patch = json!({ "orderItems": [{ "item": 7, "quantity": 1 }, { "item": 2, "quantity": 5 }] });
    let mut seen = Vec::new();
    for _ in 0..2 {
        let (name, value) = auth(&MockAuth::user());
        let response = server.put("/orders/1").add_header(name, value).json(&patch).await;
        response.assert_status_ok();
        seen.push(response.json::<Value>()["data"].clone());
    }

    assert_eq!(seen[0], seen[1]);
    let lines = seen[0]["orderItems"].as_array().unwrap();
    assert!(lines.iter().all(|l| l["id"].as_i64().unwrap() != 0));
    assert_ne!(lines[0]["id"], lines[1]["id"]);
}

#[tokio::test]
async fn should_keep_lines_when_update_omits_them() {
    let server = server_with(FakeRepositories::seeded());
    let (name, value) = auth(&MockAuth::user());
    server
        .post("/orders")
        .add_header(name, value)
        .json(&new_order())
        .await
        .assert_status_ok();

    let (name, value) = auth(&MockAuth::user());
    let response = server
        .put("/orders/1")
        .add_header(name, value)
        .json(&json!({ "code": "ord1-b" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["code"], "ord1-b");
    assert_eq!(body["data"]["orderItems"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_return_only_error_when_deleting_missing_order() {
    let server = server_with(FakeRepositories::seeded());

    let (name, value) = auth(&MockAuth::user());
    let response = server.delete("/orders/5").add_header(name, value).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "ORDER_NOT_FOUND");
    assert!(body["data"].get("code").is_none());
}

#[tokio::test]
async fn should_delete_order() {
    let repos = FakeRepositories::seeded();
    let server = server_with(repos.clone());
    let (name, value) = auth(&MockAuth::user());
    server
        .post("/orders")
        .add_header(name, value)
        .json(&new_order())
        .await
        .assert_status_ok();

    let (name, value) = auth(&MockAuth::user());
    let response = server.delete("/orders/1").add_header(name, value).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["code"], "ord1");
    assert!(repos.orders.rows().is_empty());
    let stored = repos.orders.all_rows();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].1);

    let (name, value) = auth(&MockAuth::user());
    server
        .get("/orders/1")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_require_order_code() {
    let server = server_with(FakeRepositories::seeded());

    let (name, value) = auth(&MockAuth::user());
    server
        .post("/orders")
        .add_header(name, value)
        .json(&json!({ "orderItems": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
