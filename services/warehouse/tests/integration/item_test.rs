use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use warehouse_testing::auth::MockAuth;

use crate::helpers::{auth, server};

fn item_body(code: &str) -> Value {
    json!({
        "name": "Item 1",
        "description": "A test item",
        "code": code,
        "totalQuantity": 100,
        "availableQuantity": 80,
        "price": 9.99,
        "category": "Category Test"
    })
}

async fn create(server: &TestServer, body: Value) -> Value {
    let (name, value) = auth(&MockAuth::user());
    let response = server.post("/items").add_header(name, value).json(&body).await;
    response.assert_status_ok();
    response.json::<Value>()["data"].clone()
}

#[tokio::test]
async fn should_create_and_fetch_item() {
    let server = server();
    let created = create(&server, item_body("itm1")).await;
    assert_eq!(created["id"], 1);

    let (name, value) = auth(&MockAuth::user());
    let response = server.get("/items/1").add_header(name, value).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"], created);
    assert_eq!(body["data"]["name"], "Item 1");
    assert_eq!(body["data"]["totalQuantity"], 100);
    assert_eq!(body["data"]["availableQuantity"], 80);
    assert_eq!(body["data"]["price"], 9.99);
}

#[tokio::test]
async fn should_keep_untouched_fields_on_partial_update() {
    let server = server();
    create(&server, item_body("itm1")).await;

    let (name, value) = auth(&MockAuth::admin());
    let response = server
        .put("/items/1")
        .add_header(name, value)
        .json(&json!({ "price": 12.5 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["price"], 12.5);
    assert_eq!(body["data"]["name"], "Item 1");
    assert_eq!(body["data"]["code"], "itm1");
    assert_eq!(body["data"]["totalQuantity"], 100);
}

#[tokio::test]
async fn should_reject_non_numeric_id() {
    let (name, value) = auth(&MockAuth::user());
    let response = server().get("/items/invalid").add_header(name, value).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "invalid id");
}

#[tokio::test]
async fn should_reject_signed_id() {
    let server = server();
    create(&server, item_body("itm1")).await;

    for path in ["/items/+1", "/items/-1"] {
        let (name, value) = auth(&MockAuth::user());
        let response = server.get(path).add_header(name, value).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "invalid id");
    }
}

#[tokio::test]
async fn should_return_404_for_missing_item() {
    let (name, value) = auth(&MockAuth::user());
    let response = server().get("/items/42").add_header(name, value).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn should_return_409_for_duplicate_code() {
    let server = server();
    create(&server, item_body("itm1")).await;

    let (name, value) = auth(&MockAuth::user());
    let response = server
        .post("/items")
        .add_header(name, value)
        .json(&item_body("itm1"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "ITEM_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_malformed_json() {
    let (name, value) = auth(&MockAuth::user());
    let response = server()
        .post("/items")
        .add_header(name, value)
        .content_type("application/json")
        .bytes("{\"name\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["data"]["kind"], "BAD_REQUEST");
}

#[tokio::test]
async fn should_paginate_list() {
    let server = server();
    for n in 1..=5 {
        create(&server, item_body(&format!("itm{n}"))).await;
    }

    let (name, value) = auth(&MockAuth::user());
    let response = server
        .get("/items")
        .add_query_param("page", 2)
        .add_query_param("limit", 2)
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let ids: Vec<i64> = response.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4]);

    let (name, value) = auth(&MockAuth::user());
    let response = server
        .get("/items?page=abc&limit=2")
        .add_header(name, value)
        .await;
    assert_eq!(response.json::<Value>()["data"].as_array().unwrap().len(), 5);

    let (name, value) = auth(&MockAuth::user());
    let response = server
        .get("/items?page=18446744073709551615&limit=18446744073709551615")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_delete_item_and_then_404() {
    let server = server();
    create(&server, item_body("itm1")).await;

    let (name, value) = auth(&MockAuth::user());
    let response = server.delete("/items/1").add_header(name, value).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["code"], "itm1");

    let (name, value) = auth(&MockAuth::user());
    server
        .get("/items/1")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let (name, value) = auth(&MockAuth::user());
    server
        .delete("/items/1")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
