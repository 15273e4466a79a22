//! End-to-end tests for the catalog routes over a real socket

use evesg::server::catalog_router;
use evesg::state::{Catalog, Item};
use futures_util::future::join_all;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start a freshly seeded catalog on an ephemeral port, returning its base URL
async fn spawn_catalog(item_lookup: bool) -> String {
    let app = catalog_router(Catalog::seeded().into_shared(), item_lookup);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_list_returns_seed_in_order() {
    let base = spawn_catalog(true).await;

    let response = reqwest::get(format!("{}/items", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let items: Vec<Item> = response.json().await.unwrap();
    assert_eq!(
        items,
        vec![
            Item::new("1", "Hoarder", "Ship", 56.99),
            Item::new("2", "Mammoth", "Ship", 17.99),
            Item::new("3", "Iterion Mark V", "Ship", 39.99),
        ]
    );
}

#[tokio::test]
async fn test_create_then_get_by_id() {
    let base = spawn_catalog(true).await;
    let client = Client::new();
    let payload = json!({"id": "4", "name": "Foo", "type": "Ship", "price": 1.0});

    let created = client
        .post(format!("{}/items", base))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(created.json::<Value>().await.unwrap(), payload);

    let fetched = client
        .get(format!("{}/items/4", base))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>().await.unwrap(), payload);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let base = spawn_catalog(true).await;

    let response = reqwest::get(format!("{}/items/999", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"message": "item not found"})
    );
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let base = spawn_catalog(true).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/items", base))
        .header("content-type", "application/json")
        .body(r#"{"id": "5", "name": "#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("invalid item: "));

    let items: Vec<Item> = reqwest::get(format!("{}/items", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn test_wrong_field_type_is_400() {
    let base = spawn_catalog(true).await;

    let response = Client::new()
        .post(format!("{}/items", base))
        .json(&json!({"id": "6", "name": "Bar", "type": "Ship", "price": "cheap"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_and_null_records_are_created_with_empty_values() {
    let base = spawn_catalog(true).await;
    let client = Client::new();

    let partial = client
        .post(format!("{}/items", base))
        .json(&json!({"id": "5", "name": "X"}))
        .send()
        .await
        .unwrap();
    assert_eq!(partial.status(), StatusCode::CREATED);
    assert_eq!(
        partial.json::<Value>().await.unwrap(),
        json!({"id": "5", "name": "X", "type": "", "price": 0.0})
    );

    let nulls = client
        .post(format!("{}/items", base))
        .json(&json!({"id": "6", "name": null, "type": "Ship", "price": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(nulls.status(), StatusCode::CREATED);
    assert_eq!(
        nulls.json::<Value>().await.unwrap(),
        json!({"id": "6", "name": "", "type": "Ship", "price": 0.0})
    );

    let empty = client
        .post(format!("{}/items", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::CREATED);

    let fetched: Item = client
        .get(format!("{}/items/6", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, Item::new("6", "", "Ship", 0.0));

    let items: Vec<Item> = reqwest::get(format!("{}/items", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[5], Item::default());
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let base = spawn_catalog(true).await;

    let response = Client::new()
        .post(format!("{}/items", base))
        .json(&json!({"id": "8", "name": "Baz", "type": "Ship", "price": 2.5, "colour": "red"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"id": "8", "name": "Baz", "type": "Ship", "price": 2.5})
    );
}

#[tokio::test]
async fn test_lookup_route_can_be_disabled() {
    let base = spawn_catalog(false).await;

    let list = reqwest::get(format!("{}/items", base)).await.unwrap();
    assert_eq!(list.status(), StatusCode::OK);

    let lookup = reqwest::get(format!("{}/items/1", base)).await.unwrap();
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_are_all_kept() {
    let base = spawn_catalog(true).await;
    let client = Client::new();

    let requests = (0..50).map(|i| {
        let client = client.clone();
        let url = format!("{}/items", base);
        async move {
            client
                .post(url)
                .json(&Item::new(&format!("c{}", i), "Clone", "Ship", i as f64))
                .send()
                .await
                .unwrap()
                .status()
        }
    });
    let statuses = join_all(requests).await;
    assert!(statuses.iter().all(|s| *s == StatusCode::CREATED));

    let items: Vec<Item> = client
        .get(format!("{}/items", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.len(), 53);
    for i in 0..50 {
        let id = format!("c{}", i);
        assert!(items.iter().any(|item| item.id == id), "missing {}", id);
    }
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let base = spawn_catalog(true).await;

    let first = reqwest::get(format!("{}/items", base)).await.unwrap();
    let second = reqwest::get(format!("{}/items/999", base)).await.unwrap();

    let first_id = first.headers()["x-request-id"].to_str().unwrap().to_string();
    let second_id = second.headers()["x-request-id"].to_str().unwrap().to_string();
    assert_eq!(first_id.len(), 36);
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_preflight_is_not_answered() {
    let base = spawn_catalog(true).await;

    let response = Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/items", base))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
