use std::sync::Arc;

use item_store::{InMemoryRecordStore, JsonFileStore, RecordStore};
use serde_json::{json, Value};

use crate::support::{create_item, start_server};

#[tokio::test]
async fn health_check() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn create_returns_201_with_record() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    let body = create_item(&client, &base, "A").await;
    assert_eq!(body, json!({ "id": 1, "name": "A" }));
}

#[tokio::test]
async fn list_returns_stored_order() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    create_item(&client, &base, "first").await;
    create_item(&client, &base, "second").await;

    let resp = client.get(format!("{base}/items")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!([{ "id": 1, "name": "first" }, { "id": 2, "name": "second" }])
    );
}

#[tokio::test]
async fn get_update_delete_cycle() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    create_item(&client, &base, "before").await;

    // Get
    let resp = client.get(format!("{base}/items/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "name": "before" }));

    // Update
    let resp = client
        .put(format!("{base}/items/1"))
        .json(&json!({ "name": "after" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "name": "after" }));

    // Delete
    let resp = client
        .delete(format!("{base}/items/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Item deleted successfully" }));

    // Gone
    let resp = client.get(format!("{base}/items/1")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn scenario_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let base = start_server(Arc::new(JsonFileStore::open(&path))).await;
    let client = reqwest::Client::new();

    assert_eq!(create_item(&client, &base, "A").await, json!({ "id": 1, "name": "A" }));
    assert_eq!(create_item(&client, &base, "B").await, json!({ "id": 2, "name": "B" }));

    let resp = client
        .delete(format!("{base}/items/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(create_item(&client, &base, "C").await, json!({ "id": 3, "name": "C" }));

    let resp = client.get(format!("{base}/items")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!([{ "id": 2, "name": "B" }, { "id": 3, "name": "C" }])
    );

    // The file on disk matches what the API reports.
    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.list().unwrap().len(), 2);
}
