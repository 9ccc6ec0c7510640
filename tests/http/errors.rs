use std::fs;
use std::sync::Arc;

use item_store::{InMemoryRecordStore, JsonFileStore};
use serde_json::{json, Value};

use crate::support::start_server;

#[tokio::test]
async fn missing_item_returns_404_detail() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/items/7")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Item not found" }));

    let resp = client
        .put(format!("{base}/items/7"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/items/7"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn body_without_name_returns_422() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/items"))
        .json(&json!({ "title": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn non_integer_id_returns_422() {
    let base = start_server(Arc::new(InMemoryRecordStore::new())).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/items/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn corrupt_file_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "not json").unwrap();

    let base = start_server(Arc::new(JsonFileStore::open(&path))).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/items")).send().await.unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("corrupt"));
}

#[tokio::test]
async fn unwritable_file_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, r#"[{"id": 1, "name": "A"}]"#).unwrap();
    fs::create_dir(dir.path().join("data.json.tmp")).unwrap();

    let base = start_server(Arc::new(JsonFileStore::open(&path))).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/items"))
        .json(&json!({ "name": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("storage unavailable"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"[{"id": 1, "name": "A"}]"#
    );
}
