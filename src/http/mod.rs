//! HTTP transport - maps REST requests onto a `RecordStore`.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /items` - create from `{ "name": ... }`, answers `201` with the record.
//! - `GET /items` - every record in stored order.
//! - `GET /items/:id` - one record, `404` if absent.
//! - `PUT /items/:id` - replace the name from `{ "name": ... }`, `404` if absent.
//! - `DELETE /items/:id` - `{ "message": "Item deleted successfully" }`, `404` if absent.
//! - `GET /search?name=...` - case-insensitive substring match on names.
//! - `GET /health` - `{ "ok": true }`.
//!
//! Malformed bodies, ids or queries answer `422` with `{ "detail": ... }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use item_store::{http, JsonFileStore};
//!
//! let store = Arc::new(JsonFileStore::open("data.json"));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(store.clone());
//!
//! // Or serve directly
//! http::serve(store, "0.0.0.0:8000").await?;
//! ```

mod error;
mod schema;

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::record::{Record, RecordId};
use crate::store::RecordStore;

pub use error::{ApiError, ApiResult};
pub use schema::{
    CreateItem, ErrorBody, HealthBody, MessageBody, SearchQuery, UpdateItem, DELETED_MESSAGE,
};

/// Build an axum `Router` serving the item routes from the given store.
pub fn router<S: RecordStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/items", get(list_items::<S>).post(create_item::<S>))
        .route(
            "/items/:id",
            get(get_item::<S>)
                .put(update_item::<S>)
                .delete(delete_item::<S>),
        )
        .route("/search", get(search_items::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve the store over HTTP at the given address (e.g. `"0.0.0.0:8000"`).
pub async fn serve<S, A>(store: Arc<S>, addr: A) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
    A: ToSocketAddrs,
{
    serve_with_shutdown(store, addr, std::future::pending()).await
}

/// Like [`serve`], but stops accepting connections once `shutdown` resolves.
pub async fn serve_with_shutdown<S, A, F>(
    store: Arc<S>,
    addr: A,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
    A: ToSocketAddrs,
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "item API listening");
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health` - returns `{ "ok": true }`.
async fn health_handler() -> Json<HealthBody> {
    Json(HealthBody { ok: true })
}

/// `POST /items`
async fn create_item<S: RecordStore + 'static>(
    State(store): State<Arc<S>>,
    body: Result<Json<CreateItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let Json(body) = body?;
    let record = store.create(body.into())?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /items`
async fn list_items<S: RecordStore + 'static>(
    State(store): State<Arc<S>>,
) -> ApiResult<Json<Vec<Record>>> {
    Ok(Json(store.list()?))
}

/// `GET /items/:id`
async fn get_item<S: RecordStore + 'static>(
    State(store): State<Arc<S>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<Record>> {
    let Path(id) = id?;
    Ok(Json(store.get(id)?))
}

/// `PUT /items/:id`
async fn update_item<S: RecordStore + 'static>(
    State(store): State<Arc<S>>,
    id: Result<Path<RecordId>, PathRejection>,
    body: Result<Json<UpdateItem>, JsonRejection>,
) -> ApiResult<Json<Record>> {
    let Path(id) = id?;
    let Json(body) = body?;
    Ok(Json(store.update(id, body.into())?))
}

/// `DELETE /items/:id`
async fn delete_item<S: RecordStore + 'static>(
    State(store): State<Arc<S>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<MessageBody>> {
    let Path(id) = id?;
    store.delete(id)?;
    Ok(Json(MessageBody {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// `GET /search?name=...`
async fn search_items<S: RecordStore + 'static>(
    State(store): State<Arc<S>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Record>>> {
    let Query(query) = query?;
    Ok(Json(store.search(&query.name)?))
}
