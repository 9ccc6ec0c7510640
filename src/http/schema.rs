//! Request and response shapes for the REST surface.

use serde::{Deserialize, Serialize};

use crate::record::{NewRecord, RecordPatch};

pub const DELETED_MESSAGE: &str = "Item deleted successfully";

/// `POST /items` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    pub name: String,
}

impl From<CreateItem> for NewRecord {
    fn from(body: CreateItem) -> Self {
        NewRecord { name: body.name }
    }
}

/// `PUT /items/:id` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItem {
    pub name: String,
}

impl From<UpdateItem> for RecordPatch {
    fn from(body: UpdateItem) -> Self {
        RecordPatch { name: body.name }
    }
}

/// `GET /search` query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub ok: bool,
}
