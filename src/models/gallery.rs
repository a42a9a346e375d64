//! Photo gallery model
//!
//! Only metadata lives here; the image objects themselves are stored by an
//! external upload service and referenced by object key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryItem {
    pub id: i64,
    pub event_id: i64,
    pub object_key: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGalleryItemRequest {
    pub event_id: i64,
    pub object_key: String,
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGalleryItemRequest {
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}
