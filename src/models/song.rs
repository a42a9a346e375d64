//! Song request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SongRequest {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub requested_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSongRequest {
    pub event_id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub requested_by: Option<String>,
}
