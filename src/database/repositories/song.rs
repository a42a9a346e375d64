//! Song request repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::song::{CreateSongRequest, SongRequest};
use crate::utils::errors::Result;

const SONG_COLUMNS: &str = "id, event_id, title, artist, requested_by, created_at";

#[derive(Debug, Clone)]
pub struct SongRepository {
    pool: PgPool,
}

impl SongRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new song request
    pub async fn create(&self, request: CreateSongRequest) -> Result<SongRequest> {
        let song = sqlx::query_as::<_, SongRequest>(&format!(
            r#"
            INSERT INTO song_requests (event_id, title, artist, requested_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SONG_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.title)
        .bind(request.artist)
        .bind(request.requested_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(song)
    }

    /// List all song requests of an event, newest first
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<SongRequest>> {
        let songs = sqlx::query_as::<_, SongRequest>(&format!(
            "SELECT {SONG_COLUMNS} FROM song_requests WHERE event_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    /// Delete a song request
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM song_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count song requests of an event
    pub async fn count_by_event(&self, event_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM song_requests WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
