//! Gallery repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::gallery::{CreateGalleryItemRequest, GalleryItem, UpdateGalleryItemRequest};
use crate::utils::errors::{FestplanError, Result};

const GALLERY_COLUMNS: &str = "id, event_id, object_key, caption, sort_order, created_at";

#[derive(Debug, Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register an uploaded image (the object itself lives in external
    /// storage)
    pub async fn create(&self, request: CreateGalleryItemRequest) -> Result<GalleryItem> {
        let item = sqlx::query_as::<_, GalleryItem>(&format!(
            r#"
            INSERT INTO gallery_items (event_id, object_key, caption, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {GALLERY_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.object_key)
        .bind(request.caption)
        .bind(request.sort_order.unwrap_or(0))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// List all gallery items of an event in display order
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<GalleryItem>> {
        let items = sqlx::query_as::<_, GalleryItem>(&format!(
            "SELECT {GALLERY_COLUMNS} FROM gallery_items WHERE event_id = $1 ORDER BY sort_order, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Update caption or display position
    pub async fn update(&self, id: i64, request: UpdateGalleryItemRequest) -> Result<GalleryItem> {
        let item = sqlx::query_as::<_, GalleryItem>(&format!(
            r#"
            UPDATE gallery_items
            SET caption = COALESCE($2, caption),
                sort_order = COALESCE($3, sort_order)
            WHERE id = $1
            RETURNING {GALLERY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.caption)
        .bind(request.sort_order)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(FestplanError::Validation("Fant ikke bildet.".to_string()))
    }

    /// Delete a gallery item
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count gallery items of an event
    pub async fn count_by_event(&self, event_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM gallery_items WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
