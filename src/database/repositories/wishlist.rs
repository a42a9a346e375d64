//! Wishlist repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::wishlist::{
    CreateWishlistItemRequest, UpdateWishlistItemRequest, WishlistItem,
};
use crate::utils::errors::{FestplanError, Result};

const WISHLIST_COLUMNS: &str =
    "id, event_id, title, description, url, price, reserved, reserved_by, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new wishlist item
    pub async fn create(&self, request: CreateWishlistItemRequest) -> Result<WishlistItem> {
        let item = sqlx::query_as::<_, WishlistItem>(&format!(
            r#"
            INSERT INTO wishlist_items (event_id, title, description, url, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {WISHLIST_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.url)
        .bind(request.price)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Find item by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<WishlistItem>> {
        let item = sqlx::query_as::<_, WishlistItem>(&format!(
            "SELECT {WISHLIST_COLUMNS} FROM wishlist_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// List all wishlist items of an event
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<WishlistItem>> {
        let items = sqlx::query_as::<_, WishlistItem>(&format!(
            "SELECT {WISHLIST_COLUMNS} FROM wishlist_items WHERE event_id = $1 ORDER BY created_at, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Update item fields
    pub async fn update(
        &self,
        id: i64,
        request: UpdateWishlistItemRequest,
    ) -> Result<WishlistItem> {
        let item = sqlx::query_as::<_, WishlistItem>(&format!(
            r#"
            UPDATE wishlist_items
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                url = COALESCE($4, url),
                price = COALESCE($5, price),
                updated_at = $6
            WHERE id = $1
            RETURNING {WISHLIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.url)
        .bind(request.price)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(FestplanError::Validation(
            "Fant ikke ønskelisteelementet.".to_string(),
        ))
    }

    /// Mark an item reserved (or release it). Guests mark gifts as taken
    /// from the microsite.
    pub async fn set_reserved(
        &self,
        id: i64,
        reserved: bool,
        reserved_by: Option<String>,
    ) -> Result<WishlistItem> {
        let item = sqlx::query_as::<_, WishlistItem>(&format!(
            r#"
            UPDATE wishlist_items
            SET reserved = $2, reserved_by = $3, updated_at = $4
            WHERE id = $1
            RETURNING {WISHLIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(reserved)
        .bind(reserved_by)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(FestplanError::Validation(
            "Fant ikke ønskelisteelementet.".to_string(),
        ))
    }

    /// Delete an item
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM wishlist_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count items of an event, split by reservation status
    pub async fn count_by_event(&self, event_id: i64) -> Result<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE reserved) FROM wishlist_items WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
