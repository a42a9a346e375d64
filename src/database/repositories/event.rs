//! Event repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::event::{CreateEventRequest, Event, EventType, UpdateEventRequest};
use crate::utils::errors::{map_store_error, FestplanError, Result};

const EVENT_COLUMNS: &str = "id, slug, custom_domain, title, event_type, event_date, settings, config, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event. The caller must have settled on a slug already;
    /// slug derivation and collision retries live in the service layer.
    pub async fn create(&self, slug: &str, request: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (slug, custom_domain, title, event_type, event_date, settings, config, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, '{{}}', '{{}}', $6, $6)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(slug)
        .bind(&request.custom_domain)
        .bind(&request.title)
        .bind(request.event_type.unwrap_or(EventType::Wedding).as_str())
        .bind(request.event_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by custom domain
    pub async fn find_by_custom_domain(&self, domain: &str) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE custom_domain = $1"
        ))
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event fields
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                event_type = COALESCE($3, event_type),
                event_date = COALESCE($4, event_date),
                slug = COALESCE($5, slug),
                custom_domain = COALESCE($6, custom_domain),
                updated_at = $7
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.event_type.map(|t| t.as_str()))
        .bind(request.event_date)
        .bind(request.slug)
        .bind(request.custom_domain)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        event.ok_or(FestplanError::EventNotFound { event_id: id })
    }

    /// Delete an event and everything it owns (schema cascades)
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Persist the settings document
    pub async fn save_settings(&self, id: i64, document: &serde_json::Value) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET settings = $2, updated_at = $3
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(document)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or(FestplanError::EventNotFound { event_id: id })
    }

    /// Persist the config document
    pub async fn save_config(&self, id: i64, document: &serde_json::Value) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET config = $2, updated_at = $3
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(document)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or(FestplanError::EventNotFound { event_id: id })
    }
}
