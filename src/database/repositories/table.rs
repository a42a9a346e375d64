//! Seating table repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::table::{CreateTableRequest, Table, TableShape, UpdateTableRequest};
use crate::models::DEFAULT_TABLE_CAPACITY;
use crate::utils::errors::{map_store_error, FestplanError, Result};

const TABLE_COLUMNS: &str = "id, event_id, name, capacity, shape, position_x, position_y, rotation, locked, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: PgPool,
}

impl TableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new table. A duplicate name within the event surfaces as a
    /// constraint violation carrying the store's message.
    pub async fn create(&self, request: CreateTableRequest) -> Result<Table> {
        let table = sqlx::query_as::<_, Table>(&format!(
            r#"
            INSERT INTO seating_tables (event_id, name, capacity, shape, position_x, position_y, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {TABLE_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.name)
        .bind(request.capacity.unwrap_or(DEFAULT_TABLE_CAPACITY))
        .bind(request.shape.unwrap_or(TableShape::Round).as_str())
        .bind(request.position_x.unwrap_or(0.0))
        .bind(request.position_y.unwrap_or(0.0))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(table)
    }

    /// Find table by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Table>> {
        let table = sqlx::query_as::<_, Table>(&format!(
            "SELECT {TABLE_COLUMNS} FROM seating_tables WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(table)
    }

    /// List all tables of an event
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<Table>> {
        let tables = sqlx::query_as::<_, Table>(&format!(
            "SELECT {TABLE_COLUMNS} FROM seating_tables WHERE event_id = $1 ORDER BY name, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    /// Update table fields
    pub async fn update(&self, id: i64, request: UpdateTableRequest) -> Result<Table> {
        let table = sqlx::query_as::<_, Table>(&format!(
            r#"
            UPDATE seating_tables
            SET name = COALESCE($2, name),
                capacity = COALESCE($3, capacity),
                shape = COALESCE($4, shape),
                position_x = COALESCE($5, position_x),
                position_y = COALESCE($6, position_y),
                rotation = COALESCE($7, rotation),
                locked = COALESCE($8, locked),
                updated_at = $9
            WHERE id = $1
            RETURNING {TABLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.capacity)
        .bind(request.shape.map(|s| s.as_str()))
        .bind(request.position_x)
        .bind(request.position_y)
        .bind(request.rotation)
        .bind(request.locked)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        table.ok_or(FestplanError::TableNotFound { table_id: id })
    }

    /// Delete a table. Guests seated at it are released by the schema
    /// (table_id goes NULL), never deleted.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM seating_tables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Occupant count per table for an event, for the seating chart
    pub async fn occupancy(&self, event_id: i64) -> Result<Vec<(i64, i64)>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT t.id, COUNT(g.id)
            FROM seating_tables t
            LEFT JOIN guests g ON g.table_id = t.id
            WHERE t.event_id = $1
            GROUP BY t.id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count tables of an event
    pub async fn count_by_event(&self, event_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM seating_tables WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
