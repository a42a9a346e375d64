//! Budget repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::budget::{
    BudgetItem, BudgetSummary, CreateBudgetItemRequest, UpdateBudgetItemRequest,
};
use crate::utils::errors::{FestplanError, Result};

const BUDGET_COLUMNS: &str =
    "id, event_id, title, category, planned, actual, paid, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct BudgetRepository {
    pool: PgPool,
}

impl BudgetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new budget item
    pub async fn create(&self, request: CreateBudgetItemRequest) -> Result<BudgetItem> {
        let item = sqlx::query_as::<_, BudgetItem>(&format!(
            r#"
            INSERT INTO budget_items (event_id, title, category, planned, actual, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, 0), $5, $6, $6)
            RETURNING {BUDGET_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.title)
        .bind(request.category)
        .bind(request.planned)
        .bind(request.actual)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// List all budget items of an event
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<BudgetItem>> {
        let items = sqlx::query_as::<_, BudgetItem>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budget_items WHERE event_id = $1 ORDER BY created_at, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Update budget item fields
    pub async fn update(&self, id: i64, request: UpdateBudgetItemRequest) -> Result<BudgetItem> {
        let item = sqlx::query_as::<_, BudgetItem>(&format!(
            r#"
            UPDATE budget_items
            SET title = COALESCE($2, title),
                category = COALESCE($3, category),
                planned = COALESCE($4, planned),
                actual = COALESCE($5, actual),
                paid = COALESCE($6, paid),
                updated_at = $7
            WHERE id = $1
            RETURNING {BUDGET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.category)
        .bind(request.planned)
        .bind(request.actual)
        .bind(request.paid)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(FestplanError::Validation(
            "Fant ikke budsjettposten.".to_string(),
        ))
    }

    /// Delete a budget item
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM budget_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Aggregate totals for the budget overview
    pub async fn summary(&self, event_id: i64) -> Result<BudgetSummary> {
        let summary = sqlx::query_as::<_, BudgetSummary>(
            r#"
            SELECT COALESCE(SUM(planned), 0) AS planned_total,
                   COALESCE(SUM(actual), 0) AS actual_total,
                   COALESCE(SUM(actual) FILTER (WHERE paid), 0) AS paid_total
            FROM budget_items
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
