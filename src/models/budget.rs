//! Budget item model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BudgetItem {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub category: Option<String>,
    pub planned: Decimal,
    pub actual: Option<Decimal>,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBudgetItemRequest {
    pub event_id: i64,
    pub title: String,
    pub category: Option<String>,
    pub planned: Option<Decimal>,
    pub actual: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBudgetItemRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub planned: Option<Decimal>,
    pub actual: Option<Decimal>,
    pub paid: Option<bool>,
}

/// Aggregated totals across an event's budget items
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BudgetSummary {
    pub planned_total: Decimal,
    pub actual_total: Decimal,
    pub paid_total: Decimal,
}
