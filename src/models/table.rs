//! Seating table model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Table {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub capacity: i32,
    pub shape: String,
    pub position_x: f64,
    pub position_y: f64,
    pub rotation: f64,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_TABLE_CAPACITY: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Round,
    Rectangle,
}

impl TableShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableShape::Round => "round",
            TableShape::Rectangle => "rectangle",
        }
    }
}

impl From<&str> for TableShape {
    fn from(value: &str) -> Self {
        match value {
            "rectangle" => TableShape::Rectangle,
            _ => TableShape::Round,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTableRequest {
    pub event_id: i64,
    pub name: String,
    pub capacity: Option<i32>,
    pub shape: Option<TableShape>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

impl CreateTableRequest {
    pub fn named(event_id: i64, name: impl Into<String>) -> Self {
        Self {
            event_id,
            name: name.into(),
            capacity: None,
            shape: None,
            position_x: None,
            position_y: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub shape: Option<TableShape>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub rotation: Option<f64>,
    pub locked: Option<bool>,
}

/// A table together with its current occupant count, as the seating
/// chart renders it. Capacity is advisory; `seated` can exceed it.
#[derive(Debug, Clone, Serialize)]
pub struct TableOccupancy {
    pub table: Table,
    pub seated: i64,
}

impl TableOccupancy {
    /// Seats left as the UI displays them, clamped at zero.
    pub fn remaining(&self) -> i64 {
        (self.table.capacity as i64 - self.seated).max(0)
    }
}
