//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub slug: String,
    pub custom_domain: Option<String>,
    pub title: String,
    pub event_type: String,
    pub event_date: Option<DateTime<Utc>>,
    pub settings: serde_json::Value,
    pub config: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Wedding,
    Christening,
    Confirmation,
    Jubilee,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Christening => "christening",
            EventType::Confirmation => "confirmation",
            EventType::Jubilee => "jubilee",
            EventType::Other => "other",
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "wedding" => EventType::Wedding,
            "christening" => EventType::Christening,
            "confirmation" => EventType::Confirmation,
            "jubilee" => EventType::Jubilee,
            _ => EventType::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_type: Option<EventType>,
    pub event_date: Option<DateTime<Utc>>,
    pub slug: Option<String>,
    pub custom_domain: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub event_type: Option<EventType>,
    pub event_date: Option<DateTime<Utc>>,
    pub slug: Option<String>,
    pub custom_domain: Option<String>,
}
