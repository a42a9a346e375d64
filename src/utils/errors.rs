//! Error handling for festplan
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the festplan backend
#[derive(Error, Debug)]
pub enum FestplanError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("No event registered for site key: {key}")]
    SiteNotFound { key: String },

    #[error("Guest not found: {guest_id}")]
    GuestNotFound { guest_id: i64 },

    #[error("Table not found: {table_id}")]
    TableNotFound { table_id: i64 },

    #[error("Table {table_id} is at capacity ({capacity})")]
    TableFull { table_id: i64, capacity: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for festplan operations
pub type Result<T> = std::result::Result<T, FestplanError>;

/// Map a store error, lifting unique violations into `Constraint` so the
/// original database message can be surfaced to the caller.
pub fn map_store_error(err: sqlx::Error) -> FestplanError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            FestplanError::Constraint(db.message().to_string())
        }
        _ => FestplanError::Database(err),
    }
}

impl FestplanError {
    /// Classify the error for the action layer
    pub fn category(&self) -> ErrorCategory {
        match self {
            FestplanError::EventNotFound { .. }
            | FestplanError::SiteNotFound { .. }
            | FestplanError::GuestNotFound { .. }
            | FestplanError::TableNotFound { .. } => ErrorCategory::NotFound,
            FestplanError::Validation(_) | FestplanError::TableFull { .. } => {
                ErrorCategory::Validation
            }
            FestplanError::Constraint(_) => ErrorCategory::Constraint,
            _ => ErrorCategory::Internal,
        }
    }

    /// User-facing message, in the product language.
    ///
    /// Constraint violations carry the store's message verbatim behind a
    /// localized prefix; internal failures collapse to a generic message so
    /// nothing about the store leaks to guests.
    pub fn user_message(&self) -> String {
        match self {
            FestplanError::EventNotFound { .. } => "Fant ikke arrangementet.".to_string(),
            FestplanError::SiteNotFound { .. } => {
                "Fant ingen side for denne adressen.".to_string()
            }
            FestplanError::GuestNotFound { .. } => "Fant ikke gjesten.".to_string(),
            FestplanError::TableNotFound { .. } => "Fant ikke bordet.".to_string(),
            FestplanError::TableFull { capacity, .. } => {
                format!("Bordet er fullt ({} plasser).", capacity)
            }
            FestplanError::Validation(msg) => msg.clone(),
            FestplanError::Constraint(msg) => format!("Kunne ikke lagre: {}", msg),
            _ => "Noe gikk galt. Prøv igjen senere.".to_string(),
        }
    }
}

/// Error categories as the action layer reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Constraint,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::NotFound => write!(f, "NOT_FOUND"),
            ErrorCategory::Validation => write!(f, "VALIDATION"),
            ErrorCategory::Constraint => write!(f, "CONSTRAINT"),
            ErrorCategory::Internal => write!(f, "INTERNAL"),
        }
    }
}
