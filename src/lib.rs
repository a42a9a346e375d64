//! Festplan event-planning backend
//!
//! Server-side action layer for a multi-tenant event-planning service
//! (weddings, christenings, jubilees). This library provides guest-list and
//! partner-link management, seating charts, wishlists, song requests, photo
//! gallery metadata, budget tracking, and the settings resolver behind each
//! event's guest-facing microsite. A host web server embeds it and maps its
//! structured results onto HTTP responses.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ErrorCategory, FestplanError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
