//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod guest;
pub mod landing;
pub mod settings;
pub mod table;

// Re-export commonly used services
pub use event::EventService;
pub use guest::{parse_import_text, GuestService, ImportRow};
pub use landing::{landing_sections, LandingLink, LandingSection, LinkPart, LinkTarget};
pub use settings::{migrate_layout, resolve_config, resolve_settings};
pub use table::TableService;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub guest_service: GuestService,
    pub table_service: TableService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: &DatabaseService, settings: Settings) -> Self {
        let event_service = EventService::new(database.events.clone(), settings.clone());
        let guest_service = GuestService::new(
            database.guests.clone(),
            database.tables.clone(),
            settings.clone(),
        );
        let table_service =
            TableService::new(database.tables.clone(), database.guests.clone(), settings);

        Self {
            event_service,
            guest_service,
            table_service,
        }
    }

    /// Health check for the service layer's only external dependency
    pub async fn health_check(&self, pool: &crate::database::DatabasePool) -> Result<()> {
        crate::database::health_check(pool).await
    }
}
