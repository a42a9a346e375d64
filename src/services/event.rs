//! Event service implementation
//!
//! Event lifecycle, slug derivation and microsite routing, plus persistence
//! of the settings and config documents. Documents are always re-resolved
//! server-side before a write: the client's merged state is never trusted.

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::database::repositories::EventRepository;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::models::settings::{EventConfig, EventSettings};
use crate::services::settings as resolver;
use crate::utils::errors::{FestplanError, Result};
use crate::utils::helpers::{random_slug_suffix, slugify};
use crate::utils::logging;

const SLUG_RETRY_ATTEMPTS: usize = 3;

/// Event service for managing event lifecycle and documents
#[derive(Debug, Clone)]
pub struct EventService {
    event_repository: EventRepository,
    settings: Settings,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(event_repository: EventRepository, settings: Settings) -> Self {
        Self {
            event_repository,
            settings,
        }
    }

    /// Create a new event.
    ///
    /// A supplied slug is validated and used as-is; without one the slug is
    /// derived from the title, retrying with a random suffix when the
    /// derived slug is already taken.
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        if request.title.trim().is_empty() {
            return Err(FestplanError::Validation(
                "Arrangementet må ha en tittel.".to_string(),
            ));
        }

        if let Some(slug) = &request.slug {
            self.validate_slug(slug)?;
            let event = self.event_repository.create(slug, &request).await?;
            info!(event_id = event.id, slug = %event.slug, "Event created");
            return Ok(event);
        }

        let base = slugify(&request.title);
        if base.is_empty() {
            return Err(FestplanError::Validation(
                "Kunne ikke lage en adresse av tittelen.".to_string(),
            ));
        }

        let mut slug = base.clone();
        let mut last_err = None;
        for attempt in 0..=SLUG_RETRY_ATTEMPTS {
            if attempt > 0 {
                slug = format!("{}-{}", base, random_slug_suffix(4));
                debug!(slug = %slug, attempt = attempt, "Retrying derived slug");
            }
            match self.event_repository.create(&slug, &request).await {
                Ok(event) => {
                    info!(event_id = event.id, slug = %event.slug, "Event created");
                    return Ok(event);
                }
                Err(err @ FestplanError::Constraint(_)) => {
                    warn!(slug = %slug, "Derived slug collided");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            FestplanError::Validation("Kunne ikke opprette arrangementet.".to_string())
        }))
    }

    /// Get an event by ID
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(FestplanError::EventNotFound { event_id })
    }

    /// Update event fields
    pub async fn update_event(&self, event_id: i64, request: UpdateEventRequest) -> Result<Event> {
        if let Some(slug) = &request.slug {
            self.validate_slug(slug)?;
        }

        let event = self.event_repository.update(event_id, request).await?;
        info!(event_id = event.id, "Event updated");
        Ok(event)
    }

    /// Delete an event and everything it owns
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        // Surface not-found before the idempotent DELETE hides it
        self.get_event(event_id).await?;
        self.event_repository.delete(event_id).await?;
        info!(event_id = event_id, "Event deleted");
        Ok(())
    }

    /// Resolve a microsite routing key to its event: custom domain first,
    /// slug second.
    pub async fn resolve_site_key(&self, key: &str) -> Result<Event> {
        if let Some(event) = self.event_repository.find_by_custom_domain(key).await? {
            return Ok(event);
        }
        if let Some(event) = self.event_repository.find_by_slug(key).await? {
            return Ok(event);
        }

        Err(FestplanError::SiteNotFound {
            key: key.to_string(),
        })
    }

    /// Load the event's settings, resolved against defaults. The layout
    /// migration runs on every load, so legacy rows are usable without ever
    /// having been re-saved.
    pub async fn load_settings(&self, event_id: i64) -> Result<EventSettings> {
        let event = self.get_event(event_id).await?;
        Ok(resolver::resolve_settings(Some(&event.settings)))
    }

    /// Persist a settings document submitted from the admin UI.
    ///
    /// The incoming document is re-resolved (merged, defaulted, migrated)
    /// before the write; the stored document is always the full view.
    pub async fn save_settings(
        &self,
        event_id: i64,
        incoming: &serde_json::Value,
    ) -> Result<EventSettings> {
        let resolved = resolver::resolve_settings(Some(incoming));
        let document = serde_json::to_value(&resolved)?;
        self.event_repository.save_settings(event_id, &document).await?;
        logging::log_settings_saved(event_id, "settings");
        Ok(resolved)
    }

    /// Load the event's module-toggle config, resolved against defaults
    pub async fn load_config(&self, event_id: i64) -> Result<EventConfig> {
        let event = self.get_event(event_id).await?;
        Ok(resolver::resolve_config(Some(&event.config)))
    }

    /// Persist a config document, re-resolved server-side like settings
    pub async fn save_config(
        &self,
        event_id: i64,
        incoming: &serde_json::Value,
    ) -> Result<EventConfig> {
        let resolved = resolver::resolve_config(Some(incoming));
        let document = serde_json::to_value(&resolved)?;
        self.event_repository.save_config(event_id, &document).await?;
        logging::log_settings_saved(event_id, "config");
        Ok(resolved)
    }

    /// A slug must be non-empty lowercase ASCII letters, digits or hyphens,
    /// and must not shadow a reserved path.
    fn validate_slug(&self, slug: &str) -> Result<()> {
        if slug.is_empty()
            || !slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(FestplanError::Validation(format!(
                "Ugyldig adresse: {}",
                slug
            )));
        }

        if self.settings.site.reserved_slugs.iter().any(|r| r == slug) {
            return Err(FestplanError::Validation(format!(
                "Adressen er reservert: {}",
                slug
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::EventRepository;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool never connects, but building it still needs a runtime.
    fn service() -> EventService {
        let pool = PgPoolOptions::new().connect_lazy("postgresql://localhost/festplan");
        EventService::new(
            EventRepository::new(pool.expect("lazy pool")),
            Settings::default(),
        )
    }

    #[tokio::test]
    async fn test_validate_slug_rules() {
        let service = service();
        assert!(service.validate_slug("kari-og-ola").is_ok());
        assert!(service.validate_slug("dap2026").is_ok());
        assert!(service.validate_slug("").is_err());
        assert!(service.validate_slug("Kari").is_err());
        assert!(service.validate_slug("kari og ola").is_err());
        assert!(service.validate_slug("admin").is_err());
    }
}
