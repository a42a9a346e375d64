//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    BudgetRepository, DatabasePool, EventRepository, GalleryRepository, GuestRepository,
    SongRepository, TableRepository, WishlistRepository,
};
use crate::utils::errors::{FestplanError, Result};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub guests: GuestRepository,
    pub tables: TableRepository,
    pub wishlist: WishlistRepository,
    pub songs: SongRepository,
    pub gallery: GalleryRepository,
    pub budget: BudgetRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            guests: GuestRepository::new(pool.clone()),
            tables: TableRepository::new(pool.clone()),
            wishlist: WishlistRepository::new(pool.clone()),
            songs: SongRepository::new(pool.clone()),
            gallery: GalleryRepository::new(pool.clone()),
            budget: BudgetRepository::new(pool),
        }
    }

    /// Aggregate counts for the admin dashboard of one event
    pub async fn event_dashboard(&self, event_id: i64) -> Result<serde_json::Value> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(FestplanError::EventNotFound { event_id })?;

        let guests = self.guests.find_by_event(event_id).await?;
        let accepted = guests.iter().filter(|g| g.rsvp_status == "accepted").count();
        let declined = guests.iter().filter(|g| g.rsvp_status == "declined").count();
        let pending = guests.len() - accepted - declined;
        let seated = guests.iter().filter(|g| g.table_id.is_some()).count();

        let table_count = self.tables.count_by_event(event_id).await?;
        let (wishlist_total, wishlist_reserved) = self.wishlist.count_by_event(event_id).await?;
        let song_count = self.songs.count_by_event(event_id).await?;
        let gallery_count = self.gallery.count_by_event(event_id).await?;
        let budget = self.budget.summary(event_id).await?;

        Ok(serde_json::json!({
            "event": {
                "id": event.id,
                "title": event.title,
                "slug": event.slug,
                "eventType": event.event_type,
                "eventDate": event.event_date,
            },
            "guests": {
                "total": guests.len(),
                "accepted": accepted,
                "declined": declined,
                "pending": pending,
                "seated": seated,
            },
            "tables": table_count,
            "wishlist": {
                "total": wishlist_total,
                "reserved": wishlist_reserved,
            },
            "songRequests": song_count,
            "galleryItems": gallery_count,
            "budget": {
                "planned": budget.planned_total,
                "actual": budget.actual_total,
                "paid": budget.paid_total,
            },
        }))
    }
}
