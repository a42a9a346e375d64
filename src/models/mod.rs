//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod budget;
pub mod event;
pub mod gallery;
pub mod guest;
pub mod settings;
pub mod song;
pub mod table;
pub mod wishlist;

// Re-export commonly used models
pub use budget::{BudgetItem, BudgetSummary, CreateBudgetItemRequest, UpdateBudgetItemRequest};
pub use event::{CreateEventRequest, Event, EventType, UpdateEventRequest};
pub use gallery::{CreateGalleryItemRequest, GalleryItem, UpdateGalleryItemRequest};
pub use guest::{Attendance, CreateGuestRequest, Guest, RsvpStatus, UpdateGuestRequest};
pub use settings::{EventConfig, EventSettings};
pub use song::{CreateSongRequest, SongRequest};
pub use table::{
    CreateTableRequest, Table, TableOccupancy, TableShape, UpdateTableRequest,
    DEFAULT_TABLE_CAPACITY,
};
pub use wishlist::{CreateWishlistItemRequest, UpdateWishlistItemRequest, WishlistItem};
