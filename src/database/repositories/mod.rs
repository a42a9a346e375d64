//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod budget;
pub mod event;
pub mod gallery;
pub mod guest;
pub mod song;
pub mod table;
pub mod wishlist;

// Re-export repositories
pub use budget::BudgetRepository;
pub use event::EventRepository;
pub use gallery::GalleryRepository;
pub use guest::GuestRepository;
pub use song::SongRepository;
pub use table::TableRepository;
pub use wishlist::WishlistRepository;
