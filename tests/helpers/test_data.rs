//! Seed data builders for integration tests

use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use festplan::database::DatabaseService;
use festplan::models::{
    CreateEventRequest, CreateGuestRequest, CreateTableRequest, Event, Guest, Table,
};

/// Create an event with a unique slug
pub async fn seed_event(db: &DatabaseService) -> Event {
    let slug = format!("test-{}", Uuid::new_v4().simple());
    let request = CreateEventRequest {
        title: "Testbryllup".to_string(),
        event_type: None,
        event_date: None,
        slug: None,
        custom_domain: None,
    };
    db.events
        .create(&slug, &request)
        .await
        .expect("failed to seed event")
}

/// Create a guest with just a name
pub async fn seed_guest(db: &DatabaseService, event_id: i64, name: &str) -> Guest {
    db.guests
        .create(CreateGuestRequest::named(event_id, name))
        .await
        .expect("failed to seed guest")
}

/// Create a table with the given capacity
pub async fn seed_table(db: &DatabaseService, event_id: i64, name: &str, capacity: i32) -> Table {
    let request = CreateTableRequest {
        capacity: Some(capacity),
        ..CreateTableRequest::named(event_id, name)
    };
    db.tables
        .create(request)
        .await
        .expect("failed to seed table")
}

/// A plausible random guest name
pub fn random_guest_name() -> String {
    Name().fake()
}
