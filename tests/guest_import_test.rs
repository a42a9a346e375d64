//! Guest import integration tests
//!
//! The bulk text-import contract against a real database: line and field
//! separators, defaults, skipped rows and the configured row cap.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use festplan::database::DatabaseService;
use festplan::services::{GuestService, ServiceFactory};
use festplan::{FestplanError, Settings};
use helpers::{random_guest_name, seed_event, TestDatabase};

async fn setup() -> (TestDatabase, DatabaseService, ServiceFactory) {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");
    let database = DatabaseService::new(db.pool.clone());
    let services = ServiceFactory::new(&database, Settings::default());
    (db, database, services)
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn import_creates_guests_and_skips_blank_lines() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;

    let created = services
        .guest_service
        .import_guests(event.id, "Ola,99887766,Storgata 1,Forlover\n\nKari;44556677")
        .await
        .unwrap();
    assert_eq!(created, 2);

    let guests = services.guest_service.list_guests(event.id).await.unwrap();
    assert_eq!(guests.len(), 2);

    let ola = guests.iter().find(|g| g.name == "Ola").expect("Ola created");
    assert_eq!(ola.mobile.as_deref(), Some("99887766"));
    assert_eq!(ola.address.as_deref(), Some("Storgata 1"));
    assert_eq!(ola.role.as_deref(), Some("Forlover"));
    assert_eq!(ola.attendance, "dinner");
    assert_eq!(ola.rsvp_status, "pending");

    let kari = guests.iter().find(|g| g.name == "Kari").expect("Kari created");
    assert_eq!(kari.mobile.as_deref(), Some("44556677"));
    assert_eq!(kari.address, None);
    assert_eq!(kari.role, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn import_counts_only_usable_rows() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;

    let created = services
        .guest_service
        .import_guests(event.id, ",no name here\n;;;\nOla\n\t\t\nKari\t123")
        .await
        .unwrap();
    assert_eq!(created, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn import_above_the_row_cap_is_rejected_before_any_write() {
    let (_db, database, _services) = setup().await;
    let event = seed_event(&database).await;

    let mut settings = Settings::default();
    settings.limits.import_max_rows = 3;
    let guest_service = GuestService::new(
        database.guests.clone(),
        database.tables.clone(),
        settings,
    );

    let text: String = (0..5)
        .map(|_| format!("{}\n", random_guest_name()))
        .collect();
    let err = guest_service.import_guests(event.id, &text).await.unwrap_err();
    assert_matches!(err, FestplanError::Validation(_));

    let guests = guest_service.list_guests(event.id).await.unwrap();
    assert!(guests.is_empty());
}
