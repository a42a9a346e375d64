//! Partner-link integration tests
//!
//! Exercises the symmetric, exclusive partner relation against a real
//! PostgreSQL database. Run with a database available:
//! `TEST_DATABASE_URL=... cargo test -- --ignored` (or with Docker for
//! testcontainers).

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use festplan::database::DatabaseService;
use festplan::models::CreateGuestRequest;
use festplan::services::ServiceFactory;
use festplan::{FestplanError, Settings};
use helpers::{seed_event, seed_guest, TestDatabase};

async fn setup() -> (TestDatabase, DatabaseService, ServiceFactory) {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.expect("cleanup");
    let database = DatabaseService::new(db.pool.clone());
    let services = ServiceFactory::new(&database, Settings::default());
    (db, database, services)
}

async fn partner_of(database: &DatabaseService, guest_id: i64) -> Option<i64> {
    database
        .guests
        .find_by_id(guest_id)
        .await
        .expect("find guest")
        .expect("guest exists")
        .partner_id
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn reassignment_moves_the_link_and_clears_the_old_partner() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;
    let b = seed_guest(&database, event.id, "Bjørn").await;
    let c = seed_guest(&database, event.id, "Cecilie").await;

    services.guest_service.set_partner(a.id, Some(b.id)).await.unwrap();
    assert_eq!(partner_of(&database, a.id).await, Some(b.id));
    assert_eq!(partner_of(&database, b.id).await, Some(a.id));

    services.guest_service.set_partner(a.id, Some(c.id)).await.unwrap();
    assert_eq!(partner_of(&database, a.id).await, Some(c.id));
    assert_eq!(partner_of(&database, c.id).await, Some(a.id));
    assert_eq!(partner_of(&database, b.id).await, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn clearing_an_absent_link_is_a_no_op() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;

    services.guest_service.set_partner(a.id, None).await.unwrap();
    assert_eq!(partner_of(&database, a.id).await, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn relinking_to_the_same_partner_is_idempotent() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;
    let b = seed_guest(&database, event.id, "Bjørn").await;

    services.guest_service.set_partner(a.id, Some(b.id)).await.unwrap();
    services.guest_service.set_partner(a.id, Some(b.id)).await.unwrap();

    assert_eq!(partner_of(&database, a.id).await, Some(b.id));
    assert_eq!(partner_of(&database, b.id).await, Some(a.id));
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn new_partner_evicts_their_previous_partner() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;
    let b = seed_guest(&database, event.id, "Bjørn").await;
    let c = seed_guest(&database, event.id, "Cecilie").await;

    services.guest_service.set_partner(a.id, Some(b.id)).await.unwrap();
    // C claims B; A must lose its link so B has exactly one partner
    services.guest_service.set_partner(c.id, Some(b.id)).await.unwrap();

    assert_eq!(partner_of(&database, c.id).await, Some(b.id));
    assert_eq!(partner_of(&database, b.id).await, Some(c.id));
    assert_eq!(partner_of(&database, a.id).await, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn deleting_a_guest_severs_the_link() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;
    let b = seed_guest(&database, event.id, "Bjørn").await;

    services.guest_service.set_partner(a.id, Some(b.id)).await.unwrap();
    services.guest_service.delete_guest(a.id).await.unwrap();

    assert!(database.guests.find_by_id(a.id).await.unwrap().is_none());
    assert_eq!(partner_of(&database, b.id).await, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn self_partner_is_rejected_before_the_store() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;

    let err = services
        .guest_service
        .set_partner(a.id, Some(a.id))
        .await
        .unwrap_err();
    assert_matches!(err, FestplanError::Validation(_));
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn cross_event_partner_is_rejected() {
    let (_db, database, services) = setup().await;
    let event_one = seed_event(&database).await;
    let event_two = seed_event(&database).await;
    let a = seed_guest(&database, event_one.id, "Anne").await;
    let b = seed_guest(&database, event_two.id, "Bjørn").await;

    let err = services
        .guest_service
        .set_partner(a.id, Some(b.id))
        .await
        .unwrap_err();
    assert_matches!(err, FestplanError::Validation(_));
    assert_eq!(partner_of(&database, a.id).await, None);
    assert_eq!(partner_of(&database, b.id).await, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn unknown_partner_aborts_without_partial_writes() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let a = seed_guest(&database, event.id, "Anne").await;
    let b = seed_guest(&database, event.id, "Bjørn").await;
    services.guest_service.set_partner(a.id, Some(b.id)).await.unwrap();

    let err = services
        .guest_service
        .set_partner(a.id, Some(999_999))
        .await
        .unwrap_err();
    assert_matches!(err, FestplanError::GuestNotFound { .. });

    // The existing link survives untouched
    assert_eq!(partner_of(&database, a.id).await, Some(b.id));
    assert_eq!(partner_of(&database, b.id).await, Some(a.id));
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn create_with_initial_partner_links_both_directions() {
    let (_db, database, services) = setup().await;
    let event = seed_event(&database).await;
    let b = seed_guest(&database, event.id, "Bjørn").await;

    let request = CreateGuestRequest {
        partner_id: Some(b.id),
        ..CreateGuestRequest::named(event.id, "Anne")
    };
    let a = services.guest_service.create_guest(request).await.unwrap();

    assert_eq!(a.partner_id, Some(b.id));
    assert_eq!(partner_of(&database, b.id).await, Some(a.id));
}
