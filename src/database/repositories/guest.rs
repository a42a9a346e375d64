//! Guest repository implementation
//!
//! Besides plain CRUD this repository owns the partner-relink transaction:
//! the symmetric, exclusive partner relation is maintained entirely here,
//! never by schema constraints.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::guest::{Attendance, CreateGuestRequest, Guest, UpdateGuestRequest};
use crate::models::RsvpStatus;
use crate::utils::errors::{map_store_error, FestplanError, Result};

const GUEST_COLUMNS: &str = "id, event_id, name, attendance, rsvp_status, allergies, mobile, address, email, role, table_id, partner_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new guest.
    ///
    /// When the request carries an initial partner, the insert and the
    /// partner link are one transaction: either the guest exists fully
    /// linked or not at all.
    pub async fn create(&self, request: CreateGuestRequest) -> Result<Guest> {
        let mut tx = self.pool.begin().await?;

        let guest = sqlx::query_as::<_, Guest>(&format!(
            r#"
            INSERT INTO guests (event_id, name, attendance, rsvp_status, allergies, mobile, address, email, role, table_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.name)
        .bind(request.attendance.unwrap_or(Attendance::Dinner).as_str())
        .bind(RsvpStatus::Pending.as_str())
        .bind(request.allergies)
        .bind(request.mobile)
        .bind(request.address)
        .bind(request.email)
        .bind(request.role)
        .bind(request.table_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_store_error)?;

        let guest = match request.partner_id {
            Some(partner_id) => {
                relink(&mut tx, guest.id, Some(partner_id)).await?;
                fetch_in_tx(&mut tx, guest.id)
                    .await?
                    .ok_or(FestplanError::GuestNotFound { guest_id: guest.id })?
            }
            None => guest,
        };

        tx.commit().await?;
        Ok(guest)
    }

    /// Find guest by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Guest>> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guest)
    }

    /// List all guests of an event
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<Guest>> {
        let guests = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = $1 ORDER BY name, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// List guests of an event that have no table assignment
    pub async fn find_unassigned(&self, event_id: i64) -> Result<Vec<Guest>> {
        let guests = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = $1 AND table_id IS NULL ORDER BY name, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// Update guest fields (partner and table assignment have their own
    /// operations)
    pub async fn update(&self, id: i64, request: UpdateGuestRequest) -> Result<Guest> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            r#"
            UPDATE guests
            SET name = COALESCE($2, name),
                attendance = COALESCE($3, attendance),
                rsvp_status = COALESCE($4, rsvp_status),
                allergies = COALESCE($5, allergies),
                mobile = COALESCE($6, mobile),
                address = COALESCE($7, address),
                email = COALESCE($8, email),
                role = COALESCE($9, role),
                updated_at = $10
            WHERE id = $1
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.attendance.map(|a| a.as_str()))
        .bind(request.rsvp_status.map(|s| s.as_str()))
        .bind(request.allergies)
        .bind(request.mobile)
        .bind(request.address)
        .bind(request.email)
        .bind(request.role)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        guest.ok_or(FestplanError::GuestNotFound { guest_id: id })
    }

    /// Record a guest's RSVP answer
    pub async fn set_rsvp(
        &self,
        id: i64,
        status: RsvpStatus,
        allergies: Option<String>,
    ) -> Result<Guest> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            r#"
            UPDATE guests
            SET rsvp_status = $2,
                allergies = COALESCE($3, allergies),
                updated_at = $4
            WHERE id = $1
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(allergies)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        guest.ok_or(FestplanError::GuestNotFound { guest_id: id })
    }

    /// Write a table assignment. Capacity checking happens in the service
    /// layer and is advisory only.
    pub async fn assign_table(&self, id: i64, table_id: Option<i64>) -> Result<Guest> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            r#"
            UPDATE guests
            SET table_id = $2, updated_at = $3
            WHERE id = $1
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(table_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        guest.ok_or(FestplanError::GuestNotFound { guest_id: id })
    }

    /// Count guests currently seated at a table
    pub async fn count_at_table(&self, table_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests WHERE table_id = $1")
            .bind(table_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count guests of an event
    pub async fn count_by_event(&self, event_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Relink the guest's partner reference.
    ///
    /// Runs the full relink sequence in one transaction; no partial link
    /// state can persist. `set_partner(id, None)` severs the link.
    pub async fn set_partner(&self, guest_id: i64, desired: Option<i64>) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        relink(&mut tx, guest_id, desired).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Delete a guest, severing any partner link first so the surviving
    /// partner is not left pointing at a dead row. One transaction.
    pub async fn delete(&self, guest_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        relink(&mut tx, guest_id, None).await?;
        sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(guest_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn fetch_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    guest_id: i64,
) -> Result<Option<Guest>> {
    let guest = sqlx::query_as::<_, Guest>(&format!(
        "SELECT {GUEST_COLUMNS} FROM guests WHERE id = $1"
    ))
    .bind(guest_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(guest)
}

/// The relink sequence. Caller owns the transaction.
///
/// Postcondition: X.partner == Y iff Y.partner == X, and no guest has more
/// than one incoming partner reference.
async fn relink(
    tx: &mut Transaction<'_, Postgres>,
    guest_id: i64,
    desired: Option<i64>,
) -> Result<()> {
    // Lock the principal rows in ascending id order so two concurrent
    // relinks over the same pair serialize instead of deadlocking.
    let mut lock_ids = vec![guest_id];
    if let Some(d) = desired {
        lock_ids.push(d);
    }
    lock_ids.sort_unstable();
    lock_ids.dedup();

    let mut locked: HashMap<i64, (i64, Option<i64>)> = HashMap::new();
    for id in &lock_ids {
        let row: Option<(i64, i64, Option<i64>)> = sqlx::query_as(
            "SELECT id, event_id, partner_id FROM guests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        match row {
            Some((id, event_id, partner_id)) => {
                locked.insert(id, (event_id, partner_id));
            }
            None => return Err(FestplanError::GuestNotFound { guest_id: *id }),
        }
    }

    let (guest_event, old) = locked[&guest_id];

    // Idempotent: relinking to the current partner is a no-op.
    if old == desired {
        return Ok(());
    }

    if let Some(d) = desired {
        let (desired_event, _) = locked[&d];
        if desired_event != guest_event {
            return Err(FestplanError::Validation(
                "Partnere må tilhøre samme arrangement.".to_string(),
            ));
        }
    }

    // Break the old symmetric link, but only if it still points back;
    // a stale back-reference must not be clobbered blindly.
    if let Some(old_id) = old {
        sqlx::query(
            "UPDATE guests SET partner_id = NULL, updated_at = NOW() WHERE id = $1 AND partner_id = $2",
        )
        .bind(old_id)
        .bind(guest_id)
        .execute(&mut **tx)
        .await?;
    }

    // Clear any other incoming pointer at the guest, excluding the new
    // partner (its link is about to become legitimate).
    sqlx::query(
        "UPDATE guests SET partner_id = NULL, updated_at = NOW() WHERE partner_id = $1 AND ($2::BIGINT IS NULL OR id <> $2)",
    )
    .bind(guest_id)
    .bind(desired)
    .execute(&mut **tx)
    .await?;

    match desired {
        None => {
            sqlx::query(
                "UPDATE guests SET partner_id = NULL, updated_at = NOW() WHERE id = $1",
            )
            .bind(guest_id)
            .execute(&mut **tx)
            .await?;
        }
        Some(d) => {
            let (_, desired_old) = locked[&d];

            // Evict whoever the new partner was linked to.
            if let Some(evicted) = desired_old {
                if evicted != guest_id {
                    sqlx::query(
                        "UPDATE guests SET partner_id = NULL, updated_at = NOW() WHERE id = $1 AND partner_id = $2",
                    )
                    .bind(evicted)
                    .bind(d)
                    .execute(&mut **tx)
                    .await?;
                }
            }

            // Evict any stale incoming pointer at the new partner.
            sqlx::query(
                "UPDATE guests SET partner_id = NULL, updated_at = NOW() WHERE partner_id = $1 AND id <> $2",
            )
            .bind(d)
            .bind(guest_id)
            .execute(&mut **tx)
            .await?;

            // Set both directions.
            sqlx::query(
                "UPDATE guests SET partner_id = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(guest_id)
            .bind(d)
            .execute(&mut **tx)
            .await?;
            sqlx::query(
                "UPDATE guests SET partner_id = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(d)
            .bind(guest_id)
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(())
}
