//! Guest service implementation
//!
//! This service owns the guest-list business rules: partner relinking,
//! advisory table-capacity checks, bulk text import and the guest-facing
//! RSVP write. The partner invariant itself is enforced transactionally in
//! the repository; this layer validates input before the store is touched.

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::database::repositories::{GuestRepository, TableRepository};
use crate::models::guest::{CreateGuestRequest, Guest, RsvpStatus, UpdateGuestRequest};
use crate::utils::errors::{FestplanError, Result};
use crate::utils::logging;

/// Guest service for managing guest-list operations
#[derive(Debug, Clone)]
pub struct GuestService {
    guest_repository: GuestRepository,
    table_repository: TableRepository,
    settings: Settings,
}

/// One parsed line of a bulk import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub role: String,
}

impl GuestService {
    /// Create a new GuestService instance
    pub fn new(
        guest_repository: GuestRepository,
        table_repository: TableRepository,
        settings: Settings,
    ) -> Self {
        Self {
            guest_repository,
            table_repository,
            settings,
        }
    }

    /// Create a guest. The insert and any initial partner link are one
    /// atomic unit.
    pub async fn create_guest(&self, request: CreateGuestRequest) -> Result<Guest> {
        if request.name.trim().is_empty() {
            return Err(FestplanError::Validation(
                "Gjesten må ha et navn.".to_string(),
            ));
        }

        let guest = self.guest_repository.create(request).await?;
        logging::log_guest_action(guest.event_id, guest.id, "create", None);
        Ok(guest)
    }

    /// Get a guest by ID
    pub async fn get_guest(&self, guest_id: i64) -> Result<Guest> {
        self.guest_repository
            .find_by_id(guest_id)
            .await?
            .ok_or(FestplanError::GuestNotFound { guest_id })
    }

    /// List all guests of an event
    pub async fn list_guests(&self, event_id: i64) -> Result<Vec<Guest>> {
        self.guest_repository.find_by_event(event_id).await
    }

    /// List guests without a table assignment, for the seating side panel
    pub async fn list_unassigned(&self, event_id: i64) -> Result<Vec<Guest>> {
        self.guest_repository.find_unassigned(event_id).await
    }

    /// Update guest profile fields
    pub async fn update_guest(&self, guest_id: i64, request: UpdateGuestRequest) -> Result<Guest> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(FestplanError::Validation(
                    "Gjesten må ha et navn.".to_string(),
                ));
            }
        }

        let guest = self.guest_repository.update(guest_id, request).await?;
        logging::log_guest_action(guest.event_id, guest.id, "update", None);
        Ok(guest)
    }

    /// Relink the guest's partner. Passing `None` severs the link.
    ///
    /// The relation stays symmetric and exclusive: the old partner's
    /// back-reference is cleared, any guest previously linked to the new
    /// partner is evicted, and both directions are written together.
    pub async fn set_partner(&self, guest_id: i64, desired: Option<i64>) -> Result<()> {
        if desired == Some(guest_id) {
            return Err(FestplanError::Validation(
                "En gjest kan ikke være sin egen partner.".to_string(),
            ));
        }

        debug!(guest_id = guest_id, desired = desired, "Relinking partner");
        self.guest_repository.set_partner(guest_id, desired).await?;
        info!(guest_id = guest_id, desired = desired, "Partner link updated");
        Ok(())
    }

    /// Delete a guest. Any partner link is severed first so the surviving
    /// partner is left unlinked, not dangling.
    pub async fn delete_guest(&self, guest_id: i64) -> Result<()> {
        let guest = self.get_guest(guest_id).await?;
        self.guest_repository.delete(guest_id).await?;
        logging::log_guest_action(guest.event_id, guest_id, "delete", None);
        Ok(())
    }

    /// Assign or unassign a table seat.
    ///
    /// The capacity check is advisory: it refuses an assignment to a full
    /// table unless the guest already sits there, but nothing prevents two
    /// concurrent assignments from both passing the check. That gap is part
    /// of the contract.
    pub async fn assign_table(&self, guest_id: i64, table_id: Option<i64>) -> Result<Guest> {
        let guest = self.get_guest(guest_id).await?;

        if let Some(table_id) = table_id {
            let table = self
                .table_repository
                .find_by_id(table_id)
                .await?
                .ok_or(FestplanError::TableNotFound { table_id })?;

            if guest.table_id != Some(table_id) {
                let seated = self.guest_repository.count_at_table(table_id).await?;
                if seated >= table.capacity as i64 {
                    return Err(FestplanError::TableFull {
                        table_id,
                        capacity: table.capacity,
                    });
                }
            }
        }

        let guest = self.guest_repository.assign_table(guest_id, table_id).await?;
        logging::log_seating_action(guest.event_id, table_id, "assign_guest");
        Ok(guest)
    }

    /// Record a guest's RSVP answer from the microsite
    pub async fn respond_rsvp(
        &self,
        guest_id: i64,
        status: RsvpStatus,
        allergies: Option<String>,
    ) -> Result<Guest> {
        let guest = self
            .guest_repository
            .set_rsvp(guest_id, status, allergies)
            .await?;
        logging::log_guest_action(guest.event_id, guest.id, "rsvp", Some(status.as_str()));
        Ok(guest)
    }

    /// Bulk-import guests from pasted text, one guest per line.
    ///
    /// Rows that fail to store are logged and skipped; earlier rows stand.
    /// Returns the number of guests created.
    pub async fn import_guests(&self, event_id: i64, raw_text: &str) -> Result<usize> {
        let rows = parse_import_text(raw_text);

        if rows.len() > self.settings.limits.import_max_rows {
            return Err(FestplanError::Validation(format!(
                "Importen er begrenset til {} rader.",
                self.settings.limits.import_max_rows
            )));
        }

        let mut created = 0;
        let mut skipped = 0;
        for row in rows {
            let request = CreateGuestRequest {
                mobile: some_if_nonempty(row.mobile),
                address: some_if_nonempty(row.address),
                role: some_if_nonempty(row.role),
                ..CreateGuestRequest::named(event_id, row.name)
            };

            match self.guest_repository.create(request).await {
                Ok(_) => created += 1,
                Err(err) => {
                    warn!(event_id = event_id, error = %err, "Import row skipped");
                    skipped += 1;
                }
            }
        }

        logging::log_import_result(event_id, created, skipped);
        Ok(created)
    }
}

fn some_if_nonempty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parse pasted guest-list text.
///
/// Lines are separated by `\n` or `\r\n`; fields within a line by comma,
/// semicolon or tab. Up to four trimmed fields are used (name, mobile,
/// address, role); extra fields are ignored. Lines without a usable name
/// are silently skipped.
pub fn parse_import_text(raw_text: &str) -> Vec<ImportRow> {
    raw_text
        .lines()
        .filter_map(|line| {
            let mut fields = line
                .split(|c| c == ',' || c == ';' || c == '\t')
                .map(str::trim);

            let name = fields.next().unwrap_or("").to_string();
            if name.is_empty() {
                return None;
            }

            Some(ImportRow {
                name,
                mobile: fields.next().unwrap_or("").to_string(),
                address: fields.next().unwrap_or("").to_string(),
                role: fields.next().unwrap_or("").to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_two_guests_skipping_blank_line() {
        let rows = parse_import_text("Ola,99887766,Storgata 1,Forlover\n\nKari;44556677");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ImportRow {
                name: "Ola".to_string(),
                mobile: "99887766".to_string(),
                address: "Storgata 1".to_string(),
                role: "Forlover".to_string(),
            }
        );
        assert_eq!(
            rows[1],
            ImportRow {
                name: "Kari".to_string(),
                mobile: "44556677".to_string(),
                address: String::new(),
                role: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_import_crlf_and_tabs() {
        let rows = parse_import_text("Ola\t99887766\r\nKari\t44556677\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ola");
        assert_eq!(rows[1].mobile, "44556677");
    }

    #[test]
    fn test_parse_import_extra_fields_ignored() {
        let rows = parse_import_text("Ola,1,2,3,4,5");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role, "3");
    }

    #[test]
    fn test_parse_import_trims_whitespace() {
        let rows = parse_import_text("  Ola Nordmann , 99887766 ");
        assert_eq!(rows[0].name, "Ola Nordmann");
        assert_eq!(rows[0].mobile, "99887766");
    }

    #[test]
    fn test_parse_import_malformed_lines_skipped() {
        let rows = parse_import_text(",99887766\n;;;\n\t\t\nKari");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Kari");
    }
}
