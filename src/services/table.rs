//! Seating table service implementation
//!
//! Table CRUD, the batch-creation naming contract and the occupancy view
//! the seating chart renders. Batch creation accepts partial success: a
//! duplicate name fails that one table and the rest proceed.

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::database::repositories::{GuestRepository, TableRepository};
use crate::models::table::{
    CreateTableRequest, Table, TableOccupancy, TableShape, UpdateTableRequest,
};
use crate::utils::errors::{FestplanError, Result};
use crate::utils::helpers::parse_trailing_number;
use crate::utils::logging;

/// Table service for managing the seating chart
#[derive(Debug, Clone)]
pub struct TableService {
    table_repository: TableRepository,
    guest_repository: GuestRepository,
    settings: Settings,
}

impl TableService {
    /// Create a new TableService instance
    pub fn new(
        table_repository: TableRepository,
        guest_repository: GuestRepository,
        settings: Settings,
    ) -> Self {
        Self {
            table_repository,
            guest_repository,
            settings,
        }
    }

    /// Create a single table
    pub async fn create_table(&self, request: CreateTableRequest) -> Result<Table> {
        if request.name.trim().is_empty() {
            return Err(FestplanError::Validation(
                "Bordet må ha et navn.".to_string(),
            ));
        }
        if request.capacity.is_some_and(|c| c <= 0) {
            return Err(FestplanError::Validation(
                "Kapasiteten må være minst 1.".to_string(),
            ));
        }

        let table = self.table_repository.create(request).await?;
        logging::log_seating_action(table.event_id, Some(table.id), "create_table");
        Ok(table)
    }

    /// Create `count` tables named `"{prefix} {start_number+i}"`.
    ///
    /// Each create is independent: a failure (typically a duplicate name) is
    /// logged and skipped, previously created tables stand. Returns the
    /// tables actually created.
    pub async fn batch_create_tables(
        &self,
        event_id: i64,
        prefix: &str,
        start_number: u32,
        count: u32,
        capacity: i32,
        shape: TableShape,
    ) -> Result<Vec<Table>> {
        if count == 0 || count > self.settings.limits.batch_tables_max {
            return Err(FestplanError::Validation(format!(
                "Antall bord må være mellom 1 og {}.",
                self.settings.limits.batch_tables_max
            )));
        }
        if capacity <= 0 {
            return Err(FestplanError::Validation(
                "Kapasiteten må være minst 1.".to_string(),
            ));
        }
        if start_number.checked_add(count - 1).is_none() {
            return Err(FestplanError::Validation(
                "Startnummeret er for høyt.".to_string(),
            ));
        }

        let mut created = Vec::new();
        for i in 0..count {
            let name = format!("{} {}", prefix, start_number + i);
            let request = CreateTableRequest {
                capacity: Some(capacity),
                shape: Some(shape),
                ..CreateTableRequest::named(event_id, name.clone())
            };

            match self.table_repository.create(request).await {
                Ok(table) => created.push(table),
                Err(err) => {
                    warn!(event_id = event_id, name = %name, error = %err, "Table in batch skipped");
                }
            }
        }

        info!(
            event_id = event_id,
            requested = count,
            created = created.len(),
            "Batch table creation finished"
        );
        Ok(created)
    }

    /// Create tables from an admin-entered name.
    ///
    /// A single table uses the name verbatim. For more than one, a trailing
    /// number in the name picks the prefix and start; a name without digits
    /// starts numbering at 1.
    pub async fn create_tables_from_name(
        &self,
        event_id: i64,
        name: &str,
        count: u32,
        capacity: i32,
        shape: TableShape,
    ) -> Result<Vec<Table>> {
        if count == 1 {
            let request = CreateTableRequest {
                capacity: Some(capacity),
                shape: Some(shape),
                ..CreateTableRequest::named(event_id, name)
            };
            return Ok(vec![self.create_table(request).await?]);
        }

        let (prefix, start) = parse_trailing_number(name);
        let start = start.unwrap_or(1);
        debug!(event_id = event_id, prefix = %prefix, start = start, count = count, "Expanding table name pattern");

        self.batch_create_tables(event_id, &prefix, start, count, capacity, shape)
            .await
    }

    /// Get a table by ID
    pub async fn get_table(&self, table_id: i64) -> Result<Table> {
        self.table_repository
            .find_by_id(table_id)
            .await?
            .ok_or(FestplanError::TableNotFound { table_id })
    }

    /// Update table fields (name, capacity, shape, lock flag)
    pub async fn update_table(&self, table_id: i64, request: UpdateTableRequest) -> Result<Table> {
        if request.capacity.is_some_and(|c| c <= 0) {
            return Err(FestplanError::Validation(
                "Kapasiteten må være minst 1.".to_string(),
            ));
        }

        let table = self.table_repository.update(table_id, request).await?;
        logging::log_seating_action(table.event_id, Some(table.id), "update_table");
        Ok(table)
    }

    /// Move a table on the seating canvas. Locked tables stay put.
    pub async fn move_table(&self, table_id: i64, x: f64, y: f64, rotation: f64) -> Result<Table> {
        let table = self.get_table(table_id).await?;
        if table.locked {
            return Err(FestplanError::Validation(
                "Bordet er låst og kan ikke flyttes.".to_string(),
            ));
        }

        let request = UpdateTableRequest {
            position_x: Some(x),
            position_y: Some(y),
            rotation: Some(rotation),
            ..Default::default()
        };
        self.table_repository.update(table_id, request).await
    }

    /// Delete a table; seated guests are released, not deleted
    pub async fn delete_table(&self, table_id: i64) -> Result<()> {
        let table = self.get_table(table_id).await?;
        self.table_repository.delete(table_id).await?;
        logging::log_seating_action(table.event_id, Some(table_id), "delete_table");
        Ok(())
    }

    /// Tables of an event with their occupant counts, for the seating chart
    pub async fn list_with_occupancy(&self, event_id: i64) -> Result<Vec<TableOccupancy>> {
        let tables = self.table_repository.find_by_event(event_id).await?;
        let counts = self.table_repository.occupancy(event_id).await?;

        Ok(tables
            .into_iter()
            .map(|table| {
                let seated = counts
                    .iter()
                    .find(|(id, _)| *id == table.id)
                    .map(|(_, n)| *n)
                    .unwrap_or(0);
                TableOccupancy { table, seated }
            })
            .collect())
    }

    /// Occupant count of one table
    pub async fn seated_count(&self, table_id: i64) -> Result<i64> {
        self.guest_repository.count_at_table(table_id).await
    }
}
