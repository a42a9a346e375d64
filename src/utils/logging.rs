//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the festplan backend.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must be held for as long as file logging should stay
/// active; dropping it flushes and stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "festplan.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log guest-list actions with structured data
pub fn log_guest_action(event_id: i64, guest_id: i64, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        guest_id = guest_id,
        action = action,
        details = details,
        "Guest action performed"
    );
}

/// Log seating-chart actions
pub fn log_seating_action(event_id: i64, table_id: Option<i64>, action: &str) {
    info!(
        event_id = event_id,
        table_id = table_id,
        action = action,
        "Seating action performed"
    );
}

/// Log the outcome of a bulk guest import
pub fn log_import_result(event_id: i64, created: usize, skipped: usize) {
    if skipped > 0 {
        warn!(
            event_id = event_id,
            created = created,
            skipped = skipped,
            "Guest import finished with skipped rows"
        );
    } else {
        info!(
            event_id = event_id,
            created = created,
            "Guest import finished"
        );
    }
}

/// Log settings document writes
pub fn log_settings_saved(event_id: i64, document: &str) {
    debug!(
        event_id = event_id,
        document = document,
        "Event document saved"
    );
}
