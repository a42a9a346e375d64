//! Utility modules
//!
//! Shared error types, logging setup and small helper functions.

pub mod errors;
pub mod helpers;
pub mod logging;

pub use errors::{FestplanError, Result};
