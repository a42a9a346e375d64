//! Test helpers module
//!
//! Shared infrastructure for integration tests: database setup and seed
//! data builders. Not every test binary uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::TestDatabase;
pub use test_data::{random_guest_name, seed_event, seed_guest, seed_table};
