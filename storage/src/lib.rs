//! Storage crate: flat JSON repositories for the bot's sets and logs.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – PrayerRequest
//! - [`json_store`] – JsonStore (one JSON array file per store)
//! - [`data_dir`] – file names, first-run initialization, Stores

pub mod data_dir;
mod error;
pub mod json_store;
mod models;

pub use data_dir::{
    init_data_dir, Stores, ADMINS_FILE, EVENTS_FILE, GROUPS_FILE, PRAYERS_FILE, USERS_FILE,
};
pub use error::StorageError;
pub use json_store::{read_file, write_file, JsonStore};
pub use models::PrayerRequest;
