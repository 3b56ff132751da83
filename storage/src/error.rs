//! Storage error types.
//!
//! Returned by the file-level helpers; [`crate::JsonStore`] turns them into its fallback policy.

use thiserror::Error;

/// Errors that can occur reading or writing a backing file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(String),
}
