//! Error types for persistence and store operations.

use std::path::PathBuf;

use stockroom_models::ValueError;
use thiserror::Error;

/// Errors that can occur while reading or writing the backing file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read from file system.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to file system.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize records to JSON.
    #[error("failed to serialize: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A record cannot be represented in the chosen format.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The file as a whole is not in the expected format.
    #[error("malformed file: {0}")]
    Malformed(String),
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Errors returned by [`Store`](crate::Store) operations.
///
/// Every mutation error leaves the store exactly as it was before the call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this key already exists.
    #[error("a record with key '{0}' already exists")]
    DuplicateKey(String),

    /// Another record already uses this name (unique-name stores only).
    #[error("name '{name}' is already used by record '{existing_key}'")]
    DuplicateName { name: String, existing_key: String },

    /// No record with this key.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The value policy rejected a quantity, price or key.
    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueError),

    /// Writing the backing file failed; the change was rolled back.
    #[error("failed to save inventory: {0}")]
    Persist(#[source] PersistenceError),

    /// The backing file exists but could not be loaded.
    #[error("failed to load inventory: {0}")]
    Load(#[source] PersistenceError),
}
