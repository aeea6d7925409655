//! Storage error handling
//!
//! Typed errors for the key-value persistence layer. Callers of
//! `MoldStore` never see these; the store logs and degrades instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the state directory
    #[error("Failed to create state directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read a key's file
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a key's file
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to delete a key's file
    #[error("Failed to delete '{path}': {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// State snapshot could not be encoded
    #[error("Failed to encode state snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
