//! Storage layer
//!
//! A small key-value abstraction over the state directory plus the
//! versioned snapshot formats persisted through it. The in-memory store
//! is the source of truth; everything here is a mirrored snapshot that
//! is written on mutation and read back only at load.

pub mod error;
pub mod kv;
pub mod snapshot;

pub use error::{StorageError, StorageResult};
pub use kv::{FileKv, KvStore, MemoryKv};
pub use snapshot::{
    migrate_legacy, LegacyMold, LegacySnapshot, StateSnapshot, LEGACY_STATE_KEY, STATE_KEY,
};
