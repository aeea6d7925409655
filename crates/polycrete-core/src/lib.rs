//! polycrete core library
//!
//! Tracks polymer-concrete mold volumes and derives the mixture
//! quantities needed to fill the active set. The in-memory mold list is
//! the single source of truth; a key-value snapshot in the data
//! directory mirrors it across runs, with a migration path from the
//! pre-v2 on-disk format.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = MoldStore::open(&config)?;
//!
//! store.add_mold("Hex planter", 350.0);
//!
//! let mix = store.mixture();
//! println!("water: {} g", mix.water);
//! ```
//!
//! # Modules
//!
//! - `store`: the mold store (main entry point)
//! - `models`: mold records and mixture quantities
//! - `mixture`: fixed-proportion mixture computation
//! - `storage`: key-value persistence and versioned snapshots
//! - `config`: application configuration

pub mod config;
pub mod mixture;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use mixture::{compute_mixture, DENSITY_G_PER_ML};
pub use models::{MixtureResult, MoldRecord};
pub use storage::{FileKv, KvStore, MemoryKv, StorageError};
pub use store::{MoldStore, UNDO_WINDOW};
