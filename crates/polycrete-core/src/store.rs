//! Mold store
//!
//! `MoldStore` owns the in-memory mold list and is the single source of
//! truth; the key-value backend holds a mirrored snapshot, written on
//! every mutation and read back only at load. Persistence failures never
//! reach the caller: they are logged and the in-memory state stays
//! authoritative.
//!
//! ## Undo
//!
//! `delete_mold` and `clear_all` keep the pre-mutation list in an undo
//! buffer for a short window. Expiry is driven by the host event loop
//! through `tick`; each delete/clear schedules a fire-once deadline that
//! clears the buffer unconditionally when it elapses. Deadlines are not
//! cancelled by later mutations, so a deadline from an earlier delete
//! can expire a newer buffer early.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = MoldStore::open(&config)?;
//!
//! store.add_mold("Hex planter", 350.0);
//! let mix = store.mixture();
//! ```

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::Config;
use crate::mixture::{compute_mixture, DENSITY_G_PER_ML};
use crate::models::{MixtureResult, MoldRecord};
use crate::storage::{
    migrate_legacy, FileKv, KvStore, LegacySnapshot, StateSnapshot, LEGACY_STATE_KEY, STATE_KEY,
};

/// How long a delete or clear can be undone
pub const UNDO_WINDOW: Duration = Duration::from_millis(3500);

/// In-memory mold list with derived batch totals and mirrored persistence
pub struct MoldStore {
    /// The mold list, in insertion order
    molds: Vec<MoldRecord>,
    /// Pre-mutation snapshot restored by `undo_delete`
    undo_buffer: Option<Vec<MoldRecord>>,
    /// Whether an undo affordance should be offered
    show_undo: bool,
    /// Pending undo-expiry deadlines, in scheduling order
    undo_deadlines: Vec<Instant>,
    /// Persistence backend; `None` in ephemeral stores
    backend: Option<Box<dyn KvStore>>,
}

impl MoldStore {
    /// Open the store backed by files in the configured state directory
    pub fn open(config: &Config) -> Result<Self> {
        let backend =
            FileKv::open(config.state_dir()).context("Failed to open state directory")?;
        Ok(Self::with_backend(backend))
    }

    /// Create a store over a specific key-value backend and load from it
    pub fn with_backend(backend: impl KvStore + 'static) -> Self {
        let mut store = Self {
            molds: Vec::new(),
            undo_buffer: None,
            show_undo: false,
            undo_deadlines: Vec::new(),
            backend: Some(Box::new(backend)),
        };
        store.load();
        store
    }

    /// Create a store with no persistence backend
    ///
    /// `load` and `save` become no-ops; state lives only in memory.
    pub fn ephemeral() -> Self {
        Self {
            molds: Vec::new(),
            undo_buffer: None,
            show_undo: false,
            undo_deadlines: Vec::new(),
            backend: None,
        }
    }

    // ==================== Persistence ====================

    /// Replace the in-memory list with the persisted snapshot
    ///
    /// If the current-format key is completely absent, a legacy blob is
    /// migrated in place. Missing or malformed data degrades to an empty
    /// list; this never fails.
    pub fn load(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let raw = match backend.get(STATE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to read persisted state: {err}");
                self.molds = Vec::new();
                return;
            }
        };

        match raw {
            Some(raw) => {
                self.molds = match serde_json::from_str::<StateSnapshot>(&raw) {
                    Ok(snapshot) => snapshot.molds,
                    Err(err) => {
                        warn!("discarding malformed state snapshot: {err}");
                        Vec::new()
                    }
                };
            }
            // Current key absent entirely; a pre-v2 blob may still be around.
            None => self.migrate_from_legacy(),
        }
    }

    /// Write the current list to the backend, overwriting the prior snapshot
    ///
    /// No-op without a backend; failures are logged and swallowed.
    pub fn save(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let snapshot = StateSnapshot::new(self.molds.clone());
        let encoded = match serde_json::to_string(&snapshot) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("failed to encode state snapshot: {err}");
                return;
            }
        };

        if let Err(err) = backend.set(STATE_KEY, &encoded) {
            warn!("failed to persist state: {err}");
        }
    }

    /// Upgrade a v1 blob, re-persist it in the current format, and drop
    /// the legacy key. Anything malformed leaves the list empty.
    fn migrate_from_legacy(&mut self) {
        self.molds = Vec::new();

        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let raw = match backend.get(LEGACY_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                warn!("failed to read legacy state: {err}");
                return;
            }
        };

        let legacy = match serde_json::from_str::<LegacySnapshot>(&raw) {
            Ok(legacy) => legacy,
            Err(err) => {
                warn!("ignoring malformed legacy state: {err}");
                return;
            }
        };

        self.molds = migrate_legacy(legacy);
        self.save();

        if let Some(backend) = self.backend.as_mut() {
            if let Err(err) = backend.remove(LEGACY_STATE_KEY) {
                warn!("failed to remove legacy state key: {err}");
            }
        }
    }

    // ==================== Mutators ====================

    /// Add a new active mold
    ///
    /// The name is trimmed; an empty name is auto-numbered from the
    /// current count.
    pub fn add_mold(&mut self, name: &str, volume_ml: f64) {
        let name = name.trim();
        let name = if name.is_empty() {
            format!("Mold #{}", self.molds.len() + 1)
        } else {
            name.to_string()
        };

        self.molds.push(MoldRecord::new(name, volume_ml));
        self.save();
    }

    /// Remove the mold with the given id (no-op if absent)
    ///
    /// The pre-deletion list is kept for `undo_delete` until the undo
    /// window elapses.
    pub fn delete_mold(&mut self, id: &str) {
        self.undo_buffer = Some(self.molds.clone());
        self.show_undo = true;
        self.molds.retain(|m| m.id != id);
        self.save();
        self.schedule_undo_expiry();
    }

    /// Restore the list captured by the last delete or clear
    ///
    /// No-op if the buffer is empty or already expired.
    pub fn undo_delete(&mut self) {
        let Some(previous) = self.undo_buffer.take() else {
            return;
        };
        self.molds = previous;
        self.show_undo = false;
        self.save();
    }

    /// Flip the active flag on the matching mold (no-op if absent)
    pub fn toggle_mold(&mut self, id: &str) {
        if let Some(mold) = self.molds.iter_mut().find(|m| m.id == id) {
            mold.active = !mold.active;
        }
        self.save();
    }

    /// Remove every mold and delete the persisted key entirely
    ///
    /// Unlike the other mutators this does not save an empty snapshot;
    /// the key is removed outright. The cleared list stays undoable for
    /// the usual window.
    pub fn clear_all(&mut self) {
        self.undo_buffer = Some(std::mem::take(&mut self.molds));
        self.show_undo = true;

        if let Some(backend) = self.backend.as_mut() {
            if let Err(err) = backend.remove(STATE_KEY) {
                warn!("failed to remove persisted state: {err}");
            }
        }

        self.schedule_undo_expiry();
    }

    // ==================== Undo expiry ====================

    fn schedule_undo_expiry(&mut self) {
        self.undo_deadlines.push(Instant::now() + UNDO_WINDOW);
    }

    /// Fire any undo-expiry deadlines that have elapsed
    ///
    /// Call from the host event loop. Every elapsed deadline clears the
    /// undo buffer and hides the affordance, even when the buffer was
    /// refilled by a later delete.
    pub fn tick(&mut self) {
        self.expire_due(Instant::now());
    }

    fn expire_due(&mut self, now: Instant) {
        let pending = self.undo_deadlines.len();
        self.undo_deadlines.retain(|deadline| *deadline > now);
        if self.undo_deadlines.len() != pending {
            self.undo_buffer = None;
            self.show_undo = false;
        }
    }

    // ==================== Read access ====================

    /// The mold list, in insertion order
    pub fn molds(&self) -> &[MoldRecord] {
        &self.molds
    }

    /// Whether an undo affordance should currently be offered
    pub fn show_undo(&self) -> bool {
        self.show_undo
    }

    /// Combined volume of the active molds, in milliliters
    pub fn total_volume_ml(&self) -> f64 {
        self.molds
            .iter()
            .filter(|m| m.active)
            .map(|m| m.volume_ml)
            .sum()
    }

    /// Total batch mass for the active molds, in grams
    pub fn total_mass_g(&self) -> f64 {
        self.total_volume_ml() * DENSITY_G_PER_ML
    }

    /// Mixture quantities for the current batch
    pub fn mixture(&self) -> MixtureResult {
        compute_mixture(self.total_mass_g())
    }
}
