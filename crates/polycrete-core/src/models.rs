//! Data models for polycrete
//!
//! Defines the core data structures: the mold record and the derived
//! mixture quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single mold volume measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoldRecord {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Interior volume in milliliters (unvalidated)
    pub volume_ml: f64,
    /// Whether this mold counts toward the batch totals
    pub active: bool,
    /// When this mold was recorded
    pub created_at: DateTime<Utc>,
}

impl MoldRecord {
    /// Create a new active mold with a fresh id
    pub fn new(name: impl Into<String>, volume_ml: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            volume_ml,
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Mixture quantities derived from a batch's total mass
///
/// All quantities are whole grams. Always recomputed from the mold list;
/// never persisted or mutated directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MixtureResult {
    /// Water, in grams
    pub water: i64,
    /// Bonding agent, in grams
    pub bond: i64,
    /// White cement, in grams
    pub white_cement: i64,
    /// Putty filler, in grams (absorbs the rounding remainder)
    pub putty: i64,
}

impl MixtureResult {
    /// Total grams across all four components
    pub fn total(&self) -> i64 {
        self.water + self.bond + self.white_cement + self.putty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mold_record_new() {
        let mold = MoldRecord::new("Hex planter", 350.0);
        assert_eq!(mold.name, "Hex planter");
        assert_eq!(mold.volume_ml, 350.0);
        assert!(mold.active);
        assert!(!mold.id.is_empty());
    }

    #[test]
    fn test_mold_record_ids_are_unique() {
        let a = MoldRecord::new("a", 1.0);
        let b = MoldRecord::new("b", 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_mold_record_serialization() {
        let mold = MoldRecord::new("Tray", 120.5);
        let json = serde_json::to_string(&mold).unwrap();
        let deserialized: MoldRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(mold, deserialized);
    }

    #[test]
    fn test_mixture_total() {
        let mixture = MixtureResult {
            water: 200,
            bond: 50,
            white_cement: 150,
            putty: 600,
        };
        assert_eq!(mixture.total(), 1000);
        assert_eq!(MixtureResult::default().total(), 0);
    }
}
