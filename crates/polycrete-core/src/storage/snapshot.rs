//! Versioned state snapshots
//!
//! The whole mold list is persisted as a single JSON blob under a
//! versioned key. The current (v2) blob carries full records; the v1
//! blob predates mold names and the active flag. v1 data is upgraded in
//! place the first time a store loads without finding a v2 blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::MoldRecord;

/// Key holding the current-format state blob
pub const STATE_KEY: &str = "poly_concrete_state_v2";

/// Key the pre-rename format was stored under
pub const LEGACY_STATE_KEY: &str = "poly_concrete_state_v1";

/// Current-format state blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// The full mold list, in insertion order
    pub molds: Vec<MoldRecord>,
    /// When this snapshot was written
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl StateSnapshot {
    /// Snapshot the given molds, stamped with the current time
    pub fn new(molds: Vec<MoldRecord>) -> Self {
        Self {
            molds,
            last_updated: Utc::now(),
        }
    }
}

/// Pre-v2 record: no name, no active flag
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyMold {
    pub id: String,
    pub volume_ml: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Pre-v2 state blob
#[derive(Debug, Clone, Deserialize)]
pub struct LegacySnapshot {
    pub molds: Vec<LegacyMold>,
}

/// Upgrade legacy records to the current format
///
/// Each record is assigned a positional name and marked active. Records
/// without a stored creation time are stamped with the migration time.
pub fn migrate_legacy(legacy: LegacySnapshot) -> Vec<MoldRecord> {
    legacy
        .molds
        .into_iter()
        .enumerate()
        .map(|(i, mold)| MoldRecord {
            id: mold.id,
            name: format!("Mold #{}", i + 1),
            volume_ml: mold.volume_ml,
            active: true,
            created_at: mold.created_at.unwrap_or_else(Utc::now),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = StateSnapshot::new(vec![MoldRecord::new("Tray", 250.0)]);
        let json = serde_json::to_string(&snapshot).unwrap();

        let parsed: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.molds, snapshot.molds);
    }

    #[test]
    fn test_snapshot_tolerates_missing_last_updated() {
        let parsed: StateSnapshot = serde_json::from_str(r#"{"molds":[]}"#).unwrap();
        assert!(parsed.molds.is_empty());
    }

    #[test]
    fn test_legacy_parse_without_created_at() {
        let legacy: LegacySnapshot =
            serde_json::from_str(r#"{"molds":[{"id":"a","volume_ml":50}]}"#).unwrap();
        assert_eq!(legacy.molds.len(), 1);
        assert!(legacy.molds[0].created_at.is_none());
    }

    #[test]
    fn test_migrate_assigns_names_and_active() {
        let legacy: LegacySnapshot = serde_json::from_str(
            r#"{"molds":[{"id":"a","volume_ml":50},{"id":"b","volume_ml":75.5}]}"#,
        )
        .unwrap();

        let molds = migrate_legacy(legacy);
        assert_eq!(molds.len(), 2);
        assert_eq!(molds[0].name, "Mold #1");
        assert_eq!(molds[1].name, "Mold #2");
        assert_eq!(molds[0].id, "a");
        assert_eq!(molds[1].volume_ml, 75.5);
        assert!(molds.iter().all(|m| m.active));
    }

    #[test]
    fn test_legacy_rejects_non_array_molds() {
        assert!(serde_json::from_str::<LegacySnapshot>(r#"{"molds":"oops"}"#).is_err());
        assert!(serde_json::from_str::<LegacySnapshot>(r#"{}"#).is_err());
    }
}
