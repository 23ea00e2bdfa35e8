//! Registry snapshots
//!
//! A whole `SeedRegistry` exported as pretty JSON with a SHA256 checksum over
//! the registry body. Counters and the variety index travel with it, so ids
//! keep advancing from where they stopped after a reload.

use crate::error::SnapshotError;
use crate::registry::SeedRegistry;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub snapshot_id: String,
    pub created_at: DateTime<Utc>,
    /// sha256 hex of the compact registry JSON
    pub checksum: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub registry: SeedRegistry,
}

impl Snapshot {
    pub fn capture(registry: &SeedRegistry) -> Result<Self, SnapshotError> {
        Ok(Self {
            metadata: SnapshotMetadata {
                snapshot_id: Uuid::new_v4().to_string(),
                created_at: Utc::now(),
                checksum: checksum(registry)?,
            },
            registry: registry.clone(),
        })
    }

    /// Recompute the checksum and compare with the recorded one
    pub fn verify(&self) -> Result<(), SnapshotError> {
        let found = checksum(&self.registry)?;
        if found != self.metadata.checksum {
            return Err(SnapshotError::Checksum {
                expected: self.metadata.checksum.clone(),
                found,
            });
        }
        Ok(())
    }
}

fn checksum(registry: &SeedRegistry) -> Result<String, SnapshotError> {
    let body = serde_json::to_string(registry)?;
    Ok(hex::encode(Sha256::digest(body.as_bytes())))
}

/// Write a snapshot of `registry` to `path`
pub fn save(registry: &SeedRegistry, path: impl AsRef<Path>) -> Result<SnapshotMetadata, SnapshotError> {
    let path = path.as_ref();
    let snapshot = Snapshot::capture(registry)?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, json)?;
    info!(
        "Saved snapshot {} to {} ({})",
        snapshot.metadata.snapshot_id,
        path.display(),
        registry.summary()
    );
    Ok(snapshot.metadata)
}

/// Read a snapshot back, rejecting it if the checksum does not match
pub fn load(path: impl AsRef<Path>) -> Result<SeedRegistry, SnapshotError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&json)?;
    snapshot.verify()?;
    info!("Loaded snapshot {} from {}", snapshot.metadata.snapshot_id, path.display());
    Ok(snapshot.registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::principal::Principal;
    use crate::registry::{BatchStorage, ConditionProfile, TestObservation, VarietyDetails};

    fn populated() -> SeedRegistry {
        let config = RegistryConfig::with_admin("ST0ADMIN");
        let mut reg = SeedRegistry::new(&config);
        let grower = Principal::from("ST1GROWER");
        let lab = Principal::from("ST2LAB");
        let v = reg.register_variety(
            VarietyDetails { name: "Hopi Blue Corn".into(), ..VarietyDetails::default() },
            &grower,
            10,
        );
        reg.register_growing_condition(v, ConditionProfile::default(), &grower, 11);
        reg.register_growing_condition(v, ConditionProfile::default(), &lab, 12);
        let b = reg.register_seed_batch(v, 5, BatchStorage { quantity: 250, ..BatchStorage::default() }, &grower, 12);
        reg.record_germination_test(
            b,
            TestObservation { seeds_tested: 50, seeds_germinated: 44, ..TestObservation::default() },
            &lab,
            13,
        )
        .unwrap();
        reg.add_verifier(lab.clone(), &config.admin).unwrap();
        reg.verify_variety(v, true, &lab).unwrap();
        reg
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let original = populated();
        let meta = save(&original, &path).unwrap();
        assert_eq!(meta.checksum.len(), 64);

        let mut restored = load(&path).unwrap();
        assert_eq!(restored.stats(), original.stats());
        assert_eq!(restored.get_variety(1), original.get_variety(1));
        assert_eq!(restored.conditions_for_variety(1), Ok(&[1, 2][..]));
        assert_eq!(restored.get_germination_test(1).unwrap().germination_rate, 8800);
        assert!(restored.is_verifier(&Principal::from("ST2LAB")));
        assert_eq!(restored.admin(), &Principal::from("ST0ADMIN"));

        let next = restored.register_variety(VarietyDetails::default(), &Principal::from("ST1GROWER"), 20);
        assert_eq!(next, 2);
    }

    #[test]
    fn test_tampered_snapshot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        save(&populated(), &path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let tampered = json.replace("Hopi Blue Corn", "Hopi Red Corn");
        std::fs::write(&path, tampered).unwrap();

        assert!(matches!(load(&path), Err(SnapshotError::Checksum { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path().join("absent.json")), Err(SnapshotError::Io(_))));
    }
}
