//! Seed batches, germination tests and viability predictions
//!
//! A batch is a physical lot owned by whoever registered it. Tests and
//! predictions may be filed by anyone against an existing batch; the batch
//! must exist when they are created.

use super::counter::{IdCounter, RecordId};
use crate::error::{RegistryError, RegistryResult};
use crate::principal::{Height, Principal};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Germination rate scale: 100% == 10000
pub const RATE_SCALE: u64 = 10_000;

/// floor(germinated × 10000 / tested), 0 when nothing was tested.
///
/// Not clamped: more germinated than tested yields a rate above 10000.
pub fn germination_rate(seeds_tested: u64, seeds_germinated: u64) -> u64 {
    if seeds_tested == 0 {
        return 0;
    }
    let rate = u128::from(seeds_germinated) * u128::from(RATE_SCALE) / u128::from(seeds_tested);
    u64::try_from(rate).unwrap_or(u64::MAX)
}

/// Owner-editable fields of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStorage {
    /// grams
    pub quantity: u64,
    pub storage_method: String,
    pub storage_location: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBatch {
    pub id: RecordId,
    pub owner: Principal,
    pub variety_id: RecordId,
    pub harvest_height: Height,
    #[serde(flatten)]
    pub storage: BatchStorage,
    pub registration_height: Height,
}

/// Observations submitted with a germination test
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestObservation {
    pub seeds_tested: u64,
    pub seeds_germinated: u64,
    pub days_to_germination: u64,
    pub test_method: String,
    pub test_conditions: String,
    pub images: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerminationTest {
    pub id: RecordId,
    pub batch_id: RecordId,
    pub tester: Principal,
    pub test_height: Height,
    /// Fixed at creation from the observation counts
    pub germination_rate: u64,
    #[serde(flatten)]
    pub observation: TestObservation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViabilityPrediction {
    pub id: RecordId,
    pub batch_id: RecordId,
    pub predicted_viability_height: Height,
    /// percent × 100
    pub confidence_level: u64,
    pub basis: String,
    pub creator: Principal,
    pub creation_height: Height,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GerminationRegistry {
    batches: BTreeMap<RecordId, SeedBatch>,
    tests: BTreeMap<RecordId, GerminationTest>,
    predictions: BTreeMap<RecordId, ViabilityPrediction>,
    batch_counter: IdCounter,
    test_counter: IdCounter,
    prediction_counter: IdCounter,
}

impl GerminationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_batch(
        &mut self,
        variety_id: RecordId,
        harvest_height: Height,
        storage: BatchStorage,
        caller: &Principal,
        height: Height,
    ) -> RecordId {
        let id = self.batch_counter.advance();
        info!(
            "Registered seed batch #{} of variety #{} ({} g) by {}",
            id, variety_id, storage.quantity, caller
        );
        self.batches.insert(
            id,
            SeedBatch {
                id,
                owner: caller.clone(),
                variety_id,
                harvest_height,
                storage,
                registration_height: height,
            },
        );
        id
    }

    /// Replace the storage fields. Owner only; variety and harvest height are fixed.
    pub fn update_batch(&mut self, id: RecordId, storage: BatchStorage, caller: &Principal) -> RegistryResult<RecordId> {
        let batch = self.batches.get_mut(&id).ok_or(RegistryError::NotFound)?;
        if &batch.owner != caller {
            warn!("{} attempted to update seed batch #{} owned by {}", caller, id, batch.owner);
            return Err(RegistryError::Forbidden);
        }
        batch.storage = storage;
        debug!("Updated seed batch #{}", id);
        Ok(id)
    }

    /// Record a test against an existing batch. Any caller may test any batch.
    pub fn record_germination_test(
        &mut self,
        batch_id: RecordId,
        observation: TestObservation,
        caller: &Principal,
        height: Height,
    ) -> RegistryResult<RecordId> {
        if !self.batches.contains_key(&batch_id) {
            return Err(RegistryError::NotFound);
        }
        let id = self.test_counter.advance();
        let rate = germination_rate(observation.seeds_tested, observation.seeds_germinated);
        info!(
            "Germination test #{} on batch #{}: {}/{} germinated, rate={}",
            id, batch_id, observation.seeds_germinated, observation.seeds_tested, rate
        );
        self.tests.insert(
            id,
            GerminationTest {
                id,
                batch_id,
                tester: caller.clone(),
                test_height: height,
                germination_rate: rate,
                observation,
            },
        );
        Ok(id)
    }

    /// File a viability prediction against an existing batch. No role required.
    pub fn create_viability_prediction(
        &mut self,
        batch_id: RecordId,
        predicted_viability_height: Height,
        confidence_level: u64,
        basis: impl Into<String>,
        caller: &Principal,
        height: Height,
    ) -> RegistryResult<RecordId> {
        if !self.batches.contains_key(&batch_id) {
            return Err(RegistryError::NotFound);
        }
        let id = self.prediction_counter.advance();
        self.predictions.insert(
            id,
            ViabilityPrediction {
                id,
                batch_id,
                predicted_viability_height,
                confidence_level,
                basis: basis.into(),
                creator: caller.clone(),
                creation_height: height,
            },
        );
        info!(
            "Viability prediction #{} for batch #{}: viable until height {} (confidence {})",
            id, batch_id, predicted_viability_height, confidence_level
        );
        Ok(id)
    }

    /// `current_height - harvest_height`; negative when harvested "in the future"
    pub fn calculate_seed_age(&self, batch_id: RecordId, current_height: Height) -> RegistryResult<i128> {
        let batch = self.get_batch(batch_id).ok_or(RegistryError::NotFound)?;
        Ok(i128::from(current_height) - i128::from(batch.harvest_height))
    }

    pub fn get_batch(&self, id: RecordId) -> Option<&SeedBatch> {
        self.batches.get(&id)
    }

    pub fn get_test(&self, id: RecordId) -> Option<&GerminationTest> {
        self.tests.get(&id)
    }

    pub fn get_prediction(&self, id: RecordId) -> Option<&ViabilityPrediction> {
        self.predictions.get(&id)
    }

    /// All tests filed against a batch, oldest first
    pub fn tests_for_batch(&self, batch_id: RecordId) -> Vec<&GerminationTest> {
        self.tests.values().filter(|t| t.batch_id == batch_id).collect()
    }

    pub fn predictions_for_batch(&self, batch_id: RecordId) -> Vec<&ViabilityPrediction> {
        self.predictions.values().filter(|p| p.batch_id == batch_id).collect()
    }

    pub fn last_batch_id(&self) -> RecordId {
        self.batch_counter.last()
    }

    pub fn last_test_id(&self) -> RecordId {
        self.test_counter.last()
    }

    pub fn last_prediction_id(&self) -> RecordId {
        self.prediction_counter.last()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    pub fn prediction_count(&self) -> usize {
        self.predictions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const TESTER: &str = "ST2PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const HEIGHT: Height = 100;

    fn jar_storage() -> BatchStorage {
        BatchStorage {
            quantity: 500,
            storage_method: "Vacuum sealed glass jars with silica gel packets".into(),
            storage_location: "Cool, dark cabinet in seed storage room, 15°C, 30% humidity".into(),
            notes: "Seeds were cleaned and dried for 2 weeks before storage.".into(),
        }
    }

    fn paper_towel_test(tested: u64, germinated: u64) -> TestObservation {
        TestObservation {
            seeds_tested: tested,
            seeds_germinated: germinated,
            days_to_germination: 7,
            test_method: "Paper towel method".into(),
            test_conditions: "22°C, 80% humidity, indirect light".into(),
            images: "https://example.com/germ-test1.jpg".into(),
            notes: "Strong, uniform germination".into(),
        }
    }

    fn registry_with_batch() -> GerminationRegistry {
        let mut reg = GerminationRegistry::new();
        reg.register_batch(1, HEIGHT - 30, jar_storage(), &Principal::from(OWNER), HEIGHT);
        reg
    }

    #[test]
    fn test_germination_rate() {
        assert_eq!(germination_rate(100, 92), 9200);
        assert_eq!(germination_rate(3, 1), 3333);
        assert_eq!(germination_rate(3, 2), 6666);
        assert_eq!(germination_rate(0, 0), 0);
        assert_eq!(germination_rate(0, 50), 0);
        assert_eq!(germination_rate(10, 15), 15000);
        assert_eq!(germination_rate(1, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_register_batch() {
        let reg = registry_with_batch();
        let batch = reg.get_batch(1).unwrap();
        assert_eq!(batch.owner, Principal::from(OWNER));
        assert_eq!(batch.variety_id, 1);
        assert_eq!(batch.harvest_height, 70);
        assert_eq!(batch.storage, jar_storage());
        assert_eq!(batch.registration_height, HEIGHT);
        assert_eq!(reg.last_batch_id(), 1);
    }

    #[test]
    fn test_update_batch() {
        let mut reg = registry_with_batch();
        let updated = BatchStorage { quantity: 450, ..jar_storage() };
        assert_eq!(reg.update_batch(1, updated.clone(), &Principal::from(OWNER)), Ok(1));
        let batch = reg.get_batch(1).unwrap();
        assert_eq!(batch.storage, updated);
        assert_eq!(batch.variety_id, 1);
        assert_eq!(batch.harvest_height, 70);
    }

    #[test]
    fn test_update_batch_rejections() {
        let mut reg = registry_with_batch();
        assert_eq!(
            reg.update_batch(9, jar_storage(), &Principal::from(OWNER)),
            Err(RegistryError::NotFound)
        );
        let drained = BatchStorage { quantity: 0, ..jar_storage() };
        assert_eq!(
            reg.update_batch(1, drained, &Principal::from(TESTER)),
            Err(RegistryError::Forbidden)
        );
        assert_eq!(reg.get_batch(1).unwrap().storage.quantity, 500);
    }

    #[test]
    fn test_record_germination_test_by_third_party() {
        let mut reg = registry_with_batch();
        let tester = Principal::from(TESTER);
        let id = reg
            .record_germination_test(1, paper_towel_test(100, 92), &tester, HEIGHT + 5)
            .unwrap();
        assert_eq!(id, 1);

        let test = reg.get_test(1).unwrap();
        assert_eq!(test.batch_id, 1);
        assert_eq!(test.tester, tester);
        assert_eq!(test.test_height, HEIGHT + 5);
        assert_eq!(test.germination_rate, 9200);
        assert_eq!(test.observation.seeds_germinated, 92);
    }

    #[test]
    fn test_record_test_missing_batch_does_not_advance_counter() {
        let mut reg = registry_with_batch();
        assert_eq!(
            reg.record_germination_test(999, paper_towel_test(100, 92), &Principal::from(TESTER), HEIGHT),
            Err(RegistryError::NotFound)
        );
        assert_eq!(reg.last_test_id(), 0);
        assert_eq!(reg.test_count(), 0);
    }

    #[test]
    fn test_zero_seeds_tested() {
        let mut reg = registry_with_batch();
        let id = reg
            .record_germination_test(1, paper_towel_test(0, 5), &Principal::from(TESTER), HEIGHT)
            .unwrap();
        assert_eq!(reg.get_test(id).unwrap().germination_rate, 0);
    }

    #[test]
    fn test_create_viability_prediction() {
        let mut reg = registry_with_batch();
        let creator = Principal::from(TESTER);
        let id = reg
            .create_viability_prediction(1, HEIGHT + 1825, 8500, "Historical data for tomato seeds", &creator, HEIGHT)
            .unwrap();
        let p = reg.get_prediction(id).unwrap();
        assert_eq!(p.batch_id, 1);
        assert_eq!(p.predicted_viability_height, HEIGHT + 1825);
        assert_eq!(p.confidence_level, 8500);
        assert_eq!(p.creator, creator);
        assert_eq!(p.creation_height, HEIGHT);

        assert_eq!(
            reg.create_viability_prediction(2, 0, 0, "", &creator, HEIGHT),
            Err(RegistryError::NotFound)
        );
        assert_eq!(reg.last_prediction_id(), 1);
    }

    #[test]
    fn test_calculate_seed_age() {
        let mut reg = registry_with_batch();
        assert_eq!(reg.calculate_seed_age(1, HEIGHT), Ok(30));
        reg.register_batch(1, 500, jar_storage(), &Principal::from(OWNER), HEIGHT);
        assert_eq!(reg.calculate_seed_age(2, HEIGHT), Ok(-400));
        assert_eq!(reg.calculate_seed_age(3, HEIGHT), Err(RegistryError::NotFound));
    }

    #[test]
    fn test_children_for_batch() {
        let mut reg = registry_with_batch();
        reg.register_batch(2, 10, jar_storage(), &Principal::from(OWNER), HEIGHT);
        let tester = Principal::from(TESTER);
        reg.record_germination_test(1, paper_towel_test(10, 9), &tester, HEIGHT).unwrap();
        reg.record_germination_test(2, paper_towel_test(10, 5), &tester, HEIGHT).unwrap();
        reg.record_germination_test(1, paper_towel_test(10, 8), &tester, HEIGHT).unwrap();
        reg.create_viability_prediction(2, 900, 7000, "accelerated aging", &tester, HEIGHT).unwrap();

        let rates: Vec<u64> = reg.tests_for_batch(1).iter().map(|t| t.germination_rate).collect();
        assert_eq!(rates, vec![9000, 8000]);
        assert!(reg.predictions_for_batch(1).is_empty());
        assert_eq!(reg.predictions_for_batch(2).len(), 1);
        assert!(reg.tests_for_batch(3).is_empty());
    }
}
