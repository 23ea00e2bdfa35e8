//! Seed registry — varieties, growing conditions, batches and their tests
//!
//! `SeedRegistry` owns every sub-registry and the verifier roles. Each call is
//! one state transition: checks run before any write, so a rejected call
//! leaves the registry untouched. Caller identity and height are explicit
//! arguments supplied by the host.

mod counter;
mod variety;
mod condition;
mod germination;
mod verifier;

pub use counter::{IdCounter, RecordId};
pub use variety::{Variety, VarietyDetails, VarietyRegistry};
pub use condition::{ConditionProfile, ConditionRegistry, GrowingCondition};
pub use germination::{
    germination_rate, BatchStorage, GerminationRegistry, GerminationTest, SeedBatch,
    TestObservation, ViabilityPrediction, RATE_SCALE,
};
pub use verifier::{VerifierRole, VerifierRoles};

use crate::config::RegistryConfig;
use crate::error::RegistryResult;
use crate::principal::{Height, Principal};
use serde::{Deserialize, Serialize};

/// Counts across all registries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub varieties: usize,
    pub verified_varieties: usize,
    pub growing_conditions: usize,
    pub seed_batches: usize,
    pub germination_tests: usize,
    pub viability_predictions: usize,
    pub verifiers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRegistry {
    varieties: VarietyRegistry,
    conditions: ConditionRegistry,
    germination: GerminationRegistry,
    verifiers: VerifierRoles,
}

impl SeedRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            varieties: VarietyRegistry::new(),
            conditions: ConditionRegistry::new(),
            germination: GerminationRegistry::new(),
            verifiers: VerifierRoles::new(config.admin.clone()),
        }
    }

    pub fn varieties(&self) -> &VarietyRegistry {
        &self.varieties
    }

    pub fn conditions(&self) -> &ConditionRegistry {
        &self.conditions
    }

    pub fn germination(&self) -> &GerminationRegistry {
        &self.germination
    }

    pub fn verifiers(&self) -> &VerifierRoles {
        &self.verifiers
    }

    pub fn admin(&self) -> &Principal {
        self.verifiers.admin()
    }

    // ---- varieties ----

    pub fn register_variety(&mut self, details: VarietyDetails, caller: &Principal, height: Height) -> RecordId {
        self.varieties.register(details, caller, height)
    }

    pub fn update_variety(&mut self, id: RecordId, details: VarietyDetails, caller: &Principal) -> RegistryResult<RecordId> {
        self.varieties.update(id, details, caller)
    }

    pub fn get_variety(&self, id: RecordId) -> Option<&Variety> {
        self.varieties.get(id)
    }

    pub fn is_variety_verified(&self, id: RecordId) -> RegistryResult<bool> {
        self.varieties.is_verified(id)
    }

    pub fn verify_variety(&mut self, id: RecordId, verified: bool, caller: &Principal) -> RegistryResult<RecordId> {
        self.varieties.verify(id, verified, &self.verifiers, caller)
    }

    pub fn varieties_by_owner(&self, owner: &Principal) -> Vec<&Variety> {
        self.varieties.varieties_by_owner(owner)
    }

    // ---- verifier roles ----

    pub fn add_verifier(&mut self, verifier: Principal, caller: &Principal) -> RegistryResult<bool> {
        self.verifiers.add_verifier(verifier, caller)
    }

    pub fn remove_verifier(&mut self, verifier: Principal, caller: &Principal) -> RegistryResult<bool> {
        self.verifiers.remove_verifier(verifier, caller)
    }

    pub fn is_verifier(&self, principal: &Principal) -> bool {
        self.verifiers.is_verifier(principal)
    }

    // ---- growing conditions ----

    pub fn register_growing_condition(
        &mut self,
        variety_id: RecordId,
        profile: ConditionProfile,
        caller: &Principal,
        height: Height,
    ) -> RecordId {
        self.conditions.register(variety_id, profile, caller, height)
    }

    pub fn update_growing_condition(
        &mut self,
        id: RecordId,
        profile: ConditionProfile,
        caller: &Principal,
    ) -> RegistryResult<RecordId> {
        self.conditions.update(id, profile, caller)
    }

    pub fn get_growing_condition(&self, id: RecordId) -> Option<&GrowingCondition> {
        self.conditions.get(id)
    }

    pub fn conditions_for_variety(&self, variety_id: RecordId) -> RegistryResult<&[RecordId]> {
        self.conditions.list_for_variety(variety_id)
    }

    pub fn is_suitable_climate(&self, id: RecordId, temperature: i64, rainfall: i64, soil_ph: i64) -> RegistryResult<bool> {
        self.conditions.is_suitable(id, temperature, rainfall, soil_ph)
    }

    // ---- batches, tests, predictions ----

    pub fn register_seed_batch(
        &mut self,
        variety_id: RecordId,
        harvest_height: Height,
        storage: BatchStorage,
        caller: &Principal,
        height: Height,
    ) -> RecordId {
        self.germination.register_batch(variety_id, harvest_height, storage, caller, height)
    }

    pub fn update_seed_batch(&mut self, id: RecordId, storage: BatchStorage, caller: &Principal) -> RegistryResult<RecordId> {
        self.germination.update_batch(id, storage, caller)
    }

    pub fn record_germination_test(
        &mut self,
        batch_id: RecordId,
        observation: TestObservation,
        caller: &Principal,
        height: Height,
    ) -> RegistryResult<RecordId> {
        self.germination.record_germination_test(batch_id, observation, caller, height)
    }

    pub fn create_viability_prediction(
        &mut self,
        batch_id: RecordId,
        predicted_viability_height: Height,
        confidence_level: u64,
        basis: impl Into<String>,
        caller: &Principal,
        height: Height,
    ) -> RegistryResult<RecordId> {
        self.germination.create_viability_prediction(
            batch_id,
            predicted_viability_height,
            confidence_level,
            basis,
            caller,
            height,
        )
    }

    pub fn calculate_seed_age(&self, batch_id: RecordId, current_height: Height) -> RegistryResult<i128> {
        self.germination.calculate_seed_age(batch_id, current_height)
    }

    pub fn get_seed_batch(&self, id: RecordId) -> Option<&SeedBatch> {
        self.germination.get_batch(id)
    }

    pub fn get_germination_test(&self, id: RecordId) -> Option<&GerminationTest> {
        self.germination.get_test(id)
    }

    pub fn get_viability_prediction(&self, id: RecordId) -> Option<&ViabilityPrediction> {
        self.germination.get_prediction(id)
    }

    // ---- reporting ----

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            varieties: self.varieties.len(),
            verified_varieties: self.varieties.verified_count(),
            growing_conditions: self.conditions.len(),
            seed_batches: self.germination.batch_count(),
            germination_tests: self.germination.test_count(),
            viability_predictions: self.germination.prediction_count(),
            verifiers: self.verifiers.active_count(),
        }
    }

    pub fn summary(&self) -> String {
        let s = self.stats();
        format!(
            "SeedRegistry admin={} | {} varieties ({} verified) | {} conditions | {} batches | {} tests | {} predictions | {} verifiers",
            self.admin(),
            s.varieties,
            s.verified_varieties,
            s.growing_conditions,
            s.seed_batches,
            s.germination_tests,
            s.viability_predictions,
            s.verifiers
        )
    }
}

impl Default for SeedRegistry {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}
