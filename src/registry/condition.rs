//! Growing Condition Registry — environmental profiles per variety
//!
//! Profiles reference a variety by id without checking that it exists. A
//! reverse index keeps, per variety, every profile id in registration order.

use super::counter::{IdCounter, RecordId};
use crate::error::{RegistryError, RegistryResult};
use crate::principal::{Height, Principal};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Creator-editable environmental profile.
///
/// Bounds are stored as given: no min <= max check, no physical range check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionProfile {
    pub climate_zone: String,
    /// °C
    pub temperature_min: i64,
    pub temperature_max: i64,
    /// mm per growing season
    pub rainfall_min: i64,
    pub rainfall_max: i64,
    pub soil_type: String,
    /// pH × 10
    pub soil_ph_min: i64,
    pub soil_ph_max: i64,
    pub sunlight_requirements: String,
    pub planting_season: String,
    pub days_to_maturity: u64,
    pub companion_plants: String,
    pub notes: String,
}

impl ConditionProfile {
    /// Inclusive bound check on all three climate axes
    pub fn accepts(&self, temperature: i64, rainfall: i64, soil_ph: i64) -> bool {
        (self.temperature_min..=self.temperature_max).contains(&temperature)
            && (self.rainfall_min..=self.rainfall_max).contains(&rainfall)
            && (self.soil_ph_min..=self.soil_ph_max).contains(&soil_ph)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowingCondition {
    pub id: RecordId,
    pub variety_id: RecordId,
    pub creator: Principal,
    #[serde(flatten)]
    pub profile: ConditionProfile,
    pub creation_height: Height,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionRegistry {
    conditions: BTreeMap<RecordId, GrowingCondition>,
    by_variety: BTreeMap<RecordId, Vec<RecordId>>,
    counter: IdCounter,
}

impl ConditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile for `variety_id` and append it to that variety's index
    pub fn register(
        &mut self,
        variety_id: RecordId,
        profile: ConditionProfile,
        caller: &Principal,
        height: Height,
    ) -> RecordId {
        let id = self.counter.advance();
        self.conditions.insert(
            id,
            GrowingCondition {
                id,
                variety_id,
                creator: caller.clone(),
                profile,
                creation_height: height,
            },
        );
        self.by_variety.entry(variety_id).or_default().push(id);
        info!("Registered growing condition #{} for variety #{} by {}", id, variety_id, caller);
        id
    }

    /// Replace the profile. Creator only; `variety_id` cannot change.
    pub fn update(&mut self, id: RecordId, profile: ConditionProfile, caller: &Principal) -> RegistryResult<RecordId> {
        let condition = self.conditions.get_mut(&id).ok_or(RegistryError::NotFound)?;
        if &condition.creator != caller {
            warn!("{} attempted to update growing condition #{} created by {}", caller, id, condition.creator);
            return Err(RegistryError::Forbidden);
        }
        condition.profile = profile;
        debug!("Updated growing condition #{}", id);
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> Option<&GrowingCondition> {
        self.conditions.get(&id)
    }

    /// Profile ids for a variety, in registration order.
    ///
    /// NotFound until the first profile for that variety is registered.
    pub fn list_for_variety(&self, variety_id: RecordId) -> RegistryResult<&[RecordId]> {
        self.by_variety
            .get(&variety_id)
            .map(Vec::as_slice)
            .ok_or(RegistryError::NotFound)
    }

    pub fn is_suitable(&self, id: RecordId, temperature: i64, rainfall: i64, soil_ph: i64) -> RegistryResult<bool> {
        let condition = self.get(id).ok_or(RegistryError::NotFound)?;
        Ok(condition.profile.accepts(temperature, rainfall, soil_ph))
    }

    pub fn last_id(&self) -> RecordId {
        self.counter.last()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
