//! Variety Registry — identity and taxonomy of seed varieties
//!
//! A variety is owned by whoever registered it. Only the owner may edit its
//! descriptive fields; the verification flag belongs to the verifier path.

use super::counter::{IdCounter, RecordId};
use super::verifier::VerifierRoles;
use crate::error::{RegistryError, RegistryResult};
use crate::principal::{Height, Principal};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive, owner-editable fields of a variety
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyDetails {
    pub name: String,
    pub species: String,
    pub family: String,
    pub origin: String,
    pub description: String,
    pub characteristics: String,
    pub cultivation_history: String,
    /// Comma-separated image URLs
    pub images: String,
}

/// A registered seed variety
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variety {
    pub id: RecordId,
    pub owner: Principal,
    #[serde(flatten)]
    pub details: VarietyDetails,
    pub registration_height: Height,
    pub verification_status: bool,
}

impl Variety {
    pub fn summary(&self) -> String {
        format!(
            "Variety #{} '{}' ({}, {}) | owner={} | verified={}",
            self.id,
            self.details.name,
            self.details.species,
            self.details.family,
            self.owner,
            self.verification_status
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VarietyRegistry {
    varieties: BTreeMap<RecordId, Variety>,
    counter: IdCounter,
}

impl VarietyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, unverified variety owned by the caller
    pub fn register(&mut self, details: VarietyDetails, caller: &Principal, height: Height) -> RecordId {
        let id = self.counter.advance();
        let variety = Variety {
            id,
            owner: caller.clone(),
            details,
            registration_height: height,
            verification_status: false,
        };
        info!("Registered {}", variety.summary());
        self.varieties.insert(id, variety);
        id
    }

    /// Replace the descriptive fields. Owner only.
    pub fn update(&mut self, id: RecordId, details: VarietyDetails, caller: &Principal) -> RegistryResult<RecordId> {
        let variety = self.varieties.get_mut(&id).ok_or(RegistryError::NotFound)?;
        if &variety.owner != caller {
            warn!("{} attempted to update variety #{} owned by {}", caller, id, variety.owner);
            return Err(RegistryError::Forbidden);
        }
        variety.details = details;
        debug!("Updated variety #{}", id);
        Ok(id)
    }

    /// Set the verification flag. Requires an active verifier role, not ownership.
    pub fn verify(
        &mut self,
        id: RecordId,
        verified: bool,
        roles: &VerifierRoles,
        caller: &Principal,
    ) -> RegistryResult<RecordId> {
        if !roles.is_verifier(caller) {
            warn!("{} is not a verifier, cannot verify variety #{}", caller, id);
            return Err(RegistryError::Forbidden);
        }
        let variety = self.varieties.get_mut(&id).ok_or(RegistryError::NotFound)?;
        variety.verification_status = verified;
        info!("Variety #{} verification set to {} by {}", id, verified, caller);
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> Option<&Variety> {
        self.varieties.get(&id)
    }

    pub fn is_verified(&self, id: RecordId) -> RegistryResult<bool> {
        self.get(id)
            .map(|v| v.verification_status)
            .ok_or(RegistryError::NotFound)
    }

    pub fn varieties_by_owner(&self, owner: &Principal) -> Vec<&Variety> {
        self.varieties.values().filter(|v| &v.owner == owner).collect()
    }

    pub fn verified_count(&self) -> usize {
        self.varieties.values().filter(|v| v.verification_status).count()
    }

    pub fn last_id(&self) -> RecordId {
        self.counter.last()
    }

    pub fn len(&self) -> usize {
        self.varieties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.varieties.is_empty()
    }
}
