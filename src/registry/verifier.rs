//! Verifier Role Store — principals allowed to attest variety verification
//!
//! Roles are granted and revoked only by the administrator fixed at
//! construction time.

use crate::error::{RegistryError, RegistryResult};
use crate::principal::Principal;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role entry for a single principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierRole {
    pub is_verifier: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierRoles {
    admin: Principal,
    roles: BTreeMap<Principal, VerifierRole>,
}

impl VerifierRoles {
    pub fn new(admin: Principal) -> Self {
        Self {
            admin,
            roles: BTreeMap::new(),
        }
    }

    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Grant the verifier role. Admin only.
    pub fn add_verifier(&mut self, verifier: Principal, caller: &Principal) -> RegistryResult<bool> {
        self.set_role(verifier, true, caller)
    }

    /// Revoke the verifier role. Admin only; the entry is kept with `is_verifier = false`.
    pub fn remove_verifier(&mut self, verifier: Principal, caller: &Principal) -> RegistryResult<bool> {
        self.set_role(verifier, false, caller)
    }

    fn set_role(&mut self, verifier: Principal, is_verifier: bool, caller: &Principal) -> RegistryResult<bool> {
        if caller != &self.admin {
            warn!("{} attempted to change verifier role of {}", caller, verifier);
            return Err(RegistryError::Forbidden);
        }
        info!("Verifier role for {} set to {}", verifier, is_verifier);
        self.roles.insert(verifier, VerifierRole { is_verifier });
        Ok(true)
    }

    pub fn get(&self, principal: &Principal) -> Option<VerifierRole> {
        self.roles.get(principal).copied()
    }

    /// True only for principals present with `is_verifier = true`
    pub fn is_verifier(&self, principal: &Principal) -> bool {
        self.get(principal).is_some_and(|role| role.is_verifier)
    }

    /// Number of principals currently holding the role
    pub fn active_count(&self) -> usize {
        self.roles.values().filter(|r| r.is_verifier).count()
    }
}
