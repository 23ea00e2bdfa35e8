//! Registry configuration
//!
//! The administrator is fixed when the registry is constructed. It is the only
//! identity allowed to grant or revoke the verifier role.

use crate::principal::Principal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ADMIN_ENV: &str = "SEEDBANK_ADMIN";
pub const STORE_ENV: &str = "SEEDBANK_STORE";

const DEFAULT_ADMIN: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
const DEFAULT_STORE: &str = "seedbank-store.json";

/// Configuration for a seed registry deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Deploying principal, allowed to manage verifiers
    pub admin: Principal,
    /// Where snapshots are written
    pub snapshot_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            admin: Principal::from(DEFAULT_ADMIN),
            snapshot_path: PathBuf::from(DEFAULT_STORE),
        }
    }
}

impl RegistryConfig {
    pub fn with_admin(admin: impl Into<Principal>) -> Self {
        Self {
            admin: admin.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `SEEDBANK_ADMIN` / `SEEDBANK_STORE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(admin) = lookup(ADMIN_ENV).filter(|v| !v.trim().is_empty()) {
            config.admin = Principal::from(admin.trim());
        }
        if let Some(path) = lookup(STORE_ENV).filter(|v| !v.trim().is_empty()) {
            config.snapshot_path = PathBuf::from(path);
        }
        config
    }
}
