//! Seedbank — provenance and viability registry for seed stock
//!
//! Records seed varieties, their growing-condition profiles, seed batches,
//! germination tests and viability predictions, and enforces who may create
//! or modify each record. Caller identity and block height come from the
//! host ledger on every call.

pub mod config;
pub mod error;
pub mod principal;
pub mod registry;
pub mod storage;

pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult, SnapshotError};
pub use principal::{Height, Principal};
pub use registry::{
    BatchStorage, ConditionProfile, GerminationTest, GrowingCondition, RecordId, SeedBatch,
    SeedRegistry, TestObservation, Variety, VarietyDetails, ViabilityPrediction,
};
