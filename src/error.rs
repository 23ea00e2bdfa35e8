//! Registry errors
//!
//! Domain operations fail in exactly two ways. Snapshot I/O has its own error
//! type so that it never leaks into the state-transition API.

/// Failure of a registry operation. Carries no payload beyond its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The referenced record (or its required parent) does not exist
    #[error("record not found")]
    NotFound,

    /// The caller is not the owner, creator, verifier or admin required
    #[error("caller is not authorized for this operation")]
    Forbidden,
}

impl RegistryError {
    /// Numeric code used by ledger hosts (HTTP-style)
    pub fn code(&self) -> u32 {
        match self {
            RegistryError::NotFound => 404,
            RegistryError::Forbidden => 403,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Snapshot persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot checksum mismatch: expected {expected}, found {found}")]
    Checksum { expected: String, found: String },
}
