//! Caller identity and the host's logical clock

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical block height supplied by the host on every call
pub type Height = u64;

/// An authenticated identity, compared byte-for-byte against stored owners
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Principal {
    fn from(address: String) -> Self {
        Self(address)
    }
}
