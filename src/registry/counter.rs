//! Monotonic id allocation shared by every registry

use serde::{Deserialize, Serialize};

/// Record identifier. Starts at 1, never reused.
pub type RecordId = u64;

/// Per-registry counter. Only advanced once a registration is certain to succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdCounter {
    last: RecordId,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last id handed out (0 when nothing has been registered)
    pub fn last(&self) -> RecordId {
        self.last
    }

    /// Allocate the next id
    pub fn advance(&mut self) -> RecordId {
        self.last += 1;
        self.last
    }
}
