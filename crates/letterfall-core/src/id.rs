//! Stable letter identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a spawned letter.
///
/// Ids are handed out by the letter registry in spawn order and are never
/// reused within a session, so an id outlives the physics handle it was
/// paired with.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterId(pub u64);

impl LetterId {
    /// Create a LetterId from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LetterId({})", self.0)
    }
}

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
