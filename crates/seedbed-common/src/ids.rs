//! ID types for simulation records.

use serde::{Deserialize, Serialize};

/// Stable identifier for a plant in the garden's plant arena.
///
/// Ids are handed out by a [`PlantIdGen`] owned by the garden, so a replay
/// with the same seed and command sequence produces the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlantId(u64);

impl PlantId {
    /// Creates a plant ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Null/invalid plant ID.
    pub const NULL: Self = Self(0);

    /// Checks if this is a valid (non-null) plant ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Monotonic generator of [`PlantId`]s, starting at 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantIdGen {
    last: u64,
}

impl PlantIdGen {
    /// Returns the next unused id.
    pub fn next_id(&mut self) -> PlantId {
        self.last += 1;
        PlantId(self.last)
    }
}
