//! Combatant identification.
//!
//! Every combatant on the battlefield (character, monster, summon) has a
//! unique `EntityId`. IDs are handed out by the `Battlefield` when a
//! combatant is added and are never reused within a scenario.
//!
//! ```
//! use hexhaven_engine::core::EntityId;
//!
//! let brute = EntityId::new(1);
//! assert_eq!(brute.raw(), 1);
//! assert_eq!(brute.next(), EntityId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
