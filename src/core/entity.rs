//! Entity handles owned by the host world.
//!
//! The dispatcher never dereferences these. They identify creatures and item
//! instances when calling back into the host, and `ThingId` is compared to
//! tell the moved item apart from the items already lying on a tile.
//!
//! ```
//! use movement_events::core::{CreatureId, ThingId};
//!
//! let rat = CreatureId::new(7);
//! let torch = ThingId::new(0x4000_0001);
//!
//! assert_eq!(rat.raw(), 7);
//! assert_eq!(format!("{}", torch), "Thing(1073741825)");
//! ```

use serde::{Deserialize, Serialize};

/// Handle of one item instance in the host world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThingId(pub u64);

impl ThingId {
    /// Create a new thing handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ThingId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ThingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thing({})", self.0)
    }
}

/// Handle of a creature (monster, NPC or player body) in the host world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Create a new creature handle.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CreatureId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}
