//! Equipment slots and slot masks.
//!
//! A player equips items into a concrete [`Slot`]. Equip and de-equip events
//! declare the slots they care about as a [`SlotMask`]; the `ANYWHERE`
//! sentinel (every bit set) accepts any slot.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A concrete equipment slot on a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Head,
    Necklace,
    Backpack,
    Armor,
    Right,
    Left,
    Legs,
    Feet,
    Ring,
    Ammo,
}

impl Slot {
    /// All slots in inventory order.
    pub const ALL: [Slot; 10] = [
        Slot::Head,
        Slot::Necklace,
        Slot::Backpack,
        Slot::Armor,
        Slot::Right,
        Slot::Left,
        Slot::Legs,
        Slot::Feet,
        Slot::Ring,
        Slot::Ammo,
    ];

    /// The single-bit mask for this slot.
    #[must_use]
    pub const fn mask(self) -> SlotMask {
        match self {
            Slot::Head => SlotMask::HEAD,
            Slot::Necklace => SlotMask::NECKLACE,
            Slot::Backpack => SlotMask::BACKPACK,
            Slot::Armor => SlotMask::ARMOR,
            Slot::Right => SlotMask::RIGHT,
            Slot::Left => SlotMask::LEFT,
            Slot::Legs => SlotMask::LEGS,
            Slot::Feet => SlotMask::FEET,
            Slot::Ring => SlotMask::RING,
            Slot::Ammo => SlotMask::AMMO,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Slot::Head => "head",
            Slot::Necklace => "necklace",
            Slot::Backpack => "backpack",
            Slot::Armor => "armor",
            Slot::Right => "right-hand",
            Slot::Left => "left-hand",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Ring => "ring",
            Slot::Ammo => "ammo",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Set of slots an event applies to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SlotMask: u32 {
        const HEAD = 1 << 0;
        const NECKLACE = 1 << 1;
        const BACKPACK = 1 << 2;
        const ARMOR = 1 << 3;
        const RIGHT = 1 << 4;
        const LEFT = 1 << 5;
        const LEGS = 1 << 6;
        const FEET = 1 << 7;
        const RING = 1 << 8;
        const AMMO = 1 << 9;

        /// Either hand.
        const HAND = Self::LEFT.bits() | Self::RIGHT.bits();

        /// Sentinel matching any slot.
        const ANYWHERE = u32::MAX;
    }
}

impl SlotMask {
    /// Whether an item may go into `slot` under this mask.
    #[must_use]
    pub fn accepts(self, slot: Slot) -> bool {
        self.intersects(slot.mask())
    }

    /// Parse a slot name as written in move-event scripts.
    ///
    /// Names are case-insensitive. `hand` and `shield` both mean either hand.
    ///
    /// ```
    /// use movement_events::core::{Slot, SlotMask};
    ///
    /// let mask = SlotMask::from_script_name("Shield").unwrap();
    /// assert!(mask.accepts(Slot::Left));
    /// assert!(mask.accepts(Slot::Right));
    /// assert!(!mask.accepts(Slot::Head));
    /// assert!(SlotMask::from_script_name("tail").is_none());
    /// ```
    #[must_use]
    pub fn from_script_name(name: &str) -> Option<Self> {
        let mask = match name.trim().to_ascii_lowercase().as_str() {
            "head" => Self::HEAD,
            "necklace" => Self::NECKLACE,
            "backpack" => Self::BACKPACK,
            "armor" | "body" => Self::ARMOR,
            "right-hand" => Self::RIGHT,
            "left-hand" => Self::LEFT,
            "hand" | "shield" => Self::HAND,
            "legs" => Self::LEGS,
            "feet" => Self::FEET,
            "ring" => Self::RING,
            "ammo" => Self::AMMO,
            _ => return None,
        };
        Some(mask)
    }
}

impl Default for SlotMask {
    fn default() -> Self {
        Self::ANYWHERE
    }
}
