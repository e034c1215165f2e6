//! Event kinds.

use serde::{Deserialize, Serialize};

/// The occurrences a move event can react to.
///
/// Each key in the registry holds one ordered bucket per kind, indexed by
/// [`EventKind::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A creature steps onto a tile.
    StepIn,
    /// A creature steps off a tile.
    StepOut,
    /// An item is added to a tile.
    AddItem,
    /// An item is removed from a tile.
    RemoveItem,
    /// A player equips an item.
    Equip,
    /// A player unequips an item.
    DeEquip,
}

impl EventKind {
    /// Number of kinds.
    pub const COUNT: usize = 6;

    /// All kinds in index order.
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::StepIn,
        EventKind::StepOut,
        EventKind::AddItem,
        EventKind::RemoveItem,
        EventKind::Equip,
        EventKind::DeEquip,
    ];

    /// Bucket index of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The script name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::StepIn => "stepin",
            EventKind::StepOut => "stepout",
            EventKind::AddItem => "additem",
            EventKind::RemoveItem => "removeitem",
            EventKind::Equip => "equip",
            EventKind::DeEquip => "deequip",
        }
    }

    /// Parse a kind from its script name, ignoring case.
    ///
    /// ```
    /// use movement_events::movement::EventKind;
    ///
    /// assert_eq!(EventKind::from_name("StepIn"), Some(EventKind::StepIn));
    /// assert_eq!(EventKind::from_name("teleport"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Whether this is `StepIn` or `StepOut`.
    #[must_use]
    pub const fn is_step(self) -> bool {
        matches!(self, EventKind::StepIn | EventKind::StepOut)
    }

    /// Whether this is `AddItem` or `RemoveItem`.
    #[must_use]
    pub const fn is_item_move(self) -> bool {
        matches!(self, EventKind::AddItem | EventKind::RemoveItem)
    }

    /// Whether this is `Equip` or `DeEquip`.
    #[must_use]
    pub const fn is_equipment(self) -> bool {
        matches!(self, EventKind::Equip | EventKind::DeEquip)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
