//! Move event definitions.
//!
//! A [`MoveEvent`] binds a handler to one [`EventKind`] and to the keys it is
//! registered under: item ids, action ids, unique ids and tile positions.
//! Equip events additionally carry a slot mask and the [`Requirements`] a
//! player has to meet before the handler runs.

use bitflags::bitflags;
use rustc_hash::FxHashSet;

use crate::core::{Position, SlotMask, VocationId};
use crate::error::{MoveEventError, Result};

use super::kind::EventKind;

/// Index of an event inside a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveEventId(pub u32);

impl MoveEventId {
    /// Create a new event ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MoveEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MoveEvent({})", self.0)
    }
}

/// Handle of a script callback owned by the scripting runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScriptHandle(pub u32);

impl ScriptHandle {
    /// Create a new script handle.
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

impl std::fmt::Display for ScriptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Script({})", self.0)
    }
}

/// Handlers implemented by the engine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Apply a magic field to the creature stepping on it.
    StepInField,
    /// Stepping off a field has no effect.
    StepOutField,
    /// Apply a magic field to every creature on the tile it lands on.
    AddItemField,
    /// Removing a field has no effect.
    RemoveItemField,
    /// Enable the item's abilities for the slot.
    EquipItem,
    /// Disable the item's abilities for the slot.
    DeEquipItem,
}

impl Builtin {
    /// Name used by scripts to bind this built-in.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::StepInField => "onstepinfield",
            Builtin::StepOutField => "onstepoutfield",
            Builtin::AddItemField => "onaddfield",
            Builtin::RemoveItemField => "onremovefield",
            Builtin::EquipItem => "onequipitem",
            Builtin::DeEquipItem => "ondeequipitem",
        }
    }

    /// Parse a built-in from its script name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Builtin::StepInField,
            Builtin::StepOutField,
            Builtin::AddItemField,
            Builtin::RemoveItemField,
            Builtin::EquipItem,
            Builtin::DeEquipItem,
        ]
        .into_iter()
        .find(|b| b.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether this built-in can serve events of `kind`.
    #[must_use]
    pub const fn handles(self, kind: EventKind) -> bool {
        match self {
            Builtin::StepInField | Builtin::StepOutField => kind.is_step(),
            Builtin::AddItemField | Builtin::RemoveItemField => kind.is_item_move(),
            Builtin::EquipItem | Builtin::DeEquipItem => kind.is_equipment(),
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What runs when an event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    Builtin(Builtin),
    Scripted(ScriptHandle),
}

impl std::fmt::Display for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Builtin(builtin) => write!(f, "{builtin}"),
            Handler::Scripted(handle) => write!(f, "{handle}"),
        }
    }
}

bitflags! {
    /// Which equip requirements an event enforces.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WieldFlags: u8 {
        const LEVEL = 1 << 0;
        const MAGIC_LEVEL = 1 << 1;
        const VOCATION = 1 << 2;
        const PREMIUM = 1 << 3;
    }
}

/// Equip requirements.
///
/// Every setter records its requirement in [`WieldFlags`], so the flags
/// always describe exactly which checks are active. A zero level or magic
/// level leaves that check off; an empty vocation set allows everyone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Requirements {
    min_level: u32,
    min_magic_level: u32,
    premium: bool,
    vocations: FxHashSet<VocationId>,
    wield: WieldFlags,
}

impl Requirements {
    /// No requirements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `level` (builder pattern).
    #[must_use]
    pub fn with_min_level(mut self, level: u32) -> Self {
        self.min_level = level;
        self.wield.set(WieldFlags::LEVEL, level > 0);
        self
    }

    /// Require at least `level` magic level (builder pattern).
    #[must_use]
    pub fn with_min_magic_level(mut self, level: u32) -> Self {
        self.min_magic_level = level;
        self.wield.set(WieldFlags::MAGIC_LEVEL, level > 0);
        self
    }

    /// Require a premium account (builder pattern).
    #[must_use]
    pub fn with_premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self.wield.set(WieldFlags::PREMIUM, premium);
        self
    }

    /// Add a vocation to the allow-set (builder pattern).
    #[must_use]
    pub fn with_vocation(mut self, vocation: VocationId) -> Self {
        self.vocations.insert(vocation);
        self.wield.insert(WieldFlags::VOCATION);
        self
    }

    #[must_use]
    pub fn min_level(&self) -> u32 {
        self.min_level
    }

    #[must_use]
    pub fn min_magic_level(&self) -> u32 {
        self.min_magic_level
    }

    #[must_use]
    pub fn premium(&self) -> bool {
        self.premium
    }

    /// The vocation allow-set.
    pub fn vocations(&self) -> impl Iterator<Item = VocationId> + '_ {
        self.vocations.iter().copied()
    }

    /// Whether `vocation` passes the allow-set.
    #[must_use]
    pub fn allows_vocation(&self, vocation: VocationId) -> bool {
        self.vocations.is_empty() || self.vocations.contains(&vocation)
    }

    /// The active requirement checks.
    #[must_use]
    pub fn wield_flags(&self) -> WieldFlags {
        self.wield
    }
}

/// A registered move event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    pub kind: EventKind,

    pub handler: Handler,

    /// Slots an equip or de-equip event applies to.
    pub slots: SlotMask,

    /// Checked before equip handlers run.
    pub requirements: Requirements,

    /// For add/remove events: react to items moved onto or off a tile that
    /// holds this item, instead of to this item being moved.
    pub tile_item: bool,

    pub item_ids: Vec<u32>,
    pub action_ids: Vec<u32>,
    pub unique_ids: Vec<u32>,
    pub positions: Vec<Position>,

    /// Script file the event was declared in, for diagnostics.
    pub source: String,
}

impl MoveEvent {
    /// Create an event with no keys, no requirements and any slot.
    pub fn new(kind: EventKind, handler: Handler) -> Self {
        Self {
            kind,
            handler,
            slots: SlotMask::ANYWHERE,
            requirements: Requirements::default(),
            tile_item: false,
            item_ids: Vec::new(),
            action_ids: Vec::new(),
            unique_ids: Vec::new(),
            positions: Vec::new(),
            source: String::new(),
        }
    }

    /// Create an event bound to a script callback.
    pub fn scripted(kind: EventKind, handle: ScriptHandle) -> Self {
        Self::new(kind, Handler::Scripted(handle))
    }

    /// Create an event bound to a built-in handler.
    pub fn builtin(kind: EventKind, builtin: Builtin) -> Self {
        Self::new(kind, Handler::Builtin(builtin))
    }

    /// Restrict to slots (builder pattern).
    #[must_use]
    pub fn with_slots(mut self, slots: SlotMask) -> Self {
        self.slots = slots;
        self
    }

    /// Set equip requirements (builder pattern).
    #[must_use]
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// React to items moved relative to this tile item (builder pattern).
    #[must_use]
    pub fn on_tile_item(mut self) -> Self {
        self.tile_item = true;
        self
    }

    /// Register under an item id (builder pattern).
    #[must_use]
    pub fn with_item_id(mut self, id: u32) -> Self {
        self.item_ids.push(id);
        self
    }

    /// Register under several item ids (builder pattern).
    #[must_use]
    pub fn with_item_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.item_ids.extend(ids);
        self
    }

    /// Register under an action id (builder pattern).
    #[must_use]
    pub fn with_action_id(mut self, id: u32) -> Self {
        self.action_ids.push(id);
        self
    }

    /// Register under a unique id (builder pattern).
    #[must_use]
    pub fn with_unique_id(mut self, id: u32) -> Self {
        self.unique_ids.push(id);
        self
    }

    /// Register at a position (builder pattern).
    #[must_use]
    pub fn at_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Record the declaring script (builder pattern).
    #[must_use]
    pub fn from_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Whether the event declares at least one key.
    #[must_use]
    pub fn has_keys(&self) -> bool {
        !(self.item_ids.is_empty()
            && self.action_ids.is_empty()
            && self.unique_ids.is_empty()
            && self.positions.is_empty())
    }

    /// Check the event for configuration errors.
    pub fn validate(&self) -> Result<()> {
        if !self.has_keys() {
            return Err(MoveEventError::MissingKeys {
                origin: self.source.clone(),
            });
        }
        if self.slots.is_empty() {
            return Err(MoveEventError::EmptySlotMask);
        }
        if self.slots != SlotMask::ANYWHERE && !self.kind.is_equipment() {
            return Err(MoveEventError::SlotOnNonEquip(self.kind));
        }
        if self.tile_item && !self.kind.is_item_move() {
            return Err(MoveEventError::TileItemOnNonItemMove(self.kind));
        }
        if self.tile_item && !self.positions.is_empty() {
            return Err(MoveEventError::TileItemAtPosition(self.kind));
        }
        if let Handler::Builtin(builtin) = self.handler {
            if !builtin.handles(self.kind) {
                return Err(MoveEventError::BuiltinKindMismatch {
                    builtin: builtin.name().to_string(),
                    kind: self.kind,
                });
            }
        }
        Ok(())
    }
}
