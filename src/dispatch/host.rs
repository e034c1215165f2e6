//! Collaborators the dispatcher calls back into.
//!
//! The host engine owns the world and the scripting runtime. Dispatch reaches
//! them only through these traits, bundled per call in a
//! [`DispatchContext`].

use crate::core::{CreatureId, ItemRef, PlayerAttrs, PlayerId, Position, Slot, ThingId};
use crate::error::ScriptError;
use crate::movement::{EventKind, ScriptHandle};

use super::outcome::Outcome;

/// World operations the built-in handlers need.
pub trait World {
    /// Creatures currently standing on the tile at `position`.
    fn creatures_at(&self, position: Position) -> Vec<CreatureId>;

    /// Apply a magic field's effect (burn, poison, ...) to a creature.
    fn apply_field(&mut self, creature: CreatureId, field: ThingId);

    /// Whether the abilities of the item in `slot` are active.
    fn item_abilities_enabled(&self, player: PlayerId, slot: Slot) -> bool;

    /// Turn the abilities of `item` in `slot` on or off.
    fn set_item_abilities(&mut self, player: PlayerId, item: ThingId, slot: Slot, enabled: bool);
}

/// Arguments passed to a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// A creature stepped onto or off a tile. `item` is `None` for events
    /// registered on the tile position itself.
    Step {
        creature: CreatureId,
        item: Option<&'a ItemRef>,
        position: Position,
    },

    /// `item` was added to or removed from a tile. `tile_item` is the item
    /// already on the tile whose event fired, for tile-item events.
    ItemMove {
        item: &'a ItemRef,
        tile_item: Option<&'a ItemRef>,
        position: Position,
    },

    /// A player equips or unequips `item` in `slot`.
    Equip {
        player: &'a PlayerAttrs,
        item: &'a ItemRef,
        slot: Slot,
        is_check: bool,
    },
}

/// The scripting runtime.
pub trait ScriptRuntime {
    /// Run the callback behind `script` for an event of `kind`.
    ///
    /// Errors are reported back to dispatch, which logs them and treats the
    /// event as not handled.
    fn invoke(
        &mut self,
        script: ScriptHandle,
        kind: EventKind,
        call: &Invocation<'_>,
    ) -> Result<Outcome, ScriptError>;
}

/// Collaborators for one dispatch call.
pub struct DispatchContext<'a> {
    pub world: &'a mut dyn World,
    pub scripts: &'a mut dyn ScriptRuntime,
}

impl<'a> DispatchContext<'a> {
    /// Create a new context.
    pub fn new(world: &'a mut dyn World, scripts: &'a mut dyn ScriptRuntime) -> Self {
        Self { world, scripts }
    }
}
