//! Built-in handlers and fallback defaults.

use crate::movement::{Builtin, EventKind};

use super::host::{Invocation, World};
use super::outcome::Outcome;

/// Run a built-in handler.
///
/// A call shape the built-in does not serve (which validation rules out
/// for registered events) is not handled.
pub fn run(builtin: Builtin, world: &mut dyn World, call: &Invocation<'_>) -> Outcome {
    match (builtin, *call) {
        (Builtin::StepInField, Invocation::Step { creature, item: Some(item), .. }) => {
            if !item.magic_field {
                return Outcome::NOT_HANDLED;
            }
            world.apply_field(creature, item.thing);
            Outcome::HANDLED
        }

        (Builtin::StepOutField, Invocation::Step { .. }) => Outcome::HANDLED,

        (Builtin::AddItemField, Invocation::ItemMove { item, position, .. }) => {
            if !item.magic_field {
                return Outcome::NOT_HANDLED;
            }
            for creature in world.creatures_at(position) {
                world.apply_field(creature, item.thing);
            }
            Outcome::HANDLED
        }

        (Builtin::RemoveItemField, Invocation::ItemMove { .. }) => Outcome::HANDLED,

        (Builtin::EquipItem, Invocation::Equip { player, item, slot, is_check }) => {
            if !is_check && !world.item_abilities_enabled(player.id, slot) {
                world.set_item_abilities(player.id, item.thing, slot, true);
            }
            Outcome::HANDLED
        }

        (Builtin::DeEquipItem, Invocation::Equip { player, item, slot, is_check }) => {
            if !is_check && world.item_abilities_enabled(player.id, slot) {
                world.set_item_abilities(player.id, item.thing, slot, false);
            }
            Outcome::HANDLED
        }

        _ => Outcome::NOT_HANDLED,
    }
}

/// Outcome when no event matched.
#[must_use]
pub const fn fallback(kind: EventKind) -> Outcome {
    match kind {
        // The engine applies its own step and item-move behavior.
        EventKind::StepIn | EventKind::StepOut | EventKind::AddItem | EventKind::RemoveItem => {
            Outcome::NOT_HANDLED
        }
        // Equipment changes go through untouched.
        EventKind::Equip | EventKind::DeEquip => Outcome::NOT_HANDLED,
    }
}
