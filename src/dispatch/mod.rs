//! Dispatch of world occurrences to move events.
//!
//! The engine calls one entry point per occurrence. The dispatcher resolves
//! the applicable events from the registry, checks equip eligibility where
//! relevant, runs handlers in registration order and folds their outcomes
//! into one result. When nothing matches, a built-in default decides.
//!
//! ## Key Components
//!
//! - [`MoveEvents`]: owns the configuration and the active registry, swaps
//!   registries atomically on reload
//! - [`Dispatcher`]: the four entry points against one registry snapshot
//! - [`World`] and [`ScriptRuntime`]: the host's side of a dispatch
//! - [`Outcome`]: zero for "not handled", anything else for handled
//!
//! ## Example Usage
//!
//! ```
//! use movement_events::core::{
//!     CreatureId, ItemKeys, ItemRef, MoveEventsConfig, PlayerId, Position, Slot, ThingId, Tile,
//! };
//! use movement_events::dispatch::{
//!     DispatchContext, Invocation, MoveEvents, Outcome, ScriptRuntime, World,
//! };
//! use movement_events::error::ScriptError;
//! use movement_events::movement::{EventKind, MoveEvent, ScriptHandle};
//!
//! struct NoWorld;
//!
//! impl World for NoWorld {
//!     fn creatures_at(&self, _: Position) -> Vec<CreatureId> { Vec::new() }
//!     fn apply_field(&mut self, _: CreatureId, _: ThingId) {}
//!     fn item_abilities_enabled(&self, _: PlayerId, _: Slot) -> bool { false }
//!     fn set_item_abilities(&mut self, _: PlayerId, _: ThingId, _: Slot, _: bool) {}
//! }
//!
//! // Every script blocks the move.
//! struct Blocking;
//!
//! impl ScriptRuntime for Blocking {
//!     fn invoke(&mut self, _: ScriptHandle, _: EventKind, _: &Invocation<'_>) -> Result<Outcome, ScriptError> {
//!         Ok(Outcome::HANDLED)
//!     }
//! }
//!
//! let events = MoveEvents::new(MoveEventsConfig::new());
//! events
//!     .reload_with(|registry| {
//!         registry
//!             .register_event(MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(1)).with_item_id(1234))
//!             .map(|_| ())
//!     })
//!     .unwrap();
//!
//! let (mut world, mut scripts) = (NoWorld, Blocking);
//! let mut ctx = DispatchContext::new(&mut world, &mut scripts);
//!
//! let trap = Tile::new(Position::new(100, 100, 7)).with_item(ItemRef::new(ThingId::new(1), ItemKeys::new(1234)));
//! let result = events.on_creature_move(&mut ctx, CreatureId::new(7), &trap, EventKind::StepIn).unwrap();
//! assert_eq!(result.outcome, Outcome::HANDLED);
//!
//! let grass = Tile::new(Position::new(101, 100, 7)).with_item(ItemRef::new(ThingId::new(2), ItemKeys::new(9999)));
//! let result = events.on_creature_move(&mut ctx, CreatureId::new(7), &grass, EventKind::StepIn).unwrap();
//! assert!(result.used_default());
//! ```

mod builtin;
mod dispatcher;
mod host;
mod move_events;
mod outcome;

pub use builtin::fallback;
pub use dispatcher::Dispatcher;
pub use host::{DispatchContext, Invocation, ScriptRuntime, World};
pub use move_events::MoveEvents;
pub use outcome::{EquipOutcome, MoveOutcome, Outcome};
