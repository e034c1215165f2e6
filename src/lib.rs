//! # movement-events
//!
//! Dispatch of movement and interaction events for a tile-based game world.
//!
//! Scripts register handlers against item types, tagged item instances or
//! fixed map positions. When a creature steps onto or off a tile, an item is
//! added to or removed from a tile, or a player equips or unequips an item,
//! the engine asks this crate which handlers apply, runs them and gets back
//! a single outcome.
//!
//! ## Design Principles
//!
//! 1. **Fixed Precedence**: A unique id beats an action id, which beats an
//!    item id, which beats a position. Only the most specific key space that
//!    matches is used.
//!
//! 2. **Registration Order**: Handlers under one key run in the order they
//!    were registered.
//!
//! 3. **Fail Open**: A failing script is logged and treated as not handled.
//!    It never aborts a dispatch.
//!
//! 4. **No Globals**: [`MoveEvents`] is constructed and owned by the host.
//!    Reloads swap in a complete registry at once.
//!
//! ## Modules
//!
//! - `core`: Identifiers, positions, slots, player and item snapshots, tiles,
//!   configuration
//! - `movement`: Event definitions, registration specs and the registry
//! - `eligibility`: Equip requirement checks
//! - `dispatch`: Entry points, built-in handlers and host interfaces
//! - `error`: Error types

pub mod core;
pub mod dispatch;
pub mod eligibility;
pub mod error;
pub mod movement;

// Re-export commonly used types
pub use crate::core::{
    CreatureId, ThingId,
    Position, Slot, SlotMask,
    PlayerAttrs, PlayerId, VocationId,
    ItemKeys, ItemRef, Tile, TileView,
    HandlerPolicy, MoveEventsConfig, VocationConfig,
};

pub use crate::movement::{
    Builtin, EventKind, EventSpec, Handler, HandlerSpec, IdRange,
    KeyCategory, LoadReport, MoveEvent, MoveEventId, Registry, Requirements,
    Resolution, ScriptHandle, WieldFlags,
};

pub use crate::eligibility::{Eligibility, EligibilityEvaluator, Ineligibility};

pub use crate::dispatch::{
    DispatchContext, Dispatcher, EquipOutcome, Invocation, MoveEvents,
    MoveOutcome, Outcome, ScriptRuntime, World,
};

pub use crate::error::{MoveEventError, Result, ScriptError};
