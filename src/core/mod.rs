//! Core types: identifiers, positions, slots, players, items, tiles and
//! configuration.
//!
//! These are plain snapshot values the host engine hands to dispatch. None
//! of them own world state.

pub mod config;
pub mod entity;
pub mod item;
pub mod player;
pub mod position;
pub mod slot;
pub mod tile;

pub use config::{HandlerPolicy, MoveEventsConfig, VocationConfig};
pub use entity::{CreatureId, ThingId};
pub use item::{ItemKeys, ItemRef};
pub use player::{PlayerAttrs, PlayerId, VocationId};
pub use position::Position;
pub use slot::{Slot, SlotMask};
pub use tile::{Tile, TileView};
