//! Error types.

use thiserror::Error;

use crate::movement::EventKind;

/// Crate-wide result alias.
pub type Result<T, E = MoveEventError> = std::result::Result<T, E>;

/// Errors raised while loading event specs or calling an entry point.
///
/// Everything except `WrongKind` is a configuration problem with one spec;
/// loaders skip the offending event and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveEventError {
    /// The event declares no item id, action id, unique id or position.
    #[error("event from {origin} declares no ids or positions")]
    MissingKeys { origin: String },

    /// An inclusive id range whose start lies past its end.
    #[error("empty id range {from}-{to}")]
    EmptyIdRange { from: u32, to: u32 },

    /// An inclusive id range spanning more ids than a spec may declare.
    #[error("id range {from}-{to} is wider than {max} ids")]
    IdRangeTooWide { from: u32, to: u32, max: u32 },

    /// The slot list resolves to no slot at all.
    #[error("slot mask matches no slot")]
    EmptySlotMask,

    /// A slot name that is not recognized.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),

    /// A slot restriction on an event that is neither equip nor de-equip.
    #[error("slot restriction on {0} event")]
    SlotOnNonEquip(EventKind),

    /// The tile-item flag on an event that is neither add nor remove item.
    #[error("tile item flag on {0} event")]
    TileItemOnNonItemMove(EventKind),

    /// A tile-item event keyed by position. Tile-item events are only
    /// looked up by the keys of items already on the tile.
    #[error("tile item {0} event cannot be keyed by position")]
    TileItemAtPosition(EventKind),

    /// A built-in handler name that is not recognized.
    #[error("unknown built-in handler: {0}")]
    UnknownBuiltin(String),

    /// A built-in handler bound to a kind it cannot serve.
    #[error("built-in {builtin} cannot handle {kind} events")]
    BuiltinKindMismatch { builtin: String, kind: EventKind },

    /// An event kind name that is not recognized.
    #[error("unknown event kind: {0}")]
    UnknownKind(String),

    /// A spec or configuration document failed to parse.
    #[error("parse error: {0}")]
    Parse(String),

    /// An entry point was called with a kind it does not dispatch.
    #[error("{kind} is not a valid kind for {entry_point}")]
    WrongKind {
        kind: EventKind,
        entry_point: &'static str,
    },
}

/// A scripted handler failed while running.
///
/// Returned by the scripting runtime. Dispatch logs it and treats the event
/// as not handled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("script error: {message}")]
pub struct ScriptError {
    pub message: String,
}

impl ScriptError {
    /// Create a new script error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
