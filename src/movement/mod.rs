//! Move events: definitions, registration specs and the registry.
//!
//! A move event reacts to one of six occurrences ([`EventKind`]) on items
//! identified by item id, action id, unique id, or on a fixed tile position.
//!
//! ## Key Components
//!
//! - [`MoveEvent`]: a handler plus the keys, slots and requirements it applies to
//! - [`Handler`]: built-in engine behavior or a script callback
//! - [`Requirements`]: level, magic level, premium and vocation gates for equipping
//! - [`EventSpec`]: the name-based form script loaders produce
//! - [`Registry`]: keyed storage with fixed lookup precedence
//!
//! ## Example Usage
//!
//! ```
//! use movement_events::core::ItemKeys;
//! use movement_events::movement::{
//!     EventKind, KeyCategory, MoveEvent, Registry, ScriptHandle,
//! };
//!
//! let mut registry = Registry::new();
//!
//! // Every depot switch item reacts to being stepped on...
//! registry
//!     .register_event(MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(1)).with_item_id(426))
//!     .unwrap();
//! // ...but this particular one opens a quest door instead.
//! registry
//!     .register_event(MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(2)).with_unique_id(30015))
//!     .unwrap();
//!
//! let special = ItemKeys::new(426).with_unique_id(30015);
//! let resolved = registry.lookup(EventKind::StepIn, Some(&special), None).unwrap();
//! assert_eq!(resolved.category, KeyCategory::UniqueId);
//! ```

mod event;
mod kind;
mod registry;
mod spec;

pub use event::{
    Builtin, Handler, MoveEvent, MoveEventId, Requirements, ScriptHandle, WieldFlags,
};
pub use kind::EventKind;
pub use registry::{KeyCategory, LoadReport, Registry, Resolution};
pub use spec::{load_specs_toml, EventSpec, HandlerSpec, IdRange, MAX_ID_RANGE};
