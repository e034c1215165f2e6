//! Item identifiers as seen by the event registry.
//!
//! An item instance can be tagged in three independent namespaces:
//!
//! - **item id**: the item type, shared by every instance of that type
//! - **action id**: a tag map makers attach to a group of instances
//! - **unique id**: a tag identifying exactly one instance in the world
//!
//! Every item has an item id; action and unique ids are optional.

use serde::{Deserialize, Serialize};

use super::ThingId;

/// The identifiers of one item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKeys {
    pub item_id: u32,
    pub action_id: Option<u32>,
    pub unique_id: Option<u32>,
}

impl ItemKeys {
    /// Keys for an untagged item of the given type.
    #[must_use]
    pub const fn new(item_id: u32) -> Self {
        Self {
            item_id,
            action_id: None,
            unique_id: None,
        }
    }

    /// Set the action id (builder pattern).
    #[must_use]
    pub const fn with_action_id(mut self, action_id: u32) -> Self {
        self.action_id = Some(action_id);
        self
    }

    /// Set the unique id (builder pattern).
    #[must_use]
    pub const fn with_unique_id(mut self, unique_id: u32) -> Self {
        self.unique_id = Some(unique_id);
        self
    }
}

/// An item instance handed to the dispatcher by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Host handle of the instance.
    pub thing: ThingId,
    pub keys: ItemKeys,
    /// Whether the item is a magic field (fire, poison, energy...).
    pub magic_field: bool,
}

impl ItemRef {
    /// Create a reference to a plain (non-field) item.
    #[must_use]
    pub const fn new(thing: ThingId, keys: ItemKeys) -> Self {
        Self {
            thing,
            keys,
            magic_field: false,
        }
    }

    /// Create a reference to a magic field item.
    #[must_use]
    pub const fn field(thing: ThingId, keys: ItemKeys) -> Self {
        Self {
            thing,
            keys,
            magic_field: true,
        }
    }

    /// Shorthand for the item type id.
    #[must_use]
    pub const fn item_id(&self) -> u32 {
        self.keys.item_id
    }
}
