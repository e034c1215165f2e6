//! Move event registry.
//!
//! The registry owns every loaded [`MoveEvent`] and indexes it under four
//! independent key spaces: unique ids, action ids, item ids and positions.
//! Each key holds one ordered bucket per [`EventKind`]; registration order
//! within a bucket is evaluation order.
//!
//! Lookups walk the key spaces in a fixed precedence
//! (unique id, then action id, then item id, then position) and stop at the
//! first space with a match, so an event placed on one specific item
//! overrides one declared for its whole item type, which in turn overrides
//! one tied to the tile it happens to lie on.
//!
//! A registry is filled once and then only read. Reloading builds a new
//! registry; see [`MoveEvents`](crate::dispatch::MoveEvents).

use std::collections::BTreeMap;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{ItemKeys, MoveEventsConfig, Position};
use crate::error::{MoveEventError, Result};

use super::event::{MoveEvent, MoveEventId};
use super::kind::EventKind;
use super::spec::EventSpec;

/// The key spaces events can be registered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    UniqueId,
    ActionId,
    ItemId,
    Position,
}

impl KeyCategory {
    /// Lookup order; earlier categories win.
    pub const PRECEDENCE: [KeyCategory; 4] = [
        KeyCategory::UniqueId,
        KeyCategory::ActionId,
        KeyCategory::ItemId,
        KeyCategory::Position,
    ];

    /// The item's key in this id space, if it has one.
    #[must_use]
    pub fn key_of(self, keys: &ItemKeys) -> Option<u32> {
        match self {
            KeyCategory::UniqueId => keys.unique_id,
            KeyCategory::ActionId => keys.action_id,
            KeyCategory::ItemId => Some(keys.item_id),
            KeyCategory::Position => None,
        }
    }
}

impl std::fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyCategory::UniqueId => "uid",
            KeyCategory::ActionId => "aid",
            KeyCategory::ItemId => "itemid",
            KeyCategory::Position => "position",
        };
        f.write_str(name)
    }
}

type Bucket = SmallVec<[MoveEventId; 2]>;

/// Per-key storage: one ordered bucket per kind.
#[derive(Clone, Debug, Default)]
struct EventList {
    buckets: [Bucket; EventKind::COUNT],
}

impl EventList {
    fn bucket(&self, kind: EventKind) -> &Bucket {
        &self.buckets[kind.index()]
    }

    fn bucket_mut(&mut self, kind: EventKind) -> &mut Bucket {
        &mut self.buckets[kind.index()]
    }
}

/// The events a lookup resolved to.
#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    /// Key space that produced the match.
    pub category: KeyCategory,

    /// Matching events in registration order. Never empty.
    pub events: Vec<&'a MoveEvent>,
}

/// Outcome of loading a batch of specs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of events registered.
    pub loaded: usize,

    /// Specs that were skipped, with their source and the reason.
    pub skipped: Vec<(String, MoveEventError)>,
}

impl LoadReport {
    /// Whether every spec loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Storage and lookup for move events.
#[derive(Clone, Debug)]
pub struct Registry {
    /// All registered events, indexed by `MoveEventId`.
    events: Vec<MoveEvent>,

    /// Id-keyed maps, in lookup precedence.
    id_maps: [(KeyCategory, FxHashMap<u32, EventList>); 3],

    positions: BTreeMap<Position, EventList>,

    warn_on_duplicates: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            id_maps: [
                (KeyCategory::UniqueId, FxHashMap::default()),
                (KeyCategory::ActionId, FxHashMap::default()),
                (KeyCategory::ItemId, FxHashMap::default()),
            ],
            positions: BTreeMap::new(),
            warn_on_duplicates: true,
        }
    }
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry honoring the configuration's duplicate
    /// warning setting.
    pub fn with_config(config: &MoveEventsConfig) -> Self {
        Self {
            warn_on_duplicates: config.warn_on_duplicates,
            ..Self::default()
        }
    }

    /// Build a registry from a batch of specs.
    ///
    /// A spec that fails to convert or validate is logged, recorded in the
    /// report and skipped; the rest still load.
    pub fn from_specs(
        specs: impl IntoIterator<Item = EventSpec>,
        config: &MoveEventsConfig,
    ) -> (Self, LoadReport) {
        let mut registry = Self::with_config(config);
        let mut report = LoadReport::default();

        for spec in specs {
            let source = spec.source.clone();
            let registered = spec
                .into_event(config)
                .and_then(|event| registry.register_event(event));

            match registered {
                Ok(_) => report.loaded += 1,
                Err(err) => {
                    warn!("skipping move event from {source}: {err}");
                    report.skipped.push((source, err));
                }
            }
        }

        (registry, report)
    }

    /// Register an event under every key it declares.
    ///
    /// The event is appended to the tail of its kind's bucket for each key.
    /// Invalid events are rejected without touching the registry.
    pub fn register_event(&mut self, event: MoveEvent) -> Result<MoveEventId> {
        event.validate()?;

        let id = MoveEventId::new(self.events.len() as u32);
        let kind = event.kind;
        let warn_duplicates = self.warn_on_duplicates;

        for (category, map) in &mut self.id_maps {
            let keys = match category {
                KeyCategory::UniqueId => &event.unique_ids,
                KeyCategory::ActionId => &event.action_ids,
                KeyCategory::ItemId => &event.item_ids,
                KeyCategory::Position => continue,
            };

            for &key in keys {
                let bucket = map.entry(key).or_default().bucket_mut(kind);
                if bucket.last() == Some(&id) {
                    continue;
                }

                if warn_duplicates
                    && bucket
                        .iter()
                        .filter_map(|other| self.events.get(other.index()))
                        .any(|other| other.slots == event.slots)
                {
                    warn!(
                        "duplicate {kind} move event for {category} {key} (from {})",
                        event.source
                    );
                }

                bucket.push(id);
            }
        }

        for &position in &event.positions {
            let bucket = self.positions.entry(position).or_default().bucket_mut(kind);
            if bucket.last() == Some(&id) {
                continue;
            }
            if warn_duplicates && !bucket.is_empty() {
                warn!(
                    "duplicate {kind} move event at position {position} (from {})",
                    event.source
                );
            }
            bucket.push(id);
        }

        debug!("registered {kind} move event {id} -> {} ({})", event.handler, event.source);
        self.events.push(event);
        Ok(id)
    }

    /// Resolve the events for `kind` against an item's keys and/or a position.
    ///
    /// Returns the events of the first key space (in [`KeyCategory::PRECEDENCE`]
    /// order) that has a non-empty bucket, or `None` if nothing matches.
    #[must_use]
    pub fn lookup(
        &self,
        kind: EventKind,
        item: Option<&ItemKeys>,
        position: Option<Position>,
    ) -> Option<Resolution<'_>> {
        self.lookup_where(kind, item, position, |_| true)
    }

    /// Like [`lookup`](Self::lookup), but only events satisfying `predicate`
    /// count. A key space whose bucket holds no satisfying event is skipped.
    pub fn lookup_where<F>(
        &self,
        kind: EventKind,
        item: Option<&ItemKeys>,
        position: Option<Position>,
        predicate: F,
    ) -> Option<Resolution<'_>>
    where
        F: Fn(&MoveEvent) -> bool,
    {
        for category in KeyCategory::PRECEDENCE {
            let Some(bucket) = self.bucket(category, kind, item, position) else {
                continue;
            };

            let events: Vec<&MoveEvent> = bucket
                .iter()
                .filter_map(|id| self.events.get(id.index()))
                .filter(|event| predicate(*event))
                .collect();

            if !events.is_empty() {
                return Some(Resolution { category, events });
            }
        }
        None
    }

    fn bucket(
        &self,
        category: KeyCategory,
        kind: EventKind,
        item: Option<&ItemKeys>,
        position: Option<Position>,
    ) -> Option<&Bucket> {
        let list = match category {
            KeyCategory::Position => self.positions.get(&position?)?,
            _ => {
                let key = category.key_of(item?)?;
                let (_, map) = self.id_maps.iter().find(|(c, _)| *c == category)?;
                map.get(&key)?
            }
        };
        Some(list.bucket(kind))
    }

    /// Whether any event is registered under this item id.
    #[must_use]
    pub fn is_registered(&self, item_id: u32) -> bool {
        self.id_maps
            .iter()
            .find(|(c, _)| *c == KeyCategory::ItemId)
            .is_some_and(|(_, map)| map.contains_key(&item_id))
    }

    /// Drop every event and key.
    pub fn clear(&mut self) {
        *self = Self {
            warn_on_duplicates: self.warn_on_duplicates,
            ..Self::default()
        };
    }

    /// Get an event by ID.
    #[must_use]
    pub fn get(&self, id: MoveEventId) -> Option<&MoveEvent> {
        self.events.get(id.index())
    }

    /// Number of registered events (not keys).
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate all events in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MoveEvent> {
        self.events.iter()
    }
}
