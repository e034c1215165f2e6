//! Registration specs.
//!
//! Script loaders describe each move event as an [`EventSpec`]: plain data
//! with names instead of typed values (kind names, slot names, vocation
//! names, built-in handler names). [`EventSpec::into_event`] resolves and
//! validates a spec into a [`MoveEvent`].
//!
//! Specs can also be read from a TOML document of `[[event]]` tables:
//!
//! ```
//! use movement_events::movement::load_specs_toml;
//!
//! let specs = load_specs_toml(r#"
//!     [[event]]
//!     kind = "stepin"
//!     item_ids = [1487, 1488]
//!     handler = { builtin = "onstepinfield" }
//!     source = "fields.lua"
//!
//!     [[event]]
//!     kind = "equip"
//!     slots = ["ring"]
//!     level = 20
//!     vocations = ["Knight", "Elite Knight"]
//!     item_id_ranges = [{ from = 2207, to = 2215 }]
//!     handler = { script = 12 }
//!     source = "rings.lua"
//! "#).unwrap();
//!
//! assert_eq!(specs.len(), 2);
//! assert_eq!(specs[1].level, 20);
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::{MoveEventsConfig, Position, SlotMask};
use crate::error::{MoveEventError, Result};

use super::event::{Builtin, Handler, MoveEvent, Requirements, ScriptHandle};
use super::kind::EventKind;

/// Widest range a single spec may declare.
pub const MAX_ID_RANGE: u32 = 1 << 16;

/// An inclusive id range, `from..=to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub from: u32,
    pub to: u32,
}

impl IdRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    fn expand(self) -> Result<std::ops::RangeInclusive<u32>> {
        if self.from > self.to {
            return Err(MoveEventError::EmptyIdRange {
                from: self.from,
                to: self.to,
            });
        }
        if self.to - self.from >= MAX_ID_RANGE {
            return Err(MoveEventError::IdRangeTooWide {
                from: self.from,
                to: self.to,
                max: MAX_ID_RANGE,
            });
        }
        Ok(self.from..=self.to)
    }
}

/// The handler a spec binds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerSpec {
    /// A built-in, by script name (`onstepinfield`, ...).
    Builtin(String),
    /// A callback in the scripting runtime.
    Script(u32),
}

/// One move event as declared by a script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Kind name: `stepin`, `stepout`, `additem`, `removeitem`, `equip`,
    /// `deequip`.
    pub kind: String,

    pub handler: HandlerSpec,

    /// Slot names; empty means any slot.
    #[serde(default)]
    pub slots: Vec<String>,

    #[serde(default)]
    pub level: u32,

    #[serde(default)]
    pub magic_level: u32,

    #[serde(default)]
    pub premium: bool,

    /// Vocation names; unknown names are ignored with a warning.
    #[serde(default)]
    pub vocations: Vec<String>,

    #[serde(default)]
    pub tile_item: bool,

    #[serde(default)]
    pub item_ids: Vec<u32>,
    #[serde(default)]
    pub item_id_ranges: Vec<IdRange>,

    #[serde(default)]
    pub action_ids: Vec<u32>,
    #[serde(default)]
    pub action_id_ranges: Vec<IdRange>,

    #[serde(default)]
    pub unique_ids: Vec<u32>,
    #[serde(default)]
    pub unique_id_ranges: Vec<IdRange>,

    #[serde(default)]
    pub positions: Vec<Position>,

    #[serde(default)]
    pub source: String,
}

impl EventSpec {
    /// Create a spec with no keys or requirements.
    pub fn new(kind: impl Into<String>, handler: HandlerSpec) -> Self {
        Self {
            kind: kind.into(),
            handler,
            slots: Vec::new(),
            level: 0,
            magic_level: 0,
            premium: false,
            vocations: Vec::new(),
            tile_item: false,
            item_ids: Vec::new(),
            item_id_ranges: Vec::new(),
            action_ids: Vec::new(),
            action_id_ranges: Vec::new(),
            unique_ids: Vec::new(),
            unique_id_ranges: Vec::new(),
            positions: Vec::new(),
            source: String::new(),
        }
    }

    /// Resolve names and validate, producing a registrable event.
    pub fn into_event(self, config: &MoveEventsConfig) -> Result<MoveEvent> {
        let kind = EventKind::from_name(&self.kind)
            .ok_or_else(|| MoveEventError::UnknownKind(self.kind.clone()))?;

        let handler = match &self.handler {
            HandlerSpec::Builtin(name) => Handler::Builtin(
                Builtin::from_name(name)
                    .ok_or_else(|| MoveEventError::UnknownBuiltin(name.clone()))?,
            ),
            HandlerSpec::Script(handle) => Handler::Scripted(ScriptHandle::new(*handle)),
        };

        let slots = if self.slots.is_empty() {
            SlotMask::ANYWHERE
        } else {
            let mut mask = SlotMask::empty();
            for name in &self.slots {
                mask |= SlotMask::from_script_name(name)
                    .ok_or_else(|| MoveEventError::UnknownSlot(name.clone()))?;
            }
            mask
        };

        let mut requirements = Requirements::new()
            .with_min_level(self.level)
            .with_min_magic_level(self.magic_level)
            .with_premium(self.premium);
        for name in &self.vocations {
            match config.vocation_id(name) {
                Some(vocation) => requirements = requirements.with_vocation(vocation),
                None => warn!("unknown vocation '{name}' in move event from {}", self.source),
            }
        }

        let item_ids = expand_ids(self.item_ids, &self.item_id_ranges)?;
        let action_ids = expand_ids(self.action_ids, &self.action_id_ranges)?;
        let unique_ids = expand_ids(self.unique_ids, &self.unique_id_ranges)?;

        let mut event = MoveEvent::new(kind, handler)
            .with_slots(slots)
            .with_requirements(requirements)
            .with_item_ids(item_ids)
            .from_source(self.source);
        event.action_ids = action_ids;
        event.unique_ids = unique_ids;
        event.positions = self.positions;
        event.tile_item = self.tile_item;

        event.validate()?;
        Ok(event)
    }
}

fn expand_ids(mut ids: Vec<u32>, ranges: &[IdRange]) -> Result<Vec<u32>> {
    for range in ranges {
        ids.extend(range.expand()?);
    }
    Ok(ids)
}

#[derive(Deserialize)]
struct SpecFile {
    #[serde(default, rename = "event")]
    events: Vec<EventSpec>,
}

/// Parse a TOML document of `[[event]]` tables.
///
/// Only syntax and shape are checked here; names and keys are validated
/// per spec when the registry is built.
pub fn load_specs_toml(text: &str) -> Result<Vec<EventSpec>> {
    let file: SpecFile = toml::from_str(text).map_err(|e| MoveEventError::Parse(e.to_string()))?;
    Ok(file.events)
}
