//! The host-owned move event subsystem.

use std::sync::Arc;

use log::info;
use parking_lot::RwLock;

use crate::core::{CreatureId, ItemRef, MoveEventsConfig, PlayerAttrs, Slot, TileView};
use crate::error::Result;
use crate::movement::{load_specs_toml, EventKind, EventSpec, LoadReport, Registry};

use super::dispatcher::Dispatcher;
use super::host::DispatchContext;
use super::outcome::{EquipOutcome, MoveOutcome};

/// Configuration plus the active registry.
///
/// Every dispatch works on an `Arc` snapshot of the registry taken when the
/// call starts. Reloads build a complete registry first and then swap it in,
/// so a dispatch never sees a half-built one and a failed reload leaves the
/// previous registry active.
#[derive(Debug, Default)]
pub struct MoveEvents {
    config: MoveEventsConfig,
    active: RwLock<Arc<Registry>>,
}

impl MoveEvents {
    /// Create an empty subsystem.
    pub fn new(config: MoveEventsConfig) -> Self {
        let registry = Registry::with_config(&config);
        Self::with_registry(config, registry)
    }

    /// Create a subsystem serving an already built registry.
    pub fn with_registry(config: MoveEventsConfig, registry: Registry) -> Self {
        Self {
            config,
            active: RwLock::new(Arc::new(registry)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MoveEventsConfig {
        &self.config
    }

    /// The currently active registry.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Registry> {
        Arc::clone(&self.active.read())
    }

    /// Make `registry` active, returning the one it replaces.
    pub fn install(&self, registry: Registry) -> Arc<Registry> {
        std::mem::replace(&mut *self.active.write(), Arc::new(registry))
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.install(Registry::with_config(&self.config));
        info!("move events cleared");
    }

    /// Replace the registry with one built from `specs`.
    ///
    /// Specs that fail to load are skipped and listed in the report.
    pub fn load_specs(&self, specs: impl IntoIterator<Item = EventSpec>) -> LoadReport {
        let (registry, report) = Registry::from_specs(specs, &self.config);
        self.install(registry);
        info!(
            "move events loaded: {} registered, {} skipped",
            report.loaded,
            report.skipped.len()
        );
        report
    }

    /// Parse a TOML document of `[[event]]` tables and load it.
    ///
    /// A document that does not parse leaves the active registry untouched.
    pub fn reload_toml(&self, text: &str) -> Result<LoadReport> {
        let specs = load_specs_toml(text)?;
        Ok(self.load_specs(specs))
    }

    /// Rebuild the registry with `build`.
    ///
    /// `build` populates a fresh registry. If it fails, the fresh registry is
    /// discarded and the active one stays in place.
    pub fn reload_with<F, E>(&self, build: F) -> std::result::Result<usize, E>
    where
        F: FnOnce(&mut Registry) -> std::result::Result<(), E>,
    {
        let mut fresh = Registry::with_config(&self.config);
        build(&mut fresh)?;

        let count = fresh.len();
        self.install(fresh);
        info!("move events reloaded: {count} registered");
        Ok(count)
    }

    /// Whether any event is keyed on this item id.
    #[must_use]
    pub fn is_registered(&self, item_id: u32) -> bool {
        self.active.read().is_registered(item_id)
    }

    /// See [`Dispatcher::on_creature_move`].
    pub fn on_creature_move(
        &self,
        ctx: &mut DispatchContext<'_>,
        creature: CreatureId,
        tile: &dyn TileView,
        kind: EventKind,
    ) -> Result<MoveOutcome> {
        let registry = self.snapshot();
        self.dispatcher(&registry)
            .on_creature_move(ctx, creature, tile, kind)
    }

    /// See [`Dispatcher::on_item_move`].
    pub fn on_item_move(
        &self,
        ctx: &mut DispatchContext<'_>,
        item: &ItemRef,
        tile: &dyn TileView,
        is_add: bool,
    ) -> MoveOutcome {
        let registry = self.snapshot();
        self.dispatcher(&registry).on_item_move(ctx, item, tile, is_add)
    }

    /// See [`Dispatcher::on_player_equip`].
    pub fn on_player_equip(
        &self,
        ctx: &mut DispatchContext<'_>,
        player: &PlayerAttrs,
        item: &ItemRef,
        slot: Slot,
        is_check: bool,
    ) -> EquipOutcome {
        let registry = self.snapshot();
        self.dispatcher(&registry)
            .on_player_equip(ctx, player, item, slot, is_check)
    }

    /// See [`Dispatcher::on_player_deequip`].
    pub fn on_player_deequip(
        &self,
        ctx: &mut DispatchContext<'_>,
        player: &PlayerAttrs,
        item: &ItemRef,
        slot: Slot,
    ) -> MoveOutcome {
        let registry = self.snapshot();
        self.dispatcher(&registry)
            .on_player_deequip(ctx, player, item, slot)
    }

    fn dispatcher<'r>(&self, registry: &'r Registry) -> Dispatcher<'r> {
        Dispatcher::new(registry, self.config.handler_policy)
    }
}
