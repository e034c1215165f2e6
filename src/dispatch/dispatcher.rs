//! Routing of world occurrences to registered handlers.

use log::{debug, warn};

use crate::core::{CreatureId, HandlerPolicy, ItemRef, PlayerAttrs, Slot, TileView};
use crate::eligibility::{Eligibility, EligibilityEvaluator};
use crate::error::{MoveEventError, Result};
use crate::movement::{EventKind, Handler, MoveEvent, Registry};

use super::builtin;
use super::host::{DispatchContext, Invocation};
use super::outcome::{EquipOutcome, MoveOutcome, Outcome};

/// Dispatches against one registry snapshot.
///
/// A dispatcher borrows the registry for the duration of a call and holds no
/// other state, so it is cheap to create per occurrence.
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    policy: HandlerPolicy,
}

impl<'r> Dispatcher<'r> {
    /// Create a new dispatcher.
    pub fn new(registry: &'r Registry, policy: HandlerPolicy) -> Self {
        Self { registry, policy }
    }

    #[must_use]
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    #[must_use]
    pub fn policy(&self) -> HandlerPolicy {
        self.policy
    }

    /// A creature stepped onto (`StepIn`) or off (`StepOut`) a tile.
    ///
    /// Events on the tile position run first, then events of each item on
    /// the tile, ground first. The result is the first non-zero outcome.
    pub fn on_creature_move(
        &self,
        ctx: &mut DispatchContext<'_>,
        creature: CreatureId,
        tile: &dyn TileView,
        kind: EventKind,
    ) -> Result<MoveOutcome> {
        if !kind.is_step() {
            return Err(MoveEventError::WrongKind {
                kind,
                entry_point: "on_creature_move",
            });
        }

        let position = tile.position();
        let mut report = MoveOutcome::default();

        if let Some(resolution) = self.registry.lookup(kind, None, Some(position)) {
            let call = Invocation::Step {
                creature,
                item: None,
                position,
            };
            let outcome = self.run_events(ctx, &resolution.events, &call, &mut report);
            report.record(outcome);
        }

        for item in tile.items() {
            let Some(resolution) = self.registry.lookup(kind, Some(&item.keys), None) else {
                continue;
            };
            debug!(
                "{kind} on {} at {position} resolved by {}",
                item.thing, resolution.category
            );
            let call = Invocation::Step {
                creature,
                item: Some(item),
                position,
            };
            let outcome = self.run_events(ctx, &resolution.events, &call, &mut report);
            report.record(outcome);
        }

        if report.used_default() {
            report.outcome = builtin::fallback(kind);
        }
        Ok(report)
    }

    /// `item` was added to (`is_add`) or removed from a tile.
    ///
    /// Three sites are consulted in order: the tile position and the moved
    /// item's own keys (events without the tile-item flag), then every other
    /// item already on the tile (events with the flag).
    pub fn on_item_move(
        &self,
        ctx: &mut DispatchContext<'_>,
        item: &ItemRef,
        tile: &dyn TileView,
        is_add: bool,
    ) -> MoveOutcome {
        let kind = if is_add {
            EventKind::AddItem
        } else {
            EventKind::RemoveItem
        };
        let position = tile.position();
        let mut report = MoveOutcome::default();

        let direct = Invocation::ItemMove {
            item,
            tile_item: None,
            position,
        };

        if let Some(resolution) =
            self.registry
                .lookup_where(kind, None, Some(position), |event| !event.tile_item)
        {
            let outcome = self.run_events(ctx, &resolution.events, &direct, &mut report);
            report.record(outcome);
        }

        if let Some(resolution) =
            self.registry
                .lookup_where(kind, Some(&item.keys), None, |event| !event.tile_item)
        {
            let outcome = self.run_events(ctx, &resolution.events, &direct, &mut report);
            report.record(outcome);
        }

        for tile_item in tile.items() {
            if tile_item.thing == item.thing {
                continue;
            }
            let Some(resolution) =
                self.registry
                    .lookup_where(kind, Some(&tile_item.keys), None, |event| event.tile_item)
            else {
                continue;
            };
            let call = Invocation::ItemMove {
                item,
                tile_item: Some(tile_item),
                position,
            };
            let outcome = self.run_events(ctx, &resolution.events, &call, &mut report);
            report.record(outcome);
        }

        if report.used_default() {
            report.outcome = builtin::fallback(kind);
        }
        report
    }

    /// A player equips `item` into `slot`.
    ///
    /// Exactly one event is selected: the first registered one whose slot
    /// mask accepts `slot`. The handler policy does not apply here, since
    /// eligibility is a property of that single event. Eligibility is
    /// checked before the handler. With `is_check` set only the check runs;
    /// the handler is never invoked.
    pub fn on_player_equip(
        &self,
        ctx: &mut DispatchContext<'_>,
        player: &PlayerAttrs,
        item: &ItemRef,
        slot: Slot,
        is_check: bool,
    ) -> EquipOutcome {
        let Some(resolution) = self.registry.lookup(EventKind::Equip, Some(&item.keys), None)
        else {
            return EquipOutcome {
                outcome: builtin::fallback(EventKind::Equip),
                ..EquipOutcome::without_handler(Eligibility::Eligible)
            };
        };

        // With no event for this slot the first one still reports the mismatch.
        let selected = resolution
            .events
            .iter()
            .find(|event| event.slots.accepts(slot))
            .or_else(|| resolution.events.first());
        let Some(event) = selected else {
            return EquipOutcome::without_handler(Eligibility::Eligible);
        };

        let eligibility = EligibilityEvaluator::evaluate_event(player, event, slot);
        if let Some(reason) = eligibility.reason() {
            debug!("{} may not equip {} in {slot}: {reason}", player.id, item.thing);
            return EquipOutcome::without_handler(eligibility);
        }
        if is_check {
            return EquipOutcome::without_handler(eligibility);
        }

        let call = Invocation::Equip {
            player,
            item,
            slot,
            is_check,
        };
        let mut report = MoveOutcome::default();
        let outcome = self.fire(ctx, event, &call, &mut report);

        EquipOutcome {
            eligibility,
            outcome,
            fired: true,
            faulted: report.faults > 0,
        }
    }

    /// A player removes `item` from `slot`. Always permitted.
    pub fn on_player_deequip(
        &self,
        ctx: &mut DispatchContext<'_>,
        player: &PlayerAttrs,
        item: &ItemRef,
        slot: Slot,
    ) -> MoveOutcome {
        let mut report = MoveOutcome::default();

        let event = self
            .registry
            .lookup(EventKind::DeEquip, Some(&item.keys), None)
            .and_then(|resolution| {
                resolution
                    .events
                    .into_iter()
                    .find(|event| event.slots.accepts(slot))
            });

        match event {
            Some(event) => {
                let call = Invocation::Equip {
                    player,
                    item,
                    slot,
                    is_check: false,
                };
                let outcome = self.fire(ctx, event, &call, &mut report);
                report.record(outcome);
            }
            None => report.outcome = builtin::fallback(EventKind::DeEquip),
        }
        report
    }

    /// Run one site's events under the handler policy.
    fn run_events(
        &self,
        ctx: &mut DispatchContext<'_>,
        events: &[&MoveEvent],
        call: &Invocation<'_>,
        report: &mut MoveOutcome,
    ) -> Outcome {
        let mut result = Outcome::NOT_HANDLED;

        for event in events {
            let outcome = self.fire(ctx, event, call, report);
            if !result.is_handled() {
                result = outcome;
            }

            match self.policy {
                HandlerPolicy::FirstOnly => break,
                HandlerPolicy::UntilHandled if outcome.is_handled() => break,
                _ => {}
            }
        }

        result
    }

    fn fire(
        &self,
        ctx: &mut DispatchContext<'_>,
        event: &MoveEvent,
        call: &Invocation<'_>,
        report: &mut MoveOutcome,
    ) -> Outcome {
        report.fired += 1;

        let result = match event.handler {
            Handler::Builtin(native) => Ok(builtin::run(native, &mut *ctx.world, call)),
            Handler::Scripted(script) => ctx.scripts.invoke(script, event.kind, call),
        };

        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "{} handler {} from {} failed: {err}",
                    event.kind, event.handler, event.source
                );
                report.faults += 1;
                Outcome::NOT_HANDLED
            }
        }
    }
}
