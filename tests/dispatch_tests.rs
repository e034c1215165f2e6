//! Dispatch integration tests.
//!
//! These tests drive `MoveEvents` end to end against a recording world and
//! script runtime.

use rustc_hash::{FxHashMap, FxHashSet};

use movement_events::core::{
    CreatureId, ItemKeys, ItemRef, MoveEventsConfig, PlayerAttrs, PlayerId, Position, Slot,
    SlotMask, ThingId, Tile, VocationId,
};
use movement_events::dispatch::{
    DispatchContext, Invocation, MoveEvents, Outcome, ScriptRuntime, World,
};
use movement_events::eligibility::Ineligibility;
use movement_events::error::ScriptError;
use movement_events::movement::{
    Builtin, EventKind, MoveEvent, Requirements, ScriptHandle,
};

const KNIGHT: VocationId = VocationId::new(4);
const SORCERER: VocationId = VocationId::new(1);

/// World that records every mutation.
#[derive(Default)]
struct RecordingWorld {
    occupants: FxHashMap<Position, Vec<CreatureId>>,
    fields_applied: Vec<(CreatureId, ThingId)>,
    abilities: FxHashSet<(PlayerId, Slot)>,
    mutations: usize,
}

impl World for RecordingWorld {
    fn creatures_at(&self, position: Position) -> Vec<CreatureId> {
        self.occupants.get(&position).cloned().unwrap_or_default()
    }

    fn apply_field(&mut self, creature: CreatureId, field: ThingId) {
        self.mutations += 1;
        self.fields_applied.push((creature, field));
    }

    fn item_abilities_enabled(&self, player: PlayerId, slot: Slot) -> bool {
        self.abilities.contains(&(player, slot))
    }

    fn set_item_abilities(&mut self, player: PlayerId, _item: ThingId, slot: Slot, enabled: bool) {
        self.mutations += 1;
        if enabled {
            self.abilities.insert((player, slot));
        } else {
            self.abilities.remove(&(player, slot));
        }
    }
}

/// Script runtime with canned results per handle.
#[derive(Default)]
struct RecordingScripts {
    results: FxHashMap<ScriptHandle, Result<Outcome, ScriptError>>,
    invoked: Vec<(ScriptHandle, EventKind)>,
}

impl RecordingScripts {
    fn with_result(mut self, handle: u32, result: Result<Outcome, ScriptError>) -> Self {
        self.results.insert(ScriptHandle::new(handle), result);
        self
    }

    fn handles(&self) -> Vec<u32> {
        self.invoked.iter().map(|(handle, _)| handle.raw()).collect()
    }
}

impl ScriptRuntime for RecordingScripts {
    fn invoke(
        &mut self,
        script: ScriptHandle,
        kind: EventKind,
        _call: &Invocation<'_>,
    ) -> Result<Outcome, ScriptError> {
        self.invoked.push((script, kind));
        self.results
            .get(&script)
            .cloned()
            .unwrap_or(Ok(Outcome::HANDLED))
    }
}

fn knight_config() -> MoveEventsConfig {
    MoveEventsConfig::new()
        .with_vocation(KNIGHT, "Knight")
        .with_vocation(SORCERER, "Sorcerer")
}

fn item(thing: u64, item_id: u32) -> ItemRef {
    ItemRef::new(ThingId::new(thing), ItemKeys::new(item_id))
}

fn events_with(build: impl FnOnce(&mut movement_events::movement::Registry)) -> MoveEvents {
    let events = MoveEvents::new(knight_config());
    events
        .reload_with(|registry| {
            build(registry);
            Ok::<(), ()>(())
        })
        .unwrap();
    events
}

/// Stepping on an item with a registered handler runs it; other items fall
/// through to the default.
#[test]
fn test_step_in_by_item_id() {
    let events = events_with(|registry| {
        registry
            .register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(1)).with_item_id(1234),
            )
            .unwrap();
    });
    let pos = Position::new(100, 100, 7);
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let tile = Tile::new(pos).with_item(item(1, 1234));
        let result = events
            .on_creature_move(&mut ctx, CreatureId::new(1), &tile, EventKind::StepIn)
            .unwrap();
        assert_eq!(result.outcome, Outcome::HANDLED);
        assert_eq!(result.fired, 1);
    }
    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let tile = Tile::new(pos).with_item(item(2, 9999));
        let result = events
            .on_creature_move(&mut ctx, CreatureId::new(1), &tile, EventKind::StepIn)
            .unwrap();
        assert!(result.used_default());
        assert_eq!(result.outcome, Outcome::NOT_HANDLED);
    }

    assert_eq!(scripts.handles(), vec![1]);
}

/// An item with both a unique id and an item id resolves to the unique id.
#[test]
fn test_unique_id_precedence() {
    let events = events_with(|registry| {
        registry
            .register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(1)).with_item_id(426),
            )
            .unwrap();
        registry
            .register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(2)).with_action_id(8000),
            )
            .unwrap();
        registry
            .register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(3)).with_unique_id(30015),
            )
            .unwrap();
    });

    let keys = ItemKeys::new(426).with_action_id(8000).with_unique_id(30015);
    let tile = Tile::new(Position::new(1, 1, 7)).with_item(ItemRef::new(ThingId::new(1), keys));
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();
    let mut ctx = DispatchContext::new(&mut world, &mut scripts);

    events
        .on_creature_move(&mut ctx, CreatureId::new(1), &tile, EventKind::StepIn)
        .unwrap();

    assert_eq!(scripts.handles(), vec![3]);
}

/// Handlers under one key run in registration order and stop at the first
/// non-zero outcome.
#[test]
fn test_registration_order_and_short_circuit() {
    let events = events_with(|registry| {
        for handle in 1..=4 {
            registry
                .register_event(
                    MoveEvent::scripted(EventKind::StepOut, ScriptHandle::new(handle))
                        .with_item_id(500),
                )
                .unwrap();
        }
    });

    let tile = Tile::new(Position::new(1, 1, 7)).with_item(item(1, 500));
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default()
        .with_result(1, Ok(Outcome::NOT_HANDLED))
        .with_result(2, Ok(Outcome::NOT_HANDLED))
        .with_result(3, Ok(Outcome::new(42)));
    let mut ctx = DispatchContext::new(&mut world, &mut scripts);

    let result = events
        .on_creature_move(&mut ctx, CreatureId::new(1), &tile, EventKind::StepOut)
        .unwrap();

    assert_eq!(result.outcome, Outcome::new(42));
    assert_eq!(scripts.handles(), vec![1, 2, 3]);
}

/// A failing script is logged, counted and skipped.
#[test]
fn test_handler_fault_fails_open() {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = events_with(|registry| {
        registry
            .register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(1)).with_item_id(700),
            )
            .unwrap();
    });

    let tile = Tile::new(Position::new(1, 1, 7)).with_item(item(1, 700));
    let mut world = RecordingWorld::default();
    let mut scripts =
        RecordingScripts::default().with_result(1, Err(ScriptError::new("attempt to index nil")));
    let mut ctx = DispatchContext::new(&mut world, &mut scripts);

    let result = events
        .on_creature_move(&mut ctx, CreatureId::new(1), &tile, EventKind::StepIn)
        .unwrap();

    assert_eq!(result.outcome, Outcome::NOT_HANDLED);
    assert_eq!(result.faults, 1);
    assert!(!result.used_default());
}

/// Level 10 knight equipping an item that needs level 20.
#[test]
fn test_equip_level_too_low() {
    let events = MoveEvents::new(knight_config());
    let report = events
        .reload_toml(
            r#"
            [[event]]
            kind = "equip"
            item_ids = [500]
            level = 20
            vocations = ["Knight"]
            handler = { script = 1 }
            "#,
        )
        .unwrap();
    assert!(report.is_clean());

    let player = PlayerAttrs::new(PlayerId::new(1), KNIGHT).with_level(10);
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();
    let mut ctx = DispatchContext::new(&mut world, &mut scripts);

    let result = events.on_player_equip(&mut ctx, &player, &item(1, 500), Slot::Right, false);

    assert_eq!(result.eligibility.reason(), Some(Ineligibility::LevelTooLow));
    assert!(!result.fired);
    assert!(scripts.invoked.is_empty());
}

#[test]
fn test_equip_vocation_not_allowed() {
    let events = events_with(|registry| {
        registry
            .register_event(
                MoveEvent::scripted(EventKind::Equip, ScriptHandle::new(1))
                    .with_item_id(500)
                    .with_requirements(Requirements::new().with_vocation(KNIGHT)),
            )
            .unwrap();
    });

    let sorcerer = PlayerAttrs::new(PlayerId::new(2), SORCERER).with_level(100);
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();
    let mut ctx = DispatchContext::new(&mut world, &mut scripts);

    let result = events.on_player_equip(&mut ctx, &sorcerer, &item(1, 500), Slot::Left, false);
    assert_eq!(
        result.eligibility.reason(),
        Some(Ineligibility::VocationNotAllowed)
    );
}

/// A dry-run equip never touches the world, whatever the verdict.
#[test]
fn test_equip_check_never_mutates() {
    let events = events_with(|registry| {
        registry
            .register_event(
                MoveEvent::builtin(EventKind::Equip, Builtin::EquipItem)
                    .with_item_id(2207)
                    .with_slots(SlotMask::RING),
            )
            .unwrap();
        registry
            .register_event(
                MoveEvent::builtin(EventKind::Equip, Builtin::EquipItem)
                    .with_item_id(2208)
                    .with_slots(SlotMask::RING)
                    .with_requirements(Requirements::new().with_min_level(200)),
            )
            .unwrap();
    });

    let player = PlayerAttrs::new(PlayerId::new(1), KNIGHT).with_level(50);
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        for (item_id, slot) in [(2207, Slot::Ring), (2207, Slot::Head), (2208, Slot::Ring)] {
            let result = events.on_player_equip(&mut ctx, &player, &item(1, item_id), slot, true);
            assert!(!result.fired);
        }
    }
    assert_eq!(world.mutations, 0);

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events.on_player_equip(&mut ctx, &player, &item(1, 2207), Slot::Ring, false);
        assert!(result.fired);
        assert_eq!(result.outcome, Outcome::HANDLED);
    }
    assert!(world.item_abilities_enabled(PlayerId::new(1), Slot::Ring));
}

/// Equip then de-equip through the built-in handlers.
#[test]
fn test_equip_deequip_builtins() {
    let events = MoveEvents::new(knight_config());
    events
        .reload_toml(
            r#"
            [[event]]
            kind = "equip"
            item_ids = [2491]
            slots = ["head"]
            handler = { builtin = "onequipitem" }

            [[event]]
            kind = "deequip"
            item_ids = [2491]
            slots = ["head"]
            handler = { builtin = "ondeequipitem" }
            "#,
        )
        .unwrap();

    let player = PlayerAttrs::new(PlayerId::new(3), KNIGHT);
    let helmet = item(9, 2491);
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events.on_player_equip(&mut ctx, &player, &helmet, Slot::Head, false);
        assert!(result.is_eligible());
        assert!(result.fired);
    }
    assert!(world.item_abilities_enabled(PlayerId::new(3), Slot::Head));

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events.on_player_deequip(&mut ctx, &player, &helmet, Slot::Head);
        assert_eq!(result.outcome, Outcome::HANDLED);
    }
    assert!(!world.item_abilities_enabled(PlayerId::new(3), Slot::Head));
}

/// A fire field dropped on an occupied tile burns everyone there, and
/// stepping on it burns the walker.
#[test]
fn test_field_builtins() {
    let events = MoveEvents::new(knight_config());
    events
        .reload_toml(
            r#"
            [[event]]
            kind = "stepin"
            item_ids = [1487]
            handler = { builtin = "onstepinfield" }

            [[event]]
            kind = "additem"
            item_ids = [1487]
            handler = { builtin = "onaddfield" }
            "#,
        )
        .unwrap();

    let pos = Position::new(200, 200, 7);
    let fire = ItemRef::field(ThingId::new(77), ItemKeys::new(1487));
    let tile = Tile::new(pos).with_item(item(1, 4526)).with_item(fire);

    let mut world = RecordingWorld::default();
    world
        .occupants
        .insert(pos, vec![CreatureId::new(10), CreatureId::new(11)]);
    let mut scripts = RecordingScripts::default();

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events.on_item_move(&mut ctx, &fire, &tile, true);
        assert_eq!(result.outcome, Outcome::HANDLED);
    }
    assert_eq!(world.fields_applied.len(), 2);

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events
            .on_creature_move(&mut ctx, CreatureId::new(12), &tile, EventKind::StepIn)
            .unwrap();
        assert_eq!(result.outcome, Outcome::HANDLED);
    }
    assert_eq!(
        world.fields_applied.last(),
        Some(&(CreatureId::new(12), ThingId::new(77)))
    );
}

/// Events registered on a position fire for anything on that tile.
#[test]
fn test_position_events() {
    let pos = Position::new(32369, 32241, 7);
    let events = events_with(|registry| {
        registry
            .register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(5)).at_position(pos),
            )
            .unwrap();
    });

    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events
            .on_creature_move(&mut ctx, CreatureId::new(1), &Tile::new(pos), EventKind::StepIn)
            .unwrap();
        assert_eq!(result.outcome, Outcome::HANDLED);

        let elsewhere = Tile::new(Position::new(32370, 32241, 7));
        let result = events
            .on_creature_move(&mut ctx, CreatureId::new(1), &elsewhere, EventKind::StepIn)
            .unwrap();
        assert!(result.used_default());
    }
    assert_eq!(scripts.invoked, vec![(ScriptHandle::new(5), EventKind::StepIn)]);
}

/// Tile-item events fire for items dropped next to them; keying one by
/// position is rejected at load since it could never fire.
#[test]
fn test_tile_item_events() {
    let events = MoveEvents::new(knight_config());
    let report = events
        .reload_toml(
            r#"
            [[event]]
            kind = "additem"
            tile_item = true
            item_ids = [1642]
            handler = { script = 4 }
            source = "altar.lua"

            [[event]]
            kind = "additem"
            tile_item = true
            positions = [{ x = 100, y = 200, z = 7 }]
            handler = { script = 5 }
            source = "ghost.lua"
            "#,
        )
        .unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped[0].0, "ghost.lua");

    let pos = Position::new(100, 200, 7);
    let coin = item(2, 2148);
    let tile = Tile::new(pos).with_item(item(1, 1642)).with_item(coin);
    let mut world = RecordingWorld::default();
    let mut scripts = RecordingScripts::default();

    {
        let mut ctx = DispatchContext::new(&mut world, &mut scripts);
        let result = events.on_item_move(&mut ctx, &coin, &tile, true);
        assert_eq!(result.fired, 1);
        assert_eq!(result.outcome, Outcome::HANDLED);
    }
    assert_eq!(scripts.invoked, vec![(ScriptHandle::new(4), EventKind::AddItem)]);
}
