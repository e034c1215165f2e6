//! Loading, clearing and reloading integration tests.

use std::sync::Arc;
use std::thread;

use movement_events::core::{ItemKeys, MoveEventsConfig, Position, VocationId};
use movement_events::dispatch::MoveEvents;
use movement_events::error::MoveEventError;
use movement_events::movement::{
    load_specs_toml, EventKind, EventSpec, HandlerSpec, IdRange, KeyCategory, MoveEvent,
    Registry, ScriptHandle,
};

const SPECS: &str = r#"
[[event]]
kind = "stepin"
item_ids = [1487, 1488, 1489]
handler = { builtin = "onstepinfield" }
source = "fields.lua"

[[event]]
kind = "stepin"
action_id_ranges = [{ from = 1000, to = 1003 }]
handler = { script = 2 }
source = "doors.lua"

[[event]]
kind = "equip"
slots = ["ring"]
level = 8
vocations = ["Knight", "Paladin"]
item_id_ranges = [{ from = 2207, to = 2210 }]
handler = { script = 3 }
source = "rings.lua"

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
handler = { script = 7 }
source = "ghost.lua"

[[event]]
kind = "stepin"
handler = { script = 5 }
source = "broken.lua"

[[event]]
kind = "stepout"
item_ids = [1]
handler = { builtin = "onequipitem" }
source = "mismatch.lua"

[[event]]
kind = "teleport"
item_ids = [1]
handler = { script = 6 }
source = "typo.lua"
"#;

fn config() -> MoveEventsConfig {
    MoveEventsConfig::new()
        .with_vocation(VocationId::new(4), "Knight")
        .with_vocation(VocationId::new(3), "Paladin")
}

/// Bad specs are skipped with a reason; good ones load.
#[test]
fn test_load_report() {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = MoveEvents::new(config());
    let report = events.reload_toml(SPECS).unwrap();

    assert_eq!(report.loaded, 4);
    let skipped: Vec<&str> = report.skipped.iter().map(|(source, _)| source.as_str()).collect();
    assert_eq!(
        skipped,
        vec!["ghost.lua", "broken.lua", "mismatch.lua", "typo.lua"]
    );
    assert_eq!(
        report.skipped[0].1,
        MoveEventError::TileItemAtPosition(EventKind::AddItem)
    );
    assert!(matches!(report.skipped[1].1, MoveEventError::MissingKeys { .. }));
    assert!(matches!(
        report.skipped[2].1,
        MoveEventError::BuiltinKindMismatch { .. }
    ));
    assert_eq!(
        report.skipped[3].1,
        MoveEventError::UnknownKind("teleport".to_string())
    );

    let registry = events.snapshot();
    assert!(registry.is_registered(1488));
    assert!(registry.is_registered(2209));
    assert!(!registry.is_registered(2211));

    let door = ItemKeys::new(5000).with_action_id(1002);
    let resolved = registry.lookup(EventKind::StepIn, Some(&door), None).unwrap();
    assert_eq!(resolved.category, KeyCategory::ActionId);

    let altar = registry
        .lookup(EventKind::AddItem, Some(&ItemKeys::new(1642)), None)
        .unwrap();
    assert!(altar.events[0].tile_item);
    assert!(registry
        .lookup(EventKind::AddItem, None, Some(Position::new(100, 200, 7)))
        .is_none());
}

#[test]
fn test_huge_range_is_skipped() {
    let specs = load_specs_toml(
        r#"
        [[event]]
        kind = "stepin"
        item_id_ranges = [{ from = 0, to = 4294967295 }]
        handler = { script = 1 }
        source = "everything.lua"

        [[event]]
        kind = "stepin"
        item_ids = [1487]
        handler = { script = 2 }
        source = "fields.lua"
        "#,
    )
    .unwrap();

    let (registry, report) = Registry::from_specs(specs, &config());
    assert_eq!(report.loaded, 1);
    assert!(matches!(
        report.skipped[0].1,
        MoveEventError::IdRangeTooWide { from: 0, .. }
    ));
    assert!(registry.is_registered(1487));
}

#[test]
fn test_reversed_range_is_rejected() {
    let mut spec = EventSpec::new("stepin", HandlerSpec::Script(1));
    spec.item_id_ranges.push(IdRange::new(10, 5));

    let (registry, report) = Registry::from_specs([spec], &config());
    assert!(registry.is_empty());
    assert_eq!(
        report.skipped[0].1,
        MoveEventError::EmptyIdRange { from: 10, to: 5 }
    );
}

#[test]
fn test_unknown_vocation_is_ignored() {
    let specs = load_specs_toml(
        r#"
        [[event]]
        kind = "equip"
        item_ids = [2400]
        vocations = ["Knight", "Druid"]
        handler = { script = 1 }
        "#,
    )
    .unwrap();

    let (registry, report) = Registry::from_specs(specs, &config());
    assert!(report.is_clean());

    let event = registry.iter().next().unwrap();
    let allowed: Vec<VocationId> = event.requirements.vocations().collect();
    assert_eq!(allowed, vec![VocationId::new(4)]);
}

/// After a clear every lookup misses.
#[test]
fn test_clear_resolves_to_default() {
    let events = MoveEvents::new(config());
    events.reload_toml(SPECS).unwrap();
    events.clear();

    let registry = events.snapshot();
    assert!(registry.is_empty());
    let keys = ItemKeys::new(1487).with_action_id(1000).with_unique_id(1);
    for kind in EventKind::ALL {
        assert!(registry
            .lookup(kind, Some(&keys), Some(Position::new(100, 200, 7)))
            .is_none());
    }
}

/// A reload that fails partway leaves the previous registry in place.
#[test]
fn test_failed_reload_is_atomic() {
    let events = MoveEvents::new(config());
    events.reload_toml(SPECS).unwrap();
    let before = events.snapshot();

    let result = events.reload_with(|registry| -> Result<(), MoveEventError> {
        for id in 1..=50 {
            registry.register_event(
                MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(id)).with_item_id(id),
            )?;
        }
        registry.register_event(MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(99)))?;
        Ok(())
    });

    assert!(result.is_err());
    let after = events.snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert!(after.is_registered(1487));
    assert!(!after.is_registered(25));
}

/// Readers on other threads always see a complete registry.
#[test]
fn test_concurrent_readers_see_whole_registries() {
    let events = Arc::new(MoveEvents::new(config()));
    events.reload_with(|registry| fill(registry, 0)).unwrap();

    let reader = {
        let events = Arc::clone(&events);
        thread::spawn(move || {
            for _ in 0..200 {
                let registry = events.snapshot();
                assert_eq!(registry.len(), 20);
            }
        })
    };

    for round in 1..=20 {
        events.reload_with(|registry| fill(registry, round)).unwrap();
    }

    reader.join().unwrap();
}

fn fill(registry: &mut Registry, round: u32) -> Result<(), MoveEventError> {
    for offset in 0..20 {
        registry.register_event(
            MoveEvent::scripted(EventKind::StepIn, ScriptHandle::new(round))
                .with_item_id(round * 100 + offset),
        )?;
    }
    Ok(())
}

#[test]
fn test_config_from_toml() {
    let config = MoveEventsConfig::from_toml_str(
        r#"
        handler_policy = "all"
        warn_on_duplicates = false

        [[vocations]]
        id = 4
        name = "Knight"
        "#,
    )
    .unwrap();

    assert_eq!(config.vocation_id("knight"), Some(VocationId::new(4)));
    assert!(!config.warn_on_duplicates);
}
