//! Content domain: tests for RON parsing, schema checks and roster
//! validation.

use std::path::Path;

use super::*;
use crate::combat::CombatTuning;
use crate::enemies::EnemyKind;
use crate::hero::HeroSkin;
use crate::movement::MovementTuning;

fn def(id: &str, kind: &str) -> EnemyDef {
    EnemyDef {
        id: id.to_string(),
        kind: kind.to_string(),
    }
}

// -----------------------------------------------------------------------------
// Gameplay defaults
// -----------------------------------------------------------------------------

#[test]
fn test_gameplay_file_overrides_tuning() {
    let text = r#"(
        schema_version: 1,
        movement: (
            gravity: 0.5,
            max_fall_speed: 2.0,
            jump_velocity: 5.0,
            hero_walk_speed: 1.5,
            enemy_walk_speed: 0.25,
            enemy_run_speed: 0.75,
        ),
        session: (
            starting_lives: 3,
            hero_skin: Bob,
            seed: 99,
        ),
    )"#;
    let defaults: GameplayDefaults = parse_ron("gameplay.ron", text).unwrap();

    assert_eq!(defaults.movement.gravity, 0.5);
    assert_eq!(defaults.movement.hero_walk_speed, 1.5);
    assert_eq!(defaults.combat, CombatTuning::default());
    assert_eq!(defaults.session.starting_lives, 3);
    assert_eq!(defaults.session.hero_skin, HeroSkin::Bob);
    assert_eq!(defaults.session.seed, Some(99));
    assert_eq!(defaults.session.starting_level, 0);
    assert_eq!(defaults.session.bonuses_per_life, 10);
}

#[test]
fn test_missing_sections_use_defaults() {
    let defaults: GameplayDefaults = parse_ron("gameplay.ron", "(schema_version: 1)").unwrap();
    assert_eq!(defaults, GameplayDefaults::default());
    assert_eq!(defaults.movement, MovementTuning::default());
    assert_eq!(defaults.session, SessionConfig::default());
}

#[test]
fn test_malformed_ron_names_the_file() {
    let err = parse_ron::<GameplayDefaults>("gameplay.ron", "(schema_version: ").unwrap_err();
    assert_eq!(err.file, "gameplay.ron");
    assert!(err.to_string().starts_with("Failed to load gameplay.ron"));
}

// -----------------------------------------------------------------------------
// Data files
// -----------------------------------------------------------------------------

#[test]
fn test_enemy_file_parses_in_order() {
    let text = r#"(
        schema_version: 1,
        items: [
            (id: "a", kind: "stoner"),
            (id: "b", kind: "beluga"),
        ],
    )"#;
    let items: Vec<EnemyDef> = parse_data_file("enemies.ron", text).unwrap();
    assert_eq!(items, vec![def("a", "stoner"), def("b", "beluga")]);
}

#[test]
fn test_unknown_schema_version_is_rejected() {
    let text = r#"(schema_version: 2, items: [])"#;
    let err = parse_data_file::<EnemyDef>("enemies.ron", text).unwrap_err();
    assert!(err.message.contains("Unsupported schema_version 2"));
}

#[test]
fn test_shipped_data_loads_cleanly() {
    let loaded = load_all_content(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data").as_path());
    assert!(loaded.errors.is_empty(), "{:?}", loaded.errors);
    assert_eq!(loaded.registry.enemies.len(), EnemyKind::ALL.len());
    assert_eq!(loaded.defaults.combat, CombatTuning::default());
}

#[test]
fn test_missing_directory_reports_errors_and_keeps_defaults() {
    let loaded = load_all_content(Path::new("does/not/exist"));
    assert_eq!(loaded.errors.len(), 2);
    assert!(loaded.registry.enemies.is_empty());
    assert_eq!(loaded.defaults, GameplayDefaults::default());
}

// -----------------------------------------------------------------------------
// Registry and roster
// -----------------------------------------------------------------------------

#[test]
fn test_repeated_id_replaces_in_place() {
    let mut registry = ContentRegistry::default();
    registry.insert_enemy(def("first", "stoner"));
    registry.insert_enemy(def("second", "beluga"));
    registry.insert_enemy(def("first", "coiley"));

    assert_eq!(registry.enemies.len(), 2);
    assert_eq!(registry.enemies[0], def("first", "coiley"));
    assert_eq!(registry.enemies[1], def("second", "beluga"));
}

#[test]
fn test_unknown_kinds_are_dropped_and_reported() {
    let mut registry = ContentRegistry::default();
    registry.insert_enemy(def("a", "incendo"));
    registry.insert_enemy(def("b", "dragon"));
    registry.insert_enemy(def("c", "willy_whistle"));

    let (kinds, errors) = resolve_roster(&registry);
    assert_eq!(kinds, vec![EnemyKind::Incendo, EnemyKind::WillyWhistle]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source_id, "b");
    assert_eq!(errors[0].unknown_value, "dragon");
    assert_eq!(errors[0].to_string(), "Enemy 'b' has unknown value 'dragon' in field 'kind'");
}

#[test]
fn test_empty_roster_falls_back_to_every_kind() {
    let mut registry = ContentRegistry::default();
    registry.insert_enemy(def("a", "dragon"));

    let roster = build_roster(&registry);
    assert_eq!(roster.kinds, EnemyKind::ALL.to_vec());
}

#[test]
fn test_roster_keeps_listed_kinds() {
    let mut registry = ContentRegistry::default();
    registry.insert_enemy(def("a", "hullaballoon"));

    let roster = build_roster(&registry);
    assert_eq!(roster.kinds, vec![EnemyKind::Hullaballoon]);
}
