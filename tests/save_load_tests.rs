#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;
use std::path::PathBuf;

use primordia::simulation::brain::Mlp;
use primordia::simulation::ecosystem::Ecosystem;
use primordia::simulation::error::{ConfigError, SnapshotError};
use primordia::simulation::genome::{Hormone, Trait};
use primordia::simulation::params::Params;
use primordia::simulation::physics::Physics;
use primordia::simulation::rng::create_rng;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("primordia_{}_{name}.json", std::process::id()))
}

fn small_params() -> Params {
    Params {
        population_size: 8,
        initial_entities: 8,
        initial_food: 12,
        ..Params::default()
    }
}

#[test]
fn test_save_and_load() {
    let mut ecosystem = Ecosystem::new(small_params()).unwrap();
    for _ in 0..30 {
        ecosystem.tick(1.0);
    }
    ecosystem.next_generation();
    ecosystem.tick(1.0);

    let path = temp_path("round_trip");
    ecosystem.save_to_file(&path).unwrap();
    assert!(path.exists());

    let loaded = Ecosystem::load_from_file(&path).unwrap();

    assert_eq!(loaded.params, ecosystem.params);
    assert_eq!(loaded.generation, ecosystem.generation);
    assert_eq!(loaded.time, ecosystem.time);
    assert_eq!(loaded.ticks, ecosystem.ticks);
    assert_eq!(loaded.entities.len(), ecosystem.entities.len());
    assert_eq!(loaded.food.len(), loaded.params.initial_food);
    assert!(loaded.waste.is_empty());

    for (original, restored) in ecosystem.entities.iter().zip(&loaded.entities) {
        assert_eq!(restored.id, original.id);
        assert_eq!(restored.genome, original.genome);
        assert_eq!(restored.brain, original.brain);
        assert_eq!(restored.vitals, original.vitals);
        assert_eq!(restored.digestion, original.digestion);
        assert_eq!(restored.physiology, original.physiology);

        let a = ecosystem.physics.body(original.body).unwrap();
        let b = loaded.physics.body(restored.body).unwrap();
        assert_eq!(a.position, b.position);
        assert_eq!(a.angle, b.angle);
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_loaded_world_keeps_allocating_fresh_ids() {
    let ecosystem = Ecosystem::new(small_params()).unwrap();
    let path = temp_path("fresh_ids");
    ecosystem.save_to_file(&path).unwrap();

    let mut loaded = Ecosystem::load_from_file(&path).unwrap();
    let max_id = loaded.entities.iter().map(|e| e.id).max().unwrap();
    let id = loaded.spawn_entity(None, None);
    assert!(id > max_id);

    loaded.tick(1.0);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_restore_rejects_malformed_brain() {
    let mut ecosystem = Ecosystem::new(small_params()).unwrap();
    let before: Vec<_> = ecosystem.entities.iter().map(|e| e.id).collect();
    let bodies = ecosystem.physics.body_count();

    let mut snapshot = ecosystem.snapshot();
    let bad_id = snapshot.entities[0].id;
    snapshot.entities[0].brain.hidden = Mlp::new_random(3, 16, 1.0, &mut create_rng(0));

    match ecosystem.restore(snapshot) {
        Err(SnapshotError::BrainShape {
            id,
            actual,
            expected,
        }) => {
            assert_eq!(id, bad_id);
            assert_eq!(actual, vec![3, 16, 2]);
            assert_eq!(expected, vec![8, 16, 2]);
        }
        other => panic!("expected a brain shape error, got {other:?}"),
    }

    let after: Vec<_> = ecosystem.entities.iter().map(|e| e.id).collect();
    assert_eq!(after, before);
    assert_eq!(ecosystem.physics.body_count(), bodies);
}

#[test]
fn test_load_missing_file() {
    let result = Ecosystem::load_from_file(temp_path("does_not_exist"));
    assert!(matches!(result, Err(SnapshotError::Io(_))));
}

#[test]
fn test_load_invalid_json() {
    let path = temp_path("garbage");
    fs::write(&path, "{ not json").unwrap();

    let result = Ecosystem::load_from_file(&path);
    assert!(matches!(result, Err(SnapshotError::Parse(_))));

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_out_of_range_genome_values_are_clamped() {
    let ecosystem = Ecosystem::new(small_params()).unwrap();
    let mut json = serde_json::to_value(ecosystem.snapshot()).unwrap();
    json["entities"][0]["genome"]["bases"][Trait::Size.index()] = serde_json::json!(5.0);
    json["entities"][0]["genome"]["hormones"][Hormone::Insulin.index()] = serde_json::json!(-2.0);

    let path = temp_path("clamped");
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
    let loaded = Ecosystem::load_from_file(&path).unwrap();

    let genome = &loaded.entities[0].genome;
    assert_eq!(genome.base(Trait::Size), 1.0);
    assert_eq!(genome.hormone(Hormone::Insulin), 0.0);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_rejects_invalid_params() {
    let ecosystem = Ecosystem::new(small_params()).unwrap();
    let mut json = serde_json::to_value(ecosystem.snapshot()).unwrap();
    json["params"]["world_width"] = serde_json::json!(-50.0);
    json["params"]["survivor_fraction"] = serde_json::json!(0.0);
    json["params"]["population_size"] = serde_json::json!(0);

    let path = temp_path("invalid_params");
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
    let result = Ecosystem::load_from_file(&path);
    assert!(matches!(
        result,
        Err(SnapshotError::Config(ConfigError::Invalid(_)))
    ));

    fs::remove_file(&path).unwrap();
}
