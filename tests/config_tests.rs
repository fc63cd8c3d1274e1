#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;

use primordia::simulation::error::ConfigError;
use primordia::simulation::params::Params;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("primordia_cfg_{}_{name}.json", std::process::id()))
}

#[test]
fn test_defaults() {
    let params = Params::default();
    assert_eq!(params.world_width, 800.0);
    assert_eq!(params.world_height, 600.0);
    assert_eq!(params.wall_margin, 20.0);
    assert_eq!(params.population_size, 20);
    assert_eq!(params.initial_entities, 10);
    assert_eq!(params.initial_food, 30);
    assert_eq!(params.max_age, 3000.0);
    assert_eq!(params.survivor_fraction, 0.2);
    assert_eq!(params.min_survivors, 2);
    assert!(params.respawn_eaten_food);
    assert!(!params.inherit_brain);
    assert!(params.validate().is_ok());
}

#[test]
fn test_file_round_trip() {
    let params = Params {
        world_width: 1200.0,
        population_size: 40,
        inherit_brain: true,
        seed: 7,
        ..Params::default()
    };
    let path = temp_path("round_trip");
    params.save_json_file(&path).unwrap();

    let loaded = Params::from_json_file(&path).unwrap();
    assert_eq!(loaded, params);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_partial_file_uses_defaults() {
    let path = temp_path("partial");
    fs::write(&path, r#"{ "population_size": 50, "seed": 9 }"#).unwrap();

    let loaded = Params::from_json_file(&path).unwrap();
    assert_eq!(loaded.population_size, 50);
    assert_eq!(loaded.seed, 9);
    assert_eq!(loaded.world_width, Params::default().world_width);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_invalid_values() {
    let cases = [
        Params {
            world_width: 0.0,
            ..Params::default()
        },
        Params {
            wall_margin: -1.0,
            ..Params::default()
        },
        Params {
            wall_margin: 300.0,
            ..Params::default()
        },
        Params {
            population_size: 0,
            ..Params::default()
        },
        Params {
            survivor_fraction: 0.0,
            ..Params::default()
        },
        Params {
            survivor_fraction: 1.5,
            ..Params::default()
        },
        Params {
            max_age: 0.0,
            ..Params::default()
        },
        Params {
            food_sense_horizon: 0.0,
            ..Params::default()
        },
        Params {
            health_decay_rate: -0.1,
            ..Params::default()
        },
    ];

    for params in cases {
        assert!(
            matches!(params.validate(), Err(ConfigError::Invalid(_))),
            "{params:?} should be rejected"
        );
    }
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_path("invalid");
    fs::write(&path, r#"{ "population_size": 0 }"#).unwrap();
    assert!(matches!(
        Params::from_json_file(&path),
        Err(ConfigError::Invalid(_))
    ));

    fs::write(&path, "population_size = 3").unwrap();
    assert!(matches!(
        Params::from_json_file(&path),
        Err(ConfigError::Parse(_))
    ));

    fs::remove_file(&path).unwrap();
    assert!(matches!(
        Params::from_json_file(&path),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_survivor_count() {
    let params = Params::default();
    assert_eq!(params.survivor_count(20), 4);
    assert_eq!(params.survivor_count(12), 2);
    assert_eq!(params.survivor_count(3), 2);
    assert_eq!(params.survivor_count(1), 1);
    assert_eq!(params.survivor_count(0), 0);

    let everyone = Params {
        survivor_fraction: 1.0,
        ..Params::default()
    };
    assert_eq!(everyone.survivor_count(7), 7);
}
