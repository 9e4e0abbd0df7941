use std::f64::consts::{FRAC_PI_2, PI};

use crate::commands::PlayerCommand;
use crate::config::GameConfig;
use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::{EventSink, GameEvent};
use crate::modifiers::{ModifierProvider, NoModifiers, UpgradeLevels};
use crate::planet_types::get_profile;
use crate::types::*;

// ---- Geometry ----

#[test]
fn test_angle_difference_wraps() {
    assert!((angle_difference(0.1, -0.1) - 0.2).abs() < 1e-12);
    // 350° vs 10° is 20° apart, not 340°
    let a = 350f64.to_radians();
    let b = 10f64.to_radians();
    assert!((angle_difference(a, b) - 20f64.to_radians()).abs() < 1e-9);
    assert!((angle_difference(0.0, PI) - PI).abs() < 1e-12);
}

#[test]
fn test_position_angle_and_advance() {
    let origin = Position::new(0.0, 0.0);
    let north = Position::new(0.0, 10.0);
    assert!((origin.angle_to(&north) - FRAC_PI_2).abs() < 1e-12);

    let moved = origin.advanced(FRAC_PI_2, 5.0);
    assert!(moved.x.abs() < 1e-12);
    assert!((moved.y - 5.0).abs() < 1e-12);
    assert!((origin.distance_to(&north) - 10.0).abs() < 1e-12);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance(TICK_MS);
    }
    assert_eq!(time.tick, TICK_RATE as u64);
    assert_eq!(time.elapsed_ms, TICK_MS * TICK_RATE as u64);
}

// ---- Config ----

#[test]
fn test_config_partial_override_keeps_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
        engagement_distance = 80.0
        ship_fire_rate_ms = 250
        "#,
    )
    .unwrap();
    assert_eq!(config.engagement_distance, 80.0);
    assert_eq!(config.ship_fire_rate_ms, 250);
    assert_eq!(config.disengagement_distance, DISENGAGEMENT_DISTANCE);
    assert_eq!(config.base_ship_interval_ms, BASE_SHIP_INTERVAL_MS);
}

#[test]
fn test_config_rejects_negative_values() {
    let err = GameConfig::from_toml_str("projectile_speed = -1.0").unwrap_err();
    match err {
        ConfigError::Invalid { name, value } => {
            assert_eq!(name, "projectile_speed");
            assert_eq!(value, -1.0);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn test_config_accepts_zero_values() {
    let config = GameConfig::from_toml_str(
        r#"
        engagement_distance = 0.0
        disengagement_distance = 0.0
        aim_error_factor = 0.0
        "#,
    );
    assert!(config.is_ok(), "zero is a legal tunable");
}

#[test]
fn test_config_parse_error() {
    let err = GameConfig::from_toml_str("engagement_distance = \"far\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_missing_file() {
    let err = GameConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

// ---- Modifiers ----

const UPGRADES: [UpgradeType; 7] = [
    UpgradeType::ShipSpeed,
    UpgradeType::ShipHealth,
    UpgradeType::ShipDamage,
    UpgradeType::SpawnSpeed,
    UpgradeType::PlanetHealth,
    UpgradeType::DamageReduction,
    UpgradeType::DoubleSpawn,
];

#[test]
fn test_no_modifiers_are_neutral() {
    let provider = NoModifiers;
    for upgrade in UPGRADES {
        assert_eq!(
            provider.upgrade_value(OperatorId(0), upgrade),
            upgrade.neutral_value()
        );
    }
    assert_eq!(UpgradeType::DoubleSpawn.neutral_value(), 0.0);
}

#[test]
fn test_upgrade_levels_lookup() {
    let mut levels = UpgradeLevels::new();
    levels.set_level(OperatorId(0), UpgradeType::ShipSpeed, 2);
    levels.set_level(OperatorId(0), UpgradeType::DamageReduction, 99);

    assert!((levels.upgrade_value(OperatorId(0), UpgradeType::ShipSpeed) - 1.2).abs() < 1e-12);
    // clamped to max level
    assert_eq!(
        levels.level(OperatorId(0), UpgradeType::DamageReduction),
        MAX_UPGRADE_LEVEL
    );
    assert!(levels.upgrade_value(OperatorId(0), UpgradeType::DamageReduction) < 1.0);
    // other operators are unaffected
    assert_eq!(levels.upgrade_value(OperatorId(1), UpgradeType::ShipSpeed), 1.0);
}

// ---- Profiles ----

#[test]
fn test_planet_type_profiles_sane() {
    for planet_type in [
        PlanetType::Standard,
        PlanetType::Fortress,
        PlanetType::Factory,
        PlanetType::Nexus,
    ] {
        let profile = get_profile(planet_type);
        assert!(profile.defence_multiplier > 0.0, "{planet_type:?}");
        assert!(profile.spawn_rate_multiplier > 0.0, "{planet_type:?}");
        assert!(profile.radius > 0.0, "{planet_type:?}");
    }
    assert_eq!(get_profile(PlanetType::Nexus).max_targets_bonus, 1);
}

#[test]
fn test_targeting_outcome_changed() {
    assert!(TargetingOutcome::Added.changed());
    assert!(TargetingOutcome::Swapped.changed());
    assert!(!TargetingOutcome::RejectedCapacity.changed());
    assert!(!TargetingOutcome::RejectedSelf.changed());
}

// ---- Events & commands ----

#[test]
fn test_vec_event_sink_collects() {
    let mut sink: Vec<GameEvent> = Vec::new();
    sink.emit(GameEvent::AbilityActivated {
        operator: OperatorId(1),
        ability: AbilityType::Shield,
    });
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_command_json_shape() {
    let cmd = PlayerCommand::ToggleTarget {
        from: PlanetId(1),
        to: PlanetId(2),
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"type\":\"ToggleTarget\""), "{json}");
    let back: PlayerCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmd);
}
