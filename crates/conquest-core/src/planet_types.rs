//! Planet-type specific multipliers.
//!
//! Consolidates per-type parameters for production, defence and ship stats.

use crate::constants::BASE_PLANET_RADIUS;
use crate::enums::PlanetType;

/// Numeric profile of a planet type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetTypeProfile {
    /// Scales health restored per regeneration period.
    pub health_regen_multiplier: f64,
    /// Incoming enemy damage is divided by this.
    pub defence_multiplier: f64,
    /// Scales production rate (higher = faster).
    pub spawn_rate_multiplier: f64,
    pub ship_speed_multiplier: f64,
    pub ship_health_multiplier: f64,
    pub ship_damage_multiplier: f64,
    /// Added to the health-quartile target capacity.
    pub max_targets_bonus: usize,
    /// Arrival radius (world units).
    pub radius: f64,
}

/// Get the profile for a given planet type.
pub fn get_profile(planet_type: PlanetType) -> PlanetTypeProfile {
    match planet_type {
        PlanetType::Standard => PlanetTypeProfile {
            health_regen_multiplier: 1.0,
            defence_multiplier: 1.0,
            spawn_rate_multiplier: 1.0,
            ship_speed_multiplier: 1.0,
            ship_health_multiplier: 1.0,
            ship_damage_multiplier: 1.0,
            max_targets_bonus: 0,
            radius: BASE_PLANET_RADIUS,
        },
        PlanetType::Fortress => PlanetTypeProfile {
            health_regen_multiplier: 2.0,
            defence_multiplier: 1.5,
            spawn_rate_multiplier: 0.75,
            ship_speed_multiplier: 0.9,
            ship_health_multiplier: 1.5,
            ship_damage_multiplier: 1.0,
            max_targets_bonus: 0,
            radius: BASE_PLANET_RADIUS * 1.3,
        },
        PlanetType::Factory => PlanetTypeProfile {
            health_regen_multiplier: 1.0,
            defence_multiplier: 0.8,
            spawn_rate_multiplier: 1.6,
            ship_speed_multiplier: 1.0,
            ship_health_multiplier: 0.8,
            ship_damage_multiplier: 0.8,
            max_targets_bonus: 0,
            radius: BASE_PLANET_RADIUS,
        },
        PlanetType::Nexus => PlanetTypeProfile {
            health_regen_multiplier: 0.5,
            defence_multiplier: 1.0,
            spawn_rate_multiplier: 1.0,
            ship_speed_multiplier: 1.2,
            ship_health_multiplier: 1.0,
            ship_damage_multiplier: 1.0,
            max_targets_bonus: 1,
            radius: BASE_PLANET_RADIUS * 0.8,
        },
    }
}
