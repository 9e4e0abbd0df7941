//! Runtime-tunable rules loaded from TOML.
//!
//! [`GameConfig`] mirrors the tunables in [`crate::constants`]. Missing keys
//! fall back to the compile-time defaults, so a minimal TOML can override just
//! the values you care about:
//!
//! ```toml
//! engagement_distance = 80.0
//! ship_fire_rate_ms = 250
//! ```
//!
//! The tick tolerates any finite, non-negative value; `validate` rejects the
//! rest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Named numeric rules consumed by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Timing ────────────────────────────────────────────────────────────────
    pub tick_ms: u64,

    // ── Ships ─────────────────────────────────────────────────────────────────
    pub base_ship_speed: f64,
    pub base_ship_health: f64,
    pub base_ship_damage: f64,
    pub projectile_damage_factor: f64,
    pub missile_damage: f64,
    pub missile_speed_factor: f64,

    // ── Planets ───────────────────────────────────────────────────────────────
    pub base_ship_interval_ms: u64,
    pub regen_interval_ms: u64,
    pub base_regen_rate: f64,
    pub max_stationed_ships: usize,

    // ── Combat ────────────────────────────────────────────────────────────────
    pub engagement_distance: f64,
    pub disengagement_distance: f64,
    pub ship_fire_rate_ms: u64,
    pub projectile_speed: f64,
    pub projectile_range: f64,
    pub projectile_hit_radius: f64,
    pub aim_error_factor: f64,

    // ── Bots ──────────────────────────────────────────────────────────────────
    pub bot_grace_ms: u64,
    pub bot_ability_cooldown_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            base_ship_speed: BASE_SHIP_SPEED,
            base_ship_health: BASE_SHIP_HEALTH,
            base_ship_damage: BASE_SHIP_DAMAGE,
            projectile_damage_factor: PROJECTILE_DAMAGE_FACTOR,
            missile_damage: MISSILE_DAMAGE,
            missile_speed_factor: MISSILE_SPEED_FACTOR,
            base_ship_interval_ms: BASE_SHIP_INTERVAL_MS,
            regen_interval_ms: REGEN_INTERVAL_MS,
            base_regen_rate: BASE_REGEN_RATE,
            max_stationed_ships: MAX_STATIONED_SHIPS,
            engagement_distance: ENGAGEMENT_DISTANCE,
            disengagement_distance: DISENGAGEMENT_DISTANCE,
            ship_fire_rate_ms: SHIP_FIRE_RATE_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_range: PROJECTILE_RANGE,
            projectile_hit_radius: PROJECTILE_HIT_RADIUS,
            aim_error_factor: AIM_ERROR_FACTOR,
            bot_grace_ms: BOT_GRACE_MS,
            bot_ability_cooldown_ms: BOT_ABILITY_COOLDOWN_MS,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject negative or non-finite tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("base_ship_speed", self.base_ship_speed),
            ("base_ship_health", self.base_ship_health),
            ("base_ship_damage", self.base_ship_damage),
            ("projectile_damage_factor", self.projectile_damage_factor),
            ("missile_damage", self.missile_damage),
            ("missile_speed_factor", self.missile_speed_factor),
            ("base_regen_rate", self.base_regen_rate),
            ("engagement_distance", self.engagement_distance),
            ("disengagement_distance", self.disengagement_distance),
            ("projectile_speed", self.projectile_speed),
            ("projectile_range", self.projectile_range),
            ("projectile_hit_radius", self.projectile_hit_radius),
            ("aim_error_factor", self.aim_error_factor),
        ];
        for (name, value) in floats {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { name, value });
            }
        }
        Ok(())
    }
}
