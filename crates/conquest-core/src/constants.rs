//! Simulation constants and tuning parameters.
//!
//! These are the authoritative defaults for `config::GameConfig`; runtime
//! overrides come from TOML.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

// --- Ships ---

/// Base ship speed (world units per tick).
pub const BASE_SHIP_SPEED: f64 = 1.5;

/// Base ship health.
pub const BASE_SHIP_HEALTH: f64 = 10.0;

/// Base damage a ship deals to a planet on impact.
pub const BASE_SHIP_DAMAGE: f64 = 10.0;

/// Fraction of a ship's damage carried by each projectile it fires.
pub const PROJECTILE_DAMAGE_FACTOR: f64 = 0.4;

/// Damage of an ability-launched missile.
pub const MISSILE_DAMAGE: f64 = 60.0;

/// Speed multiplier of an ability-launched missile over a base ship.
pub const MISSILE_SPEED_FACTOR: f64 = 2.5;

// --- Planets ---

/// Default planet max health before upgrades.
pub const DEFAULT_PLANET_MAX_HEALTH: i32 = 100;

/// Base interval between ship spawns (ms).
pub const BASE_SHIP_INTERVAL_MS: u64 = 2000;

/// Production interval never drops below this (ms).
pub const MIN_SHIP_INTERVAL_MS: u64 = 100;

/// Regeneration period (ms).
pub const REGEN_INTERVAL_MS: u64 = 1000;

/// Health restored per regeneration period before planet-type scaling.
pub const BASE_REGEN_RATE: f64 = 1.0;

/// Maximum ships held in a planet's stationed queue.
pub const MAX_STATIONED_SHIPS: usize = 5;

/// Movement steps granted to a ship released from the stationed queue.
pub const RELEASE_CATCH_UP_STEPS: u32 = 2;

/// Base planet radius; ships within it have arrived.
pub const BASE_PLANET_RADIUS: f64 = 20.0;

// --- Combat ---

/// Enemy ships closer than this are engaged (world units).
pub const ENGAGEMENT_DISTANCE: f64 = 60.0;

/// Engaged ships farther than this are released (world units).
pub const DISENGAGEMENT_DISTANCE: f64 = 90.0;

/// Minimum time between shots of one ship (ms).
pub const SHIP_FIRE_RATE_MS: u64 = 500;

/// Ships only fire at targets within this cone (radians, 45°).
pub const FIRING_CONE: f64 = std::f64::consts::FRAC_PI_4;

/// A target whose heading is within this angle of us is approaching (120°).
pub const APPROACH_CONE: f64 = 2.0 * std::f64::consts::FRAC_PI_3;

/// Projectile speed (world units per tick).
pub const PROJECTILE_SPEED: f64 = 5.0;

/// Distance a projectile travels before expiring (world units).
pub const PROJECTILE_RANGE: f64 = 140.0;

/// Projectiles within this distance of an enemy ship hit it.
pub const PROJECTILE_HIT_RADIUS: f64 = 5.0;

/// Aim error per unit of distance (uniform, each axis).
pub const AIM_ERROR_FACTOR: f64 = 0.08;

// --- Bots ---

/// Bots stay idle for this long after the match starts (ms).
pub const BOT_GRACE_MS: u64 = 3000;

/// Minimum time between two ability activations of one bot (ms).
pub const BOT_ABILITY_COOLDOWN_MS: u64 = 15_000;

/// Per-decision chance that an off-cooldown bot uses an ability.
pub const BOT_ABILITY_CHANCE: f64 = 0.25;

/// Donor planets must be above this health fraction to reinforce.
pub const REINFORCE_DONOR_MIN_FRACTION: f64 = 0.8;

/// Donor planets must have fewer targets than this to reinforce.
pub const REINFORCE_DONOR_MAX_TARGETS: usize = 2;

/// Numerator of the distance and health terms of the attack score.
pub const ATTACK_SCORE_SCALE: f64 = 1000.0;

// --- Upgrades ---

/// Highest level any upgrade axis reaches.
pub const MAX_UPGRADE_LEVEL: u32 = 5;
