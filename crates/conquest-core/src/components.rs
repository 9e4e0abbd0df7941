//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior beyond small helpers.
//! Game logic lives in the simulation crate. `Position` and `Velocity` from
//! `types` are also used as components.

use serde::{Deserialize, Serialize};

use crate::types::{OperatorId, PlanetId};

/// A mobile combat unit travelling between planets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub owner: OperatorId,
    /// Planet the ship was launched from (the home it defends).
    pub origin: PlanetId,
    /// Planet the ship is flying to.
    pub destination: PlanetId,
    /// Held in place by combat; heading tracks the combat target.
    pub stationary: bool,
    /// Simulation time at which the ship was (re)launched.
    pub launched_at_ms: u64,
}

/// Heading in radians (0 = +x, counter-clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

/// Combat stats fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    /// World units per tick.
    pub speed: f64,
    pub health: f64,
    /// Damage dealt to a planet on impact.
    pub damage: f64,
}

/// Marks a ship launched by the Missile ability. Missiles never take part in
/// combat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Missile;

/// A shot fired by a ship in combat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: OperatorId,
    pub damage: f64,
    /// Distance left before the projectile expires.
    pub remaining_range: f64,
}

impl ShipStats {
    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}
