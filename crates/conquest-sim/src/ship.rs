//! Ship spawning and kinematics.
//!
//! A ship travels in a straight line along its heading. While traveling the
//! heading follows the destination planet; while engaging it follows the
//! combat target (see `systems::movement`).

use hecs::{Entity, World};

use conquest_core::components::{Heading, Missile, Ship, ShipStats};
use conquest_core::types::{OperatorId, PlanetId, Position};

/// Everything needed to put a ship into the world.
#[derive(Debug, Clone, Copy)]
pub struct ShipLaunch {
    pub owner: OperatorId,
    pub origin: PlanetId,
    pub destination: PlanetId,
    pub position: Position,
    /// Where the destination planet currently is; sets the initial heading.
    pub target_position: Position,
    pub stats: ShipStats,
    pub missile: bool,
    pub launched_at_ms: u64,
}

/// Spawn a traveling ship. The caller registers it with its operator.
pub fn spawn_ship(world: &mut World, launch: &ShipLaunch) -> Entity {
    let ship = Ship {
        owner: launch.owner,
        origin: launch.origin,
        destination: launch.destination,
        stationary: false,
        launched_at_ms: launch.launched_at_ms,
    };
    let heading = Heading(launch.position.angle_to(&launch.target_position));

    if launch.missile {
        world.spawn((ship, launch.position, heading, launch.stats, Missile))
    } else {
        world.spawn((ship, launch.position, heading, launch.stats))
    }
}

/// Move `speed` units along `heading`.
pub fn step(position: &mut Position, heading: f64, speed: f64) {
    *position = position.advanced(heading, speed);
}

/// Whether a ship at `position` has reached a planet of `radius` at `planet`.
pub fn has_arrived(position: &Position, planet: &Position, radius: f64) -> bool {
    position.distance_to(planet) <= radius
}
