//! Ship movement and arrival detection.
//!
//! Traveling ships turn toward their destination planet and advance by their
//! speed. Stationary ships hold position and face their combat target. A ship
//! within its destination's radius has arrived; arrivals are returned for the
//! engine to resolve against the planet.

use std::collections::HashMap;

use hecs::{Entity, World};

use conquest_core::components::{Heading, Missile, Ship, ShipStats};
use conquest_core::types::{PlanetId, Position};

use crate::combat::CombatManager;
use crate::planet::{Planets, ShipImpact};
use crate::ship;

/// A ship that reached its destination this tick.
#[derive(Debug, Clone, Copy)]
pub struct Arrival {
    pub ship: Entity,
    pub destination: PlanetId,
    pub impact: ShipImpact,
}

/// Move every ship one step. Returns arrivals in entity order.
pub fn run(world: &mut World, planets: &Planets, combat: &CombatManager) -> Vec<Arrival> {
    // Combat target positions for stationary ships, read before mutating.
    let aims: HashMap<Entity, Position> = world
        .query::<&Ship>()
        .iter()
        .filter(|(_, ship)| ship.stationary)
        .filter_map(|(entity, _)| {
            let target = combat.combat_target(entity)?;
            let position = world.get::<&Position>(target).ok()?;
            Some((entity, *position))
        })
        .collect();

    let mut arrivals = Vec::new();
    for (entity, (data, position, heading, stats, missile)) in world.query_mut::<(
        &Ship,
        &mut Position,
        &mut Heading,
        &ShipStats,
        Option<&Missile>,
    )>() {
        if data.stationary {
            if let Some(aim) = aims.get(&entity) {
                heading.0 = position.angle_to(aim);
            }
            continue;
        }

        let Some(destination) = planets.get(data.destination) else {
            continue;
        };
        let target = destination.position();
        heading.0 = position.angle_to(&target);
        ship::step(position, heading.0, stats.speed);

        if ship::has_arrived(position, &target, destination.radius()) {
            arrivals.push(Arrival {
                ship: entity,
                destination: data.destination,
                impact: ShipImpact {
                    owner: data.owner,
                    stats: *stats,
                    missile: missile.is_some(),
                },
            });
        }
    }
    arrivals.sort_by_key(|a| a.ship);
    arrivals
}
