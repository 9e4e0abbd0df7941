//! Cleanup system: removes ships from every collection that references them.

use hecs::{Entity, World};

use conquest_core::components::{Ship, ShipStats};

use crate::combat::CombatManager;
use crate::operator::Operators;

/// Remove `ship` from the combat manager, its operator's roster and the
/// world, in that order, so no one can read a dangling reference later in
/// the tick. Returns the ship data if it was still present.
pub fn despawn_ship(
    world: &mut World,
    operators: &mut Operators,
    combat: &mut CombatManager,
    ship: Entity,
) -> Option<Ship> {
    let data = world.get::<&Ship>(ship).ok().map(|s| *s);
    combat.remove_ship(world, ship);
    if let Some(data) = &data {
        if let Some(owner) = operators.get_mut(data.owner) {
            owner.remove_ship(ship);
        }
    }
    let _ = world.despawn(ship);
    data
}

/// Remove ships left at zero health. Uses a pre-allocated buffer to avoid
/// per-tick allocation.
pub fn run(
    world: &mut World,
    operators: &mut Operators,
    combat: &mut CombatManager,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, (_ship, stats)) in world.query_mut::<(&Ship, &ShipStats)>() {
        if stats.is_destroyed() {
            despawn_buffer.push(entity);
        }
    }
    despawn_buffer.sort();

    for &entity in despawn_buffer.iter() {
        despawn_ship(world, operators, combat, entity);
    }
    despawn_buffer.clear();
}
