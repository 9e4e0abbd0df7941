//! Projectile flight and hits.

use hecs::{Entity, World};

use conquest_core::components::{Missile, Projectile, Ship, ShipStats};
use conquest_core::config::GameConfig;
use conquest_core::types::{OperatorId, Position, Velocity};

/// A ship whose health reached zero this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipKill {
    pub ship: Entity,
    pub owner: OperatorId,
    pub by: OperatorId,
}

/// Advance projectiles, apply hits and expire spent shots. Destroyed ships
/// are returned for the engine to remove; they are still in the world.
pub fn run(
    world: &mut World,
    rules: &GameConfig,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<ShipKill> {
    despawn_buffer.clear();

    let mut ships: Vec<(Entity, OperatorId, Position)> = world
        .query::<(&Ship, &Position, Option<&Missile>)>()
        .iter()
        .filter(|(_, (_, _, missile))| missile.is_none())
        .map(|(entity, (ship, position, _))| (entity, ship.owner, *position))
        .collect();
    ships.sort_by_key(|(entity, _, _)| *entity);

    let mut hits: Vec<(Entity, f64, OperatorId)> = Vec::new();
    for (entity, (projectile, position, velocity)) in
        world.query_mut::<(&mut Projectile, &mut Position, &Velocity)>()
    {
        position.x += velocity.x;
        position.y += velocity.y;
        let travelled = velocity.speed();
        projectile.remaining_range -= travelled;

        let hit = ships.iter().find(|(_, owner, ship_position)| {
            *owner != projectile.owner
                && ship_position.distance_to(position) <= rules.projectile_hit_radius
        });
        if let Some(&(ship, _, _)) = hit {
            hits.push((ship, projectile.damage, projectile.owner));
            despawn_buffer.push(entity);
            continue;
        }

        if projectile.remaining_range <= 0.0 || travelled <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    let mut kills = Vec::new();
    for (ship, damage, by) in hits {
        let Ok(mut stats) = world.get::<&mut ShipStats>(ship) else {
            continue;
        };
        if stats.is_destroyed() {
            continue;
        }
        stats.health -= damage;
        if stats.is_destroyed() {
            drop(stats);
            if let Ok(data) = world.get::<&Ship>(ship) {
                kills.push(ShipKill {
                    ship,
                    owner: data.owner,
                    by,
                });
            }
        }
    }
    kills
}
