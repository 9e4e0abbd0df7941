//! Snapshot system: builds a complete GameStateSnapshot.
//!
//! This system is read-only.

use hecs::World;

use conquest_core::components::{Heading, Missile, Projectile, Ship, ShipStats};
use conquest_core::enums::{GamePhase, ShipState};
use conquest_core::events::GameEvent;
use conquest_core::state::*;
use conquest_core::types::{OperatorId, Position, SimTime};

use crate::abilities::AbilityBoard;
use crate::combat::CombatManager;
use crate::operator::Operators;
use crate::planet::Planets;

/// Read-only view of the engine state a snapshot is built from.
pub struct SnapshotSource<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub phase: GamePhase,
    pub planets: &'a Planets,
    pub operators: &'a Operators,
    pub combat: &'a CombatManager,
    pub abilities: &'a AbilityBoard,
    pub winner: Option<OperatorId>,
}

/// Build a complete GameStateSnapshot.
pub fn build_snapshot(source: &SnapshotSource<'_>, events: Vec<GameEvent>) -> GameStateSnapshot {
    GameStateSnapshot {
        time: source.time,
        phase: source.phase,
        planets: build_planets(source),
        ships: build_ships(source.world, source.combat),
        projectiles: build_projectiles(source.world),
        operators: build_operators(source),
        events,
        winner: source.winner,
    }
}

fn build_planets(source: &SnapshotSource<'_>) -> Vec<PlanetView> {
    let now_ms = source.time.elapsed_ms;
    source
        .planets
        .iter()
        .map(|planet| PlanetView {
            id: planet.id(),
            planet_type: planet.planet_type(),
            owner: planet.owner(),
            position: planet.position(),
            health: planet.health(),
            max_health: planet.max_health(),
            targets: planet.targets().to_vec(),
            max_targets: planet.max_targets(),
            stationed: planet.stationed_count(),
            infected_by: source.abilities.infector(planet.id(), now_ms),
        })
        .collect()
}

/// Ships in entity order.
fn build_ships(world: &World, combat: &CombatManager) -> Vec<ShipView> {
    let mut ships: Vec<(hecs::Entity, ShipView)> = world
        .query::<(&Ship, &Position, &Heading, &ShipStats, Option<&Missile>)>()
        .iter()
        .map(|(entity, (ship, position, heading, stats, missile))| {
            let state = if combat.is_in_combat(entity) {
                ShipState::Engaging
            } else {
                ShipState::Traveling
            };
            (
                entity,
                ShipView {
                    owner: ship.owner,
                    position: *position,
                    heading: heading.0,
                    health: stats.health,
                    destination: ship.destination,
                    state,
                    missile: missile.is_some(),
                },
            )
        })
        .collect();
    ships.sort_by_key(|(entity, _)| *entity);
    ships.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(hecs::Entity, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (projectile, position))| {
            (
                entity,
                ProjectileView {
                    owner: projectile.owner,
                    position: *position,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(entity, _)| *entity);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_operators(source: &SnapshotSource<'_>) -> Vec<OperatorView> {
    let now_ms = source.time.elapsed_ms;
    source
        .operators
        .iter()
        .map(|operator| OperatorView {
            id: operator.id(),
            name: operator.name().to_string(),
            kind: operator.kind(),
            ship_count: operator.ship_count(),
            planet_count: source.planets.owned_by(operator.id()),
            active_abilities: source.abilities.active_for(operator.id(), now_ms),
        })
        .collect()
}
