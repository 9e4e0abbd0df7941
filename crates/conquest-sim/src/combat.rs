//! Ship-versus-ship combat.
//!
//! Ships defend their origin planet: a ship engages the closest enemy ship
//! that is flying at its home and comes within the engagement distance. While
//! engaged it holds position, turns toward the target and fires predicted
//! shots on a fixed cadence. It breaks off once the target is gone or beyond
//! the disengagement distance, unless the target is still close and
//! approaching. The two distances form a hysteresis band.
//!
//! The manager owns only the per-ship `CombatState` and writes nothing else
//! but `Ship::stationary` and `Heading`.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use conquest_core::components::{Heading, Missile, Projectile, Ship, ShipStats};
use conquest_core::config::GameConfig;
use conquest_core::constants::{APPROACH_CONE, FIRING_CONE};
use conquest_core::types::{angle_difference, OperatorId, PlanetId, Position, Velocity};

/// Combat bookkeeping for one ship. Created lazily on the first pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatState {
    pub combat_target: Option<Entity>,
    pub last_shot_ms: Option<u64>,
    pub in_combat: bool,
}

/// Copy of the ship fields combat reads.
#[derive(Debug, Clone, Copy)]
struct ShipSnapshot {
    entity: Entity,
    owner: OperatorId,
    origin: PlanetId,
    destination: PlanetId,
    position: Position,
    heading: f64,
    speed: f64,
    health: f64,
    stationary: bool,
    damage: f64,
}

/// Read a combat-capable ship. Missiles and missing entities yield `None`.
fn read_ship(world: &World, entity: Entity) -> Option<ShipSnapshot> {
    if world.get::<&Missile>(entity).is_ok() {
        return None;
    }
    let ship = world.get::<&Ship>(entity).ok()?;
    let position = world.get::<&Position>(entity).ok()?;
    let heading = world.get::<&Heading>(entity).ok()?;
    let stats = world.get::<&ShipStats>(entity).ok()?;
    Some(ShipSnapshot {
        entity,
        owner: ship.owner,
        origin: ship.origin,
        destination: ship.destination,
        position: *position,
        heading: heading.0,
        speed: stats.speed,
        health: stats.health,
        stationary: ship.stationary,
        damage: stats.damage,
    })
}

#[derive(Debug, Default)]
pub struct CombatManager {
    states: HashMap<Entity, CombatState>,
    shots_fired: u64,
}

impl CombatManager {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    pub fn is_in_combat(&self, ship: Entity) -> bool {
        self.states.get(&ship).is_some_and(|s| s.in_combat)
    }

    pub fn combat_target(&self, ship: Entity) -> Option<Entity> {
        self.states.get(&ship).and_then(|s| s.combat_target)
    }

    pub fn state(&self, ship: Entity) -> Option<&CombatState> {
        self.states.get(&ship)
    }

    pub fn shots_fired(&self) -> u64 {
        self.shots_fired
    }

    // --- Pass ---

    /// One combat pass over every living, non-missile ship.
    pub fn run(
        &mut self,
        world: &mut World,
        rules: &GameConfig,
        rng: &mut ChaCha8Rng,
        now_ms: u64,
    ) {
        let mut ships: Vec<ShipSnapshot> = {
            let mut query =
                world.query::<(&Ship, &Position, &Heading, &ShipStats, Option<&Missile>)>();
            let collected: Vec<ShipSnapshot> = query
                .iter()
                .filter(|(_, (_, _, _, _, missile))| missile.is_none())
                .map(|(entity, (ship, position, heading, stats, _))| ShipSnapshot {
                    entity,
                    owner: ship.owner,
                    origin: ship.origin,
                    destination: ship.destination,
                    position: *position,
                    heading: heading.0,
                    speed: stats.speed,
                    health: stats.health,
                    stationary: ship.stationary,
                    damage: stats.damage,
                })
                .collect();
            collected
        };
        // Archetype order depends on spawn history; entity order is stable.
        ships.sort_by_key(|s| s.entity);

        for me in &ships {
            if me.health <= 0.0 {
                continue;
            }
            self.states.entry(me.entity).or_default();

            // 1. Validate
            if self.is_in_combat(me.entity) && self.should_disengage(world, me, rules) {
                self.exit_combat(world, me.entity);
            }

            // 2. Acquire
            if !self.is_in_combat(me.entity) {
                if let Some(threat) = self.find_threat(me, &ships, rules) {
                    self.enter_combat(world, me.entity, threat);
                }
            }

            // 3. Engage
            if self.is_in_combat(me.entity) {
                self.face_target(world, me.entity);
                self.try_fire(world, me.entity, rules, rng, now_ms);
            }
        }
    }

    fn should_disengage(&self, world: &World, me: &ShipSnapshot, rules: &GameConfig) -> bool {
        let Some(target) = self
            .combat_target(me.entity)
            .and_then(|t| read_ship(world, t))
        else {
            return true;
        };
        if target.health <= 0.0 || target.owner == me.owner {
            return true;
        }

        let distance = me.position.distance_to(&target.position);
        let threatening = target.destination == me.origin;
        if threatening && distance <= rules.disengagement_distance {
            return false;
        }
        !(distance < rules.engagement_distance && self.is_approaching(me, &target))
    }

    /// Closest enemy heading for our origin within the engagement distance.
    fn find_threat(
        &self,
        me: &ShipSnapshot,
        ships: &[ShipSnapshot],
        rules: &GameConfig,
    ) -> Option<Entity> {
        let mut best: Option<(Entity, f64)> = None;
        for other in ships {
            if other.entity == me.entity
                || other.owner == me.owner
                || other.health <= 0.0
                || other.destination != me.origin
            {
                continue;
            }
            let distance = me.position.distance_to(&other.position);
            if distance > rules.engagement_distance {
                continue;
            }
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((other.entity, distance));
            }
        }
        best.map(|(entity, _)| entity)
    }

    /// Whether `target` still presses toward `me`: it is flying at our
    /// origin, or it is itself engaged, or its heading points at us within
    /// the approach cone. Any one signal is enough.
    fn is_approaching(&self, me: &ShipSnapshot, target: &ShipSnapshot) -> bool {
        if target.destination == me.origin || self.is_in_combat(target.entity) {
            return true;
        }
        let bearing_to_me = target.position.angle_to(&me.position);
        angle_difference(target.heading, bearing_to_me) <= APPROACH_CONE
    }

    fn enter_combat(&mut self, world: &mut World, ship: Entity, target: Entity) {
        let state = self.states.entry(ship).or_default();
        state.in_combat = true;
        state.combat_target = Some(target);
        if let Ok(mut data) = world.get::<&mut Ship>(ship) {
            data.stationary = true;
        }
        self.face_target(world, ship);
        debug!(?ship, ?target, "ship engaged");
    }

    /// Leave combat and resume traveling. A no-op for a disengaged ship.
    pub fn exit_combat(&mut self, world: &mut World, ship: Entity) {
        let Some(state) = self.states.get_mut(&ship) else {
            return;
        };
        if !state.in_combat && state.combat_target.is_none() {
            return;
        }
        state.in_combat = false;
        state.combat_target = None;
        if let Ok(mut data) = world.get::<&mut Ship>(ship) {
            data.stationary = false;
        }
        debug!(?ship, "ship disengaged");
    }

    /// Forget `ship` and release every ship that was fighting it.
    pub fn remove_ship(&mut self, world: &mut World, ship: Entity) {
        self.states.remove(&ship);
        let mut targeters: Vec<Entity> = self
            .states
            .iter()
            .filter(|(_, state)| state.combat_target == Some(ship))
            .map(|(entity, _)| *entity)
            .collect();
        targeters.sort();
        for targeter in targeters {
            self.exit_combat(world, targeter);
        }
    }

    /// Point a stationary ship at its combat target.
    fn face_target(&self, world: &mut World, ship: Entity) {
        let Some(target) = self.combat_target(ship) else {
            return;
        };
        let Some(target_position) = world.get::<&Position>(target).ok().map(|p| *p) else {
            return;
        };
        let stationary = world.get::<&Ship>(ship).is_ok_and(|s| s.stationary);
        if !stationary {
            return;
        }
        let Some(position) = world.get::<&Position>(ship).ok().map(|p| *p) else {
            return;
        };
        if let Ok(mut heading) = world.get::<&mut Heading>(ship) {
            heading.0 = position.angle_to(&target_position);
        }
    }

    /// Fire at the combat target if the cadence allows and the target is
    /// inside the firing cone. Returns whether a projectile was spawned.
    pub fn try_fire(
        &mut self,
        world: &mut World,
        shooter: Entity,
        rules: &GameConfig,
        rng: &mut ChaCha8Rng,
        now_ms: u64,
    ) -> bool {
        let Some(state) = self.states.get(&shooter).copied() else {
            return false;
        };
        let Some(target) = state.combat_target.filter(|_| state.in_combat) else {
            return false;
        };
        if let Some(last) = state.last_shot_ms {
            if now_ms.saturating_sub(last) < rules.ship_fire_rate_ms {
                return false;
            }
        }
        let (Some(me), Some(them)) = (read_ship(world, shooter), read_ship(world, target)) else {
            return false;
        };

        let bearing = me.position.angle_to(&them.position);
        if angle_difference(me.heading, bearing) > FIRING_CONE {
            return false;
        }

        let target_velocity = if them.stationary {
            Velocity::default()
        } else {
            Velocity::from_heading(them.heading, them.speed)
        };
        let aim = predict_intercept(
            me.position,
            them.position,
            target_velocity,
            rules.projectile_speed,
            rules.aim_error_factor,
            rng,
        );

        world.spawn((
            Projectile {
                owner: me.owner,
                damage: me.damage * rules.projectile_damage_factor,
                remaining_range: rules.projectile_range,
            },
            me.position,
            Velocity::from_heading(me.position.angle_to(&aim), rules.projectile_speed),
        ));

        if let Some(state) = self.states.get_mut(&shooter) {
            state.last_shot_ms = Some(now_ms);
        }
        self.shots_fired += 1;
        trace!(?shooter, ?target, "shot fired");
        true
    }
}

/// Where to aim at a target moving with `target_velocity`: its position after
/// the projectile's flight time, plus a uniform error that grows with
/// distance.
pub fn predict_intercept(
    shooter: Position,
    target: Position,
    target_velocity: Velocity,
    projectile_speed: f64,
    error_factor: f64,
    rng: &mut ChaCha8Rng,
) -> Position {
    let distance = shooter.distance_to(&target);
    let flight_ticks = if projectile_speed > 0.0 {
        distance / projectile_speed
    } else {
        0.0
    };
    let predicted = target.as_dvec2() + target_velocity.as_dvec2() * flight_ticks;

    let spread = distance * error_factor;
    let error = if spread > 0.0 {
        DVec2::new(rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread))
    } else {
        DVec2::ZERO
    };
    Position::from_dvec2(predicted + error)
}
