//! Planets: production, stationing, damage, capture and targeting edges.
//!
//! Planets live in a plain arena (`Planets`) indexed by `PlanetId`. They are
//! never destroyed, only captured, so an id stays valid for the whole match.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use conquest_core::components::ShipStats;
use conquest_core::config::GameConfig;
use conquest_core::constants::{MIN_SHIP_INTERVAL_MS, RELEASE_CATCH_UP_STEPS};
use conquest_core::enums::{AbilityType, ImpactOutcome, PlanetType, TargetingOutcome, UpgradeType};
use conquest_core::events::{EventSink, GameEvent};
use conquest_core::modifiers::ModifierProvider;
use conquest_core::planet_types::{get_profile, PlanetTypeProfile};
use conquest_core::types::{OperatorId, PlanetId, Position};

use crate::abilities::AbilityBoard;
use crate::operator::{Operator, Operators};
use crate::ship::{self, spawn_ship, ShipLaunch};

/// Elliptical orbit. A zero-axis orbit is a fixed planet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orbit {
    pub center: Position,
    pub semi_major: f64,
    pub semi_minor: f64,
    /// Current angle (radians).
    pub angle: f64,
    /// Radians per tick.
    pub speed: f64,
}

impl Orbit {
    pub fn fixed(at: Position) -> Self {
        Self {
            center: at,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Position {
        Position::new(
            self.center.x + self.semi_major * self.angle.cos(),
            self.center.y + self.semi_minor * self.angle.sin(),
        )
    }
}

/// A ship parked at a friendly planet. It has no entity until released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationedShip {
    pub stats: ShipStats,
    /// Destination picked at production time; `None` for ships that arrived
    /// from elsewhere.
    pub destination: Option<PlanetId>,
}

/// A ship reaching its destination planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipImpact {
    pub owner: OperatorId,
    pub stats: ShipStats,
    pub missile: bool,
}

/// Owner and position of a planet as of the start of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSummary {
    pub id: PlanetId,
    pub owner: OperatorId,
    pub position: Position,
}

/// Mutable access a planet needs during its tick.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub operators: &'a mut Operators,
    pub abilities: &'a AbilityBoard,
    pub modifiers: &'a dyn ModifierProvider,
    pub rules: &'a GameConfig,
    pub rng: &'a mut ChaCha8Rng,
    pub layout: &'a [PlanetSummary],
    pub now_ms: u64,
}

impl TickContext<'_> {
    fn position_of(&self, planet: PlanetId) -> Option<Position> {
        self.layout
            .iter()
            .find(|summary| summary.id == planet)
            .map(|summary| summary.position)
    }
}

/// Read-only access needed to resolve an impact.
pub struct DamageContext<'a> {
    pub operators: &'a Operators,
    pub abilities: &'a AbilityBoard,
    pub modifiers: &'a dyn ModifierProvider,
    pub rules: &'a GameConfig,
    pub now_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Planet {
    id: PlanetId,
    planet_type: PlanetType,
    owner: OperatorId,
    health: i32,
    /// Max health before the owner's PlanetHealth upgrade.
    base_max_health: i32,
    max_health: i32,
    targets: Vec<PlanetId>,
    target_index: usize,
    max_targets: usize,
    last_ship_ms: u64,
    last_regen_ms: u64,
    stationed: VecDeque<StationedShip>,
    orbit: Orbit,
    position: Position,
}

impl Planet {
    /// A full-health planet.
    pub fn new(
        id: PlanetId,
        planet_type: PlanetType,
        owner: OperatorId,
        max_health: i32,
        orbit: Orbit,
    ) -> Self {
        let max_health = max_health.max(1);
        let mut planet = Self {
            id,
            planet_type,
            owner,
            health: max_health,
            base_max_health: max_health,
            max_health,
            targets: Vec::new(),
            target_index: 0,
            max_targets: 1,
            last_ship_ms: 0,
            last_regen_ms: 0,
            stationed: VecDeque::new(),
            orbit,
            position: orbit.position(),
        };
        planet.recompute_max_targets();
        planet
    }

    /// Start at `health` instead of full health (clamped to `1..=max`).
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(1, self.max_health);
        self.recompute_max_targets();
        self
    }

    // --- Queries ---

    pub fn id(&self) -> PlanetId {
        self.id
    }

    pub fn planet_type(&self) -> PlanetType {
        self.planet_type
    }

    pub fn profile(&self) -> PlanetTypeProfile {
        get_profile(self.planet_type)
    }

    pub fn owner(&self) -> OperatorId {
        self.owner
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn health_fraction(&self) -> f64 {
        self.health as f64 / self.max_health as f64
    }

    pub fn targets(&self) -> &[PlanetId] {
        &self.targets
    }

    pub fn max_targets(&self) -> usize {
        self.max_targets
    }

    pub fn has_capacity(&self) -> bool {
        self.targets.len() < self.max_targets
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.profile().radius
    }

    pub fn stationed_count(&self) -> usize {
        self.stationed.len()
    }

    pub fn summary(&self) -> PlanetSummary {
        PlanetSummary {
            id: self.id,
            owner: self.owner,
            position: self.position,
        }
    }

    // --- Capacity & round robin ---

    /// One target per full health quarter, plus the type bonus, never below 1.
    pub fn recompute_max_targets(&mut self) {
        let quarter = (self.max_health / 4).max(1);
        let by_health = (self.health.max(0) / quarter) as usize;
        self.max_targets = (by_health + self.profile().max_targets_bonus).max(1);
    }

    /// Next destination in round-robin order. The cursor restarts whenever
    /// the list has shrunk below it.
    pub fn next_target(&mut self) -> Option<PlanetId> {
        if self.targets.is_empty() {
            return None;
        }
        if self.target_index >= self.targets.len() {
            self.target_index = 0;
        }
        let target = self.targets[self.target_index];
        self.target_index += 1;
        Some(target)
    }

    fn remove_target(&mut self, target: PlanetId) -> bool {
        match self.targets.iter().position(|t| *t == target) {
            Some(index) => {
                self.targets.remove(index);
                true
            }
            None => false,
        }
    }

    /// Apply the owner's PlanetHealth upgrade. Health is clamped to the new
    /// maximum.
    pub fn set_max_health_multiplier(&mut self, multiplier: f64) {
        let scaled = (self.base_max_health as f64 * multiplier).round();
        let max_health = if scaled.is_finite() {
            (scaled as i32).max(1)
        } else {
            self.base_max_health
        };
        if max_health != self.max_health {
            self.max_health = max_health;
            self.health = self.health.min(max_health);
            self.recompute_max_targets();
        }
    }

    // --- Tick ---

    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.release_stationed(ctx);

        if !ctx.abilities.is_frozen(self.owner, ctx.now_ms) {
            self.produce(ctx);
        }

        self.regenerate(ctx.now_ms, ctx.rules);

        let frozen = ctx.abilities.is_orbit_frozen(self.owner, ctx.now_ms);
        self.advance_orbit(frozen);
    }

    fn release_stationed(&mut self, ctx: &mut TickContext<'_>) {
        if self.targets.is_empty() {
            return;
        }
        let Some(parked) = self.stationed.pop_front() else {
            return;
        };
        let destination = parked
            .destination
            .filter(|d| self.targets.contains(d))
            .or_else(|| self.next_target());
        let Some(destination) = destination else {
            self.stationed.push_front(parked);
            return;
        };
        self.launch(ctx, self.owner, destination, parked.stats, RELEASE_CATCH_UP_STEPS);
    }

    fn produce(&mut self, ctx: &mut TickContext<'_>) {
        if self.targets.is_empty() {
            return;
        }
        let Some(owner) = ctx.operators.get(self.owner) else {
            return;
        };
        let Some(interval) = self.production_interval_ms(
            owner,
            ctx.abilities,
            ctx.modifiers,
            ctx.rules.base_ship_interval_ms,
            ctx.now_ms,
        ) else {
            return;
        };
        if ctx.now_ms.saturating_sub(self.last_ship_ms) < interval {
            return;
        }
        self.last_ship_ms = ctx.now_ms;

        let stats = self.ship_stats(owner, ctx.abilities, ctx.modifiers, ctx.rules, ctx.now_ms);
        let double_chance = owner.upgrade_value(UpgradeType::DoubleSpawn, ctx.modifiers);

        if let Some(infector) = ctx
            .abilities
            .infector(self.id, ctx.now_ms)
            .filter(|by| *by != self.owner)
        {
            self.spawn_for_infector(ctx, infector, stats);
            return;
        }

        let Some(destination) = self.next_target() else {
            return;
        };
        if self.stationed.len() < ctx.rules.max_stationed_ships {
            self.stationed.push_back(StationedShip {
                stats,
                destination: Some(destination),
            });
        } else {
            trace!(planet = %self.id, "stationed queue full, spawn dropped");
        }

        if double_chance > 0.0 && ctx.rng.gen_bool(double_chance.min(1.0)) {
            if let Some(extra) = self.next_target() {
                self.launch(ctx, self.owner, extra, stats, 0);
            }
        }
    }

    fn spawn_for_infector(
        &mut self,
        ctx: &mut TickContext<'_>,
        infector: OperatorId,
        stats: ShipStats,
    ) {
        let candidates: Vec<PlanetId> = ctx
            .layout
            .iter()
            .filter(|p| p.owner != infector && p.id != self.id)
            .map(|p| p.id)
            .collect();
        if let Some(&destination) = candidates.choose(&mut *ctx.rng) {
            self.launch(ctx, infector, destination, stats, 0);
        }
    }

    /// Put a ship into the world heading for `destination`, pushed forward
    /// `catch_up_steps` movement steps.
    fn launch(
        &self,
        ctx: &mut TickContext<'_>,
        owner: OperatorId,
        destination: PlanetId,
        stats: ShipStats,
        catch_up_steps: u32,
    ) -> Option<Entity> {
        let target_position = ctx.position_of(destination)?;
        let heading = self.position.angle_to(&target_position);
        let mut position = self.position;
        for _ in 0..catch_up_steps {
            ship::step(&mut position, heading, stats.speed);
        }

        let entity = spawn_ship(
            ctx.world,
            &ShipLaunch {
                owner,
                origin: self.id,
                destination,
                position,
                target_position,
                stats,
                missile: false,
                launched_at_ms: ctx.now_ms,
            },
        );
        if let Some(operator) = ctx.operators.get_mut(owner) {
            operator.add_ship(entity);
        }
        trace!(planet = %self.id, %destination, %owner, "ship launched");
        Some(entity)
    }

    /// Time between two productions, `None` when the rate is not positive.
    pub fn production_interval_ms(
        &self,
        owner: &Operator,
        abilities: &AbilityBoard,
        modifiers: &dyn ModifierProvider,
        base_interval_ms: u64,
        now_ms: u64,
    ) -> Option<u64> {
        let rate = self.profile().spawn_rate_multiplier
            * owner.upgrade_value(UpgradeType::SpawnSpeed, modifiers)
            * owner.ability_multiplier(AbilityType::FactoryHype, abilities, now_ms);
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        Some(((base_interval_ms as f64 / rate) as u64).max(MIN_SHIP_INTERVAL_MS))
    }

    /// Stats of a ship produced here right now.
    pub fn ship_stats(
        &self,
        owner: &Operator,
        abilities: &AbilityBoard,
        modifiers: &dyn ModifierProvider,
        rules: &GameConfig,
        now_ms: u64,
    ) -> ShipStats {
        let profile = self.profile();
        let overdrive = owner.ability_multiplier(AbilityType::Overdrive, abilities, now_ms);
        ShipStats {
            speed: rules.base_ship_speed
                * profile.ship_speed_multiplier
                * owner.upgrade_value(UpgradeType::ShipSpeed, modifiers)
                * overdrive,
            health: rules.base_ship_health
                * profile.ship_health_multiplier
                * owner.upgrade_value(UpgradeType::ShipHealth, modifiers),
            damage: rules.base_ship_damage
                * profile.ship_damage_multiplier
                * owner.upgrade_value(UpgradeType::ShipDamage, modifiers)
                * overdrive,
        }
    }

    /// Restore health once per regeneration period, never above max.
    pub fn regenerate(&mut self, now_ms: u64, rules: &GameConfig) {
        if now_ms.saturating_sub(self.last_regen_ms) < rules.regen_interval_ms {
            return;
        }
        self.last_regen_ms = now_ms;

        let amount =
            (rules.base_regen_rate * self.profile().health_regen_multiplier).round() as i32;
        let room = (self.max_health - self.health).max(0);
        let amount = amount.clamp(0, room);
        if amount > 0 {
            self.health += amount;
            self.recompute_max_targets();
        }
    }

    pub fn advance_orbit(&mut self, frozen: bool) {
        if frozen {
            return;
        }
        self.orbit.angle += self.orbit.speed;
        self.position = self.orbit.position();
    }

    // --- Damage & capture ---

    /// Resolve a ship arriving here. Friendly ships heal, or are stationed
    /// when the planet is already at full health.
    pub fn take_damage(
        &mut self,
        impact: &ShipImpact,
        ctx: &DamageContext<'_>,
        events: &mut dyn EventSink,
    ) -> ImpactOutcome {
        let mut damage = impact.stats.damage;
        if impact.owner == self.owner {
            damage = -damage;
        } else {
            if let Some(defender) = ctx.operators.get(self.owner) {
                damage *=
                    defender.ability_multiplier(AbilityType::Shield, ctx.abilities, ctx.now_ms);
                damage *= defender.upgrade_value(UpgradeType::DamageReduction, ctx.modifiers);
            }
            let defence = self.profile().defence_multiplier;
            if defence > 0.0 {
                damage /= defence;
            }
        }
        let net = damage.round() as i32;

        if net < 0 && self.health >= self.max_health {
            if !impact.missile && self.stationed.len() < ctx.rules.max_stationed_ships {
                self.stationed.push_back(StationedShip {
                    stats: impact.stats,
                    destination: None,
                });
                return ImpactOutcome::Stationed;
            }
            return ImpactOutcome::Absorbed;
        }

        self.health = self.health.saturating_sub(net).min(self.max_health);
        if self.health < 0 {
            let previous_owner = self.capture(impact.owner, ctx.now_ms, events);
            return ImpactOutcome::Captured { previous_owner };
        }

        self.recompute_max_targets();
        if net < 0 {
            ImpactOutcome::Healed
        } else {
            ImpactOutcome::Damaged
        }
    }

    /// Hand the planet to `by`. Health becomes the overshoot, kept positive.
    fn capture(&mut self, by: OperatorId, now_ms: u64, events: &mut dyn EventSink) -> OperatorId {
        let previous = self.owner;
        self.owner = by;
        self.health = self.health.saturating_abs().min(self.max_health).max(1);
        self.targets.clear();
        self.target_index = 0;
        self.stationed.clear();
        self.last_ship_ms = now_ms;
        self.recompute_max_targets();

        info!(planet = %self.id, from = %previous, to = %by, "planet captured");
        events.emit(GameEvent::PlanetCaptured {
            planet: self.id,
            planet_type: self.planet_type,
            by,
        });
        events.emit(GameEvent::PlanetLost {
            planet: self.id,
            operator: previous,
        });
        previous
    }
}

/// Arena of planets indexed by `PlanetId`.
#[derive(Debug, Clone, Default)]
pub struct Planets {
    planets: Vec<Planet>,
}

impl Planets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next pushed planet will receive.
    pub fn next_id(&self) -> PlanetId {
        PlanetId(self.planets.len() as u32)
    }

    pub fn push(&mut self, planet: Planet) -> PlanetId {
        let id = planet.id();
        self.planets.push(planet);
        id
    }

    pub fn get(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Planet> {
        self.planets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    pub fn owned_by(&self, operator: OperatorId) -> usize {
        self.planets.iter().filter(|p| p.owner() == operator).count()
    }

    pub fn summaries(&self) -> Vec<PlanetSummary> {
        self.planets.iter().map(Planet::summary).collect()
    }

    /// Toggle the edge `from -> to`.
    ///
    /// An existing edge is removed. Otherwise, when both planets share an
    /// owner and `to -> from` exists, the reverse edge is swapped for the
    /// forward one. A new edge needs free capacity on `from`; shrinking
    /// capacity never evicts edges that are already there.
    pub fn attempt_targeting(&mut self, from: PlanetId, to: PlanetId) -> TargetingOutcome {
        if from == to {
            return TargetingOutcome::RejectedSelf;
        }
        let (Some(source), Some(target)) = (self.get(from), self.get(to)) else {
            return TargetingOutcome::RejectedUnknown;
        };

        let exists = source.targets.contains(&to);
        let has_capacity = source.has_capacity();
        let reverse = source.owner == target.owner && target.targets.contains(&from);

        if exists {
            if let Some(source) = self.get_mut(from) {
                source.remove_target(to);
            }
            return TargetingOutcome::Removed;
        }
        if !has_capacity {
            return TargetingOutcome::RejectedCapacity;
        }
        if reverse {
            if let Some(target) = self.get_mut(to) {
                target.remove_target(from);
            }
        }
        if let Some(source) = self.get_mut(from) {
            source.targets.push(to);
        }
        if reverse {
            TargetingOutcome::Swapped
        } else {
            TargetingOutcome::Added
        }
    }
}
