//! Ability activation, cooldowns and the timed effects they leave behind.

use std::collections::HashMap;

use hecs::World;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use conquest_core::abilities::get_spec;
use conquest_core::components::ShipStats;
use conquest_core::config::GameConfig;
use conquest_core::enums::AbilityType;
use conquest_core::events::{EventSink, GameEvent};
use conquest_core::types::{OperatorId, PlanetId};

use crate::operator::Operators;
use crate::planet::Planets;
use crate::ship::{spawn_ship, ShipLaunch};

/// An infected planet produces ships for `by` until `until_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infection {
    pub by: OperatorId,
    pub until_ms: u64,
}

/// Running abilities, cooldowns and infections for every operator.
#[derive(Debug, Clone, Default)]
pub struct AbilityBoard {
    /// Expiry time of each running timed ability.
    active: HashMap<(OperatorId, AbilityType), u64>,
    /// Time at which each ability becomes usable again.
    ready_at: HashMap<(OperatorId, AbilityType), u64>,
    infections: HashMap<PlanetId, Infection>,
}

impl AbilityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, operator: OperatorId, ability: AbilityType, now_ms: u64) -> bool {
        self.active
            .get(&(operator, ability))
            .is_some_and(|&until| now_ms < until)
    }

    pub fn is_ready(&self, operator: OperatorId, ability: AbilityType, now_ms: u64) -> bool {
        self.ready_at
            .get(&(operator, ability))
            .map_or(true, |&ready| now_ms >= ready)
    }

    /// Start the cooldown and, for timed abilities, the effect. Returns
    /// `false` while the ability is still cooling down.
    pub fn activate(&mut self, operator: OperatorId, ability: AbilityType, now_ms: u64) -> bool {
        if !self.is_ready(operator, ability, now_ms) {
            return false;
        }
        let spec = get_spec(ability);
        if spec.duration_ms > 0 {
            self.active
                .insert((operator, ability), now_ms + spec.duration_ms);
        }
        self.ready_at
            .insert((operator, ability), now_ms + spec.cooldown_ms);
        true
    }

    /// Drop expired effects.
    pub fn refresh(&mut self, now_ms: u64) {
        self.active.retain(|_, until| now_ms < *until);
        self.infections.retain(|_, infection| now_ms < infection.until_ms);
    }

    /// Abilities currently running for `operator`, in declaration order.
    pub fn active_for(&self, operator: OperatorId, now_ms: u64) -> Vec<AbilityType> {
        AbilityType::ALL
            .into_iter()
            .filter(|ability| self.is_active(operator, *ability, now_ms))
            .collect()
    }

    /// Whether a running Freeze stops production on planets of `owner`.
    pub fn is_frozen(&self, owner: OperatorId, now_ms: u64) -> bool {
        self.opposing_effect(AbilityType::Freeze, owner, now_ms)
    }

    /// Whether a running OrbitalFreeze holds planets of `owner` in place.
    pub fn is_orbit_frozen(&self, owner: OperatorId, now_ms: u64) -> bool {
        self.opposing_effect(AbilityType::OrbitalFreeze, owner, now_ms)
    }

    fn opposing_effect(&self, ability: AbilityType, owner: OperatorId, now_ms: u64) -> bool {
        self.active
            .iter()
            .any(|(&(by, running), &until)| running == ability && by != owner && now_ms < until)
    }

    pub fn infect(&mut self, planet: PlanetId, by: OperatorId, until_ms: u64) {
        self.infections.insert(planet, Infection { by, until_ms });
    }

    pub fn infector(&self, planet: PlanetId, now_ms: u64) -> Option<OperatorId> {
        self.infections
            .get(&planet)
            .filter(|infection| now_ms < infection.until_ms)
            .map(|infection| infection.by)
    }
}

/// Everything an instant ability may touch.
pub struct AbilityContext<'a> {
    pub world: &'a mut World,
    pub operators: &'a mut Operators,
    pub planets: &'a Planets,
    pub rules: &'a GameConfig,
    pub rng: &'a mut ChaCha8Rng,
    pub now_ms: u64,
}

/// Use `ability` for `operator`. Returns `false` when the operator is
/// unknown, the ability is cooling down, or an instant ability has nothing to
/// act on (no cooldown is spent in that case).
pub fn use_ability(
    board: &mut AbilityBoard,
    ctx: &mut AbilityContext<'_>,
    operator: OperatorId,
    ability: AbilityType,
    events: &mut dyn EventSink,
) -> bool {
    if ctx.operators.get(operator).is_none() || !board.is_ready(operator, ability, ctx.now_ms) {
        return false;
    }

    match ability {
        AbilityType::Infection => {
            let candidates: Vec<PlanetId> = ctx
                .planets
                .iter()
                .filter(|p| p.owner() != operator)
                .map(|p| p.id())
                .collect();
            let Some(&planet) = candidates.choose(&mut *ctx.rng) else {
                return false;
            };
            board.activate(operator, ability, ctx.now_ms);
            board.infect(planet, operator, ctx.now_ms + get_spec(ability).duration_ms);
            debug!(%operator, %planet, "planet infected");
        }
        AbilityType::Missile => {
            if !launch_missile(ctx, operator) {
                return false;
            }
            board.activate(operator, ability, ctx.now_ms);
        }
        _ => {
            board.activate(operator, ability, ctx.now_ms);
        }
    }

    debug!(%operator, ?ability, "ability activated");
    events.emit(GameEvent::AbilityActivated { operator, ability });
    true
}

/// Fire a missile from the operator's healthiest planet at the weakest enemy
/// planet.
fn launch_missile(ctx: &mut AbilityContext<'_>, operator: OperatorId) -> bool {
    let mut from = None;
    let mut target = None;
    for planet in ctx.planets.iter() {
        if planet.owner() == operator {
            if from.map_or(true, |(_, health)| planet.health() > health) {
                from = Some((planet, planet.health()));
            }
        } else if target.map_or(true, |(_, health)| planet.health() < health) {
            target = Some((planet, planet.health()));
        }
    }
    let (Some((from, _)), Some((target, _))) = (from, target) else {
        return false;
    };

    let rules = ctx.rules;
    let launch = ShipLaunch {
        owner: operator,
        origin: from.id(),
        destination: target.id(),
        position: from.position(),
        target_position: target.position(),
        stats: ShipStats {
            speed: rules.base_ship_speed * rules.missile_speed_factor,
            health: rules.base_ship_health,
            damage: rules.missile_damage,
        },
        missile: true,
        launched_at_ms: ctx.now_ms,
    };
    let entity = spawn_ship(ctx.world, &launch);
    if let Some(owner) = ctx.operators.get_mut(operator) {
        owner.add_ship(entity);
    }
    true
}
