//! Bot decision planner.
//!
//! Given a read-only view of every planet, computes the targeting edges a bot
//! wants to open this decision cycle. Each accepted order is applied to a
//! local copy of the views so later decisions in the same cycle see it.
//! No ECS dependency; operates on plain data.

use rand::seq::SliceRandom;
use rand::Rng;

use conquest_core::constants::{
    ATTACK_SCORE_SCALE, REINFORCE_DONOR_MAX_TARGETS, REINFORCE_DONOR_MIN_FRACTION,
};
use conquest_core::enums::{AbilityType, OperatorKind};
use conquest_core::types::{OperatorId, PlanetId, Position};

use crate::profiles::BotProfile;

/// Planner input for a single planet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetView {
    pub id: PlanetId,
    pub owner: OperatorId,
    pub owner_kind: OperatorKind,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub targets: Vec<PlanetId>,
    pub max_targets: usize,
}

impl PlanetView {
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    fn has_capacity(&self) -> bool {
        self.targets.len() < self.max_targets
    }
}

/// A targeting edge the bot wants to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotOrder {
    /// Send ships from a healthy planet to a weak one of our own.
    Reinforce { from: PlanetId, to: PlanetId },
    /// Send ships at an enemy planet.
    Attack { from: PlanetId, to: PlanetId },
}

impl BotOrder {
    pub fn from(&self) -> PlanetId {
        match self {
            BotOrder::Reinforce { from, .. } | BotOrder::Attack { from, .. } => *from,
        }
    }

    pub fn to(&self) -> PlanetId {
        match self {
            BotOrder::Reinforce { to, .. } | BotOrder::Attack { to, .. } => *to,
        }
    }
}

/// Planets below this health fraction ask for reinforcement.
pub fn reinforcement_threshold(efficiency: f64) -> f64 {
    0.5 + (efficiency - 1.0) * 0.2
}

/// Planets must be above this health fraction to attack.
pub fn attack_min_health_fraction(aggressiveness: f64) -> f64 {
    if aggressiveness <= 0.0 {
        return f64::INFINITY;
    }
    0.3 / aggressiveness
}

/// Planets with this many targets or more open no further attacks.
pub fn attack_target_cap(aggressiveness: f64) -> usize {
    (2.0 * aggressiveness).ceil().max(0.0) as usize
}

/// Desirability of attacking `target` from `from`. Near, weak and
/// human-owned planets score higher.
pub fn score_target(profile: &BotProfile, from: &PlanetView, target: &PlanetView) -> f64 {
    let distance = from.position.distance_to(&target.position);
    let health = target.health.max(0) as f64;
    let player_bonus = match target.owner_kind {
        OperatorKind::Player => profile.aggressiveness * 3.0,
        OperatorKind::Bot => 0.0,
    };
    (ATTACK_SCORE_SCALE / (distance + 1.0)) * profile.efficiency
        + (ATTACK_SCORE_SCALE / (health + 1.0)) * profile.efficiency
        + player_bonus
}

/// Plan one decision cycle for `bot`. An empty result is a valid no-op.
pub fn plan(profile: &BotProfile, bot: OperatorId, planets: &[PlanetView]) -> Vec<BotOrder> {
    let mut planets = planets.to_vec();
    let owned: Vec<usize> = planets
        .iter()
        .enumerate()
        .filter(|(_, p)| p.owner == bot)
        .map(|(i, _)| i)
        .collect();

    if owned.is_empty() {
        return Vec::new();
    }

    let mut orders = Vec::new();

    if owned.len() >= 2 {
        plan_reinforcements(profile, &owned, &mut planets, &mut orders);
    }
    plan_attacks(profile, bot, &owned, &mut planets, &mut orders);

    orders
}

fn plan_reinforcements(
    profile: &BotProfile,
    owned: &[usize],
    planets: &mut [PlanetView],
    orders: &mut Vec<BotOrder>,
) {
    let threshold = reinforcement_threshold(profile.efficiency);

    for &weak in owned {
        if planets[weak].health_fraction() >= threshold {
            continue;
        }

        // Strongest eligible donor; the first one wins on equal health.
        let mut donor: Option<usize> = None;
        for &candidate in owned {
            let p = &planets[candidate];
            if candidate == weak
                || p.health_fraction() <= REINFORCE_DONOR_MIN_FRACTION
                || p.targets.len() >= REINFORCE_DONOR_MAX_TARGETS
            {
                continue;
            }
            if donor.map_or(true, |best| p.health > planets[best].health) {
                donor = Some(candidate);
            }
        }

        let Some(donor) = donor else {
            continue;
        };
        let weak_id = planets[weak].id;
        if planets[donor].targets.contains(&weak_id) {
            continue;
        }
        if apply_edge(planets, donor, weak) {
            orders.push(BotOrder::Reinforce {
                from: planets[donor].id,
                to: weak_id,
            });
        }
    }
}

fn plan_attacks(
    profile: &BotProfile,
    bot: OperatorId,
    owned: &[usize],
    planets: &mut [PlanetView],
    orders: &mut Vec<BotOrder>,
) {
    let min_fraction = attack_min_health_fraction(profile.aggressiveness);
    let cap = attack_target_cap(profile.aggressiveness);

    for &from in owned {
        let origin = &planets[from];
        if origin.health_fraction() <= min_fraction
            || origin.targets.len() >= cap
            || !origin.has_capacity()
        {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in planets.iter().enumerate() {
            if candidate.owner == bot || origin.targets.contains(&candidate.id) {
                continue;
            }
            let score = score_target(profile, origin, candidate);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((i, score));
            }
        }

        let Some((target, _)) = best else {
            continue;
        };
        if apply_edge(planets, from, target) {
            orders.push(BotOrder::Attack {
                from: planets[from].id,
                to: planets[target].id,
            });
        }
    }
}

/// Mirror of the simulation's edge-adding rule on the local views.
fn apply_edge(planets: &mut [PlanetView], from: usize, to: usize) -> bool {
    if from == to || !planets[from].has_capacity() {
        return false;
    }
    let from_id = planets[from].id;
    let to_id = planets[to].id;
    if planets[from].owner == planets[to].owner {
        planets[to].targets.retain(|t| *t != from_id);
    }
    planets[from].targets.push(to_id);
    true
}

/// Pick a random ability from the bot's granted pool.
pub fn pick_ability<R: Rng + ?Sized>(profile: &BotProfile, rng: &mut R) -> Option<AbilityType> {
    profile.abilities.choose(rng).copied()
}
