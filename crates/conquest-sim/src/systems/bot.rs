//! Bot decision system.
//!
//! Each bot decides on its own timer, after a grace delay from match start.
//! A decision cycle refreshes ability effects, maybe fires an ability, then
//! applies the targeting orders from the planner.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use conquest_bot_ai::planner::{pick_ability, plan, PlanetView};
use conquest_core::config::GameConfig;
use conquest_core::enums::OperatorKind;
use conquest_core::events::EventSink;
use conquest_core::types::OperatorId;

use crate::abilities::{use_ability, AbilityBoard, AbilityContext};
use crate::operator::Operators;
use crate::planet::Planets;

/// Everything a decision cycle may touch.
pub struct BotContext<'a> {
    pub world: &'a mut World,
    pub operators: &'a mut Operators,
    pub planets: &'a mut Planets,
    pub abilities: &'a mut AbilityBoard,
    pub rules: &'a GameConfig,
    pub rng: &'a mut ChaCha8Rng,
    pub now_ms: u64,
}

/// Run every bot whose decision timer is due.
pub fn run(ctx: &mut BotContext<'_>, events: &mut dyn EventSink) {
    for bot in ctx.operators.bot_ids() {
        decide(ctx, bot, events);
    }
}

fn decide(ctx: &mut BotContext<'_>, bot: OperatorId, events: &mut dyn EventSink) {
    let now_ms = ctx.now_ms;
    let Some(brain) = ctx.operators.get_mut(bot).and_then(|o| o.bot_brain_mut()) else {
        return;
    };
    if now_ms < brain.next_decision_ms {
        return;
    }
    brain.next_decision_ms = now_ms + brain.profile.decision_interval_ms.max(ctx.rules.tick_ms);
    let ability_due = now_ms >= brain.next_ability_ms;
    let profile = brain.profile.clone();

    // 1. Refresh effects
    ctx.abilities.refresh(now_ms);

    // 2. Ability
    if ability_due
        && profile.ability_chance > 0.0
        && ctx.rng.gen_bool(profile.ability_chance.min(1.0))
    {
        if let Some(ability) = pick_ability(&profile, &mut *ctx.rng) {
            let mut ability_ctx = AbilityContext {
                world: &mut *ctx.world,
                operators: &mut *ctx.operators,
                planets: &*ctx.planets,
                rules: ctx.rules,
                rng: &mut *ctx.rng,
                now_ms,
            };
            if use_ability(ctx.abilities, &mut ability_ctx, bot, ability, events) {
                if let Some(brain) = ctx.operators.get_mut(bot).and_then(|o| o.bot_brain_mut()) {
                    brain.next_ability_ms = now_ms + ctx.rules.bot_ability_cooldown_ms;
                }
            }
        }
    }

    // 3-5. Targeting
    let views = planner_views(ctx.planets, ctx.operators);
    for order in plan(&profile, bot, &views) {
        let already = ctx
            .planets
            .get(order.from())
            .map_or(true, |p| p.targets().contains(&order.to()));
        if already {
            continue;
        }
        let outcome = ctx.planets.attempt_targeting(order.from(), order.to());
        debug!(%bot, ?order, ?outcome, "bot order");
    }
}

fn planner_views(planets: &Planets, operators: &Operators) -> Vec<PlanetView> {
    planets
        .iter()
        .map(|planet| PlanetView {
            id: planet.id(),
            owner: planet.owner(),
            owner_kind: operators
                .kind_of(planet.owner())
                .unwrap_or(OperatorKind::Bot),
            position: planet.position(),
            health: planet.health(),
            max_health: planet.max_health(),
            targets: planet.targets().to_vec(),
            max_targets: planet.max_targets(),
        })
        .collect()
}
