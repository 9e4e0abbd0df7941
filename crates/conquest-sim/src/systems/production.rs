//! Planet production system: runs every planet's tick in id order.

use conquest_core::enums::UpgradeType;
use conquest_core::modifiers::ModifierProvider;

use crate::operator::Operators;
use crate::planet::{Planets, TickContext};

/// Apply each owner's PlanetHealth upgrade to its planets.
pub fn refresh_max_health(
    planets: &mut Planets,
    operators: &Operators,
    modifiers: &dyn ModifierProvider,
) {
    for planet in planets.iter_mut() {
        if let Some(owner) = operators.get(planet.owner()) {
            let multiplier = owner.upgrade_value(UpgradeType::PlanetHealth, modifiers);
            planet.set_max_health_multiplier(multiplier);
        }
    }
}

pub fn run(planets: &mut Planets, ctx: &mut TickContext<'_>) {
    for planet in planets.iter_mut() {
        planet.tick(ctx);
    }
}
