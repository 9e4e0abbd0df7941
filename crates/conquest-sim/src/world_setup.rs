//! Builds the operator registry and planet arena from a `Scenario`.

use tracing::warn;

use conquest_core::config::GameConfig;
use conquest_core::enums::OperatorKind;
use conquest_core::error::SetupError;
use conquest_core::types::{OperatorId, PlanetId};

use crate::operator::{Operator, Operators};
use crate::planet::{Planet, Planets};
use crate::scenario::Scenario;

/// Operators and planets of a freshly set up match.
pub fn build(scenario: &Scenario, rules: &GameConfig) -> Result<(Operators, Planets), SetupError> {
    scenario.validate()?;

    let mut operators = Operators::new();
    for spec in &scenario.operators {
        let id = operators.next_id();
        let operator = match spec.kind {
            OperatorKind::Player => Operator::player(id, spec.name.clone()),
            OperatorKind::Bot => {
                Operator::bot(id, spec.name.clone(), spec.difficulty, rules.bot_grace_ms)
            }
        };
        operators.push(operator);
    }

    let mut planets = Planets::new();
    for spec in &scenario.planets {
        let id = planets.next_id();
        let owner = OperatorId(spec.owner as u32);
        let mut planet = Planet::new(id, spec.planet_type, owner, spec.max_health, spec.orbit);
        if let Some(health) = spec.health {
            planet = planet.with_health(health);
        }
        planets.push(planet);
    }

    for &(from, to) in &scenario.edges {
        let outcome = planets.attempt_targeting(PlanetId(from as u32), PlanetId(to as u32));
        if !outcome.changed() {
            warn!(from, to, ?outcome, "opening edge rejected");
        }
    }

    Ok((operators, planets))
}
