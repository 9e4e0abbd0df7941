//! Fixed per-ability timing and effect sizes.

use crate::enums::AbilityType;

/// Timing and magnitude of an ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilitySpec {
    /// How long the effect stays active (0 = instant).
    pub duration_ms: u64,
    /// Time before the same operator can use it again.
    pub cooldown_ms: u64,
    /// Effect size while active; meaning depends on the ability.
    pub multiplier: f64,
}

pub fn get_spec(ability: AbilityType) -> AbilitySpec {
    match ability {
        // multiplier is the bot's damage factor; players are fully shielded
        AbilityType::Shield => AbilitySpec {
            duration_ms: 5_000,
            cooldown_ms: 30_000,
            multiplier: 0.5,
        },
        AbilityType::Freeze => AbilitySpec {
            duration_ms: 4_000,
            cooldown_ms: 40_000,
            multiplier: 0.0,
        },
        AbilityType::FactoryHype => AbilitySpec {
            duration_ms: 8_000,
            cooldown_ms: 35_000,
            multiplier: 2.0,
        },
        AbilityType::OrbitalFreeze => AbilitySpec {
            duration_ms: 10_000,
            cooldown_ms: 30_000,
            multiplier: 0.0,
        },
        AbilityType::Overdrive => AbilitySpec {
            duration_ms: 6_000,
            cooldown_ms: 30_000,
            multiplier: 1.5,
        },
        AbilityType::Infection => AbilitySpec {
            duration_ms: 12_000,
            cooldown_ms: 45_000,
            multiplier: 1.0,
        },
        AbilityType::Missile => AbilitySpec {
            duration_ms: 0,
            cooldown_ms: 20_000,
            multiplier: 1.0,
        },
    }
}

impl AbilityType {
    pub const ALL: [AbilityType; 7] = [
        AbilityType::Shield,
        AbilityType::Freeze,
        AbilityType::FactoryHype,
        AbilityType::OrbitalFreeze,
        AbilityType::Overdrive,
        AbilityType::Infection,
        AbilityType::Missile,
    ];

    /// Value of the multiplier when the ability is not active.
    pub fn neutral_multiplier(&self) -> f64 {
        1.0
    }
}
