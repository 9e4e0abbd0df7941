//! Difficulty-specific bot profiles.
//!
//! Consolidates per-difficulty parameters for the planner and the abilities
//! and upgrades a bot is granted at construction.

use conquest_core::constants::BOT_ABILITY_CHANCE;
use conquest_core::enums::{AbilityType, Difficulty, UpgradeType};

/// Behavioral profile for a difficulty tier.
#[derive(Debug, Clone, PartialEq)]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Scales attack eagerness and the number of simultaneous attacks.
    pub aggressiveness: f64,
    /// Scales target scoring and the reinforcement threshold.
    pub efficiency: f64,
    /// Time between two decision cycles (ms).
    pub decision_interval_ms: u64,
    /// Chance per decision cycle to use an ability once off cooldown.
    pub ability_chance: f64,
    /// Abilities this bot may activate.
    pub abilities: Vec<AbilityType>,
    /// Fixed upgrade values granted to this bot.
    pub upgrades: Vec<(UpgradeType, f64)>,
}

impl BotProfile {
    /// Upgrade value for this bot, neutral when not granted.
    pub fn upgrade_value(&self, upgrade: UpgradeType) -> f64 {
        self.upgrades
            .iter()
            .find(|(granted, _)| *granted == upgrade)
            .map(|(_, value)| *value)
            .unwrap_or_else(|| upgrade.neutral_value())
    }
}

/// Get the profile for a given difficulty.
pub fn get_profile(difficulty: Difficulty) -> BotProfile {
    match difficulty {
        Difficulty::Easy => BotProfile {
            difficulty,
            aggressiveness: 0.5,
            efficiency: 0.8,
            decision_interval_ms: 3000,
            ability_chance: 0.0,
            abilities: Vec::new(),
            upgrades: Vec::new(),
        },
        Difficulty::Medium => BotProfile {
            difficulty,
            aggressiveness: 1.0,
            efficiency: 1.0,
            decision_interval_ms: 2000,
            ability_chance: BOT_ABILITY_CHANCE,
            abilities: vec![AbilityType::Shield],
            upgrades: Vec::new(),
        },
        Difficulty::Hard => BotProfile {
            difficulty,
            aggressiveness: 1.4,
            efficiency: 1.2,
            decision_interval_ms: 1500,
            ability_chance: BOT_ABILITY_CHANCE,
            abilities: vec![
                AbilityType::Shield,
                AbilityType::FactoryHype,
                AbilityType::Freeze,
            ],
            upgrades: vec![(UpgradeType::ShipDamage, 1.1), (UpgradeType::ShipSpeed, 1.1)],
        },
        Difficulty::Extreme => BotProfile {
            difficulty,
            aggressiveness: 1.8,
            efficiency: 1.4,
            decision_interval_ms: 1000,
            ability_chance: BOT_ABILITY_CHANCE,
            abilities: AbilityType::ALL.to_vec(),
            upgrades: vec![
                (UpgradeType::ShipDamage, 1.2),
                (UpgradeType::ShipSpeed, 1.2),
                (UpgradeType::ShipHealth, 1.2),
                (UpgradeType::SpawnSpeed, 1.2),
                (UpgradeType::DoubleSpawn, 0.1),
            ],
        },
    }
}
