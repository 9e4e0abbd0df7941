//! Seams to the external progression system.
//!
//! The simulation never reaches for global player data. Upgrade values are
//! looked up through a `ModifierProvider` injected into the engine; the lookup
//! must be a pure function of (operator, upgrade).

use std::collections::HashMap;

use crate::constants::MAX_UPGRADE_LEVEL;
use crate::enums::UpgradeType;
use crate::types::OperatorId;

/// Source of per-operator upgrade values.
pub trait ModifierProvider {
    /// Current value of `upgrade` for `operator`. Multipliers are neutral at
    /// 1.0; `DoubleSpawn` is a probability and neutral at 0.0.
    fn upgrade_value(&self, operator: OperatorId, upgrade: UpgradeType) -> f64;
}

/// Provider that grants nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModifiers;

impl ModifierProvider for NoModifiers {
    fn upgrade_value(&self, _operator: OperatorId, upgrade: UpgradeType) -> f64 {
        upgrade.neutral_value()
    }
}

impl UpgradeType {
    /// Value meaning "no upgrade".
    pub fn neutral_value(&self) -> f64 {
        match self {
            UpgradeType::DoubleSpawn => 0.0,
            _ => 1.0,
        }
    }

    /// Value at a given purchase level (clamped to `MAX_UPGRADE_LEVEL`).
    pub fn value_at_level(&self, level: u32) -> f64 {
        let level = level.min(MAX_UPGRADE_LEVEL) as f64;
        match self {
            UpgradeType::ShipSpeed | UpgradeType::ShipHealth | UpgradeType::ShipDamage => {
                1.0 + 0.10 * level
            }
            UpgradeType::SpawnSpeed => 1.0 + 0.08 * level,
            UpgradeType::PlanetHealth => 1.0 + 0.15 * level,
            UpgradeType::DamageReduction => 1.0 - 0.08 * level,
            UpgradeType::DoubleSpawn => 0.05 * level,
        }
    }
}

/// Purchased upgrade levels per operator, as kept by the progression system.
#[derive(Debug, Clone, Default)]
pub struct UpgradeLevels {
    levels: HashMap<OperatorId, HashMap<UpgradeType, u32>>,
}

impl UpgradeLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, operator: OperatorId, upgrade: UpgradeType, level: u32) {
        self.levels
            .entry(operator)
            .or_default()
            .insert(upgrade, level.min(MAX_UPGRADE_LEVEL));
    }

    pub fn level(&self, operator: OperatorId, upgrade: UpgradeType) -> u32 {
        self.levels
            .get(&operator)
            .and_then(|axes| axes.get(&upgrade))
            .copied()
            .unwrap_or(0)
    }
}

impl ModifierProvider for UpgradeLevels {
    fn upgrade_value(&self, operator: OperatorId, upgrade: UpgradeType) -> f64 {
        upgrade.value_at_level(self.level(operator, upgrade))
    }
}
