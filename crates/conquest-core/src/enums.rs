//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::OperatorId;

/// Which side of the match an operator is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Human-controlled.
    Player,
    /// AI-controlled.
    Bot,
}

/// Bot difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

/// Planet archetype. Numeric effects live in `planet_types::get_profile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    #[default]
    Standard,
    /// Slow production, heavy defence.
    Fortress,
    /// Fast production of weaker ships.
    Factory,
    /// Extra targeting capacity.
    Nexus,
}

/// Upgrade axes sourced from the external progression system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeType {
    ShipSpeed,
    ShipHealth,
    ShipDamage,
    SpawnSpeed,
    PlanetHealth,
    /// Factor applied to damage taken by the owner's planets (<= 1.0).
    DamageReduction,
    /// Probability that a production cycle yields a second ship.
    DoubleSpawn,
}

/// Activatable abilities. Durations and effect sizes live in `abilities::get_spec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityType {
    Shield,
    Freeze,
    FactoryHype,
    OrbitalFreeze,
    Overdrive,
    Infection,
    Missile,
}

/// Movement/combat state of a ship that is present in the world.
/// Stationed ships are held as data on their planet and have no entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipState {
    #[default]
    Traveling,
    Engaging,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Active,
    Paused,
    Finished,
}

/// Result of a ship reaching its destination planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactOutcome {
    /// Enemy hit that did not flip ownership.
    Damaged,
    /// Friendly ship restored health.
    Healed,
    /// Friendly ship arrived at a full-health planet and was queued.
    Stationed,
    /// Friendly ship arrived at a full-health planet whose queue was full.
    Absorbed,
    /// Health went negative and the planet changed hands.
    Captured { previous_owner: OperatorId },
}

/// Result of `attempt_targeting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingOutcome {
    Added,
    Removed,
    /// Same-owner reverse edge was replaced by the forward edge.
    Swapped,
    RejectedSelf,
    RejectedCapacity,
    /// One of the planets does not exist.
    RejectedUnknown,
    /// The requesting operator does not own the source planet.
    RejectedNotOwner,
}

impl TargetingOutcome {
    /// Whether the call changed any edge.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Added | Self::Removed | Self::Swapped)
    }
}
