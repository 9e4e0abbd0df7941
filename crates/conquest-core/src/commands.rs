//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::AbilityType;
use crate::types::PlanetId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Planet control ---
    /// Toggle the targeting edge `from -> to` (only on the player's own planets).
    ToggleTarget { from: PlanetId, to: PlanetId },

    // --- Abilities ---
    UseAbility { ability: AbilityType },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f64 },
    /// Start the loaded match.
    StartMatch,
    Pause,
    Resume,
}
