//! Events emitted by the simulation for achievement tracking, audio and UI.

use serde::{Deserialize, Serialize};

use crate::enums::{AbilityType, PlanetType};
use crate::types::{OperatorId, PlanetId};

/// Discrete simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A planet changed hands.
    PlanetCaptured {
        planet: PlanetId,
        planet_type: PlanetType,
        by: OperatorId,
    },
    /// An operator lost a planet.
    PlanetLost {
        planet: PlanetId,
        operator: OperatorId,
    },
    /// A ship was shot down.
    ShipDestroyed {
        operator: OperatorId,
        by: OperatorId,
    },
    /// An ability was used.
    AbilityActivated {
        operator: OperatorId,
        ability: AbilityType,
    },
}

/// Consumer of simulation events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
