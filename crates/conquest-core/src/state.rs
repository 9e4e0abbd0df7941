//! Game state snapshot: the complete visible state handed out after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{OperatorId, PlanetId, Position, SimTime};

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub planets: Vec<PlanetView>,
    pub ships: Vec<ShipView>,
    pub projectiles: Vec<ProjectileView>,
    pub operators: Vec<OperatorView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
    pub winner: Option<OperatorId>,
}

/// A planet as drawn by the UI, including its connection lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetView {
    pub id: PlanetId,
    pub planet_type: PlanetType,
    pub owner: OperatorId,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub targets: Vec<PlanetId>,
    pub max_targets: usize,
    pub stationed: usize,
    pub infected_by: Option<OperatorId>,
}

/// A ship in flight or in combat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub owner: OperatorId,
    pub position: Position,
    pub heading: f64,
    pub health: f64,
    pub destination: PlanetId,
    pub state: ShipState,
    pub missile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: OperatorId,
    pub position: Position,
}

/// Per-operator summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorView {
    pub id: OperatorId,
    pub name: String,
    pub kind: OperatorKind,
    pub ship_count: usize,
    pub planet_count: usize,
    pub active_abilities: Vec<AbilityType>,
}
