//! Operators: the human player and the bots.
//!
//! Planets and ships ask an operator for upgrade and ability multipliers and
//! never inspect which kind of operator they are talking to. The player's
//! values come from the injected `ModifierProvider`; a bot's come from its
//! difficulty profile.

use std::collections::BTreeSet;

use hecs::Entity;

use conquest_bot_ai::profiles::{get_profile, BotProfile};
use conquest_core::abilities::get_spec;
use conquest_core::enums::{AbilityType, Difficulty, OperatorKind, UpgradeType};
use conquest_core::modifiers::ModifierProvider;
use conquest_core::types::OperatorId;

use crate::abilities::AbilityBoard;

/// Decision timers of a bot.
#[derive(Debug, Clone)]
pub struct BotBrain {
    pub profile: BotProfile,
    /// Earliest time of the next decision cycle (ms).
    pub next_decision_ms: u64,
    /// Earliest time the bot may roll for an ability again (ms).
    pub next_ability_ms: u64,
}

/// Who issues orders for an operator.
#[derive(Debug, Clone)]
pub enum Controller {
    Player,
    Bot(BotBrain),
}

#[derive(Debug, Clone)]
pub struct Operator {
    id: OperatorId,
    name: String,
    controller: Controller,
    /// Ships currently in the world. Stationed ships are not listed.
    roster: BTreeSet<Entity>,
}

impl Operator {
    pub fn player(id: OperatorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            controller: Controller::Player,
            roster: BTreeSet::new(),
        }
    }

    /// A bot whose first decision happens at `first_decision_ms`.
    pub fn bot(
        id: OperatorId,
        name: impl Into<String>,
        difficulty: Difficulty,
        first_decision_ms: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            controller: Controller::Bot(BotBrain {
                profile: get_profile(difficulty),
                next_decision_ms: first_decision_ms,
                next_ability_ms: first_decision_ms,
            }),
            roster: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> OperatorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperatorKind {
        match self.controller {
            Controller::Player => OperatorKind::Player,
            Controller::Bot(_) => OperatorKind::Bot,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.controller, Controller::Player)
    }

    pub fn bot_brain_mut(&mut self) -> Option<&mut BotBrain> {
        match &mut self.controller {
            Controller::Bot(brain) => Some(brain),
            Controller::Player => None,
        }
    }

    // --- Roster ---

    pub fn add_ship(&mut self, ship: Entity) -> bool {
        self.roster.insert(ship)
    }

    pub fn remove_ship(&mut self, ship: Entity) -> bool {
        self.roster.remove(&ship)
    }

    pub fn owns_ship(&self, ship: Entity) -> bool {
        self.roster.contains(&ship)
    }

    pub fn ship_count(&self) -> usize {
        self.roster.len()
    }

    pub fn ships(&self) -> impl Iterator<Item = Entity> + '_ {
        self.roster.iter().copied()
    }

    // --- Modifiers ---

    /// Upgrade value for this operator.
    pub fn upgrade_value(&self, upgrade: UpgradeType, modifiers: &dyn ModifierProvider) -> f64 {
        match &self.controller {
            Controller::Player => modifiers.upgrade_value(self.id, upgrade),
            Controller::Bot(brain) => brain.profile.upgrade_value(upgrade),
        }
    }

    /// Effect multiplier of one of this operator's own abilities, neutral
    /// when the ability is not running.
    pub fn ability_multiplier(
        &self,
        ability: AbilityType,
        board: &AbilityBoard,
        now_ms: u64,
    ) -> f64 {
        if !board.is_active(self.id, ability, now_ms) {
            return ability.neutral_multiplier();
        }
        match (ability, &self.controller) {
            // players are fully shielded
            (AbilityType::Shield, Controller::Player) => 0.0,
            _ => get_spec(ability).multiplier,
        }
    }
}

/// Registry of all operators, indexed by `OperatorId`.
#[derive(Debug, Clone, Default)]
pub struct Operators {
    operators: Vec<Operator>,
}

impl Operators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next pushed operator will receive.
    pub fn next_id(&self) -> OperatorId {
        OperatorId(self.operators.len() as u32)
    }

    pub fn push(&mut self, operator: Operator) -> OperatorId {
        let id = operator.id();
        self.operators.push(operator);
        id
    }

    pub fn get(&self, id: OperatorId) -> Option<&Operator> {
        self.operators.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: OperatorId) -> Option<&mut Operator> {
        self.operators.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// The human operator, if any.
    pub fn player(&self) -> Option<OperatorId> {
        self.operators.iter().find(|o| o.is_player()).map(|o| o.id())
    }

    pub fn bot_ids(&self) -> Vec<OperatorId> {
        self.operators
            .iter()
            .filter(|o| !o.is_player())
            .map(|o| o.id())
            .collect()
    }

    pub fn kind_of(&self, id: OperatorId) -> Option<OperatorKind> {
        self.get(id).map(|o| o.kind())
    }
}
