//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world (ships and projectiles), the planet
//! arena, the operator registry, ability state and the combat manager. It
//! processes player commands, runs all systems in a fixed order and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use conquest_core::commands::PlayerCommand;
use conquest_core::config::GameConfig;
use conquest_core::enums::{AbilityType, GamePhase, TargetingOutcome};
use conquest_core::error::SetupError;
use conquest_core::events::GameEvent;
use conquest_core::modifiers::{ModifierProvider, NoModifiers};
use conquest_core::state::GameStateSnapshot;
use conquest_core::types::{OperatorId, PlanetId, SimTime};

use crate::abilities::{self, AbilityBoard, AbilityContext};
use crate::combat::CombatManager;
use crate::operator::{Operator, Operators};
use crate::planet::{DamageContext, Planet, Planets, TickContext};
use crate::scenario::Scenario;
use crate::systems;
use crate::systems::bot::BotContext;
use crate::systems::movement::Arrival;
use crate::systems::snapshot::SnapshotSource;
use crate::world_setup;

/// Upper bound on the time scale.
const MAX_TIME_SCALE: f64 = 4.0;

/// Clamp a requested time scale to 0..=4. NaN falls back to normal speed.
fn clamp_time_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        1.0
    } else {
        scale.clamp(0.0, MAX_TIME_SCALE)
    }
}

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal), clamped to 0..=4.
    pub time_scale: f64,
    /// Numeric rules.
    pub rules: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            rules: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    rules: GameConfig,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,

    // --- Match state ---
    planets: Planets,
    operators: Operators,
    combat: CombatManager,
    abilities: AbilityBoard,
    modifiers: Box<dyn ModifierProvider + Send>,
    winner: Option<OperatorId>,
}

impl SimulationEngine {
    /// Create an empty engine whose player has no upgrades.
    pub fn new(config: SimConfig) -> Self {
        Self::with_modifiers(config, Box::new(NoModifiers))
    }

    /// Create an empty engine reading player upgrades from `modifiers`.
    pub fn with_modifiers(config: SimConfig, modifiers: Box<dyn ModifierProvider + Send>) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: clamp_time_scale(config.time_scale),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rules: config.rules,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            planets: Planets::new(),
            operators: Operators::new(),
            combat: CombatManager::new(),
            abilities: AbilityBoard::new(),
            modifiers,
            winner: None,
        }
    }

    /// Create an engine with `scenario` loaded.
    pub fn from_scenario(config: SimConfig, scenario: &Scenario) -> Result<Self, SetupError> {
        let mut engine = Self::new(config);
        engine.load_scenario(scenario)?;
        Ok(engine)
    }

    /// Replace the current match with `scenario`. The match waits in
    /// `Setup` until `StartMatch`.
    pub fn load_scenario(&mut self, scenario: &Scenario) -> Result<(), SetupError> {
        let (operators, planets) = world_setup::build(scenario, &self.rules)?;
        self.world = World::new();
        self.operators = operators;
        self.planets = planets;
        self.combat = CombatManager::new();
        self.abilities = AbilityBoard::new();
        self.time = SimTime::default();
        self.phase = GamePhase::Setup;
        self.winner = None;
        self.events.clear();
        info!(
            planets = self.planets.len(),
            operators = self.operators.len(),
            "scenario loaded"
        );
        Ok(())
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance(self.rules.tick_ms);
            self.check_victory();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &SnapshotSource {
                world: &self.world,
                time: self.time,
                phase: self.phase,
                planets: &self.planets,
                operators: &self.operators,
                combat: &self.combat,
                abilities: &self.abilities,
                winner: self.winner,
            },
            events,
        )
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn rules(&self) -> &GameConfig {
        &self.rules
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn planets(&self) -> &Planets {
        &self.planets
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id)
    }

    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    pub fn operator(&self, id: OperatorId) -> Option<&Operator> {
        self.operators.get(id)
    }

    pub fn combat(&self) -> &CombatManager {
        &self.combat
    }

    pub fn abilities(&self) -> &AbilityBoard {
        &self.abilities
    }

    pub fn winner(&self) -> Option<OperatorId> {
        self.winner
    }

    pub fn is_in_combat(&self, ship: Entity) -> bool {
        self.combat.is_in_combat(ship)
    }

    pub fn combat_target(&self, ship: Entity) -> Option<Entity> {
        self.combat.combat_target(ship)
    }

    // --- Actions ---

    /// Toggle `from -> to` on behalf of `operator`, who must own `from`.
    pub fn toggle_target(
        &mut self,
        operator: OperatorId,
        from: PlanetId,
        to: PlanetId,
    ) -> TargetingOutcome {
        match self.planets.get(from) {
            None => TargetingOutcome::RejectedUnknown,
            Some(planet) if planet.owner() != operator => TargetingOutcome::RejectedNotOwner,
            Some(_) => self.planets.attempt_targeting(from, to),
        }
    }

    /// Use an ability for `operator`. Returns whether it was activated.
    pub fn use_ability(&mut self, operator: OperatorId, ability: AbilityType) -> bool {
        let mut ctx = AbilityContext {
            world: &mut self.world,
            operators: &mut self.operators,
            planets: &self.planets,
            rules: &self.rules,
            rng: &mut self.rng,
            now_ms: self.time.elapsed_ms,
        };
        abilities::use_ability(&mut self.abilities, &mut ctx, operator, ability, &mut self.events)
    }

    /// Remove a ship from the game. Returns `false` if it was already gone.
    pub fn remove_ship(&mut self, ship: Entity) -> bool {
        systems::cleanup::despawn_ship(&mut self.world, &mut self.operators, &mut self.combat, ship)
            .is_some()
    }

    /// Mutable access to the world (for tests).
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable access to the operator registry (for tests).
    #[cfg(test)]
    pub(crate) fn operators_mut(&mut self) -> &mut Operators {
        &mut self.operators
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch => {
                if self.phase == GamePhase::Setup && !self.planets.is_empty() {
                    self.phase = GamePhase::Active;
                    info!(planets = self.planets.len(), "match started");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = clamp_time_scale(scale);
            }
            PlayerCommand::ToggleTarget { from, to } => {
                if let Some(player) = self.operators.player() {
                    let outcome = self.toggle_target(player, from, to);
                    debug!(%from, %to, ?outcome, "player toggled target");
                }
            }
            PlayerCommand::UseAbility { ability } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                if let Some(player) = self.operators.player() {
                    let used = self.use_ability(player, ability);
                    debug!(?ability, used, "player ability");
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.elapsed_ms;

        // 1. Expire ability effects, apply planet health upgrades
        self.abilities.refresh(now_ms);
        systems::production::refresh_max_health(
            &mut self.planets,
            &self.operators,
            self.modifiers.as_ref(),
        );

        // 2. Planets (release, production, regeneration, orbit)
        let layout = self.planets.summaries();
        let mut planet_ctx = TickContext {
            world: &mut self.world,
            operators: &mut self.operators,
            abilities: &self.abilities,
            modifiers: self.modifiers.as_ref(),
            rules: &self.rules,
            rng: &mut self.rng,
            layout: &layout,
            now_ms,
        };
        systems::production::run(&mut self.planets, &mut planet_ctx);

        // 3. Ships (movement, arrivals)
        let arrivals = systems::movement::run(&mut self.world, &self.planets, &self.combat);
        self.resolve_arrivals(arrivals, now_ms);

        // 4. Combat
        self.combat.run(&mut self.world, &self.rules, &mut self.rng, now_ms);

        // 5. Projectiles (flight, hits, destroyed ships)
        let kills =
            systems::projectile::run(&mut self.world, &self.rules, &mut self.despawn_buffer);
        for kill in kills {
            systems::cleanup::despawn_ship(
                &mut self.world,
                &mut self.operators,
                &mut self.combat,
                kill.ship,
            );
            trace!(owner = %kill.owner, by = %kill.by, "ship destroyed");
            self.events.push(GameEvent::ShipDestroyed {
                operator: kill.owner,
                by: kill.by,
            });
        }

        // 6. Bots
        let mut bot_ctx = BotContext {
            world: &mut self.world,
            operators: &mut self.operators,
            planets: &mut self.planets,
            abilities: &mut self.abilities,
            rules: &self.rules,
            rng: &mut self.rng,
            now_ms,
        };
        systems::bot::run(&mut bot_ctx, &mut self.events);

        // 7. Cleanup (ships left at zero health)
        systems::cleanup::run(
            &mut self.world,
            &mut self.operators,
            &mut self.combat,
            &mut self.despawn_buffer,
        );
    }

    /// Apply every arrival to its planet, then consume the ship.
    fn resolve_arrivals(&mut self, arrivals: Vec<Arrival>, now_ms: u64) {
        for arrival in arrivals {
            let ctx = DamageContext {
                operators: &self.operators,
                abilities: &self.abilities,
                modifiers: self.modifiers.as_ref(),
                rules: &self.rules,
                now_ms,
            };
            if let Some(planet) = self.planets.get_mut(arrival.destination) {
                let outcome = planet.take_damage(&arrival.impact, &ctx, &mut self.events);
                trace!(planet = %arrival.destination, ?outcome, "ship arrived");
            }
            systems::cleanup::despawn_ship(
                &mut self.world,
                &mut self.operators,
                &mut self.combat,
                arrival.ship,
            );
        }
    }

    /// The match ends once a single operator owns every planet.
    fn check_victory(&mut self) {
        let mut owners = self.planets.iter().map(|p| p.owner());
        let Some(first) = owners.next() else {
            return;
        };
        if owners.all(|owner| owner == first) {
            self.phase = GamePhase::Finished;
            self.winner = Some(first);
            info!(winner = %first, tick = self.time.tick, "match finished");
        }
    }
}
