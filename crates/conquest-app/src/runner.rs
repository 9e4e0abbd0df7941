//! Drive a loaded engine to the end of a match or a tick limit.

use std::time::Duration;

use tracing::info;

use conquest_core::commands::PlayerCommand;
use conquest_core::enums::GamePhase;
use conquest_core::state::GameStateSnapshot;
use conquest_sim::SimulationEngine;

use crate::game_loop::log_event;
use crate::state::{AppError, AppState};

/// How often a realtime run polls the game loop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tick as fast as possible until the match ends or `max_ticks` ticks ran.
/// At least one tick always runs.
pub fn run_headless(
    mut engine: SimulationEngine,
    opening: Vec<PlayerCommand>,
    max_ticks: u64,
) -> GameStateSnapshot {
    engine.queue_commands(opening);

    let mut snapshot = engine.tick();
    for _ in 1..max_ticks {
        for event in &snapshot.events {
            log_event(event);
        }
        if snapshot.phase == GamePhase::Finished {
            return snapshot;
        }
        snapshot = engine.tick();
    }
    for event in &snapshot.events {
        log_event(event);
    }
    snapshot
}

/// Run the engine on the paced game loop thread until the match ends or
/// `max_ticks` ran.
pub fn run_realtime(
    engine: SimulationEngine,
    opening: Vec<PlayerCommand>,
    max_ticks: u64,
) -> Result<GameStateSnapshot, AppError> {
    let state = AppState::new();
    state.start_simulation(engine)?;
    for command in opening {
        state.send_command(command)?;
    }

    let outcome = wait_for_end(&state, max_ticks);
    let stopped = state.stop();
    let last = outcome?;
    stopped?;
    Ok(last)
}

/// Poll a running loop until the match ends or `max_ticks` ran. Fails with
/// `LoopStopped` when the loop thread exits first.
pub fn wait_for_end(state: &AppState, max_ticks: u64) -> Result<GameStateSnapshot, AppError> {
    loop {
        std::thread::sleep(POLL_INTERVAL);
        // checked before reading so a final snapshot is never missed
        let finished = state.loop_finished();
        if let Some(snapshot) = state.get_snapshot()? {
            if snapshot.phase == GamePhase::Finished || snapshot.time.tick >= max_ticks {
                return Ok(snapshot);
            }
        }
        if finished {
            return Err(AppError::LoopStopped);
        }
    }
}

/// Log the outcome of a run.
pub fn report(snapshot: &GameStateSnapshot) {
    info!(
        tick = snapshot.time.tick,
        elapsed_ms = snapshot.time.elapsed_ms,
        phase = ?snapshot.phase,
        winner = ?snapshot.winner,
        "run finished"
    );
    for operator in &snapshot.operators {
        info!(
            operator = %operator.id,
            name = %operator.name,
            kind = ?operator.kind,
            planets = operator.planet_count,
            ships = operator.ship_count,
            "standing"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameLoopCommand;
    use conquest_core::enums::Difficulty;
    use conquest_core::types::PlanetId;
    use conquest_sim::engine::SimConfig;
    use conquest_sim::scenario::Scenario;

    fn skirmish(difficulty: Difficulty) -> SimulationEngine {
        SimulationEngine::from_scenario(SimConfig::default(), &Scenario::skirmish(difficulty))
            .unwrap()
    }

    #[test]
    fn test_headless_stops_at_tick_limit() {
        let snapshot =
            run_headless(skirmish(Difficulty::Easy), vec![PlayerCommand::StartMatch], 120);
        assert_eq!(snapshot.time.tick, 120);
        assert_eq!(snapshot.phase, GamePhase::Active);
        assert_eq!(snapshot.planets.len(), 8);
    }

    #[test]
    fn test_headless_without_start_stays_in_setup() {
        let snapshot = run_headless(skirmish(Difficulty::Easy), Vec::new(), 0);
        assert_eq!(snapshot.phase, GamePhase::Setup);
        assert_eq!(snapshot.time.tick, 0);
    }

    #[test]
    fn test_headless_applies_opening_orders() {
        let opening = vec![
            PlayerCommand::StartMatch,
            PlayerCommand::ToggleTarget {
                from: PlanetId(0),
                to: PlanetId(4),
            },
        ];
        let snapshot = run_headless(skirmish(Difficulty::Easy), opening, 1);
        assert_eq!(snapshot.planets[0].targets, vec![PlanetId(4)]);
    }

    #[test]
    fn test_wait_fails_when_loop_exits_early() {
        let state = AppState::new();
        state.start_simulation(skirmish(Difficulty::Easy)).unwrap();
        state
            .command_tx
            .lock()
            .unwrap()
            .as_ref()
            .unwrap()
            .send(GameLoopCommand::Shutdown)
            .unwrap();

        assert!(matches!(wait_for_end(&state, u64::MAX), Err(AppError::LoopStopped)));
        assert!(state.loop_finished());
        state.stop().unwrap();
    }

    #[test]
    fn test_realtime_reaches_tick_limit() {
        let snapshot =
            run_realtime(skirmish(Difficulty::Easy), vec![PlayerCommand::StartMatch], 10).unwrap();
        assert!(snapshot.time.tick >= 10);
    }
}
