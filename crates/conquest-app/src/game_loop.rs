//! Game loop thread: runs the simulation engine at the tick rate and
//! publishes snapshots.
//!
//! The engine is moved into the thread once its scenario is loaded. Commands
//! arrive via an `mpsc` channel. Snapshots are stored in shared state for
//! polling and their events are logged.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use conquest_core::constants::TICK_RATE;
use conquest_core::events::GameEvent;
use conquest_core::state::GameStateSnapshot;
use conquest_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("conquest-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Report events
        for event in &snapshot.events {
            log_event(event);
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = scaled_tick_duration(engine.time_scale());

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock time of one tick at `time_scale`. A near-zero scale runs at 1x.
pub fn scaled_tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// Write a simulation event to the log.
pub fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PlanetCaptured {
            planet,
            planet_type,
            by,
        } => info!(%planet, ?planet_type, %by, "planet captured"),
        GameEvent::PlanetLost { planet, operator } => info!(%planet, %operator, "planet lost"),
        GameEvent::ShipDestroyed { operator, by } => debug!(%operator, %by, "ship destroyed"),
        GameEvent::AbilityActivated { operator, ability } => {
            info!(%operator, ?ability, "ability activated")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use conquest_core::commands::PlayerCommand;
    use conquest_core::enums::{Difficulty, GamePhase};
    use conquest_sim::engine::SimConfig;
    use conquest_sim::scenario::Scenario;

    fn skirmish(difficulty: Difficulty) -> SimulationEngine {
        SimulationEngine::from_scenario(SimConfig::default(), &Scenario::skirmish(difficulty))
            .unwrap()
    }

    /// Poll `state` until `done` accepts a snapshot or five seconds pass.
    fn wait_for(state: &AppState, done: impl Fn(&GameStateSnapshot) -> bool) -> GameStateSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snapshot) = state.get_snapshot().unwrap() {
                if done(&snapshot) {
                    return snapshot;
                }
            }
            assert!(Instant::now() < deadline, "game loop never reached the expected state");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_loop_applies_commands_in_order() {
        let state = AppState::new();
        state.start_simulation(skirmish(Difficulty::Easy)).unwrap();
        state.send_command(PlayerCommand::StartMatch).unwrap();
        state.send_command(PlayerCommand::Pause).unwrap();

        let paused = wait_for(&state, |snap| snap.phase == GamePhase::Paused);
        std::thread::sleep(TICK_DURATION * 5);
        let still = state.get_snapshot().unwrap().unwrap();
        assert_eq!(still.phase, GamePhase::Paused);
        assert_eq!(still.time.tick, paused.time.tick);

        state.send_command(PlayerCommand::Resume).unwrap();
        wait_for(&state, |snap| snap.time.tick > paused.time.tick);

        state.stop().unwrap();
        assert!(!state.is_running());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut engine = skirmish(Difficulty::Extreme);
        engine.queue_command(PlayerCommand::StartMatch);

        // Run long enough for the bot to launch ships
        for _ in 0..400 {
            engine.tick();
        }
        let snapshot = engine.tick();

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["phase"], "Active");
        assert_eq!(value["time"]["tick"], snapshot.time.tick);
        assert_eq!(value["planets"].as_array().unwrap().len(), 8);
        assert_eq!(value["planets"][0]["id"], 0);
        assert_eq!(value["operators"].as_array().unwrap().len(), 2);
        assert!(value["winner"].is_null());

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time, snapshot.time);
        assert_eq!(back.ships.len(), snapshot.ships.len());
    }

    #[test]
    fn test_loop_exits_on_disconnect() {
        let engine = skirmish(Difficulty::Easy);
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(engine, latest).unwrap();
        drop(tx);
        assert!(handle.join().is_ok());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
        let half = scaled_tick_duration(2.0).as_nanos() as i128;
        assert!((half - (TICK_DURATION / 2).as_nanos() as i128).abs() <= 1);
        assert_eq!(scaled_tick_duration(0.0), TICK_DURATION);
    }
}
