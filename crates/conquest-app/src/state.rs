//! Application state shared between the front end and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use conquest_core::commands::PlayerCommand;
use conquest_core::state::GameStateSnapshot;
use conquest_sim::SimulationEngine;

use crate::game_loop;

/// Commands sent from the front end to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop has stopped")]
    LoopStopped,

    #[error("game loop thread panicked")]
    LoopPanicked,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in a `Mutex` so the state is `Sync`
/// - `Option`s stay `None` until `start_simulation`
/// - the latest snapshot is shared with the game loop thread via `Arc`
#[derive(Default)]
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `engine` onto a new game loop thread.
    pub fn start_simulation(&self, engine: SimulationEngine) -> Result<(), AppError> {
        let mut thread = self.loop_thread.lock().map_err(|_| AppError::Poisoned)?;
        if thread.is_some() {
            return Err(AppError::AlreadyRunning);
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, self.latest_snapshot.clone())?;

        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        *tx_lock = Some(cmd_tx);
        *thread = Some(handle);
        Ok(())
    }

    /// Send a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| AppError::LoopStopped),
            None => Err(AppError::NotStarted),
        }
    }

    /// Latest snapshot, `None` before the first tick.
    pub fn get_snapshot(&self) -> Result<Option<GameStateSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    pub fn is_running(&self) -> bool {
        self.loop_thread.lock().is_ok_and(|thread| thread.is_some())
    }

    /// True once a started game loop thread has exited on its own.
    pub fn loop_finished(&self) -> bool {
        self.loop_thread
            .lock()
            .is_ok_and(|thread| thread.as_ref().is_some_and(|handle| handle.is_finished()))
    }

    /// Ask the game loop to stop and wait for it.
    pub fn stop(&self) -> Result<(), AppError> {
        let handle = {
            let mut thread = self.loop_thread.lock().map_err(|_| AppError::Poisoned)?;
            thread.take().ok_or(AppError::NotStarted)?
        };
        {
            let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
            if let Some(tx) = tx_lock.take() {
                // the loop may already be gone
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        handle.join().map_err(|_| AppError::LoopPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conquest_core::enums::Difficulty;
    use conquest_sim::engine::SimConfig;
    use conquest_sim::scenario::Scenario;
    use std::time::{Duration, Instant};

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_commands_require_running_loop() {
        let state = AppState::new();
        assert!(matches!(
            state.send_command(PlayerCommand::StartMatch),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(state.stop(), Err(AppError::NotStarted)));
    }

    #[test]
    fn test_start_and_stop_loop() {
        let engine = SimulationEngine::from_scenario(
            SimConfig::default(),
            &Scenario::skirmish(Difficulty::Easy),
        )
        .unwrap();
        let state = AppState::new();
        state.start_simulation(engine).unwrap();
        assert!(state.is_running());
        state.send_command(PlayerCommand::StartMatch).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen_active = false;
        while Instant::now() < deadline && !seen_active {
            std::thread::sleep(Duration::from_millis(20));
            seen_active = state
                .get_snapshot()
                .unwrap()
                .is_some_and(|snap| snap.time.tick > 0);
        }
        assert!(seen_active, "game loop never advanced");

        assert!(!state.loop_finished());

        state.stop().unwrap();
        assert!(!state.is_running());
        assert!(state.command_tx.lock().unwrap().is_none());
    }
}
