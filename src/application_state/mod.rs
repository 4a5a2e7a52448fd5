//! # Application State Management
//!
//! This module drives an [`EngineState`] from the outside, the way a host
//! application would:
//! - input intake through the [`InputManager`]
//! - one engine tick per frame
//! - flushing unsaved state on shutdown
//!
//! No window or renderer is involved. A graphical host feeds the input
//! manager from its event loop and draws
//! [`EngineState::render_snapshot`] after each step.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;
use log::{debug, info};

use crate::engine_state::{EngineState, TickReport};
use crate::error::EngineError;

/// Totals over a run of ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub respawns: u64,
    pub collected: usize,
    pub autosaves: u64,
}

/// The running application: engine, input, and frame timing.
pub struct ApplicationState {
    /// The core game engine state and logic
    pub engine_state: EngineState,
    /// Manages input state and event processing
    pub input_manager: InputManager,
    /// Timestamp of the last frame, for frame-time logging
    pub last_frame_time: web_time::Instant,
}

impl ApplicationState {
    pub fn new(engine_state: EngineState) -> Self {
        ApplicationState {
            engine_state,
            input_manager: InputManager::new(),
            last_frame_time: web_time::Instant::now(),
        }
    }

    /// Runs one frame: hands the collected input to the engine and ticks it.
    pub fn step(&mut self) -> Result<TickReport, EngineError> {
        let processed = self.input_manager.get_and_reset_processed_input();
        for command in processed.commands.iter().copied() {
            self.engine_state.queue_command(command);
        }
        let report = self.engine_state.tick(&processed.intent())?;

        let now = web_time::Instant::now();
        debug!(
            "Tick {} took {:?}",
            report.tick,
            now.duration_since(self.last_frame_time)
        );
        self.last_frame_time = now;
        Ok(report)
    }

    /// Runs `ticks` frames back to back.
    pub fn run_for(&mut self, ticks: u64) -> Result<SessionSummary, EngineError> {
        let mut summary = SessionSummary::default();
        for _ in 0..ticks {
            let report = self.step()?;
            summary.ticks += 1;
            summary.respawns += u64::from(report.player.respawned);
            summary.collected += report.collected;
            summary.autosaves += u64::from(report.autosaved);
        }
        info!(
            "Ran {} ticks: {} respawns, {} pickups, {} autosaves",
            summary.ticks, summary.respawns, summary.collected, summary.autosaves
        );
        Ok(summary)
    }

    /// Writes any unsaved state before the application exits.
    pub fn shutdown(&mut self) -> Result<(), EngineError> {
        if self.engine_state.flush_autosave()? {
            info!("Saved world on shutdown");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::input_state::{Control, InputCommand};
    use super::*;
    use crate::engine_state::{config::EngineConfig, persistence::store::MemoryStore};

    fn application() -> ApplicationState {
        let mut config = EngineConfig::default();
        config.terrain.columns = 20;
        let engine = EngineState::new(config, Box::new(MemoryStore::new())).unwrap();
        ApplicationState::new(engine)
    }

    #[test]
    fn steps_forward_commands_and_intent() {
        let mut app = application();
        app.engine_state.world.blocks.clear();
        app.input_manager.intake_control(Control::Right, true);
        app.input_manager
            .intake_command(InputCommand::PlaceBlockAt { x: 600.0, y: 600.0 });

        let report = app.step().unwrap();
        assert_eq!(report.commands_applied, 1);
        assert!(app.engine_state.world.player.body.aabb.x > 100.0);
    }

    #[test]
    fn run_for_counts_ticks() {
        let mut app = application();
        let summary = app.run_for(5).unwrap();
        assert_eq!(summary.ticks, 5);
        assert_eq!(app.engine_state.ticks(), 5);
        app.shutdown().unwrap();
    }
}
