#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Platformer Engine
//!
//! The simulation core of a real-time 2D block platformer: a world of
//! grid-aligned blocks, a player-controlled physics body and wandering
//! creatures, advanced one tick per display frame.
//!
//! ## Key Modules
//!
//! * `application_state` - Input intake and the session driver a host embeds
//! * `engine_state` - World, physics, terrain generation and persistence
//! * `error` - The crate's error types
//!
//! ## Architecture
//!
//! The engine is deliberately headless. A host captures raw input, feeds it
//! to an [`InputManager`](application_state::input_manager::InputManager),
//! steps the [`ApplicationState`] once per frame, and draws the
//! [`RenderSnapshot`](engine_state::render_snapshot::RenderSnapshot) the
//! engine hands back. Everything else (collision, block gravity, creature
//! behaviour, autosave) happens inside the tick.
//!
//! ## Usage
//!
//! ```no_run
//! use platformer_engine::{run, RunOptions};
//!
//! run(RunOptions {
//!     ticks: 600,
//!     ..RunOptions::default()
//! })
//! .unwrap();
//! ```

use std::path::PathBuf;

use application_state::{input_state::Control, ApplicationState};
use engine_state::{
    config::EngineConfig,
    persistence::store::{FileStore, KeyValueStore, MemoryStore},
    EngineState,
};
use error::EngineError;
use log::{info, warn};

pub mod application_state;
pub mod engine_state;
pub mod error;

/// How a headless session should run.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// JSON configuration file; defaults apply when absent
    pub config_path: Option<PathBuf>,
    /// Overrides the configured world seed
    pub seed: Option<u64>,
    /// Number of ticks to simulate
    pub ticks: u64,
    /// Directory for the autosave; the session is not persisted when absent
    pub save_dir: Option<PathBuf>,
    /// Directory to export the final world into
    pub export_dir: Option<PathBuf>,
    /// Hold the right control for the whole session
    pub walk_right: bool,
}

/// Initializes logging to stdout, filtered by `RUST_LOG`.
///
/// # Returns
/// `true` if this call installed the logger, `false` if the host had already
/// installed one, which stays in place.
pub fn init_logging() -> bool {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG");
    match log_builder.try_init() {
        Ok(()) => true,
        Err(error) => {
            warn!("Keeping the existing logger: {}", error);
            false
        }
    }
}

/// Runs a headless session as described by `options`.
pub fn run(options: RunOptions) -> Result<(), EngineError> {
    init_logging();
    info!("Logger initialized");

    let mut config = match &options.config_path {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    let store: Box<dyn KeyValueStore> = match &options.save_dir {
        Some(dir) => Box::new(FileStore::open(dir)?),
        None => Box::new(MemoryStore::new()),
    };

    let mut application = ApplicationState::new(EngineState::new(config, store)?);
    if options.walk_right {
        application.input_manager.intake_control(Control::Right, true);
    }

    application.run_for(options.ticks)?;
    application.shutdown()?;

    if let Some(dir) = &options.export_dir {
        application.engine_state.export_to_dir(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_logger_init_keeps_the_first() {
        init_logging();
        assert!(!init_logging());
    }
}
