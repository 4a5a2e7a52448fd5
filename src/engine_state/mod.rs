//! # Engine State Module
//!
//! The core engine module that owns the world and advances it one tick at a
//! time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container and tick orchestrator
//! * `blocks` - Block data and the static material table
//! * `entities` - The player, creatures and their shared physics body
//! * `physics` - Swept collision, block stacking and the per-tick phases
//! * `terrain` - Seeded world generation
//! * `persistence` - Autosave, export and import
//! * `render_snapshot` - The renderable view handed to the host
//!
//! ## Tick Order
//!
//! Every call to [`EngineState::tick`] runs the same sequence to completion:
//!
//! 1. Queued one-shot commands are applied, converting viewport coordinates
//!    into world coordinates through the current scroll offset.
//! 2. The movement intent sets the player's velocity.
//! 3. Player physics, then block physics, then creature physics.
//! 4. The world is marked dirty and the autosave writes if it is due.
//!
//! Nothing suspends mid-tick and all state lives on one thread, so no locking
//! is involved.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::application_state::input_state::{InputCommand, InputIntent};
use crate::error::{EngineError, ImportError};
use config::EngineConfig;
use entities::{creature::Creature, player::Player};
use persistence::{
    autosave::{self, Autosave},
    format::{self, PendingImport, WorldSnapshot},
    store::KeyValueStore,
};
use physics::collision::CollisionOutcome;
use render_snapshot::RenderSnapshot;
use world::World;

pub mod blocks;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod persistence;
pub mod physics;
pub mod render_snapshot;
pub mod scroll;
pub mod terrain;
pub mod world;

/// Damage dealt by one hit on a creature.
const HIT_DAMAGE: i32 = 1;

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Ticks completed since the engine started, this one included
    pub tick: u64,
    /// Collision result for the player
    pub player: CollisionOutcome,
    /// Coins and gems picked up
    pub collected: usize,
    /// Commands that changed the world
    pub commands_applied: usize,
    /// Whether the autosave wrote this tick
    pub autosaved: bool,
}

/// The main state container for the platformer engine.
///
/// # Examples
///
/// ```
/// use platformer_engine::application_state::input_state::InputIntent;
/// use platformer_engine::engine_state::{config::EngineConfig, persistence::store::MemoryStore, EngineState};
///
/// let mut engine = EngineState::new(EngineConfig::default(), Box::new(MemoryStore::new())).unwrap();
/// let report = engine.tick(&InputIntent::default()).unwrap();
/// assert_eq!(report.tick, 1);
/// ```
pub struct EngineState {
    /// Configuration the engine was started with
    pub config: EngineConfig,
    /// The simulated world
    pub world: World,
    rng: fastrand::Rng,
    store: Box<dyn KeyValueStore>,
    autosave: Autosave,
    commands: VecDeque<InputCommand>,
    ticks: u64,
}

impl EngineState {
    /// Creates an engine, restoring the world from `store` when it holds one.
    ///
    /// # Arguments
    /// * `config` - Engine configuration; validated before anything else
    /// * `store` - Backend for the autosave
    ///
    /// # Returns
    /// The engine, or [`EngineError::InvalidConfig`] if the configuration
    /// cannot produce a playable world.
    pub fn new(config: EngineConfig, store: Box<dyn KeyValueStore>) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = fastrand::Rng::with_seed(config.seed);

        let world = match autosave::load_world(store.as_ref(), &config)? {
            Some(mut world) => {
                world.scroll.frame(world.player.aabb(), config.viewport_width);
                world
            }
            None => generate_world(&config, &mut rng),
        };

        Ok(EngineState {
            autosave: Autosave::new(&config.autosave),
            config,
            world,
            rng,
            store,
            commands: VecDeque::new(),
            ticks: 0,
        })
    }

    /// Queues a one-shot command for the start of the next tick.
    pub fn queue_command(&mut self, command: InputCommand) {
        self.commands.push_back(command);
    }

    /// Advances the world by one tick.
    ///
    /// # Arguments
    /// * `intent` - Movement requested for this tick
    ///
    /// # Returns
    /// A report of the tick, or the store error that stopped the autosave.
    pub fn tick(&mut self, intent: &InputIntent) -> Result<TickReport, EngineError> {
        let mut report = TickReport::default();

        while let Some(command) = self.commands.pop_front() {
            if self.apply_command(command)? {
                report.commands_applied += 1;
            }
        }

        self.world.player.apply_intent(intent, &self.config.physics);
        report.player = physics::update_player(&mut self.world, &self.config);
        report.collected = physics::update_blocks(&mut self.world, &self.config);
        physics::update_creatures(&mut self.world, &self.config, &mut self.rng);

        self.autosave.mark_dirty();
        report.autosaved = self
            .autosave
            .maybe_write(&mut self.world, self.store.as_mut())?;

        self.ticks += 1;
        report.tick = self.ticks;
        Ok(report)
    }

    fn apply_command(&mut self, command: InputCommand) -> Result<bool, EngineError> {
        let tile = self.config.tile_size;
        let applied = match command {
            InputCommand::PlaceBlockAt { x, y } => {
                let (x, y) = self.world.scroll.to_world(x, y);
                self.world.place_block(x, y, tile)
            }
            InputCommand::BreakBlockAt { x, y } => {
                let (x, y) = self.world.scroll.to_world(x, y);
                self.world.break_block(x, y).is_some()
            }
            InputCommand::DamageCreatureAt { x, y } => {
                let (x, y) = self.world.scroll.to_world(x, y);
                self.world.damage_creature(x, y, HIT_DAMAGE)
            }
            InputCommand::SelectInventorySlot(selection) => {
                self.world.player.inventory.select(selection);
                true
            }
            InputCommand::ResetWorld => {
                self.reset_world()?;
                true
            }
        };
        debug!("Command {:?} applied: {}", command, applied);
        Ok(applied)
    }

    /// The renderable view of the current world.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.world, self.config.viewport_width)
    }

    /// Serializes the whole world into a snapshot, compacting it first.
    pub fn export_world(&mut self) -> Result<String, EngineError> {
        self.world.compact();
        let text = serde_json::to_string_pretty(&WorldSnapshot::capture(&self.world))?;
        Ok(text)
    }

    /// Exports the world into `dir` as `world-<unix millis>.world`.
    ///
    /// # Returns
    /// The path of the written file.
    pub fn export_to_dir(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf, EngineError> {
        let text = self.export_world()?;
        std::fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(persistence::export_file_name());
        std::fs::write(&path, text)?;
        info!("Exported world to {}", path.display());
        Ok(path)
    }

    /// Parses an external snapshot without touching the running world.
    pub fn parse_import(&self, text: &str, name: &str) -> Result<PendingImport, ImportError> {
        format::parse_import(text, name, &self.config)
    }

    /// Replaces the running world with a parsed import.
    pub fn apply_import(&mut self, pending: PendingImport) {
        info!("Importing world {}", pending.summary);
        self.world = pending.world;
        self.world
            .scroll
            .frame(self.world.player.aabb(), self.config.viewport_width);
        self.autosave.mark_dirty();
    }

    /// Clears the store and replaces the world with a freshly generated one.
    pub fn reset_world(&mut self) -> Result<(), EngineError> {
        self.store.clear()?;
        self.world = generate_world(&self.config, &mut self.rng);
        self.autosave.mark_dirty();
        info!("World reset");
        Ok(())
    }

    /// Writes any unsaved changes now, regardless of the autosave interval.
    pub fn flush_autosave(&mut self) -> Result<bool, EngineError> {
        self.autosave.flush(&mut self.world, self.store.as_mut())
    }

    /// The autosave backend.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Generates terrain and the initial flock for a new world.
pub fn generate_world(config: &EngineConfig, rng: &mut fastrand::Rng) -> World {
    let terrain = terrain::generate(config, rng);

    let creatures = &config.creatures;
    let flock = if creatures.max_initial == 0 {
        0
    } else {
        rng.u32(1..=creatures.max_initial)
    };
    let flock = (0..flock)
        .map(|_| Creature::new(creatures.spawn[0], creatures.spawn[1], creatures))
        .collect();

    info!("Generated new world with seed {}", config.seed);
    World::new(terrain.blocks, flock, Player::new(config))
}
