//! # Autosave
//!
//! Keeps a [`KeyValueStore`] in step with the running world.
//!
//! The world is written under five independent keys:
//!
//! | key         | value                                 |
//! |-------------|---------------------------------------|
//! | `objects`   | list of live blocks                   |
//! | `animals`   | list of live creature positions       |
//! | `player`    | `{x, y, score}`                       |
//! | `inventory` | block name to count                   |
//! | `gems`      | gem count                             |
//!
//! Writes are debounced. Anything that changes the world marks the autosave
//! dirty, and a dirty world is written at most once per `interval_ms`. An
//! interval of zero writes on every dirty tick. [`Autosave::flush`] writes a
//! dirty world immediately, so the latest state can always be made durable
//! before shutdown.

use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use web_time::Instant;

use crate::engine_state::config::{AutosaveConfig, EngineConfig};
use crate::engine_state::entities::{inventory::Inventory, player::Player};
use crate::engine_state::world::World;
use crate::error::EngineError;

use super::format::{
    persist_blocks, persist_creatures, restore_blocks, restore_creatures, PersistedBlock,
    PersistedCreature, PlayerRecord,
};
use super::store::KeyValueStore;

pub const OBJECTS_KEY: &str = "objects";
pub const ANIMALS_KEY: &str = "animals";
pub const PLAYER_KEY: &str = "player";
pub const INVENTORY_KEY: &str = "inventory";
pub const GEMS_KEY: &str = "gems";

/// Debounced writer of the world into a store.
#[derive(Clone, Debug)]
pub struct Autosave {
    enabled: bool,
    interval: Duration,
    dirty: bool,
    last_write: Option<Instant>,
}

impl Autosave {
    pub fn new(config: &AutosaveConfig) -> Self {
        Autosave {
            enabled: config.enabled,
            interval: Duration::from_millis(config.interval_ms),
            dirty: false,
            last_write: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the world if it is dirty and the interval has elapsed.
    ///
    /// # Returns
    /// `true` if a write happened.
    pub fn maybe_write(
        &mut self,
        world: &mut World,
        store: &mut dyn KeyValueStore,
    ) -> Result<bool, EngineError> {
        let due = self
            .last_write
            .map_or(true, |last| last.elapsed() >= self.interval);
        if !due {
            return Ok(false);
        }
        self.flush(world, store)
    }

    /// Writes the world now if it is dirty, ignoring the interval.
    ///
    /// # Returns
    /// `true` if a write happened.
    pub fn flush(
        &mut self,
        world: &mut World,
        store: &mut dyn KeyValueStore,
    ) -> Result<bool, EngineError> {
        if !self.enabled || !self.dirty {
            return Ok(false);
        }
        write_world(world, store)?;
        self.dirty = false;
        self.last_write = Some(Instant::now());
        Ok(true)
    }
}

/// Compacts `world` and writes all five keys.
pub fn write_world(world: &mut World, store: &mut dyn KeyValueStore) -> Result<(), EngineError> {
    world.compact();

    let player = &world.player;
    let record = PlayerRecord {
        x: player.body.aabb.x,
        y: player.body.aabb.y,
        score: player.score,
    };

    store.set(OBJECTS_KEY, &serde_json::to_string(&persist_blocks(world))?)?;
    store.set(ANIMALS_KEY, &serde_json::to_string(&persist_creatures(world))?)?;
    store.set(PLAYER_KEY, &serde_json::to_string(&record)?)?;
    store.set(
        INVENTORY_KEY,
        &serde_json::to_string(&player.inventory.to_persisted())?,
    )?;
    store.set(GEMS_KEY, &serde_json::to_string(&player.gems)?)?;

    debug!(
        "Autosaved {} blocks and {} creatures",
        world.blocks.len(),
        world.creatures.len()
    );
    Ok(())
}

/// Rebuilds a world from the store.
///
/// # Returns
/// `None` when there is no usable block list, in which case a fresh world
/// should be generated. Every other key falls back to its default when
/// absent or malformed.
pub fn load_world(
    store: &dyn KeyValueStore,
    config: &EngineConfig,
) -> Result<Option<World>, EngineError> {
    let Some(blocks) = read_key::<Vec<PersistedBlock>>(store, OBJECTS_KEY)? else {
        return Ok(None);
    };
    let creatures: Vec<PersistedCreature> = read_key(store, ANIMALS_KEY)?.unwrap_or_default();

    let mut player = Player::new(config);
    match read_key::<PlayerRecord>(store, PLAYER_KEY)? {
        Some(record) => {
            player.body.aabb.x = record.x;
            player.body.aabb.y = record.y;
            player.score = record.score;
        }
        None => debug!("No saved player record; using spawn"),
    }
    player.inventory = read_key(store, INVENTORY_KEY)?
        .map_or_else(Inventory::empty, |map| Inventory::from_persisted(&map));
    player.gems = read_key(store, GEMS_KEY)?.unwrap_or(0);

    let world = World::new(
        restore_blocks(&blocks),
        restore_creatures(&creatures, config),
        player,
    );
    info!(
        "Loaded saved world: {} blocks, {} creatures",
        world.blocks.len(),
        world.creatures.len()
    );
    Ok(Some(world))
}

/// Reads and decodes one key. Malformed values are logged and treated as absent.
fn read_key<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, EngineError> {
    let Some(text) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&text) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            warn!("Discarding malformed saved `{}`: {}", key, error);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::blocks::{block_type::BlockType, Block};
    use crate::engine_state::entities::creature::Creature;
    use crate::engine_state::persistence::store::MemoryStore;

    fn sample_world(config: &EngineConfig) -> World {
        let mut player = Player::new(config);
        player.body.aabb.x = 320.0;
        player.score = 4;
        player.gems = 2;
        player.inventory.add(BlockType::Stone);
        World::new(
            vec![
                Block::new(BlockType::Stone, 0.0, 640.0, 32.0),
                Block::new(BlockType::Sand, 32.0, 640.0, 32.0),
            ],
            vec![Creature::new(640.0, 100.0, &config.creatures)],
            player,
        )
    }

    #[test]
    fn saved_world_loads_back() {
        let config = EngineConfig::default();
        let mut world = sample_world(&config);
        world.blocks[1].destroy();
        let mut store = MemoryStore::new();

        write_world(&mut world, &mut store).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(world.blocks.len(), 1);

        let loaded = load_world(&store, &config).unwrap().unwrap();
        assert_eq!(loaded.blocks, world.blocks);
        assert_eq!(loaded.creatures.len(), 1);
        assert_eq!(loaded.player.body.aabb.x, 320.0);
        assert_eq!(loaded.player.score, 4);
        assert_eq!(loaded.player.gems, 2);
        assert_eq!(loaded.player.inventory.count(BlockType::Stone), 1);
        assert_eq!(loaded.player.inventory.count(BlockType::Dirt), 10);
    }

    #[test]
    fn empty_store_means_fresh_world() {
        let store = MemoryStore::new();
        assert!(load_world(&store, &EngineConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn malformed_keys_fall_back_to_defaults() {
        let config = EngineConfig::default();
        let mut store = MemoryStore::new();
        store.set(OBJECTS_KEY, "[]").unwrap();
        store.set(PLAYER_KEY, "{\"x\": \"left\"}").unwrap();
        store.set(INVENTORY_KEY, "[1, 2]").unwrap();
        store.set(GEMS_KEY, "many").unwrap();

        let loaded = load_world(&store, &config).unwrap().unwrap();
        assert_eq!(loaded.player.body.aabb.x, config.physics.player_spawn[0]);
        assert_eq!(loaded.player.gems, 0);
        assert_eq!(loaded.player.inventory.count(BlockType::Dirt), 0);
    }

    #[test]
    fn writes_are_debounced_until_flushed() {
        let config = EngineConfig::default();
        let mut world = sample_world(&config);
        let mut store = MemoryStore::new();
        let mut autosave = Autosave::new(&AutosaveConfig {
            enabled: true,
            interval_ms: 60_000,
        });

        assert!(!autosave.maybe_write(&mut world, &mut store).unwrap());
        autosave.mark_dirty();
        assert!(autosave.maybe_write(&mut world, &mut store).unwrap());
        assert!(!autosave.is_dirty());

        autosave.mark_dirty();
        assert!(!autosave.maybe_write(&mut world, &mut store).unwrap());
        assert!(autosave.flush(&mut world, &mut store).unwrap());
    }

    #[test]
    fn disabled_autosave_never_writes() {
        let config = EngineConfig::default();
        let mut world = sample_world(&config);
        let mut store = MemoryStore::new();
        let mut autosave = Autosave::new(&AutosaveConfig {
            enabled: false,
            interval_ms: 0,
        });
        autosave.mark_dirty();
        assert!(!autosave.flush(&mut world, &mut store).unwrap());
        assert!(store.is_empty());
    }
}
