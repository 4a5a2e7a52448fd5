//! # Engine Configuration
//!
//! Tunable constants for physics, terrain, creatures and the autosave.
//! Every struct deserializes with `#[serde(default)]`, so a config file only
//! needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Edge length of one grid tile in world units.
pub const TILE_SIZE: f32 = 32.0;

/// Root configuration for an [`EngineState`](super::EngineState).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the engine's random source.
    pub seed: u64,
    /// Edge length of one grid tile.
    pub tile_size: f32,
    /// Width of the visible frame.
    pub viewport_width: f32,
    /// Height of the visible frame.
    pub viewport_height: f32,
    /// Lower vertical bound of the world; blocks rest on it, bodies below it respawn.
    pub world_height: f32,
    /// Player and creature physics.
    pub physics: PhysicsConfig,
    /// Procedural terrain.
    pub terrain: TerrainConfig,
    /// Sheep behaviour.
    pub creatures: CreatureConfig,
    /// Autosave throttling.
    pub autosave: AutosaveConfig,
}

/// Physical constants applied every tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration added to vertical velocity each tick.
    pub gravity: f32,
    /// Player walking speed.
    pub move_speed: f32,
    /// Multiplier applied to `move_speed` while sprinting.
    pub sprint_multiplier: f32,
    /// Upward velocity of a jump.
    pub jump_strength: f32,
    /// Jumps allowed before touching the ground again.
    pub max_jumps: u32,
    /// Multiplicative decay of a pushed block's horizontal velocity.
    pub push_friction: f32,
    /// How far a block's bottom may sink below another block's top and still land on it.
    pub stacking_tolerance: f32,
    /// Distance below `world_height` past which a body is respawned.
    pub respawn_margin: f32,
    /// Player hitbox width.
    pub player_width: f32,
    /// Player hitbox height.
    pub player_height: f32,
    /// Where the player appears on a new world and after falling out.
    pub player_spawn: [f32; 2],
    /// Number of dirt blocks in the initial inventory.
    pub starting_dirt: u32,
}

/// Heightmap, biome and bedrock parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of generated columns.
    pub columns: usize,
    /// Highest allowed surface (smallest y), before grid alignment.
    pub min_height: f32,
    /// Lowest allowed surface (largest y), before grid alignment.
    pub max_height: f32,
    /// Scale of the random perturbation per column, in tiles.
    pub roughness: f32,
    /// Blend factor toward the perturbed height; 0 keeps the surface flat, 1 follows the walk.
    pub smoothness: f32,
    /// Per-column chance to switch to a new random biome.
    pub biome_switch_chance: f64,
    /// Rows below the surface after which everything is stone.
    pub bedrock_depth: u32,
    /// Tiles above the world floor that are always stone.
    pub floor_rows: u32,
    /// Tree placement.
    pub trees: TreeConfig,
}

/// Tree placement parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeConfig {
    /// Per-surface-tile chance outside forests.
    pub chance: f64,
    /// Per-surface-tile chance in forests.
    pub forest_chance: f64,
    /// Shortest trunk, in tiles.
    pub min_height: u32,
    /// Tallest trunk, in tiles.
    pub max_height: u32,
}

/// Sheep parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CreatureConfig {
    /// Hitbox width.
    pub width: f32,
    /// Hitbox height.
    pub height: f32,
    /// Walking speed.
    pub speed: f32,
    /// Hit points of a freshly spawned creature.
    pub health: i32,
    /// Exclusive upper bound of a random state duration, in ticks.
    pub max_state_ticks: u32,
    /// State duration forced after bumping into a world edge.
    pub edge_turn_ticks: u32,
    /// Spawn coordinate for new and fallen creatures.
    pub spawn: [f32; 2],
    /// Upper bound of the creatures spawned in a fresh world (at least one spawns).
    pub max_initial: u32,
}

/// Autosave throttling.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Whether the autosave runs at all.
    pub enabled: bool,
    /// Minimum time between writes; 0 writes on every dirty tick.
    pub interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let viewport_height = 720.0;
        EngineConfig {
            seed: 0,
            tile_size: TILE_SIZE,
            viewport_width: 1280.0,
            viewport_height,
            world_height: viewport_height,
            physics: PhysicsConfig::default(),
            terrain: TerrainConfig {
                min_height: viewport_height / 2.0,
                max_height: viewport_height - TILE_SIZE * 2.0,
                ..TerrainConfig::default()
            },
            creatures: CreatureConfig::default(),
            autosave: AutosaveConfig::default(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 0.5,
            move_speed: TILE_SIZE / 5.0,
            sprint_multiplier: 1.5,
            jump_strength: TILE_SIZE / 3.0,
            max_jumps: 1,
            push_friction: 0.9,
            stacking_tolerance: 5.0,
            respawn_margin: 10.0,
            player_width: TILE_SIZE * 1.25,
            player_height: TILE_SIZE * 2.75,
            player_spawn: [100.0, 100.0],
            starting_dirt: 10,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            columns: 150,
            min_height: 360.0,
            max_height: 720.0 - TILE_SIZE * 2.0,
            roughness: 5.0,
            smoothness: 0.6,
            biome_switch_chance: 0.1,
            bedrock_depth: 8,
            floor_rows: 2,
            trees: TreeConfig::default(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            chance: 0.05,
            forest_chance: 0.15,
            min_height: 4,
            max_height: 10,
        }
    }
}

impl Default for CreatureConfig {
    fn default() -> Self {
        CreatureConfig {
            width: 80.0,
            height: 60.0,
            speed: 2.0,
            health: 3,
            max_state_ticks: 480,
            edge_turn_ticks: 100,
            spawn: [TILE_SIZE * 2.0 - TILE_SIZE / 3.0, TILE_SIZE - TILE_SIZE / 5.0],
            max_initial: 5,
        }
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        AutosaveConfig {
            enabled: true,
            interval_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Horizontal extent of the generated terrain.
    pub fn world_width(&self) -> f32 {
        self.terrain.columns as f32 * self.tile_size
    }

    /// Rejects configurations that cannot produce a playable world.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));

        if !(self.tile_size > 0.0) {
            return invalid("tile_size must be positive");
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return invalid("viewport dimensions must be positive");
        }
        if !(self.world_height > 0.0) {
            return invalid("world_height must be positive");
        }
        if self.terrain.min_height > self.terrain.max_height {
            return invalid("terrain.min_height must not exceed terrain.max_height");
        }
        if self.terrain.max_height > self.world_height {
            return invalid("terrain.max_height must lie inside the world");
        }
        // Both bounds must admit at least one grid row.
        let lowest_row = (self.terrain.max_height / self.tile_size).floor();
        let highest_row = (self.terrain.min_height / self.tile_size).ceil();
        if highest_row > lowest_row {
            return invalid("terrain height range contains no grid row");
        }
        if !(0.0..=1.0).contains(&self.terrain.smoothness) {
            return invalid("terrain.smoothness must lie in [0, 1]");
        }
        if self.terrain.trees.min_height > self.terrain.trees.max_height {
            return invalid("trees.min_height must not exceed trees.max_height");
        }
        if self.creatures.max_state_ticks == 0 {
            return invalid("creatures.max_state_ticks must be positive");
        }
        Ok(())
    }
}
