//! # Persisted Formats
//!
//! Serde models for everything the engine writes out, and the conversions
//! between them and live entities.
//!
//! ## Trust
//!
//! Persisted data is treated as untrusted. `rigid` and `collidable` are never
//! read back; they are re-derived from the block type through the type table.
//! Unknown type names and unparseable colors are logged and skipped or
//! replaced by the type's default. Only the shape checks of an explicit
//! import (`blocks` and `player` present) are hard failures.
//!
//! ## Snapshot Layout
//!
//! ```json
//! {
//!   "blocks":  [{ "x": 0, "y": 640, "width": 32, "height": 32,
//!                 "color": "#525252", "type": "stone" }],
//!   "animals": [{ "x": 640, "y": 100 }],
//!   "player":  { "pos": { "x": 100, "y": 100 }, "score": 0, "gems": 0,
//!                "inventory": { "dirt": 10 } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine_state::blocks::{block_type::BlockType, color::Color, Block};
use crate::engine_state::config::EngineConfig;
use crate::engine_state::entities::{creature::Creature, inventory::Inventory, player::Player};
use crate::engine_state::geometry::Aabb;
use crate::engine_state::world::World;
use crate::error::ImportError;

/// A block as written to storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub destroyed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub movable: bool,
}

impl PersistedBlock {
    pub fn from_block(block: &Block) -> Self {
        PersistedBlock {
            x: block.aabb.x,
            y: block.aabb.y,
            width: block.aabb.width,
            height: block.aabb.height,
            color: Some(block.color.to_string()),
            block_type: block.block_type.name().to_string(),
            destroyed: block.destroyed,
            movable: block.movable,
        }
    }

    /// Rebuilds the live block, or `None` if the type is unknown.
    pub fn to_block(&self) -> Option<Block> {
        let Some(block_type) = BlockType::from_name(&self.block_type) else {
            warn!("Skipping persisted block of unknown type `{}`", self.block_type);
            return None;
        };

        let color = match self.color.as_deref().map(|hex| (hex, Color::parse(hex))) {
            Some((_, Some(color))) => color,
            Some((hex, None)) => {
                warn!("Replacing unparseable color `{}` on {} block", hex, block_type);
                block_type.default_color()
            }
            None => block_type.default_color(),
        };

        let mut block = Block::with_geometry(
            block_type,
            Aabb::new(self.x, self.y, self.width, self.height),
            color,
        );
        block.movable = self.movable;
        block.destroyed = self.destroyed;
        Some(block)
    }
}

/// A creature as written to storage. Only the position survives; behaviour
/// restarts from the neutral state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedCreature {
    pub x: f32,
    pub y: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// The autosaved player record: position and score.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub score: u32,
}

/// The player section of an exported snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPlayer {
    #[serde(default)]
    pub pos: Option<Position>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub gems: u32,
    #[serde(default)]
    pub inventory: Option<BTreeMap<String, u32>>,
}

/// A complete, self-describing world export.
///
/// Every section is optional on the way in so a missing one can be reported
/// as such instead of as a generic parse failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    #[serde(default)]
    pub blocks: Option<Vec<PersistedBlock>>,
    #[serde(default)]
    pub animals: Option<Vec<PersistedCreature>>,
    #[serde(default)]
    pub player: Option<SnapshotPlayer>,
}

impl WorldSnapshot {
    /// Captures the live part of `world`. Soft-deleted entities are left out.
    pub fn capture(world: &World) -> Self {
        let player = &world.player;
        WorldSnapshot {
            blocks: Some(persist_blocks(world)),
            animals: Some(persist_creatures(world)),
            player: Some(SnapshotPlayer {
                pos: Some(Position {
                    x: player.body.aabb.x,
                    y: player.body.aabb.y,
                }),
                score: player.score,
                gems: player.gems,
                inventory: Some(player.inventory.to_persisted()),
            }),
        }
    }
}

/// Live blocks in persisted form.
pub fn persist_blocks(world: &World) -> Vec<PersistedBlock> {
    world.live_blocks().map(PersistedBlock::from_block).collect()
}

/// Live creatures in persisted form.
pub fn persist_creatures(world: &World) -> Vec<PersistedCreature> {
    world
        .live_creatures()
        .map(|creature| PersistedCreature {
            x: creature.body.aabb.x,
            y: creature.body.aabb.y,
        })
        .collect()
}

/// Rebuilds live blocks, dropping unknown types and blocks stored as destroyed.
pub fn restore_blocks(persisted: &[PersistedBlock]) -> Vec<Block> {
    persisted
        .iter()
        .filter_map(PersistedBlock::to_block)
        .filter(|block| !block.destroyed)
        .collect()
}

pub fn restore_creatures(persisted: &[PersistedCreature], config: &EngineConfig) -> Vec<Creature> {
    persisted
        .iter()
        .map(|creature| Creature::new(creature.x, creature.y, &config.creatures))
        .collect()
}

/// What an import would load, for the host to show before committing.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportSummary {
    /// Name the snapshot was supplied under, usually its file name
    pub name: String,
    pub blocks: usize,
    pub creatures: usize,
    pub player_position: (f32, f32),
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} blocks, {} creatures, player at ({:.0}, {:.0})",
            self.name,
            self.blocks,
            self.creatures,
            self.player_position.0,
            self.player_position.1
        )
    }
}

/// A parsed and validated import, not yet applied.
#[derive(Clone, Debug)]
pub struct PendingImport {
    pub summary: ImportSummary,
    pub(crate) world: World,
}

/// Parses an externally supplied snapshot.
///
/// # Arguments
/// * `text` - The snapshot JSON
/// * `name` - Where it came from; used in the summary
/// * `config` - Supplies creature stats and the default spawn point
///
/// # Returns
/// The world the snapshot describes, or why it was rejected. Missing
/// `animals`, `player.pos` and `player.inventory` fall back to no creatures,
/// the spawn point and an empty inventory.
pub fn parse_import(
    text: &str,
    name: &str,
    config: &EngineConfig,
) -> Result<PendingImport, ImportError> {
    let snapshot: WorldSnapshot = serde_json::from_str(text)?;
    let blocks = snapshot.blocks.ok_or(ImportError::MissingBlocks)?;
    let player_section = snapshot.player.ok_or(ImportError::MissingPlayer)?;

    let mut player = Player::new(config);
    let position = player_section.pos.unwrap_or_else(|| {
        warn!("Snapshot `{}` has no player position; using spawn", name);
        Position {
            x: config.physics.player_spawn[0],
            y: config.physics.player_spawn[1],
        }
    });
    player.body.aabb.x = position.x;
    player.body.aabb.y = position.y;
    player.score = player_section.score;
    player.gems = player_section.gems;
    player.inventory = player_section
        .inventory
        .as_ref()
        .map_or_else(Inventory::empty, Inventory::from_persisted);

    let world = World::new(
        restore_blocks(&blocks),
        restore_creatures(&snapshot.animals.unwrap_or_default(), config),
        player,
    );

    Ok(PendingImport {
        summary: ImportSummary {
            name: name.to_string(),
            blocks: world.blocks.len(),
            creatures: world.creatures.len(),
            player_position: (position.x, position.y),
        },
        world,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn minimal_snapshot_imports_empty_world() {
        let text = r#"{"blocks": [], "player": {"pos": {"x": 10, "y": 20}}}"#;
        let pending = parse_import(text, "tiny.world", &config()).unwrap();

        assert_eq!(pending.summary.blocks, 0);
        assert_eq!(pending.summary.creatures, 0);
        assert_eq!(pending.world.player.body.aabb.x, 10.0);
        assert_eq!(pending.world.player.body.aabb.y, 20.0);
        assert!(pending.world.player.inventory.iter().all(|(_, n)| n == 0));
        assert_eq!(pending.world.player.inventory.selected(), BlockType::Dirt);
    }

    #[rstest]
    #[case(r#"{"player": {"pos": {"x": 1, "y": 2}}}"#, "blocks")]
    #[case(r#"{"blocks": []}"#, "player")]
    #[case(r#"{"blocks": 3, "player": {}}"#, "JSON")]
    #[case("not json", "JSON")]
    fn invalid_snapshots_are_rejected(#[case] text: &str, #[case] mentions: &str) {
        let error = parse_import(text, "bad", &config()).unwrap_err();
        assert!(error.to_string().contains(mentions), "{error}");
    }

    #[test]
    fn missing_position_falls_back_to_spawn() {
        let pending = parse_import(r#"{"blocks": [], "player": {}}"#, "x", &config()).unwrap();
        assert_eq!(pending.summary.player_position, (100.0, 100.0));
    }

    #[test]
    fn flags_come_from_the_type_table() {
        let text = r##"{
            "blocks": [
                {"x": 0, "y": 0, "width": 32, "height": 32, "type": "wood",
                 "color": "#zzzzzz", "rigid": false, "collidable": true},
                {"x": 32, "y": 0, "width": 32, "height": 32, "type": "unobtainium"},
                {"x": 64, "y": 0, "width": 32, "height": 32, "type": "stone", "destroyed": true}
            ],
            "player": {}
        }"##;
        let pending = parse_import(text, "forged", &config()).unwrap();

        assert_eq!(pending.world.blocks.len(), 1);
        let wood = &pending.world.blocks[0];
        assert!(wood.rigid);
        assert!(!wood.collidable);
        assert_eq!(wood.color, BlockType::Wood.default_color());
    }

    #[test]
    fn capture_skips_soft_deleted_entities() {
        let config = config();
        let mut world = World::new(
            vec![
                Block::new(BlockType::Stone, 0.0, 0.0, 32.0),
                Block::new(BlockType::Grass, 32.0, 0.0, 32.0),
            ],
            vec![Creature::new(5.0, 6.0, &config.creatures)],
            Player::new(&config),
        );
        world.blocks[1].destroy();
        world.creatures[0].kill();

        let snapshot = WorldSnapshot::capture(&world);
        let blocks = snapshot.blocks.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, "stone");
        assert_eq!(blocks[0].color.as_deref(), Some("#525252"));
        assert!(snapshot.animals.unwrap().is_empty());
    }
}
