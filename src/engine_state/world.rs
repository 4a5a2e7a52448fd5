//! # World Module
//!
//! This module provides the `World` struct, the single owner of all simulated
//! state: blocks, creatures, the player and the scroll offset.
//!
//! ## Soft Deletion
//!
//! Blocks and creatures are never removed while a tick is scanning them.
//! Breaking a block sets `destroyed`, killing a creature sets `killed`; both
//! are skipped by every later scan and physically removed by [`World::compact`],
//! which runs whenever the world is saved or exported.
//!
//! ## Coordinates
//!
//! All positions here are world coordinates. Conversions from viewport
//! coordinates happen at the command boundary in
//! [`EngineState`](super::EngineState).

use log::debug;

use super::blocks::{block_type::BlockType, Block};
use super::entities::{creature::Creature, player::Player};
use super::geometry::{snap_to_grid, Aabb};
use super::scroll::ScrollOffset;

/// The complete simulated state of one game session.
///
/// # Examples
///
/// ```
/// use platformer_engine::engine_state::{config::EngineConfig, entities::player::Player, world::World};
///
/// let config = EngineConfig::default();
/// let mut world = World::new(Vec::new(), Vec::new(), Player::new(&config));
/// assert!(world.place_block(200.0, 200.0, config.tile_size));
/// assert_eq!(world.live_blocks().count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct World {
    /// Every block, including soft-deleted ones awaiting compaction.
    /// Order carries no meaning.
    pub blocks: Vec<Block>,
    /// Every creature, including killed ones awaiting compaction.
    pub creatures: Vec<Creature>,
    /// The player
    pub player: Player,
    /// The camera over the world
    pub scroll: ScrollOffset,
}

impl World {
    /// Creates a world from its parts with the camera at the origin.
    pub fn new(blocks: Vec<Block>, creatures: Vec<Creature>, player: Player) -> Self {
        World {
            blocks,
            creatures,
            player,
            scroll: ScrollOffset::default(),
        }
    }

    /// Blocks that still exist.
    pub fn live_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|block| !block.destroyed)
    }

    /// Creatures that are still alive.
    pub fn live_creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter().filter(|creature| !creature.killed)
    }

    /// Physically removes destroyed blocks and killed creatures.
    ///
    /// # Returns
    /// The number of entries removed.
    pub fn compact(&mut self) -> usize {
        let before = self.blocks.len() + self.creatures.len();
        self.blocks.retain(|block| !block.destroyed);
        self.creatures.retain(|creature| !creature.killed);
        let removed = before - self.blocks.len() - self.creatures.len();
        if removed > 0 {
            debug!("Compacted {} soft-deleted entities", removed);
        }
        removed
    }

    /// Places one block of the selected inventory type at the grid cell containing `(x, y)`.
    ///
    /// This is a no-op when the selected stock is empty, or when the cell
    /// overlaps the player or an existing collidable block.
    ///
    /// # Returns
    /// `true` if a block was placed and the stock decremented.
    pub fn place_block(&mut self, x: f32, y: f32, tile_size: f32) -> bool {
        let block_type = self.player.inventory.selected();
        if self.player.inventory.count(block_type) == 0 {
            return false;
        }

        let cell = Aabb::new(
            snap_to_grid(x, tile_size),
            snap_to_grid(y, tile_size),
            tile_size,
            tile_size,
        );
        let occupied = cell.overlaps(self.player.aabb())
            || self
                .blocks
                .iter()
                .any(|block| block.is_solid() && block.aabb.overlaps(&cell));
        if occupied {
            return false;
        }

        self.player.inventory.take(block_type);
        self.blocks
            .push(Block::with_geometry(block_type, cell, block_type.default_color()));
        true
    }

    /// Breaks the first live block containing `(x, y)` and adds it to the inventory.
    ///
    /// # Returns
    /// The type of the broken block, if any.
    pub fn break_block(&mut self, x: f32, y: f32) -> Option<BlockType> {
        let block = self
            .blocks
            .iter_mut()
            .find(|block| !block.destroyed && block.aabb.contains_point(x, y))?;
        block.destroy();
        let block_type = block.block_type;
        self.player.inventory.add(block_type);
        Some(block_type)
    }

    /// Deals one point of damage to the first live creature containing `(x, y)`.
    ///
    /// # Returns
    /// `true` if a creature was hit.
    pub fn damage_creature(&mut self, x: f32, y: f32, amount: i32) -> bool {
        match self
            .creatures
            .iter_mut()
            .find(|creature| !creature.killed && creature.aabb().contains_point(x, y))
        {
            Some(creature) => {
                creature.damage(amount);
                true
            }
            None => false,
        }
    }
}
