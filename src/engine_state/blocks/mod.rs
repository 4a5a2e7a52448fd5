//! # Block Module
//!
//! Blocks are the grid-aligned building material of the world: terrain,
//! trees, collectibles and anything the player places. Physical behaviour
//! (gravity, collision) is derived from the block type; per-instance state is
//! limited to position, velocity and the soft-delete flag.

use block_type::BlockType;
use cgmath::{Vector2, Zero};
use color::Color;

use super::geometry::{snap_to_grid, Aabb};

pub mod block_type;
pub mod color;

/// The underlying integer type used to represent block types in compact form.
pub type BlockTypeSize = u8;

/// A single block in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Position and extent
    pub aabb: Aabb,
    /// Material
    pub block_type: BlockType,
    /// Fill color; defaults to the type's color
    pub color: Color,
    /// Immune to gravity. Derived from the type.
    pub rigid: bool,
    /// Obstructs players and creatures. Derived from the type.
    pub collidable: bool,
    /// Can be pushed by the player
    pub movable: bool,
    /// Logically removed; compacted away on the next save
    pub destroyed: bool,
    /// Current velocity; only non-rigid or movable blocks ever move
    pub velocity: Vector2<f32>,
}

impl Block {
    /// Creates a grid-aligned block of the given type.
    ///
    /// # Arguments
    /// * `block_type` - The material of the block
    /// * `x`, `y` - Any point inside the target grid cell
    /// * `tile_size` - Grid size; also the block's width and height
    ///
    /// # Returns
    /// A new `Block` whose flags and color come from the type table.
    pub fn new(block_type: BlockType, x: f32, y: f32, tile_size: f32) -> Self {
        Self::with_geometry(
            block_type,
            Aabb::new(
                snap_to_grid(x, tile_size),
                snap_to_grid(y, tile_size),
                tile_size,
                tile_size,
            ),
            block_type.default_color(),
        )
    }

    /// Creates a block with explicit geometry and color, without snapping.
    ///
    /// Used when reconstructing persisted blocks: `rigid` and `collidable`
    /// are still re-derived from the type.
    pub fn with_geometry(block_type: BlockType, aabb: Aabb, color: Color) -> Self {
        Block {
            aabb,
            block_type,
            color,
            rigid: block_type.is_rigid(),
            collidable: block_type.is_collidable(),
            movable: false,
            destroyed: false,
            velocity: Vector2::zero(),
        }
    }

    /// Marks the block as pushable.
    pub fn into_movable(mut self) -> Self {
        self.movable = true;
        self
    }

    /// True if the block obstructs bodies right now.
    pub fn is_solid(&self) -> bool {
        self.collidable && !self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}
