//! Renderable view of the world.
//!
//! The engine never draws anything. Each tick a host may ask for a
//! [`RenderSnapshot`]: plain rectangles already translated into viewport
//! coordinates, laid out so they can be uploaded as GPU instance data as is.

use num_traits::FromPrimitive;

use super::blocks::{block_type::BlockType, color::Color, BlockTypeSize};
use super::geometry::Aabb;
use super::scroll::ScrollOffset;
use super::world::World;

/// Marks a rectangle that is not a block.
pub const NO_BLOCK_TYPE: u32 = u32::MAX;

const PLAYER_COLOR: Color = Color::rgb(0xe0, 0x3c, 0x31);
const CREATURE_COLOR: Color = Color::rgb(0xf2, 0xf2, 0xf2);

/// A filled rectangle in viewport space.
///
/// # Memory Layout
/// - Position: [f32; 2] (8 bytes)
/// - Size: [f32; 2] (8 bytes)
/// - Color: [f32; 4] (16 bytes)
/// - Block type: u32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderRect {
    /// Top-left corner in viewport coordinates
    pub position: [f32; 2],
    /// Width and height
    pub size: [f32; 2],
    /// Normalized RGBA
    pub color: [f32; 4],
    /// Block type index, or [`NO_BLOCK_TYPE`]
    pub block_type: u32,
}

impl RenderRect {
    fn new(aabb: &Aabb, scroll: &ScrollOffset, color: Color, block_type: u32) -> Self {
        let (x, y) = scroll.to_screen(aabb.x, aabb.y);
        RenderRect {
            position: [x, y],
            size: [aabb.width, aabb.height],
            color: color.to_rgba_f32(),
            block_type,
        }
    }

    /// The block type drawn by this rectangle, if it is a block.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockTypeSize::try_from(self.block_type)
            .ok()
            .and_then(BlockType::from_u8)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    pub player: RenderRect,
    /// Live blocks inside the horizontal span of the viewport
    pub blocks: Vec<RenderRect>,
    /// Live creatures
    pub creatures: Vec<RenderRect>,
    /// World position of the viewport's top-left corner
    pub scroll: [f32; 2],
    pub score: u32,
    pub gems: u32,
}

impl RenderSnapshot {
    /// Captures `world` as seen through a viewport `viewport_width` wide.
    pub fn capture(world: &World, viewport_width: f32) -> Self {
        let scroll = &world.scroll;
        let blocks = world
            .live_blocks()
            .filter(|block| scroll.is_horizontally_visible(&block.aabb, viewport_width))
            .map(|block| RenderRect::new(&block.aabb, scroll, block.color, block.block_type as u32))
            .collect();
        let creatures = world
            .live_creatures()
            .map(|creature| RenderRect::new(creature.aabb(), scroll, CREATURE_COLOR, NO_BLOCK_TYPE))
            .collect();

        RenderSnapshot {
            player: RenderRect::new(world.player.aabb(), scroll, PLAYER_COLOR, NO_BLOCK_TYPE),
            blocks,
            creatures,
            scroll: [scroll.horizontal(), scroll.vertical()],
            score: world.player.score,
            gems: world.player.gems,
        }
    }
}

impl Default for RenderRect {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}
