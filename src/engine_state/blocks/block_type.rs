//! # Block Type Module
//!
//! This module defines the materials a block can be made of, together with
//! the static table of per-material properties (color, gravity, collision,
//! interaction) and the name lookup used when reading persisted worlds.

use std::fmt;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::BlockTypeSize;

/// Enumerates all block materials.
///
/// The declaration order is also the inventory slot order.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Loose sand; falls under gravity.
    Sand,
    /// Loose dirt; falls under gravity. The starting inventory stock.
    Dirt,
    /// Static stone, also the universal bedrock.
    Stone,
    /// Static grass surface.
    Grass,
    /// Tree trunk; decorative, never obstructs movement.
    Wood,
    /// Collectible coin; falls under gravity, adds to score on pickup.
    Coin,
    /// Collectible gem; adds to the gem count on pickup.
    Gem,
    /// Tree canopy; decorative, never obstructs movement.
    Leaf,
    /// Static snow surface.
    Snow,
    /// Static ice.
    Ice,
    /// Static sandstone.
    Sandstone,
}

/// Static properties shared by every block of one type.
#[derive(Copy, Clone, Debug)]
pub struct BlockProperties {
    /// Persisted name of the type
    pub name: &'static str,
    /// Default fill color
    pub color: Color,
    /// Rigid blocks ignore gravity
    pub rigid: bool,
    /// Collidable blocks obstruct players and creatures
    pub collidable: bool,
    /// Interactable blocks are collected when the player touches them
    pub interactable: bool,
}

const fn props(
    name: &'static str,
    color: Color,
    rigid: bool,
    collidable: bool,
    interactable: bool,
) -> BlockProperties {
    BlockProperties {
        name,
        color,
        rigid,
        collidable,
        interactable,
    }
}

/// Properties indexed by `BlockType as usize`.
pub static BLOCK_PROPERTIES: [BlockProperties; BlockType::COUNT] = [
    props("sand", Color::rgb(0xd4, 0x9e, 0x15), false, true, false),
    props("dirt", Color::rgb(0x33, 0x0c, 0x06), false, true, false),
    props("stone", Color::rgb(0x52, 0x52, 0x52), true, true, false),
    props("grass", Color::rgb(0x54, 0x8a, 0x2d), true, true, false),
    props("wood", Color::rgb(0x5c, 0x2d, 0x22), true, false, false),
    props("coin", Color::rgb(0xf7, 0xc3, 0x40), false, false, true),
    props("gem", Color::rgb(0x4d, 0xf0, 0xff), true, false, true),
    props("leaf", Color::rgb(0x54, 0x8a, 0x2d), true, false, false),
    props("snow", Color::rgb(0xff, 0xff, 0xff), true, true, false),
    props("ice", Color::rgb(0xad, 0xd8, 0xe6), true, true, false),
    props("sandstone", Color::rgb(0xc4, 0xa4, 0x84), true, true, false),
];

/// Persisted name to type. Anything not listed here is rejected on load.
static BLOCK_TYPE_NAMES: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "sand" => BlockType::Sand,
    "dirt" => BlockType::Dirt,
    "stone" => BlockType::Stone,
    "grass" => BlockType::Grass,
    "wood" => BlockType::Wood,
    "coin" => BlockType::Coin,
    "gem" => BlockType::Gem,
    "leaf" => BlockType::Leaf,
    "snow" => BlockType::Snow,
    "ice" => BlockType::Ice,
    "sandstone" => BlockType::Sandstone,
};

impl BlockType {
    /// Number of block types.
    pub const COUNT: usize = 11;

    /// Every block type in declaration order.
    pub const ALL: [BlockType; BlockType::COUNT] = [
        BlockType::Sand,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Grass,
        BlockType::Wood,
        BlockType::Coin,
        BlockType::Gem,
        BlockType::Leaf,
        BlockType::Snow,
        BlockType::Ice,
        BlockType::Sandstone,
    ];

    /// The static properties of this type.
    pub fn properties(self) -> &'static BlockProperties {
        &BLOCK_PROPERTIES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.properties().name
    }

    pub fn is_rigid(self) -> bool {
        self.properties().rigid
    }

    pub fn is_collidable(self) -> bool {
        self.properties().collidable
    }

    pub fn is_interactable(self) -> bool {
        self.properties().interactable
    }

    pub fn default_color(self) -> Color {
        self.properties().color
    }

    /// Looks up a type by its persisted name.
    ///
    /// # Returns
    /// `None` for unknown names, so stale or forged data can be skipped.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPE_NAMES.get(name).copied()
    }

    /// Converts a compact index back into a type.
    ///
    /// # Returns
    /// `None` if `index` is out of range.
    pub fn from_index(index: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(index)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
