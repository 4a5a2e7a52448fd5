//! Biomes: named surface/underground material pairs.

use crate::engine_state::blocks::block_type::BlockType;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Grassland,
    Desert,
    Mountain,
    Forest,
    Snow,
}

/// Surface and underground material of a biome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BiomeMaterials {
    pub surface: BlockType,
    pub underground: BlockType,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Grassland,
        Biome::Desert,
        Biome::Mountain,
        Biome::Forest,
        Biome::Snow,
    ];

    pub fn materials(self) -> BiomeMaterials {
        let (surface, underground) = match self {
            Biome::Grassland | Biome::Forest => (BlockType::Grass, BlockType::Dirt),
            Biome::Desert => (BlockType::Sand, BlockType::Sandstone),
            Biome::Mountain => (BlockType::Grass, BlockType::Stone),
            Biome::Snow => (BlockType::Snow, BlockType::Ice),
        };
        BiomeMaterials {
            surface,
            underground,
        }
    }

    /// Picks a biome uniformly at random.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Biome::ALL[rng.usize(..Biome::ALL.len())]
    }
}
