//! Tree placement on generated surface tiles.

use crate::engine_state::blocks::{block_type::BlockType, Block};
use crate::engine_state::config::TreeConfig;

use super::{biome::Biome, SurfaceTile};

/// Grows trees on a random subset of `surface`.
///
/// Each tile independently sprouts a tree with the chance of its biome. A tree
/// is a trunk of wood blocks rising from the tile, topped by a 3x3 leaf canopy
/// centred on the highest trunk block. Neither wood nor leaves obstruct
/// movement.
pub fn grow_trees(
    surface: &[SurfaceTile],
    config: &TreeConfig,
    tile_size: f32,
    rng: &mut fastrand::Rng,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    for tile in surface {
        let chance = if tile.biome == Biome::Forest {
            config.forest_chance
        } else {
            config.chance
        };
        if rng.f64() >= chance {
            continue;
        }

        let height = rng.u32(config.min_height..=config.max_height);
        for level in 1..=height {
            blocks.push(Block::new(
                BlockType::Wood,
                tile.x,
                tile.y - level as f32 * tile_size,
                tile_size,
            ));
        }

        let crown_y = tile.y - height as f32 * tile_size;
        for dy in -1..=1 {
            for dx in -1..=1 {
                blocks.push(Block::new(
                    BlockType::Leaf,
                    tile.x + dx as f32 * tile_size,
                    crown_y + dy as f32 * tile_size,
                    tile_size,
                ));
            }
        }
    }

    blocks
}
